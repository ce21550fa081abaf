//! Editors State
//!
//! The article's contributing editors are a prerequisite for showing a diff
//! panel. They are either supplied up front or fetched once on demand.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorsState {
    /// Not supplied and not requested yet
    #[default]
    Missing,
    /// Lookup in flight
    Requested,
    /// Editors known (possibly empty)
    Ready(Vec<String>),
}

impl EditorsState {
    pub fn from_supplied(editors: Option<Vec<String>>) -> Self {
        match editors {
            Some(editors) => Self::Ready(editors),
            None => Self::Missing,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn names(&self) -> Option<&[String]> {
        match self {
            Self::Ready(editors) => Some(editors),
            _ => None,
        }
    }
}
