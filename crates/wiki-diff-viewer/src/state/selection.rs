//! Selection State
//!
//! Which item of the revision list is currently expanded.

/// Position of the expanded item, or none
///
/// Callers that speak the `-1 = nothing selected` convention can convert
/// with [`SelectionIndex::from_raw`] and [`SelectionIndex::as_raw`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionIndex(Option<usize>);

impl SelectionIndex {
    /// Nothing expanded
    pub const NONE: SelectionIndex = SelectionIndex(None);

    pub fn selected(index: usize) -> Self {
        Self(Some(index))
    }

    /// Convert from the raw convention; any negative value means none
    pub fn from_raw(raw: i64) -> Self {
        Self(usize::try_from(raw).ok())
    }

    pub fn as_raw(&self) -> i64 {
        self.0
            .and_then(|index| i64::try_from(index).ok())
            .unwrap_or(-1)
    }

    pub fn index(&self) -> Option<usize> {
        self.0
    }

    pub fn is(&self, index: usize) -> bool {
        self.0 == Some(index)
    }
}
