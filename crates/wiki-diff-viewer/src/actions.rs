//! Actions
//!
//! Everything that can happen to a mounted revision list. Actions are
//! tagged by the part of the state they concern.

use crate::payload::DiffPayload;
use crate::state::{RequestId, SelectionIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Selection(SelectionAction),
    Fetch(FetchAction),
    ArticleDetails(ArticleDetailsAction),
    /// The list is unmounted; abort in-flight work
    Teardown,
}

/// User-facing navigation, translated by the selection middleware into a
/// single [`SelectionAction::SetSelectedIndex`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    Show(usize),
    Hide,
    ShowPrevious(usize),
    ShowNext(usize),
    /// The only write to the selection index
    SetSelectedIndex(SelectionIndex),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchAction {
    /// Issue the diff request of a viewer (no-op once initiated)
    Initiate(usize),
    Loaded {
        index: usize,
        request: RequestId,
        payload: DiffPayload,
    },
    Failed {
        index: usize,
        request: RequestId,
        error: String,
    },
    /// Issue one new request for a viewer whose request failed
    Retry(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleDetailsAction {
    /// Editors lookup started
    Requested,
    EditorsLoaded(Vec<String>),
}

impl Action {
    pub fn show(index: usize) -> Self {
        Action::Selection(SelectionAction::Show(index))
    }

    pub fn hide() -> Self {
        Action::Selection(SelectionAction::Hide)
    }

    pub fn show_previous(index: usize) -> Self {
        Action::Selection(SelectionAction::ShowPrevious(index))
    }

    pub fn show_next(index: usize) -> Self {
        Action::Selection(SelectionAction::ShowNext(index))
    }

    pub fn retry(index: usize) -> Self {
        Action::Fetch(FetchAction::Retry(index))
    }
}
