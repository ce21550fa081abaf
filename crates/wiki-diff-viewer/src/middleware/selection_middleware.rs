//! Selection Middleware
//!
//! Translates show/hide/previous/next into `SetSelectedIndex`, the single
//! write to the selection index. Navigation past either end of the list is
//! consumed without dispatching anything.

use crate::actions::{Action, SelectionAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, SelectionIndex};

pub struct SelectionMiddleware;

impl SelectionMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SelectionMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for SelectionMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        let Action::Selection(selection) = action else {
            return true;
        };

        let next = match selection {
            SelectionAction::Show(index) => Some(SelectionIndex::selected(*index)),
            SelectionAction::Hide => Some(SelectionIndex::NONE),
            SelectionAction::ShowPrevious(index) => {
                if *index == 0 {
                    log::debug!("SelectionMiddleware: already at the first item");
                    None
                } else {
                    Some(SelectionIndex::selected(index - 1))
                }
            }
            SelectionAction::ShowNext(index) => {
                if index + 1 >= state.len() {
                    log::debug!("SelectionMiddleware: already at the last item");
                    None
                } else {
                    Some(SelectionIndex::selected(index + 1))
                }
            }
            // Let reducer handle
            SelectionAction::SetSelectedIndex(_) => return true,
        };

        if let Some(next) = next {
            dispatcher.dispatch(Action::Selection(SelectionAction::SetSelectedIndex(next)));
        }
        false
    }
}
