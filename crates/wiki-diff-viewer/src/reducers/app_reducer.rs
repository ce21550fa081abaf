use crate::actions::Action;
use crate::reducers::{editors_reducer, fetch_reducer, selection_reducer};
use crate::state::AppState;

/// Reducer - pure function that produces new state from current state + action
/// This is the root reducer that orchestrates all sub-reducers
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::Teardown => {
            log::info!("Tearing down diff list of '{}'", state.article.title);
            state.torn_down = true;
            for viewer in &mut state.viewers {
                viewer.fetch.cancel();
            }
            state
        }
        Action::Selection(action) => {
            state.selection = selection_reducer::reduce(state.selection, action, state.len());
            state
        }
        Action::Fetch(action) => fetch_reducer::reduce(state, action),
        Action::ArticleDetails(action) => {
            state.editors = editors_reducer::reduce(state.editors, action);
            state
        }
    }
}
