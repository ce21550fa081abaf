use crate::actions::FetchAction;
use crate::state::AppState;

/// Reducer for per-viewer fetch state
///
/// `Initiate` records the request id and resolved parent in the same step
/// the diff fetch middleware issues the request. Results are applied only
/// when they belong to the viewer's currently issued request.
pub fn reduce(mut state: AppState, action: &FetchAction) -> AppState {
    match action {
        FetchAction::Initiate(index) => {
            if state.torn_down {
                return state;
            }
            let request = state.peek_request_id();
            let mode = state.parent_resolution;
            if let Some(viewer) = state.viewers.get_mut(*index) {
                if !viewer.fetch.diff_fetch_initiated {
                    let plan = viewer.fetch_plan(mode);
                    viewer.fetch.begin(request, plan.parent_revision_id);
                    state.next_request_id += 1;
                    log::debug!("Viewer {} issued {:?}", index, request);
                }
            }
        }
        FetchAction::Loaded {
            index,
            request,
            payload,
        } => {
            if let Some(viewer) = state.viewers.get_mut(*index) {
                if viewer.fetch.settle_loaded(*request, payload) {
                    log::debug!("Viewer {} fetched diff", index);
                } else {
                    log::debug!("Ignoring stale response {:?} for viewer {}", request, index);
                }
            }
        }
        FetchAction::Failed {
            index,
            request,
            error,
        } => {
            if let Some(viewer) = state.viewers.get_mut(*index) {
                if viewer.fetch.settle_failed(*request, error) {
                    log::warn!("Diff fetch for viewer {} failed: {}", index, error);
                } else {
                    log::debug!("Ignoring stale failure {:?} for viewer {}", request, index);
                }
            }
        }
        FetchAction::Retry(index) => {
            if let Some(viewer) = state.viewers.get_mut(*index) {
                if !viewer.fetch.reset_for_retry() {
                    log::debug!("Viewer {} has nothing to retry", index);
                }
            }
        }
    }
    state
}
