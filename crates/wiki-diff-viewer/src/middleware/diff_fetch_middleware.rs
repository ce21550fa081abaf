//! Diff Fetch Middleware
//!
//! Issues the diff request of the selected viewer and reports the parsed
//! response back to the store:
//! - `SetSelectedIndex(Some(i))` initiates viewer `i` unless it has fetched
//!   or is already waiting, and only once the article's editors are known
//! - `EditorsLoaded` re-evaluates the selected viewer
//! - `Retry(i)` initiates a failed viewer again
//! - `Teardown` aborts every request still in flight
//!
//! `Initiate(i)` is consumed here when the viewer has already initiated;
//! otherwise the request is spawned and the reducer records it in the same
//! step, so queued duplicates can never issue a second request.

use crate::actions::{Action, ArticleDetailsAction, FetchAction, SelectionAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::payload::DiffPayload;
use crate::state::{AppState, FetchPhase, RequestId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use wiki_client::url::query_url;
use wiki_client::WikiClient;

pub struct DiffFetchMiddleware {
    runtime: Handle,
    client: Arc<dyn WikiClient>,
    in_flight: HashMap<RequestId, JoinHandle<()>>,
}

impl DiffFetchMiddleware {
    pub fn new(runtime: Handle, client: Arc<dyn WikiClient>) -> Self {
        Self {
            runtime,
            client,
            in_flight: HashMap::new(),
        }
    }

    /// Dispatch `Initiate` for a viewer that still needs its diff
    fn evaluate(&self, index: usize, state: &AppState, dispatcher: &Dispatcher) {
        let Some(viewer) = state.viewer(index) else {
            return;
        };
        if viewer.fetch.fetched || viewer.fetch.diff_fetch_initiated {
            return;
        }
        if !state.editors.is_ready() {
            log::debug!("DiffFetchMiddleware: viewer {} waits for editors", index);
            return;
        }
        dispatcher.dispatch(Action::Fetch(FetchAction::Initiate(index)));
    }

    /// Spawn the request for `index`; returns false when the action is consumed
    fn initiate(&mut self, index: usize, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if state.torn_down {
            log::debug!("DiffFetchMiddleware: list torn down, not fetching {}", index);
            return false;
        }
        let Some(viewer) = state.viewer(index) else {
            log::warn!("DiffFetchMiddleware: no viewer at index {}", index);
            return false;
        };
        if viewer.fetch.diff_fetch_initiated {
            log::debug!("DiffFetchMiddleware: viewer {} already initiated", index);
            return false;
        }

        let request = state.peek_request_id();
        let plan = viewer.fetch_plan(state.parent_resolution);
        let url = query_url(&viewer.origin, &plan.range);
        let pageid = viewer.revision.pageid;
        log::info!("Fetching diff for viewer {}: {}", index, url);

        let client = Arc::clone(&self.client);
        let dispatcher = dispatcher.clone();
        let task = self.runtime.spawn(async move {
            let action = match client.query_revisions(&url).await {
                Ok(response) => FetchAction::Loaded {
                    index,
                    request,
                    payload: DiffPayload::from_response(&response, pageid),
                },
                Err(e) => FetchAction::Failed {
                    index,
                    request,
                    error: format!("{:#}", e),
                },
            };
            dispatcher.dispatch(Action::Fetch(action));
        });
        self.in_flight.insert(request, task);

        // Let reducer record the request
        true
    }
}

impl Middleware for DiffFetchMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Selection(SelectionAction::SetSelectedIndex(selection)) => {
                if let Some(index) = selection.index() {
                    self.evaluate(index, state, dispatcher);
                }
                true
            }
            Action::ArticleDetails(ArticleDetailsAction::EditorsLoaded(_)) => {
                // Only the absent -> present transition matters
                if !state.editors.is_ready() {
                    if let Some(viewer) = state.selected_viewer() {
                        if !viewer.fetch.fetched && !viewer.fetch.diff_fetch_initiated {
                            dispatcher
                                .dispatch(Action::Fetch(FetchAction::Initiate(viewer.index)));
                        }
                    }
                }
                true
            }
            Action::Fetch(FetchAction::Initiate(index)) => self.initiate(*index, state, dispatcher),
            Action::Fetch(FetchAction::Loaded { request, .. })
            | Action::Fetch(FetchAction::Failed { request, .. }) => {
                self.in_flight.remove(request);
                true
            }
            Action::Fetch(FetchAction::Retry(index)) => {
                let failed = state
                    .viewer(*index)
                    .is_some_and(|viewer| viewer.fetch.phase() == FetchPhase::Failed);
                if failed && !state.torn_down {
                    log::info!("Retrying diff fetch for viewer {}", index);
                    dispatcher.dispatch(Action::Fetch(FetchAction::Initiate(*index)));
                }
                // Let reducer clear the guard
                true
            }
            Action::Teardown => {
                for (request, task) in self.in_flight.drain() {
                    log::debug!("DiffFetchMiddleware: aborting {:?}", request);
                    task.abort();
                }
                true
            }
            _ => true,
        }
    }
}
