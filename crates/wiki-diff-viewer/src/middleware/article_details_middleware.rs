//! Article Details Middleware
//!
//! Loads the article's editors the first time a viewer is selected without
//! them. A failed lookup is logged and leaves the editors empty, so the diff
//! still loads.

use crate::actions::{Action, ArticleDetailsAction, SelectionAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, EditorsState};
use crate::traits::ArticleDetailsProvider;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub struct ArticleDetailsMiddleware {
    runtime: Handle,
    provider: Arc<dyn ArticleDetailsProvider>,
    lookup: Option<JoinHandle<()>>,
}

impl ArticleDetailsMiddleware {
    pub fn new(runtime: Handle, provider: Arc<dyn ArticleDetailsProvider>) -> Self {
        Self {
            runtime,
            provider,
            lookup: None,
        }
    }

    fn request_editors(&mut self, state: &AppState, dispatcher: &Dispatcher) {
        if self.lookup.is_some() || state.torn_down {
            return;
        }
        let Some(request) = state.editors_request() else {
            return;
        };

        log::info!("Looking up editors of '{}'", request.title);
        dispatcher.dispatch(Action::ArticleDetails(ArticleDetailsAction::Requested));

        let provider = Arc::clone(&self.provider);
        let dispatcher = dispatcher.clone();
        self.lookup = Some(self.runtime.spawn(async move {
            let editors = match provider.fetch_editors(&request).await {
                Ok(editors) => editors,
                Err(e) => {
                    log::warn!("Editors lookup for '{}' failed: {}", request.title, e);
                    Vec::new()
                }
            };
            dispatcher.dispatch(Action::ArticleDetails(ArticleDetailsAction::EditorsLoaded(
                editors,
            )));
        }));
    }
}

impl Middleware for ArticleDetailsMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Selection(SelectionAction::SetSelectedIndex(selection)) => {
                let selects_viewer = selection
                    .index()
                    .is_some_and(|index| state.viewer(index).is_some());
                if selects_viewer && state.editors == EditorsState::Missing {
                    self.request_editors(state, dispatcher);
                }
            }
            Action::ArticleDetails(ArticleDetailsAction::EditorsLoaded(_)) => {
                self.lookup = None;
            }
            Action::Teardown => {
                if let Some(lookup) = self.lookup.take() {
                    log::debug!("ArticleDetailsMiddleware: aborting editors lookup");
                    lookup.abort();
                }
            }
            _ => {}
        }
        true
    }
}
