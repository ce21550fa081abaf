use crate::actions::{Action, FetchAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;

/// LoggingMiddleware - logs all actions passing through
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, action: &Action, _state: &AppState, _dispatcher: &Dispatcher) -> bool {
        // Diff markup is too noisy for the log
        match action {
            Action::Fetch(FetchAction::Loaded { index, request, .. }) => {
                log::debug!("Action: Loaded {{ index: {}, request: {:?} }}", index, request);
            }
            _ => log::debug!("Action: {:?}", action),
        }

        true // Always pass action through
    }
}
