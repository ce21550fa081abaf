use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::state::AppState;

pub mod article_details_middleware;
pub mod diff_fetch_middleware;
pub mod logging;
pub mod selection_middleware;

pub use article_details_middleware::ArticleDetailsMiddleware;
pub use diff_fetch_middleware::DiffFetchMiddleware;
pub use logging::LoggingMiddleware;
pub use selection_middleware::SelectionMiddleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware runs on the store's thread and must not block; network work is
/// spawned onto a tokio runtime and reports back through the dispatcher.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current state (read-only snapshot, before the reducer runs)
    /// - `dispatcher`: Use to dispatch actions that should re-enter middleware chain
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool;
}
