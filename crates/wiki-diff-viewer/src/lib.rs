//! Wiki diff viewer
//!
//! State and side effects behind a list of revision diffs of one wiki
//! article. Each list entry shows a toggle; expanding it lazily fetches the
//! diff markup from the MediaWiki API, exactly once per mounted entry.
//!
//! The list runs a small Redux loop:
//!
//! ```text
//! Action -> middleware chain -> reducer -> AppState -> view models
//!              |        ^
//!              v        |
//!          tokio tasks -> Dispatcher
//! ```
//!
//! - [`middleware::SelectionMiddleware`] turns show/hide/previous/next into
//!   a single selection write
//! - [`middleware::ArticleDetailsMiddleware`] loads the article's editors,
//!   which have to be known before a diff is fetched
//! - [`middleware::DiffFetchMiddleware`] issues the diff request and reports
//!   the parsed [`payload::DiffPayload`] back to the store
//! - [`view_models::DiffPanelViewModel`] is what a rendering surface draws

pub mod actions;
pub mod dispatcher;
pub mod html;
pub mod middleware;
pub mod payload;
pub mod reducers;
pub mod state;
pub mod store;
pub mod traits;
pub mod view_models;

pub use actions::{Action, ArticleDetailsAction, FetchAction, SelectionAction};
pub use dispatcher::Dispatcher;
pub use html::HtmlFragment;
pub use payload::DiffPayload;
pub use state::{AppState, DiffEntry, FetchPhase, SelectionIndex};
pub use store::Store;
