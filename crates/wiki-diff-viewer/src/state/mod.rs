//! Application State Module
//!
//! Contains all state types used by the diff viewer list, organized by concern.

mod app;
mod diff_viewer;
mod editors;
mod fetch;
mod selection;

pub use app::AppState;
pub use diff_viewer::{DiffEntry, DiffViewerState, FetchPlan};
pub use editors::EditorsState;
pub use fetch::{FetchPhase, FetchState, RequestId, RequestLifecycle};
pub use selection::SelectionIndex;
