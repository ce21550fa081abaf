pub mod app_reducer;
pub mod editors_reducer;
pub mod fetch_reducer;
pub mod selection_reducer;
