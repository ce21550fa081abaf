pub mod diff_panel;

pub use diff_panel::{
    CollapsedViewModel, DiffBodyView, DiffPanelViewModel, ExpandedPanelViewModel, LegendViewModel,
    LinkViewModel, NavButtonViewModel, PresentationContext,
};
