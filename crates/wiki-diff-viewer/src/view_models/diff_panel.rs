//! Diff Panel View Model
//!
//! Pre-computes everything a rendering surface needs for one list entry:
//! either the collapsed toggle or the expanded panel with header links,
//! navigation, diff body and legend.

use crate::actions::Action;
use crate::html::HtmlFragment;
use crate::state::{AppState, DiffViewerState, FetchPhase};
use crate::traits::{DateFormatter, Localizer};

/// Shown in place of an empty diff
pub const EMPTY_DIFF_PLACEHOLDER: &str = "—";

/// Collaborators used to turn state into display strings
#[derive(Clone, Copy)]
pub struct PresentationContext<'a> {
    pub localizer: &'a dyn Localizer,
    pub dates: &'a dyn DateFormatter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffPanelViewModel {
    Collapsed(CollapsedViewModel),
    Expanded(Box<ExpandedPanelViewModel>),
}

/// The toggle button of a closed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedViewModel {
    /// Tooltip text
    pub label: String,
    pub aria_label: String,
    /// Dispatched when the button is pressed
    pub on_press: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedPanelViewModel {
    pub article_title: String,
    pub view_on_wiki: LinkViewModel,
    pub close_aria_label: String,
    pub on_close: Action,
    /// Absent for the first entry
    pub previous: Option<NavButtonViewModel>,
    /// Absent for the last entry
    pub next: Option<NavButtonViewModel>,
    /// Edit summary of the first revision, once fetched
    pub comment: Option<String>,
    pub body: DiffBodyView,
    pub legend: LegendViewModel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkViewModel {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButtonViewModel {
    pub label: String,
    pub on_press: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffBodyView {
    Loading,
    /// The API returned an empty diff
    Empty { placeholder: &'static str },
    Markup(HtmlFragment),
    Failed {
        message: String,
        retry_label: String,
        on_retry: Action,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendViewModel {
    /// "Edits by: a, b"
    pub edits_by: String,
    /// Edit date of a single revision, or the time span of a range
    pub date_line: Option<String>,
    /// Characters added by a single revision
    pub characters: Option<String>,
}

impl DiffPanelViewModel {
    /// Build the view model of entry `index`; `None` if there is no such entry
    pub fn build(state: &AppState, index: usize, ctx: PresentationContext<'_>) -> Option<Self> {
        let viewer = state.viewer(index)?;
        let i18n = ctx.localizer;

        if !state.selection.is(index) {
            let label = viewer
                .show_button_label
                .clone()
                .unwrap_or_else(|| i18n.t("revisions.diff_show", &[]));
            return Some(Self::Collapsed(CollapsedViewModel {
                label,
                aria_label: i18n.t("revisions.diff_open", &[]),
                on_press: Action::show(index),
            }));
        }

        let previous = (index > 0).then(|| NavButtonViewModel {
            label: i18n.t("articles.previous", &[]),
            on_press: Action::show_previous(index),
        });
        let next = (index + 1 < state.len()).then(|| NavButtonViewModel {
            label: i18n.t("articles.next", &[]),
            on_press: Action::show_next(index),
        });

        Some(Self::Expanded(Box::new(ExpandedPanelViewModel {
            article_title: state.article.title.clone(),
            view_on_wiki: LinkViewModel {
                label: i18n.t("revisions.view_on_wiki", &[]),
                url: viewer.web_diff_url(),
            },
            close_aria_label: i18n.t("revisions.diff_close", &[]),
            on_close: Action::hide(),
            previous,
            next,
            comment: viewer.fetch.comment.clone(),
            body: body(viewer, i18n),
            legend: legend(state, viewer, ctx),
        })))
    }
}

fn body(viewer: &DiffViewerState, i18n: &dyn Localizer) -> DiffBodyView {
    match viewer.fetch.phase() {
        FetchPhase::Fetched => match &viewer.fetch.diff {
            Some(diff) if !diff.is_empty() => DiffBodyView::Markup(diff.clone()),
            _ => DiffBodyView::Empty {
                placeholder: EMPTY_DIFF_PLACEHOLDER,
            },
        },
        FetchPhase::Failed => {
            let error = viewer.fetch.error.as_deref().unwrap_or_default();
            DiffBodyView::Failed {
                message: i18n.t("revisions.diff_failed", &[("error", error)]),
                retry_label: i18n.t("revisions.diff_retry", &[]),
                on_retry: Action::retry(viewer.index),
            }
        }
        FetchPhase::Idle | FetchPhase::AwaitingResponse | FetchPhase::Canceled => {
            DiffBodyView::Loading
        }
    }
}

fn legend(state: &AppState, viewer: &DiffViewerState, ctx: PresentationContext<'_>) -> LegendViewModel {
    let i18n = ctx.localizer;
    let editors = state.editors.names().unwrap_or_default().join(", ");
    let edits_by = format!("{} {}", i18n.t("users.edits_by", &[]), editors)
        .trim_end()
        .to_string();

    if !viewer.is_range() {
        let edit_date = viewer
            .revision
            .date
            .as_ref()
            .map(|date| ctx.dates.format_date(date))
            .or_else(|| {
                viewer
                    .fetch
                    .first_revision_timestamp
                    .as_deref()
                    .map(|timestamp| ctx.dates.format_timestamp(timestamp))
            });

        return LegendViewModel {
            edits_by,
            date_line: edit_date
                .map(|date| i18n.t("revisions.edited_on", &[("edit_date", date.as_str())])),
            characters: viewer
                .revision
                .characters
                .map(|count| format!("{} {}", count, i18n.t("revisions.chars_added", &[]))),
        };
    }

    let time_span = match (
        &viewer.fetch.first_revision_timestamp,
        &viewer.fetch.last_revision_timestamp,
    ) {
        (Some(first), Some(last)) if viewer.fetch.fetched => {
            let first_time = ctx.dates.format_timestamp(first);
            let last_time = ctx.dates.format_timestamp(last);
            Some(i18n.t(
                "revisions.edit_time_span",
                &[
                    ("first_time", first_time.as_str()),
                    ("last_time", last_time.as_str()),
                ],
            ))
        }
        _ => None,
    };

    LegendViewModel {
        edits_by,
        date_line: time_span,
        characters: None,
    }
}
