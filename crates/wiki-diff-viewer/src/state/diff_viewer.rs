//! Diff Viewer State
//!
//! One entry of the revision list: the revision (or range) it shows and its
//! fetch bookkeeping.

use super::fetch::FetchState;
use wiki_client::url::{query_url, web_diff_url};
use wiki_client::{DiffRange, RevisionRef};
use wiki_diff_config::ParentResolution;

/// Input describing one list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    /// End of the diff
    pub revision: RevisionRef,
    /// Explicit start of a range
    pub first_revision: Option<RevisionRef>,
    /// Replaces the default "Show diff" label
    pub show_button_label: Option<String>,
}

impl DiffEntry {
    pub fn new(revision: RevisionRef) -> Self {
        Self {
            revision,
            first_revision: None,
            show_button_label: None,
        }
    }

    pub fn with_first_revision(mut self, first_revision: RevisionRef) -> Self {
        self.first_revision = Some(first_revision);
        self
    }

    pub fn with_button_label(mut self, label: impl Into<String>) -> Self {
        self.show_button_label = Some(label.into());
        self
    }
}

/// What the next request for a viewer asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    /// Parent id to record once the request is issued
    pub parent_revision_id: Option<u64>,
    /// Range the API query covers
    pub range: DiffRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffViewerState {
    pub index: usize,
    pub revision: RevisionRef,
    pub first_revision: Option<RevisionRef>,
    pub show_button_label: Option<String>,
    /// `{scheme}://{host}` of the revision's wiki
    pub origin: String,
    pub fetch: FetchState,
}

impl DiffViewerState {
    pub fn new(index: usize, entry: DiffEntry, origin: String) -> Self {
        Self {
            index,
            revision: entry.revision,
            first_revision: entry.first_revision,
            show_button_label: entry.show_button_label,
            origin,
            fetch: FetchState::default(),
        }
    }

    pub fn is_range(&self) -> bool {
        self.first_revision.is_some()
    }

    /// Resolve the parent id and the range of the next request
    ///
    /// The parent comes from the first revision's own `parentid`, so
    /// resolving it never needs a network call.
    pub fn fetch_plan(&self, mode: ParentResolution) -> FetchPlan {
        let parent_revision_id = self.fetch.parent_revision_id.or_else(|| {
            self.first_revision
                .as_ref()
                .and_then(RevisionRef::parent)
        });

        let range = match mode {
            ParentResolution::Eager => DiffRange::resolve(
                &self.revision,
                self.first_revision.as_ref(),
                parent_revision_id,
            ),
            // First request against the predecessor; a retry sees the parent
            // recorded by the failed attempt.
            ParentResolution::Deferred => {
                DiffRange::resolve(&self.revision, None, self.fetch.parent_revision_id)
            }
        };

        FetchPlan {
            parent_revision_id,
            range,
        }
    }

    pub fn query_url(&self, mode: ParentResolution) -> String {
        query_url(&self.origin, &self.fetch_plan(mode).range)
    }

    /// Range shown to the user, based on what has been resolved so far
    pub fn display_range(&self) -> DiffRange {
        DiffRange::resolve(
            &self.revision,
            self.first_revision.as_ref(),
            self.fetch.parent_revision_id,
        )
    }

    pub fn web_diff_url(&self) -> String {
        web_diff_url(&self.origin, &self.display_range())
    }
}
