//! Parsing of diff responses into display fields

use crate::html::HtmlFragment;
use wiki_client::RevisionQueryResponse;

/// Display fields extracted from one diff response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPayload {
    /// Diff table rows, or the "not available" notice
    pub diff: HtmlFragment,
    /// Edit summary of the first revision entry
    pub comment: Option<String>,
    /// Timestamp of the first (earlier) revision
    pub first_revision_timestamp: Option<String>,
    /// Timestamp of the later revision, or of the first one for single-revision diffs
    pub last_revision_timestamp: Option<String>,
}

impl DiffPayload {
    /// Extract display fields for `pageid` from a `prop=revisions` response
    ///
    /// Entry 0 carries the diff and comment; entry 1, when present, is the
    /// later revision of a range. A response without a diff on entry 0
    /// (including a response with no entries at all) yields the
    /// "revision not available" notice rather than an error.
    pub fn from_response(response: &RevisionQueryResponse, pageid: u64) -> Self {
        let revisions = response.revisions_for(pageid);
        let first = revisions.first().cloned().unwrap_or_default();
        let last = revisions.get(1);

        let diff = match &first.diff {
            Some(diff) => HtmlFragment::sanitize(diff.body.as_deref().unwrap_or("")),
            None => {
                log::debug!("No diff in response for page {}", pageid);
                HtmlFragment::revision_unavailable()
            }
        };

        let last_revision_timestamp = match last {
            Some(last) => last.timestamp.clone(),
            None => first.timestamp.clone(),
        };

        Self {
            diff,
            comment: first.comment,
            first_revision_timestamp: first.timestamp,
            last_revision_timestamp,
        }
    }
}
