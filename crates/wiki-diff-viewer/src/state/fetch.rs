//! Fetch State
//!
//! Per-viewer diff fetch bookkeeping. A viewer issues at most one request
//! per mount; once a response has been applied the state is terminal and
//! later selection toggles only change visibility.

use crate::html::HtmlFragment;
use crate::payload::DiffPayload;

/// Identifies one issued diff request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// Lifecycle of the viewer's current request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestLifecycle {
    #[default]
    NotIssued,
    Issued(RequestId),
    /// A response (or failure) was applied
    Settled(RequestId),
    /// The viewer list was torn down while the request was in flight
    Canceled(RequestId),
}

/// Coarse phase derived from [`FetchState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    AwaitingResponse,
    Fetched,
    Failed,
    Canceled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    /// A response was parsed and applied
    pub fetched: bool,
    /// Guard against issuing a second request
    pub diff_fetch_initiated: bool,
    /// Parent of the range's first revision, once resolved
    pub parent_revision_id: Option<u64>,
    pub diff: Option<HtmlFragment>,
    pub comment: Option<String>,
    pub first_revision_timestamp: Option<String>,
    pub last_revision_timestamp: Option<String>,
    pub request: RequestLifecycle,
    /// Why the last request failed
    pub error: Option<String>,
}

impl FetchState {
    pub fn phase(&self) -> FetchPhase {
        if self.fetched {
            return FetchPhase::Fetched;
        }
        match self.request {
            RequestLifecycle::NotIssued => FetchPhase::Idle,
            RequestLifecycle::Issued(_) => FetchPhase::AwaitingResponse,
            RequestLifecycle::Canceled(_) => FetchPhase::Canceled,
            RequestLifecycle::Settled(_) if self.error.is_some() => FetchPhase::Failed,
            RequestLifecycle::Settled(_) => FetchPhase::Fetched,
        }
    }

    /// Record that `request` was issued
    ///
    /// An already resolved parent id is never overwritten.
    pub fn begin(&mut self, request: RequestId, parent_revision_id: Option<u64>) {
        self.diff_fetch_initiated = true;
        if self.parent_revision_id.is_none() {
            self.parent_revision_id = parent_revision_id;
        }
        self.error = None;
        self.request = RequestLifecycle::Issued(request);
    }

    /// Apply a parsed response; returns false if `request` is not the one in flight
    pub fn settle_loaded(&mut self, request: RequestId, payload: &DiffPayload) -> bool {
        if self.fetched || self.request != RequestLifecycle::Issued(request) {
            return false;
        }

        self.fetched = true;
        self.diff = Some(payload.diff.clone());
        self.comment = payload.comment.clone();
        self.first_revision_timestamp = payload.first_revision_timestamp.clone();
        self.last_revision_timestamp = payload.last_revision_timestamp.clone();
        self.request = RequestLifecycle::Settled(request);
        true
    }

    /// Record a failed request; returns false if `request` is not the one in flight
    pub fn settle_failed(&mut self, request: RequestId, error: &str) -> bool {
        if self.request != RequestLifecycle::Issued(request) {
            return false;
        }

        self.error = Some(error.to_string());
        self.request = RequestLifecycle::Settled(request);
        true
    }

    pub fn cancel(&mut self) {
        if let RequestLifecycle::Issued(request) = self.request {
            self.request = RequestLifecycle::Canceled(request);
        }
    }

    /// Clear the guard after a failure so one new request can be issued
    pub fn reset_for_retry(&mut self) -> bool {
        if self.phase() != FetchPhase::Failed {
            return false;
        }

        self.diff_fetch_initiated = false;
        self.error = None;
        self.request = RequestLifecycle::NotIssued;
        true
    }
}
