//! Drives a full store (selection, article details and diff fetch
//! middleware) against fake wiki collaborators.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use wiki_client::{Article, RevisionQueryResponse, RevisionRef, WikiClient, WikimediaDomains};
use wiki_diff_config::{AppConfig, ParentResolution};
use wiki_diff_viewer::middleware::{
    ArticleDetailsMiddleware, DiffFetchMiddleware, LoggingMiddleware, Middleware,
    SelectionMiddleware,
};
use wiki_diff_viewer::state::{EditorsState, RequestId};
use wiki_diff_viewer::html::REVISION_UNAVAILABLE_NOTICE;
use wiki_diff_viewer::traits::{
    ArticleDetailsProvider, ChronoDateFormatter, DetailsError, EditorsRequest, EnglishLocalizer,
};
use wiki_diff_viewer::view_models::{DiffBodyView, DiffPanelViewModel, PresentationContext};
use wiki_diff_viewer::{
    Action, AppState, DiffEntry, DiffPayload, Dispatcher, FetchAction, FetchPhase, HtmlFragment,
    SelectionAction, SelectionIndex, Store,
};

const WAIT: Duration = Duration::from_secs(5);

/// Shared record of outbound calls, in the order they happened
type CallLog = Arc<Mutex<Vec<String>>>;

enum Reply {
    Respond(serde_json::Value),
    Fail(&'static str),
    Hang,
}

struct FakeWikiClient {
    calls: CallLog,
    replies: Mutex<VecDeque<Reply>>,
}

impl FakeWikiClient {
    fn new(calls: CallLog, replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            calls,
            replies: Mutex::new(replies.into()),
        })
    }
}

#[async_trait]
impl WikiClient for FakeWikiClient {
    async fn query_revisions(&self, url: &str) -> anyhow::Result<RevisionQueryResponse> {
        self.calls.lock().unwrap().push(url.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::Respond(single_entry_response()));

        match reply {
            Reply::Respond(value) => Ok(RevisionQueryResponse::from_value(value)),
            Reply::Fail(message) => Err(anyhow::anyhow!(message)),
            Reply::Hang => std::future::pending().await,
        }
    }
}

struct FakeEditors {
    calls: CallLog,
    result: Result<Vec<String>, &'static str>,
}

#[async_trait]
impl ArticleDetailsProvider for FakeEditors {
    async fn fetch_editors(&self, request: &EditorsRequest) -> Result<Vec<String>, DetailsError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.calls
            .lock()
            .unwrap()
            .push(format!("editors:{}", request.pageid));
        self.result
            .clone()
            .map_err(|e| DetailsError::NetworkError(e.to_string()))
    }
}

/// Records every action that reaches it
struct RecordingMiddleware {
    seen: Arc<Mutex<Vec<Action>>>,
}

impl Middleware for RecordingMiddleware {
    fn handle(&mut self, action: &Action, _state: &AppState, _dispatcher: &Dispatcher) -> bool {
        self.seen.lock().unwrap().push(action.clone());
        true
    }
}

fn single_entry_response() -> serde_json::Value {
    json!({
        "query": { "pages": { "5": { "revisions": [
            { "diff": { "*": "<tr><td>x</td></tr>" }, "comment": "c", "timestamp": "T1" }
        ] } } }
    })
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}

struct Harness {
    store: Store,
    calls: CallLog,
    seen: Arc<Mutex<Vec<Action>>>,
}

impl Harness {
    fn new(
        runtime: &Runtime,
        entries: Vec<DiffEntry>,
        editors: Option<Vec<String>>,
        config: AppConfig,
        replies: Vec<Reply>,
        editors_result: Result<Vec<String>, &'static str>,
    ) -> Self {
        let calls: CallLog = Arc::default();
        let seen = Arc::default();
        let client = FakeWikiClient::new(Arc::clone(&calls), replies);
        let details = Arc::new(FakeEditors {
            calls: Arc::clone(&calls),
            result: editors_result,
        });

        let state = AppState::new(
            Article {
                title: "Rust".to_string(),
                wiki: "en.wikipedia".parse().unwrap(),
            },
            entries,
            editors,
            &config,
            &WikimediaDomains::new(),
        );

        let mut store = Store::new(state);
        store.add_middleware(Box::new(LoggingMiddleware::new()));
        store.add_middleware(Box::new(RecordingMiddleware {
            seen: Arc::clone(&seen),
        }));
        store.add_middleware(Box::new(SelectionMiddleware::new()));
        store.add_middleware(Box::new(ArticleDetailsMiddleware::new(
            runtime.handle().clone(),
            details,
        )));
        store.add_middleware(Box::new(DiffFetchMiddleware::new(
            runtime.handle().clone(),
            client,
        )));

        Self { store, calls, seen }
    }

    fn with_editors(runtime: &Runtime, entries: Vec<DiffEntry>, replies: Vec<Reply>) -> Self {
        Self::new(
            runtime,
            entries,
            Some(vec!["Alice".to_string()]),
            AppConfig::default(),
            replies,
            Ok(vec![]),
        )
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn diff_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !call.starts_with("editors:"))
            .collect()
    }

    fn phase(&self, index: usize) -> FetchPhase {
        self.store.state().viewers[index].fetch.phase()
    }

    fn wait_for_phase(&mut self, index: usize, phase: FetchPhase) {
        let reached = self
            .store
            .run_until(WAIT, |state| state.viewers[index].fetch.phase() == phase);
        assert!(reached, "viewer {} never reached {:?}", index, phase);
    }

    /// Wait until the fake client has seen `count` calls
    fn wait_for_calls(&mut self, count: usize) {
        let deadline = Instant::now() + WAIT;
        while self.calls().len() < count {
            assert!(Instant::now() < deadline, "expected {} calls", count);
            self.store.drain();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn selection_writes(&self) -> Vec<SelectionIndex> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter_map(|action| match action {
                Action::Selection(SelectionAction::SetSelectedIndex(index)) => Some(*index),
                _ => None,
            })
            .collect()
    }
}

fn revision(revid: u64) -> RevisionRef {
    RevisionRef::new(revid, 5)
}

#[test]
fn test_single_revision_fetches_once_and_parses() {
    let runtime = runtime();
    let mut harness = Harness::with_editors(&runtime, vec![DiffEntry::new(revision(100))], vec![]);

    harness.store.dispatch(Action::show(0));
    harness.wait_for_phase(0, FetchPhase::Fetched);

    assert_eq!(
        harness.calls(),
        vec!["https://en.wikipedia.org/w/api.php?action=query&prop=revisions&format=json&origin=*&rvprop=ids|timestamp|comment&revids=100&rvdiffto=prev".to_string()]
    );

    let fetch = &harness.store.state().viewers[0].fetch;
    assert!(fetch.fetched);
    assert_eq!(
        fetch.diff.as_ref().map(HtmlFragment::as_trusted_markup),
        Some("<tr><td>x</td></tr>")
    );
    assert_eq!(fetch.comment.as_deref(), Some("c"));
    assert_eq!(fetch.first_revision_timestamp.as_deref(), Some("T1"));
    assert_eq!(fetch.last_revision_timestamp.as_deref(), Some("T1"));
}

#[test]
fn test_missing_diff_settles_with_unavailable_notice() {
    let runtime = runtime();
    let deleted = json!({
        "query": { "pages": { "5": { "revisions": [
            { "revid": 100, "comment": "c", "timestamp": "T1" }
        ] } } }
    });
    let mut harness = Harness::with_editors(
        &runtime,
        vec![DiffEntry::new(revision(100))],
        vec![Reply::Respond(deleted)],
    );

    harness.store.dispatch(Action::show(0));
    harness.wait_for_phase(0, FetchPhase::Fetched);

    assert_eq!(harness.diff_calls().len(), 1);
    let fetch = &harness.store.state().viewers[0].fetch;
    assert!(fetch.fetched);
    assert_eq!(fetch.diff, Some(HtmlFragment::revision_unavailable()));
    assert_eq!(fetch.first_revision_timestamp.as_deref(), Some("T1"));

    let i18n = EnglishLocalizer::new();
    let dates = ChronoDateFormatter::default();
    let ctx = PresentationContext {
        localizer: &i18n,
        dates: &dates,
    };
    match DiffPanelViewModel::build(harness.store.state(), 0, ctx) {
        Some(DiffPanelViewModel::Expanded(panel)) => match panel.body {
            DiffBodyView::Markup(diff) => {
                assert_eq!(diff.as_trusted_markup(), REVISION_UNAVAILABLE_NOTICE)
            }
            other => panic!("expected the notice as markup, got {:?}", other),
        },
        other => panic!("expected an expanded panel, got {:?}", other),
    }
}

#[test]
fn test_show_hide_show_issues_one_request() {
    let runtime = runtime();
    let mut harness = Harness::with_editors(&runtime, vec![DiffEntry::new(revision(100))], vec![]);

    harness.store.dispatch(Action::show(0));
    harness.store.dispatch(Action::hide());
    harness.store.dispatch(Action::show(0));
    harness.wait_for_phase(0, FetchPhase::Fetched);

    harness.store.dispatch(Action::hide());
    harness.store.dispatch(Action::show(0));
    harness.store.dispatch(Action::hide());
    harness.store.dispatch(Action::show(0));
    std::thread::sleep(Duration::from_millis(50));
    harness.store.drain();

    assert_eq!(harness.diff_calls().len(), 1);
    assert_eq!(
        harness.store.state().selection,
        SelectionIndex::selected(0)
    );
}

#[test]
fn test_queued_initiates_issue_one_request() {
    let runtime = runtime();
    let mut harness = Harness::with_editors(
        &runtime,
        vec![DiffEntry::new(revision(100))],
        vec![Reply::Hang],
    );

    let dispatcher = harness.store.dispatcher().clone();
    dispatcher.dispatch(Action::Fetch(FetchAction::Initiate(0)));
    dispatcher.dispatch(Action::Fetch(FetchAction::Initiate(0)));
    harness.store.dispatch(Action::show(0));
    harness.wait_for_calls(1);
    std::thread::sleep(Duration::from_millis(50));
    harness.store.drain();

    assert_eq!(harness.diff_calls().len(), 1);
    assert_eq!(harness.phase(0), FetchPhase::AwaitingResponse);
}

#[test]
fn test_range_resolves_parent_before_first_request() {
    let runtime = runtime();
    let entry =
        DiffEntry::new(revision(300)).with_first_revision(revision(150).with_parent(149));
    let mut harness = Harness::with_editors(&runtime, vec![entry], vec![]);

    harness.store.dispatch(Action::show(0));
    harness.wait_for_phase(0, FetchPhase::Fetched);

    assert_eq!(
        harness.calls(),
        vec!["https://en.wikipedia.org/w/api.php?action=query&prop=revisions&format=json&origin=*&rvprop=ids|timestamp|comment&revids=149|300&rvdiffto=300".to_string()]
    );
    let viewer = &harness.store.state().viewers[0];
    assert_eq!(viewer.fetch.parent_revision_id, Some(149));
    assert_eq!(
        viewer.web_diff_url(),
        "https://en.wikipedia.org/w/index.php?oldid=149&diff=300"
    );
}

#[test]
fn test_deferred_parent_resolution_fetches_predecessor() {
    let runtime = runtime();
    let entry =
        DiffEntry::new(revision(300)).with_first_revision(revision(150).with_parent(149));
    let config = AppConfig {
        parent_resolution: ParentResolution::Deferred,
        ..AppConfig::default()
    };
    let mut harness = Harness::new(
        &runtime,
        vec![entry],
        Some(vec![]),
        config,
        vec![],
        Ok(vec![]),
    );

    harness.store.dispatch(Action::show(0));
    harness.wait_for_phase(0, FetchPhase::Fetched);

    assert_eq!(
        harness.calls(),
        vec!["https://en.wikipedia.org/w/api.php?action=query&prop=revisions&format=json&origin=*&rvprop=ids|timestamp|comment&revids=300&rvdiffto=prev".to_string()]
    );
    assert_eq!(
        harness.store.state().viewers[0].web_diff_url(),
        "https://en.wikipedia.org/w/index.php?oldid=149&diff=300"
    );
}

#[test]
fn test_missing_editors_are_loaded_before_the_diff() {
    let runtime = runtime();
    let mut harness = Harness::new(
        &runtime,
        vec![DiffEntry::new(revision(100)), DiffEntry::new(revision(200))],
        None,
        AppConfig::default(),
        vec![],
        Ok(vec!["Alice".to_string(), "Bob".to_string()]),
    );

    harness.store.dispatch(Action::show(1));
    assert_eq!(harness.store.state().editors, EditorsState::Requested);
    assert!(harness.diff_calls().is_empty());

    harness.wait_for_phase(1, FetchPhase::Fetched);

    let calls = harness.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], "editors:5");
    assert!(calls[1].ends_with("&revids=200&rvdiffto=prev"));
    assert_eq!(
        harness.store.state().editors,
        EditorsState::Ready(vec!["Alice".to_string(), "Bob".to_string()])
    );
    assert_eq!(harness.phase(0), FetchPhase::Idle);
}

#[test]
fn test_failed_editors_lookup_still_loads_diff() {
    let runtime = runtime();
    let mut harness = Harness::new(
        &runtime,
        vec![DiffEntry::new(revision(100))],
        None,
        AppConfig::default(),
        vec![],
        Err("timeout"),
    );

    harness.store.dispatch(Action::show(0));
    harness.wait_for_phase(0, FetchPhase::Fetched);

    assert_eq!(harness.store.state().editors, EditorsState::Ready(vec![]));
    assert_eq!(harness.diff_calls().len(), 1);
}

#[test]
fn test_failed_request_retries_once() {
    let runtime = runtime();
    let mut harness = Harness::with_editors(
        &runtime,
        vec![DiffEntry::new(revision(100))],
        vec![Reply::Fail("connection refused")],
    );

    harness.store.dispatch(Action::show(0));
    harness.wait_for_phase(0, FetchPhase::Failed);
    assert_eq!(harness.diff_calls().len(), 1);
    assert_eq!(
        harness.store.state().viewers[0].fetch.error.as_deref(),
        Some("connection refused")
    );

    // Toggling does not retry on its own
    harness.store.dispatch(Action::hide());
    harness.store.dispatch(Action::show(0));
    assert_eq!(harness.phase(0), FetchPhase::Failed);

    harness.store.dispatch(Action::retry(0));
    harness.wait_for_phase(0, FetchPhase::Fetched);
    assert_eq!(harness.diff_calls().len(), 2);

    // Nothing left to retry
    harness.store.dispatch(Action::retry(0));
    std::thread::sleep(Duration::from_millis(50));
    harness.store.drain();
    assert_eq!(harness.diff_calls().len(), 2);
}

#[test]
fn test_navigation_at_bounds_writes_nothing() {
    let runtime = runtime();
    let mut harness = Harness::with_editors(
        &runtime,
        vec![DiffEntry::new(revision(100)), DiffEntry::new(revision(200))],
        vec![Reply::Hang, Reply::Hang],
    );

    harness.store.dispatch(Action::show_previous(0));
    harness.store.dispatch(Action::show_next(1));
    assert!(harness.selection_writes().is_empty());
    assert_eq!(harness.store.state().selection, SelectionIndex::NONE);

    harness.store.dispatch(Action::show_next(0));
    harness.store.dispatch(Action::show_previous(1));
    assert_eq!(
        harness.selection_writes(),
        vec![SelectionIndex::selected(1), SelectionIndex::selected(0)]
    );
}

#[test]
fn test_teardown_ignores_late_responses() {
    let runtime = runtime();
    let mut harness = Harness::with_editors(
        &runtime,
        vec![DiffEntry::new(revision(100)), DiffEntry::new(revision(200))],
        vec![Reply::Hang],
    );

    harness.store.dispatch(Action::show(0));
    harness.wait_for_calls(1);
    harness.store.dispatch(Action::Teardown);

    assert!(harness.store.state().torn_down);
    assert_eq!(harness.phase(0), FetchPhase::Canceled);

    let before = harness.store.state().viewers[0].fetch.clone();
    harness.store.dispatch(Action::Fetch(FetchAction::Loaded {
        index: 0,
        request: RequestId(1),
        payload: DiffPayload {
            diff: HtmlFragment::sanitize("<tr><td>x</td></tr>"),
            comment: Some("late".to_string()),
            first_revision_timestamp: None,
            last_revision_timestamp: None,
        },
    }));
    assert_eq!(harness.store.state().viewers[0].fetch, before);

    // No new requests once torn down
    harness.store.dispatch(Action::show(1));
    std::thread::sleep(Duration::from_millis(50));
    harness.store.drain();
    assert_eq!(harness.diff_calls().len(), 1);
}
