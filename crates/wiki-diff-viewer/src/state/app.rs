//! Application State
//!
//! The state of one mounted revision list.

use super::diff_viewer::{DiffEntry, DiffViewerState};
use super::editors::EditorsState;
use super::fetch::RequestId;
use super::selection::SelectionIndex;
use crate::traits::EditorsRequest;
use wiki_client::url::wiki_origin;
use wiki_client::{Article, DomainResolver};
use wiki_diff_config::{AppConfig, ParentResolution};

#[derive(Debug, Clone)]
pub struct AppState {
    pub article: Article,
    /// `{scheme}://{host}` of the article's wiki
    pub article_origin: String,
    pub viewers: Vec<DiffViewerState>,
    pub selection: SelectionIndex,
    pub editors: EditorsState,
    pub parent_resolution: ParentResolution,
    /// Id handed to the next issued request
    pub next_request_id: u64,
    /// Set once the list has been torn down; no new requests are issued
    pub torn_down: bool,
}

impl AppState {
    /// Build the state for a freshly mounted list
    ///
    /// Each entry is served from its revision's wiki, falling back to the
    /// article's wiki.
    pub fn new(
        article: Article,
        entries: Vec<DiffEntry>,
        editors: Option<Vec<String>>,
        config: &AppConfig,
        resolver: &dyn DomainResolver,
    ) -> Self {
        let article_origin = wiki_origin(resolver, &config.scheme, &article.wiki);
        let viewers = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let wiki = entry.revision.wiki.as_ref().unwrap_or(&article.wiki);
                let origin = wiki_origin(resolver, &config.scheme, wiki);
                DiffViewerState::new(index, entry, origin)
            })
            .collect();

        Self {
            article,
            article_origin,
            viewers,
            selection: SelectionIndex::NONE,
            editors: EditorsState::from_supplied(editors),
            parent_resolution: config.parent_resolution,
            next_request_id: 1,
            torn_down: false,
        }
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }

    pub fn viewer(&self, index: usize) -> Option<&DiffViewerState> {
        self.viewers.get(index)
    }

    pub fn selected_viewer(&self) -> Option<&DiffViewerState> {
        self.selection.index().and_then(|index| self.viewer(index))
    }

    /// Id the next `Initiate` will record
    pub fn peek_request_id(&self) -> RequestId {
        RequestId(self.next_request_id)
    }

    /// Editors lookup covering every revision in the list
    pub fn editors_request(&self) -> Option<EditorsRequest> {
        let first = self.viewers.first()?;
        let oldest = self
            .viewers
            .iter()
            .map(|viewer| {
                viewer
                    .first_revision
                    .as_ref()
                    .map_or(viewer.revision.revid, |first| first.revid)
            })
            .min()?;
        let newest = self.viewers.iter().map(|v| v.revision.revid).max()?;

        Some(EditorsRequest {
            origin: self.article_origin.clone(),
            title: self.article.title.clone(),
            pageid: first.revision.pageid,
            oldest_revid: oldest,
            newest_revid: newest,
        })
    }
}
