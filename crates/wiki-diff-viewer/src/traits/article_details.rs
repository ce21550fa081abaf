//! Trait for looking up who edited an article.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use wiki_client::url::editors_url;
use wiki_client::WikiClient;

/// Errors that can occur while looking up article details.
#[derive(Debug, Error)]
pub enum DetailsError {
    /// The wiki could not be reached or answered with an error.
    #[error("Network error: {0}")]
    NetworkError(String),
}

/// The revision span whose editors are wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorsRequest {
    /// `{scheme}://{host}` of the article's wiki
    pub origin: String,
    pub title: String,
    pub pageid: u64,
    pub oldest_revid: u64,
    pub newest_revid: u64,
}

/// Provides the editors of an article.
///
/// The diff viewer asks for them once, the first time a diff is expanded
/// without editors having been supplied up front.
#[async_trait]
pub trait ArticleDetailsProvider: Send + Sync {
    /// Usernames of everyone who edited the article in the requested span,
    /// in order of first edit.
    async fn fetch_editors(&self, request: &EditorsRequest) -> Result<Vec<String>, DetailsError>;
}

/// Looks editors up through the wiki's own revisions API.
pub struct WikiEditorsProvider {
    client: Arc<dyn WikiClient>,
}

impl WikiEditorsProvider {
    pub fn new(client: Arc<dyn WikiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArticleDetailsProvider for WikiEditorsProvider {
    async fn fetch_editors(&self, request: &EditorsRequest) -> Result<Vec<String>, DetailsError> {
        let url = editors_url(
            &request.origin,
            request.pageid,
            request.oldest_revid,
            request.newest_revid,
        );
        let response = self
            .client
            .query_revisions(&url)
            .await
            .map_err(|e| DetailsError::NetworkError(format!("{:#}", e)))?;

        Ok(response.editors_for(request.pageid))
    }
}
