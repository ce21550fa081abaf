//! reqwest-based MediaWiki API client
//!
//! Direct implementation of the `WikiClient` trait. Every call is a plain
//! unauthenticated GET.

use crate::client::WikiClient;
use crate::types::RevisionQueryResponse;
use anyhow::Context;
use async_trait::async_trait;
use log::debug;

/// Direct MediaWiki API client using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestWikiClient {
    http: reqwest::Client,
}

impl ReqwestWikiClient {
    /// Create a client that identifies itself with `user_agent`
    ///
    /// Wikimedia asks API consumers to send a descriptive User-Agent.
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl WikiClient for ReqwestWikiClient {
    async fn query_revisions(&self, url: &str) -> anyhow::Result<RevisionQueryResponse> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Wiki API returned an error status for {}", url))?;

        let value: serde_json::Value = response
            .json()
            .await
            .context("Wiki API response is not valid JSON")?;

        Ok(RevisionQueryResponse::from_value(value))
    }
}
