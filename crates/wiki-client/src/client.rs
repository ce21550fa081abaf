//! Wiki client trait
//!
//! This module defines the `WikiClient` trait that transport
//! implementations must satisfy. Callers build URLs with [`crate::url`]
//! and hand them to the client; the client only moves bytes and decodes
//! the JSON envelope.

use crate::types::RevisionQueryResponse;
use async_trait::async_trait;

/// MediaWiki API client trait
///
/// Implementations can hit the network directly or be replaced by fakes in
/// tests. The API is read-only and unauthenticated.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a single client can be shared
/// by every background fetch task.
///
/// # Example
///
/// ```rust,ignore
/// use wiki_client::{WikiClient, RevisionQueryResponse};
///
/// async fn load(client: &dyn WikiClient, url: &str) -> anyhow::Result<RevisionQueryResponse> {
///     client.query_revisions(url).await
/// }
/// ```
#[async_trait]
pub trait WikiClient: Send + Sync {
    /// Run a `prop=revisions` query
    ///
    /// # Arguments
    ///
    /// * `url` - Fully built API URL (see [`crate::url::query_url`] and
    ///   [`crate::url::editors_url`])
    ///
    /// # Returns
    ///
    /// The decoded response. A body that is valid JSON but does not have the
    /// expected shape decodes to an empty response instead of failing.
    /// Transport errors, error statuses and non-JSON bodies are errors.
    async fn query_revisions(&self, url: &str) -> anyhow::Result<RevisionQueryResponse>;
}
