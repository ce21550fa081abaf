//! MediaWiki revision API client
//!
//! This crate provides everything needed to talk to the read-only part of
//! the MediaWiki action API that serves revision diffs:
//!
//! - [`WikiId`] and [`DomainResolver`] map a wiki identifier to its host
//! - [`url`] builds the API query URL and the browsable diff URL
//! - [`types`] holds the tolerant response DTOs
//! - [`WikiClient`] is the transport seam, implemented by [`ReqwestWikiClient`]
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   DiffRange   ┌─────────────┐   url   ┌──────────────────┐
//! │  RevisionRef │──────────────►│  url::*     │────────►│ WikiClient trait │
//! └──────────────┘               └─────────────┘         └──────────────────┘
//!                                       ▲                         │
//!                                       │ origin                  ▼
//!                              ┌────────────────┐        ┌──────────────────┐
//!                              │ DomainResolver │        │ReqwestWikiClient │
//!                              └────────────────┘        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use wiki_client::{url, DiffRange, ReqwestWikiClient, WikiClient, WikimediaDomains, WikiId};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let wiki: WikiId = "en.wikipedia".parse()?;
//! let origin = url::wiki_origin(&WikimediaDomains::default(), "https", &wiki);
//! let query = url::query_url(&origin, &DiffRange::Predecessor { to: 139993 });
//!
//! let client = ReqwestWikiClient::new("wiki-diff-viewer/0.1")?;
//! let response = client.query_revisions(&query).await?;
//! let revisions = response.revisions_for(1234);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod domain;
pub mod reqwest_client;
pub mod types;
pub mod url;

pub use client::WikiClient;
pub use domain::{DomainResolver, WikimediaDomains};
pub use reqwest_client::ReqwestWikiClient;
pub use types::{
    Article, DiffBody, PageEntry, QueryBody, RevisionEntry, RevisionQueryResponse, RevisionRef,
    WikiId,
};
pub use url::DiffRange;
