//! Wiki host resolution
//!
//! Maps a [`WikiId`] such as `en.wikipedia` to the host serving it.

use crate::types::WikiId;
use std::collections::HashMap;

/// Resolves the host name serving a wiki
pub trait DomainResolver: Send + Sync {
    /// Host name (no scheme, no path) for the given wiki
    fn host(&self, wiki: &WikiId) -> String;
}

/// Wikimedia host naming: `{language}.{project}.org`
///
/// Wikis without a language (e.g. `wikidata`) live under `www`.
/// Individual wikis can be pointed somewhere else with overrides, keyed by
/// the wiki's identifier string.
#[derive(Debug, Clone, Default)]
pub struct WikimediaDomains {
    overrides: HashMap<String, String>,
}

impl WikimediaDomains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with per-wiki host overrides
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }
}

impl DomainResolver for WikimediaDomains {
    fn host(&self, wiki: &WikiId) -> String {
        if let Some(host) = self.overrides.get(&wiki.to_string()) {
            return host.clone();
        }

        let subdomain = wiki.language.as_deref().unwrap_or("www");
        format!("{}.{}.org", subdomain, wiki.project)
    }
}
