//! MediaWiki data transfer objects
//!
//! Caller-supplied revision references plus the response shape of
//! `action=query&prop=revisions`. The response types are deliberately
//! loose: every field is optional so that partially populated payloads
//! (deleted revisions, hidden comments, missing pages) still decode.

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of a wiki, e.g. `en.wikipedia` or `wikidata`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WikiId {
    /// Language subdomain (`None` for language-less wikis like Wikidata)
    pub language: Option<String>,
    /// Project name (`wikipedia`, `wiktionary`, `wikidata`, ...)
    pub project: String,
}

impl WikiId {
    pub fn new(language: Option<&str>, project: &str) -> Self {
        Self {
            language: language.map(str::to_string),
            project: project.to_string(),
        }
    }
}

impl FromStr for WikiId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (language, project) = match s.split_once('.') {
            Some((language, project)) => (Some(language), project),
            None => (None, s),
        };

        if project.is_empty() || project.contains('.') || language == Some("") {
            bail!("Invalid wiki identifier '{}'", s);
        }

        // `www.wikidata` is the same wiki as `wikidata`
        let language = language.filter(|l| *l != "www");
        Ok(Self::new(language, project))
    }
}

impl fmt::Display for WikiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(language) => write!(f, "{}.{}", language, self.project),
            None => write!(f, "{}", self.project),
        }
    }
}

impl TryFrom<String> for WikiId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WikiId> for String {
    fn from(value: WikiId) -> Self {
        value.to_string()
    }
}

/// A single revision of a wiki page, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRef {
    /// Revision ID
    pub revid: u64,

    /// Page the revision belongs to
    pub pageid: u64,

    /// Wiki hosting the page (falls back to the article's wiki)
    #[serde(default)]
    pub wiki: Option<WikiId>,

    /// ID of the revision this one was based on (0/absent for page creations)
    #[serde(default)]
    pub parentid: Option<u64>,

    /// When the revision was saved
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,

    /// Characters added by the revision
    #[serde(default)]
    pub characters: Option<i64>,
}

impl RevisionRef {
    pub fn new(revid: u64, pageid: u64) -> Self {
        Self {
            revid,
            pageid,
            wiki: None,
            parentid: None,
            date: None,
            characters: None,
        }
    }

    pub fn with_wiki(mut self, wiki: WikiId) -> Self {
        self.wiki = Some(wiki);
        self
    }

    pub fn with_parent(mut self, parentid: u64) -> Self {
        self.parentid = Some(parentid);
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_characters(mut self, characters: i64) -> Self {
        self.characters = Some(characters);
        self
    }

    /// Parent revision, treating MediaWiki's `0` ("no parent") as absent
    pub fn parent(&self) -> Option<u64> {
        self.parentid.filter(|id| *id != 0)
    }
}

/// The article the revisions belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub wiki: WikiId,
}

/// Top-level `action=query` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevisionQueryResponse {
    #[serde(default)]
    pub query: Option<QueryBody>,
}

/// The `query` object, keyed by page id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryBody {
    #[serde(default)]
    pub pages: HashMap<String, PageEntry>,
}

/// One page of a `prop=revisions` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageEntry {
    #[serde(default)]
    pub revisions: Vec<RevisionEntry>,
}

/// One revision of a `prop=revisions` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevisionEntry {
    #[serde(default)]
    pub revid: Option<u64>,
    #[serde(default)]
    pub parentid: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    /// Present when `rvdiffto` was requested and the diff could be computed
    #[serde(default)]
    pub diff: Option<DiffBody>,
}

/// The `diff` object of a revision entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffBody {
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
    /// Diff table rows as HTML
    #[serde(rename = "*", default)]
    pub body: Option<String>,
}

impl RevisionQueryResponse {
    /// Decode a JSON value, degrading to an empty response on shape mismatch
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            log::debug!("Unexpected revisions response shape: {}", e);
            Self::default()
        })
    }

    /// Revisions returned for a page, empty when the page is absent
    pub fn revisions_for(&self, pageid: u64) -> &[RevisionEntry] {
        self.query
            .as_ref()
            .and_then(|query| query.pages.get(&pageid.to_string()))
            .map(|page| page.revisions.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct editors of a page in chronological order
    ///
    /// The API lists revisions newest first, so the list is walked in
    /// reverse to report editors by their first edit.
    pub fn editors_for(&self, pageid: u64) -> Vec<String> {
        let mut editors: Vec<String> = Vec::new();
        for revision in self.revisions_for(pageid).iter().rev() {
            if let Some(user) = &revision.user {
                if !editors.contains(user) {
                    editors.push(user.clone());
                }
            }
        }
        editors
    }
}
