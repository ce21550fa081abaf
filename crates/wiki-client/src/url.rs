//! URL building for diff queries
//!
//! Pure functions: identical inputs always produce identical URLs.
//! Revision ids are joined with a literal `|`, which the API accepts
//! unencoded.

use crate::domain::DomainResolver;
use crate::types::{RevisionRef, WikiId};

const QUERY_BASE: &str =
    "/w/api.php?action=query&prop=revisions&format=json&origin=*&rvprop=ids|timestamp|comment";

/// Which two revisions a diff compares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffRange {
    /// Diff `to` against whatever revision preceded it
    Predecessor { to: u64 },
    /// Diff from revision `from` up to revision `to`
    Between { from: u64, to: u64 },
}

impl DiffRange {
    /// Pick the starting point of a diff ending at `revision`
    ///
    /// A resolved parent id takes precedence over the explicit first
    /// revision; with neither, the diff runs against the predecessor.
    pub fn resolve(
        revision: &RevisionRef,
        first_revision: Option<&RevisionRef>,
        parent_revision_id: Option<u64>,
    ) -> Self {
        let to = revision.revid;
        if let Some(from) = parent_revision_id {
            DiffRange::Between { from, to }
        } else if let Some(first) = first_revision {
            DiffRange::Between {
                from: first.revid,
                to,
            }
        } else {
            DiffRange::Predecessor { to }
        }
    }
}

/// `{scheme}://{host}` for a wiki
pub fn wiki_origin(resolver: &dyn DomainResolver, scheme: &str, wiki: &WikiId) -> String {
    format!("{}://{}", scheme, resolver.host(wiki))
}

/// API URL returning revision metadata plus diff markup for a range
pub fn query_url(origin: &str, range: &DiffRange) -> String {
    match range {
        DiffRange::Between { from, to } => {
            format!("{origin}{QUERY_BASE}&revids={from}|{to}&rvdiffto={to}")
        }
        DiffRange::Predecessor { to } => {
            format!("{origin}{QUERY_BASE}&revids={to}&rvdiffto=prev")
        }
    }
}

/// Browsable diff page on the wiki itself
pub fn web_diff_url(origin: &str, range: &DiffRange) -> String {
    match range {
        DiffRange::Between { from, to } => format!("{origin}/w/index.php?oldid={from}&diff={to}"),
        DiffRange::Predecessor { to } => format!("{origin}/w/index.php?diff={to}"),
    }
}

/// API URL listing the users who edited a page between two revisions
pub fn editors_url(origin: &str, pageid: u64, oldest: u64, newest: u64) -> String {
    format!(
        "{origin}/w/api.php?action=query&prop=revisions&format=json&origin=*\
         &pageids={pageid}&rvprop=user&rvlimit=max&rvstartid={newest}&rvendid={oldest}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WikimediaDomains;
    use pretty_assertions::assert_eq;

    const ORIGIN: &str = "https://en.wikipedia.org";
    const BASE: &str = "https://en.wikipedia.org/w/api.php?action=query&prop=revisions&format=json&origin=*&rvprop=ids|timestamp|comment";

    #[test]
    fn test_end_revision_only_diffs_against_prev() {
        let revision = RevisionRef::new(100, 5);
        let range = DiffRange::resolve(&revision, None, None);

        assert_eq!(range, DiffRange::Predecessor { to: 100 });
        assert_eq!(
            query_url(ORIGIN, &range),
            format!("{BASE}&revids=100&rvdiffto=prev")
        );
        assert_eq!(
            web_diff_url(ORIGIN, &range),
            "https://en.wikipedia.org/w/index.php?diff=100"
        );
    }

    #[test]
    fn test_explicit_first_revision_range() {
        let revision = RevisionRef::new(300, 5);
        let first = RevisionRef::new(200, 5);
        let range = DiffRange::resolve(&revision, Some(&first), None);

        assert_eq!(range, DiffRange::Between { from: 200, to: 300 });
        assert_eq!(
            query_url(ORIGIN, &range),
            format!("{BASE}&revids=200|300&rvdiffto=300")
        );
        assert_eq!(
            web_diff_url(ORIGIN, &range),
            "https://en.wikipedia.org/w/index.php?oldid=200&diff=300"
        );
    }

    #[test]
    fn test_parent_id_takes_precedence() {
        let revision = RevisionRef::new(300, 5);
        let first = RevisionRef::new(200, 5).with_parent(150);
        let range = DiffRange::resolve(&revision, Some(&first), Some(150));

        assert_eq!(range, DiffRange::Between { from: 150, to: 300 });
        assert_eq!(
            query_url(ORIGIN, &range),
            format!("{BASE}&revids=150|300&rvdiffto=300")
        );
        assert_eq!(
            web_diff_url(ORIGIN, &range),
            "https://en.wikipedia.org/w/index.php?oldid=150&diff=300"
        );
    }

    #[test]
    fn test_urls_are_idempotent() {
        let range = DiffRange::Between { from: 1, to: 2 };
        assert_eq!(query_url(ORIGIN, &range), query_url(ORIGIN, &range));
        assert_eq!(web_diff_url(ORIGIN, &range), web_diff_url(ORIGIN, &range));
    }

    #[test]
    fn test_wiki_origin() {
        let wiki: WikiId = "wikidata".parse().unwrap();
        assert_eq!(
            wiki_origin(&WikimediaDomains::new(), "https", &wiki),
            "https://www.wikidata.org"
        );
    }

    #[test]
    fn test_editors_url() {
        assert_eq!(
            editors_url(ORIGIN, 5, 100, 300),
            "https://en.wikipedia.org/w/api.php?action=query&prop=revisions&format=json&origin=*&pageids=5&rvprop=user&rvlimit=max&rvstartid=300&rvendid=100"
        );
    }
}
