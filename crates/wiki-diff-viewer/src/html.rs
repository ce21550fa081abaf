//! Sanitized HTML fragments
//!
//! Diff markup comes from a remote API and ends up injected into a page.
//! [`HtmlFragment`] is the only carrier for that markup: it can be built
//! from untrusted input through [`HtmlFragment::sanitize`] or from one of the
//! crate's own static notices, and it is read back only through
//! [`HtmlFragment::as_trusted_markup`].
//!
//! Sanitizing parses the markup with an HTML5 parser and keeps only the
//! elements a diff table is made of:
//! - `tr`, `td`, `th`, `colgroup`, `col`, `div`, `span`, `ins`, `del`, `a`, `br`
//! - `class`, `title` and `data-*` on any of them, plus cell spans and link targets
//! - `href` only when it is relative or http(s), checked after entity decoding
//!
//! Any other element is unwrapped (its text stays). `script` and `style`
//! are removed together with their content.

use ammonia::{Builder, UrlRelative};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Shown instead of a diff when the API returned no diff for the revision
pub const REVISION_UNAVAILABLE_NOTICE: &str = "<div class=\"warning\">This revision is not available. It may have been deleted. More details may be available on wiki.</div>";

const ALLOWED_TAGS: &[&str] = &[
    "tr", "td", "th", "colgroup", "col", "div", "span", "ins", "del", "a", "br",
];

/// Diff bodies are bare table rows, which only parse inside a table
const TABLE_PARTS: &[&str] = &["<tr", "<td", "<th", "<col"];

static SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::empty();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .clean_content_tags(HashSet::from(["script", "style"]))
        .generic_attributes(HashSet::from(["class", "title"]))
        .generic_attribute_prefixes(HashSet::from(["data-"]))
        .tag_attributes(HashMap::from([
            ("td", HashSet::from(["colspan", "rowspan"])),
            ("th", HashSet::from(["colspan", "rowspan"])),
            ("col", HashSet::from(["span"])),
            ("colgroup", HashSet::from(["span"])),
            ("a", HashSet::from(["href", "name"])),
        ]))
        .url_schemes(HashSet::from(["http", "https"]))
        .url_relative(UrlRelative::PassThrough)
        .link_rel(None)
        .strip_comments(true);
    builder
});

/// Sanitized HTML markup, safe to inject into a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlFragment(String);

impl HtmlFragment {
    /// Sanitize untrusted markup
    pub fn sanitize(raw: &str) -> Self {
        let clean = if starts_with_table_part(raw) {
            // The wrapping table is not an allowed tag, so only its rows survive
            SANITIZER.clean(&format!("<table>{raw}</table>")).to_string()
        } else {
            SANITIZER.clean(raw).to_string()
        };

        if clean.len() < raw.len() {
            log::debug!(
                "Sanitizing diff markup removed {} bytes",
                raw.len() - clean.len()
            );
        }
        Self(clean)
    }

    /// The "revision not available" notice
    pub fn revision_unavailable() -> Self {
        Self(REVISION_UNAVAILABLE_NOTICE.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The markup, for handing to a rendering surface
    pub fn as_trusted_markup(&self) -> &str {
        &self.0
    }
}

fn starts_with_table_part(raw: &str) -> bool {
    let head = raw.trim_start();
    TABLE_PARTS.iter().any(|part| {
        head.get(..part.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(part))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clean(raw: &str) -> String {
        HtmlFragment::sanitize(raw).as_trusted_markup().to_string()
    }

    #[test]
    fn test_diff_rows_pass_through_unchanged() {
        let rows = "<tr>\n  <td colspan=\"2\" class=\"diff-lineno\">Line 1:</td>\n  <td class=\"diff-marker\" data-marker=\"+\"></td>\n  <td class=\"diff-addedline\"><div>Hello <ins class=\"diffchange\">world</ins> &amp; co<br></div></td>\n</tr>";
        assert_eq!(clean(rows), rows);
    }

    #[test]
    fn test_unknown_tags_are_unwrapped() {
        assert_eq!(clean("<x>a</x>"), "a");
        assert_eq!(clean("<div><p>b</p></div>"), "<div>b</div>");
    }

    #[test]
    fn test_scripts_and_styles_removed_with_content() {
        assert_eq!(
            clean("<tr><script>alert(1)</script><td>a</td><STYLE>td{}</STYLE></tr>"),
            "<tr><td>a</td></tr>"
        );
        assert_eq!(clean("a<!-- hidden -->b"), "ab");
    }

    #[test]
    fn test_event_handlers_and_style_dropped() {
        assert_eq!(
            clean("<td class=\"a\" onclick=\"evil()\" style='color:red' ONMOUSEOVER=x>b</td>"),
            "<td class=\"a\">b</td>"
        );
    }

    #[test]
    fn test_only_web_links_kept() {
        assert_eq!(
            clean("<a href=\"https://en.wikipedia.org/wiki/X\">x</a>"),
            "<a href=\"https://en.wikipedia.org/wiki/X\">x</a>"
        );
        assert_eq!(
            clean("<a href=\"#movedpara_1_0_lhs\">x</a>"),
            "<a href=\"#movedpara_1_0_lhs\">x</a>"
        );
        assert_eq!(clean("<a href=\"javascript:alert(1)\">x</a>"), "<a>x</a>");
        assert_eq!(clean("<a href=\"data:text/html;base64,xx\">x</a>"), "<a>x</a>");
    }

    #[test]
    fn test_encoded_schemes_are_decoded_before_checking() {
        for raw in [
            "<a href=\"&#106;avascript:alert(1)\">x</a>",
            "<a href=\"javascript&colon;alert(1)\">x</a>",
            "<a href=\"java&#x09;script:alert(1)\">x</a>",
            "<a href=\" java\tscript:alert(1)\">x</a>",
        ] {
            let out = clean(raw);
            assert!(!out.contains("avascript"), "{raw} => {out}");
            assert!(!out.contains("href"), "{raw} => {out}");
        }
    }

    #[test]
    fn test_foreign_content_removed() {
        for raw in [
            "<svg><animate attributeName=\"href\" values=\"javascript:alert(1)\"/><a><text>s</text></a></svg>",
            "<math><mtext><a xlink:href=\"java&#x09;script:alert(1)\">m</a></mtext></math>",
            "<img src=x onerror=alert(1)><iframe srcdoc=\"<script>alert(1)</script>\"></iframe>",
        ] {
            let out = clean(raw);
            assert!(!out.contains("avascript"), "{raw} => {out}");
            assert!(!out.contains("alert"), "{raw} => {out}");
            assert!(!out.contains("<svg"), "{raw} => {out}");
            assert!(!out.contains("<img"), "{raw} => {out}");
        }
    }

    #[test]
    fn test_stray_angle_brackets_escaped() {
        assert_eq!(clean("1 < 2 > 0"), "1 &lt; 2 &gt; 0");
    }

    #[test]
    fn test_revision_unavailable_notice() {
        let notice = HtmlFragment::revision_unavailable();
        assert_eq!(notice.as_trusted_markup(), REVISION_UNAVAILABLE_NOTICE);
        assert!(!notice.is_empty());
        assert!(HtmlFragment::sanitize("").is_empty());
    }
}
