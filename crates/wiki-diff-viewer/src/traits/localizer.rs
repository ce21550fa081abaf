//! Trait for translating user-facing strings.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid"));

/// Translates message keys into display strings.
///
/// Messages may contain `%{name}` placeholders, filled from `params`.
pub trait Localizer: Send + Sync {
    /// Look up `key` and interpolate `params`; unknown keys yield the key.
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// Built-in English messages.
pub struct EnglishLocalizer {
    messages: HashMap<&'static str, &'static str>,
}

impl EnglishLocalizer {
    pub fn new() -> Self {
        let messages = HashMap::from([
            ("revisions.diff_show", "Show diff"),
            ("revisions.diff_open", "Open Diff Viewer"),
            ("revisions.diff_close", "Close Diff Viewer"),
            ("revisions.edited_on", "Edited on %{edit_date}"),
            ("revisions.chars_added", "Chars Added"),
            (
                "revisions.edit_time_span",
                "Edits from %{first_time} to %{last_time}",
            ),
            ("revisions.view_on_wiki", "View on wiki"),
            ("revisions.diff_failed", "The diff could not be loaded: %{error}"),
            ("revisions.diff_retry", "Retry"),
            ("users.edits_by", "Edits by:"),
            ("articles.previous", "Previous"),
            ("articles.next", "Next"),
        ]);
        Self { messages }
    }
}

impl Default for EnglishLocalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizer for EnglishLocalizer {
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.messages.get(key) {
            Some(message) => interpolate(message, params),
            None => {
                log::debug!("Missing translation for '{}'", key);
                key.to_string()
            }
        }
    }
}

/// Replace `%{name}` placeholders; unknown placeholders stay as they are
///
/// Substituted values are never scanned for placeholders again.
pub fn interpolate(message: &str, params: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(message, |caps: &Captures| {
            match params.iter().find(|(name, _)| *name == &caps[1]) {
                Some((_, value)) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message() {
        let i18n = EnglishLocalizer::new();
        assert_eq!(i18n.t("revisions.diff_show", &[]), "Show diff");
    }

    #[test]
    fn test_interpolation() {
        let i18n = EnglishLocalizer::new();
        assert_eq!(
            i18n.t(
                "revisions.edit_time_span",
                &[("first_time", "2024-01-01 10:00 AM"), ("last_time", "2024-01-03 12:30 PM")]
            ),
            "Edits from 2024-01-01 10:00 AM to 2024-01-03 12:30 PM"
        );
    }

    #[test]
    fn test_missing_key_returns_key() {
        let i18n = EnglishLocalizer::new();
        assert_eq!(i18n.t("revisions.nope", &[]), "revisions.nope");
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        assert_eq!(interpolate("a %{b} c", &[("x", "y")]), "a %{b} c");
    }

    #[test]
    fn test_values_are_not_reinterpolated() {
        assert_eq!(
            interpolate(
                "Edits from %{first_time} to %{last_time}",
                &[("first_time", "%{last_time}"), ("last_time", "noon")]
            ),
            "Edits from %{last_time} to noon"
        );
    }
}
