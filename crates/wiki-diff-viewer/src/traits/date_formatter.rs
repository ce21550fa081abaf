//! Trait for formatting revision dates.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Formats dates for the panel legend.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: &DateTime<Utc>) -> String;

    /// Format an RFC 3339 timestamp as returned by the wiki API.
    ///
    /// Strings that do not parse are shown as they are.
    fn format_timestamp(&self, timestamp: &str) -> String {
        match DateTime::parse_from_rfc3339(timestamp) {
            Ok(date) => self.format_date(&date.with_timezone(&Utc)),
            Err(e) => {
                log::debug!("Unparseable timestamp '{}': {}", timestamp, e);
                timestamp.to_string()
            }
        }
    }
}

/// `YYYY-MM-DD h:mm AM` in a fixed UTC offset.
pub struct ChronoDateFormatter {
    offset: FixedOffset,
}

impl ChronoDateFormatter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for ChronoDateFormatter {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl DateFormatter for ChronoDateFormatter {
    fn format_date(&self, date: &DateTime<Utc>) -> String {
        date.with_timezone(&self.offset)
            .format("%Y-%m-%d %-I:%M %p")
            .to_string()
    }
}
