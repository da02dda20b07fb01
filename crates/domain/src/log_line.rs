//! Backend log lines: level extraction and safe HTML rendering.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::escape::escape_html;

/// Leading timestamp, one uppercase level token, then free text.
static LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([\d\-:, ]+)\s+([A-Z]+)\s+(.*)$").expect("log line pattern is valid")
});

/// Timestamp layout written by the backend's logging formatter.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Layout of the timestamp line under each rendered entry.
const DISPLAY_FORMAT: &str = "%H:%M:%S - %Y-%m-%d";

/// One line of the backend log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// The trimmed line as received.
    pub raw: String,
    /// Level token (`INFO`, `ERROR`, …) when the line matched the pattern.
    pub level: Option<String>,
    /// Message after the level token, or the whole line when unmatched.
    pub message: String,
    /// Timestamp prefix exactly as captured, trimmed.
    pub stamp: Option<String>,
    /// Parsed timestamp prefix, when it is a full `YYYY-MM-DD HH:MM:SS,mmm`.
    pub timestamp: Option<NaiveDateTime>,
}

impl LogLine {
    /// Split a raw line into timestamp, level and message.
    ///
    /// Lines that do not match keep `level = None` and the trimmed line as
    /// their message; they are still displayed.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match LOG_LINE.captures(raw) {
            Some(caps) => {
                let stamp = caps[1].trim();
                let timestamp = NaiveDateTime::parse_from_str(
                    stamp.trim_end_matches(['-', ' ']),
                    TIMESTAMP_FORMAT,
                )
                .ok();
                Self {
                    raw: raw.to_string(),
                    level: Some(caps[2].to_string()),
                    message: caps[3].to_string(),
                    stamp: Some(stamp.to_string()),
                    timestamp,
                }
            }
            None => Self {
                raw: raw.to_string(),
                level: None,
                message: raw.to_string(),
                stamp: None,
                timestamp: None,
            },
        }
    }

    /// Timestamp as shown under the entry: `HH:MM:SS - YYYY-MM-DD` when the
    /// prefix parsed, the captured text otherwise.
    #[must_use]
    pub fn display_time(&self) -> Option<String> {
        match (&self.timestamp, &self.stamp) {
            (Some(timestamp), _) => Some(timestamp.format(DISPLAY_FORMAT).to_string()),
            (None, Some(stamp)) => Some(stamp.clone()),
            (None, None) => None,
        }
    }

    /// Render the line as an HTML fragment with every interpolated piece escaped.
    ///
    /// Matched lines give a level/message paragraph followed by a timestamp
    /// paragraph. Unmatched lines are the escaped raw text.
    #[must_use]
    pub fn to_html(&self) -> String {
        match &self.level {
            Some(level) => format!(
                r#"<p><strong class="log-level log-level-{}">{}</strong> {}</p><p class="log-timestamp">{}</p>"#,
                escape_html(&level.to_ascii_lowercase()),
                escape_html(level),
                escape_html(&self.message),
                escape_html(&self.display_time().unwrap_or_default()),
            ),
            None => escape_html(&self.raw).into_owned(),
        }
    }
}
