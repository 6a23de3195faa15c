// ── Activity log ring ──
//
// Log entries are immutable once created. The retained set is capped so
// a long-running session cannot grow without bound; the notification
// feed is derived from the newest warn/error entries.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use portway_api::models::RawLogEntry;

/// Severity of an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Warn and error entries surface in the notification feed.
    pub fn is_notable(self) -> bool {
        matches!(self, Self::Warn | Self::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        })
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(()),
        }
    }
}

/// One activity log entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: String,
    pub level: LogLevel,
    pub user: String,
    pub ip: Option<String>,
    pub action: String,
}

impl LogEntry {
    /// Stamp a new entry with the current wall-clock time.
    pub fn now(level: LogLevel, user: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            time: chrono::Local::now().format("%I:%M:%S %p").to_string(),
            level,
            user: user.into(),
            ip: None,
            action: action.into(),
        }
    }

    /// Decode a backend log record, tolerating missing fields.
    pub fn from_raw(raw: RawLogEntry) -> Self {
        Self {
            time: raw.time.unwrap_or_else(|| "N/A".into()),
            level: raw
                .level
                .as_deref()
                .and_then(|l| l.parse().ok())
                .unwrap_or_default(),
            user: raw.user.unwrap_or_else(|| "Unknown".into()),
            ip: raw.ip,
            action: raw.action.unwrap_or_else(|| "Unknown activity".into()),
        }
    }
}

/// Default retention cap for the visible log set.
pub const DEFAULT_LOG_CAP: usize = 100;

/// Bounded ring of log entries, newest first.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    cap: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_cap(DEFAULT_LOG_CAP)
    }
}

impl LogBuffer {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Insert at the front; the oldest entry is dropped past the cap.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.cap);
    }

    /// Replace the whole buffer from a backend fetch, applying the cap.
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = LogEntry>) {
        self.entries = entries.into_iter().take(self.cap).collect();
    }

    /// Snapshot, newest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The newest `limit` warn/error entries — the notification feed.
    pub fn notifications(&self, limit: usize) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.level.is_notable())
            .take(limit)
            .cloned()
            .collect()
    }
}
