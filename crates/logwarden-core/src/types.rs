//! Core types for logwarden

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::constants::SIZE_UNITS;
use crate::error::{Error, Result};

/// Validate a caller-supplied file name before it is joined with the log
/// directory. Only a single, non-empty path segment is accepted.
pub fn validate_file_name(name: &str) -> Result<()> {
    let rejected = name.is_empty()
        || name == "."
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.contains('\0');

    if rejected {
        return Err(Error::PathTraversalRejected(name.to_string()));
    }
    Ok(())
}

/// Format a byte count as `"<value> <unit>"`, rounded to 2 decimal places
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value > 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Severity of a single log line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Error,
    Critical,
    Warning,
    Info,
    Debug,
    Unknown,
}

impl Level {
    /// Every level, known ones first
    pub const ALL: [Level; 6] = [
        Level::Error,
        Level::Critical,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Unknown => "UNKNOWN",
        }
    }

    /// ERROR and CRITICAL
    pub fn is_severe(&self) -> bool {
        matches!(self, Level::Error | Level::Critical)
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            "WARNING" => Ok(Level::Warning),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "UNKNOWN" => Ok(Level::Unknown),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A log file found in the log directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogFileInfo {
    /// Base name only, never a path
    pub name: String,
    pub size_bytes: u64,
    pub size_human: String,
    pub modified_at: DateTime<Utc>,
}

impl LogFileInfo {
    pub fn new(name: String, size_bytes: u64, modified_at: DateTime<Utc>) -> Self {
        Self {
            name,
            size_bytes,
            size_human: format_size(size_bytes),
            modified_at,
        }
    }
}

/// A single annotated line from a log file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogLine {
    /// 1-based position in the file at read time
    pub line_number: u64,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
}

/// The last lines of a file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailResult {
    pub filename: String,
    /// Lines concatenated with their original terminators
    pub content: String,
    pub lines_requested: usize,
    pub lines_returned: usize,
    pub file_size_bytes: u64,
    pub file_size_human: String,
    pub last_modified: DateTime<Utc>,
}

/// Matches of a substring search over one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub filename: String,
    /// Oldest to newest, only the most recent matches are kept
    pub matches: Vec<LogLine>,
    /// Every match found during the scan, not just those returned
    pub total_matches: u64,
    /// The scan stopped at the configured byte limit
    #[serde(default)]
    pub truncated: bool,
}

/// Outcome of a retention sweep
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanupReport {
    pub deleted_files: BTreeSet<String>,
    pub deleted_count: usize,
    /// Nothing was deleted, `deleted_files` lists what would have been
    #[serde(default)]
    pub dry_run: bool,
}

impl CleanupReport {
    pub fn new(deleted_files: BTreeSet<String>, dry_run: bool) -> Self {
        Self {
            deleted_count: deleted_files.len(),
            deleted_files,
            dry_run,
        }
    }
}
