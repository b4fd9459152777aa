//! Recent ERROR / CRITICAL lines of a log file

use logwarden_core::{Level, LogLine, Result};
use std::path::PathBuf;

use crate::classifier::extract_level;
use crate::search::LogSearcher;

/// Collects the most recent error lines, built on [`LogSearcher`]
pub struct ErrorExtractor {
    searcher: LogSearcher,
}

impl ErrorExtractor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            searcher: LogSearcher::new(path),
        }
    }

    pub fn with_max_scan_bytes(mut self, max_scan_bytes: u64) -> Self {
        self.searcher = self.searcher.with_max_scan_bytes(max_scan_bytes);
        self
    }

    /// Lines mentioning "error" or "critical" (any case), oldest first
    pub fn recent_errors(&self, max_results: usize) -> Result<Vec<LogLine>> {
        self.recent(max_results, None)
    }

    /// Like [`Self::recent_errors`], optionally narrowed to one classified level
    pub fn recent(&self, max_results: usize, level: Option<Level>) -> Result<Vec<LogLine>> {
        let outcome = self.searcher.scan(max_results, |line| {
            let lower = line.to_lowercase();
            if !(lower.contains("error") || lower.contains("critical")) {
                return false;
            }
            level.map_or(true, |wanted| extract_level(line) == wanted)
        })?;

        Ok(outcome.matches.into())
    }
}
