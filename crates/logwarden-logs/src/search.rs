//! Forward, bounded-memory substring search over a log file

use logwarden_core::{constants::DEFAULT_MAX_SCAN_BYTES, Error, LogLine, Result, SearchResult};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::classifier::classify;
use crate::reader::decode_line;

/// Matches retained from one forward scan
#[derive(Debug, Default)]
pub(crate) struct ScanOutcome {
    /// At most `max_results`, oldest first
    pub matches: VecDeque<LogLine>,
    pub total: u64,
    pub truncated: bool,
}

/// Scans a file line by line, keeping only the most recent matches
pub struct LogSearcher {
    path: PathBuf,
    max_scan_bytes: u64,
}

impl LogSearcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_scan_bytes: DEFAULT_MAX_SCAN_BYTES,
        }
    }

    /// Stop scanning after this many bytes
    pub fn with_max_scan_bytes(mut self, max_scan_bytes: u64) -> Self {
        self.max_scan_bytes = max_scan_bytes;
        self
    }

    /// Case-insensitive substring search returning the last `max_results` matches
    pub fn search(&self, query: &str, max_results: usize) -> Result<SearchResult> {
        let needle = query.to_lowercase();
        let outcome = self.scan(max_results, |line| line.to_lowercase().contains(&needle))?;

        Ok(SearchResult {
            query: query.to_string(),
            filename: file_name(&self.path),
            matches: outcome.matches.into(),
            total_matches: outcome.total,
            truncated: outcome.truncated,
        })
    }

    /// Scan forward, keeping the last `max_results` lines accepted by `matcher`.
    ///
    /// Line numbers count physical lines. Reads are capped at the length seen
    /// at open time and at `max_scan_bytes`, whichever is smaller.
    pub(crate) fn scan<F>(&self, max_results: usize, mut matcher: F) -> Result<ScanOutcome>
    where
        F: FnMut(&str) -> bool,
    {
        let file = File::open(&self.path).map_err(|e| Error::from_open(&self.path, e))?;
        let len = file.metadata()?.len();
        let limit = std::cmp::min(len, self.max_scan_bytes);

        let mut outcome = ScanOutcome {
            matches: VecDeque::with_capacity(max_results.min(1024) + 1),
            total: 0,
            truncated: len > limit,
        };

        if outcome.truncated {
            warn!(
                "Scan of {} limited to {} of {} bytes",
                self.path.display(),
                limit,
                len
            );
        }

        let mut reader = BufReader::new(file.take(limit));
        let mut buffer = Vec::new();
        let mut line_number = 0u64;

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let line = decode_line(&buffer);
            if !matcher(&line) {
                continue;
            }

            outcome.total += 1;
            if max_results == 0 {
                continue;
            }
            outcome.matches.push_back(classify(line_number, &line));
            if outcome.matches.len() > max_results {
                outcome.matches.pop_front();
            }
        }

        debug!(
            "Scanned {} lines of {}: {} matches, kept {}",
            line_number,
            self.path.display(),
            outcome.total,
            outcome.matches.len()
        );

        Ok(outcome)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE: &str = "[2024-01-01 10:00:00] INFO: start\n\
[2024-01-01 10:00:01] ERROR: boom\n\
plain line\n\
[2024-01-01 10:00:02] WARNING: retrying\n\
[2024-01-01 10:00:03] INFO: done\n";

    fn sample_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("laravel.log");
        std::fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_search_single_match() {
        let dir = TempDir::new().unwrap();
        let searcher = LogSearcher::new(sample_file(&dir));

        let result = searcher.search("retry", 50).unwrap();
        assert_eq!(result.filename, "laravel.log");
        assert_eq!(result.query, "retry");
        assert_eq!(result.total_matches, 1);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].line_number, 4);
        assert_eq!(result.matches[0].timestamp.as_deref(), Some("2024-01-01 10:00:02"));
        assert!(!result.truncated);
    }

    #[test]
    fn test_search_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let searcher = LogSearcher::new(sample_file(&dir));

        let result = searcher.search("PLAIN", 50).unwrap();
        assert_eq!(result.total_matches, 1);
        assert_eq!(result.matches[0].content, "plain line");
        assert_eq!(result.matches[0].line_number, 3);
        assert_eq!(result.matches[0].timestamp, None);
    }

    #[test]
    fn test_search_keeps_most_recent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("many.log");
        {
            let mut file = File::create(&path).unwrap();
            for i in 1..=120 {
                writeln!(file, "request {}", i).unwrap();
                writeln!(file, "noise").unwrap();
            }
        }

        let result = LogSearcher::new(&path).search("request", 50).unwrap();
        assert_eq!(result.total_matches, 120);
        assert_eq!(result.matches.len(), 50);
        assert_eq!(result.matches[0].content, "request 71");
        assert_eq!(result.matches[0].line_number, 141);
        assert_eq!(result.matches[49].content, "request 120");
        assert_eq!(result.matches[49].line_number, 239);
    }

    #[test]
    fn test_search_fewer_than_cap() {
        let dir = TempDir::new().unwrap();
        let result = LogSearcher::new(sample_file(&dir)).search("info", 50).unwrap();

        assert_eq!(result.total_matches, 2);
        let numbers: Vec<u64> = result.matches.iter().map(|m| m.line_number).collect();
        assert_eq!(numbers, vec![1, 5]);
    }

    #[test]
    fn test_search_zero_cap_still_counts() {
        let dir = TempDir::new().unwrap();
        let result = LogSearcher::new(sample_file(&dir)).search("2024", 0).unwrap();

        assert_eq!(result.total_matches, 4);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_search_no_match() {
        let dir = TempDir::new().unwrap();
        let result = LogSearcher::new(sample_file(&dir)).search("checkout", 50).unwrap();

        assert_eq!(result.total_matches, 0);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_search_trims_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ws.log");
        std::fs::write(&path, "   padded match   \r\n").unwrap();

        let result = LogSearcher::new(&path).search("match", 50).unwrap();
        assert_eq!(result.matches[0].content, "padded match");
    }

    #[test]
    fn test_search_nonexistent_file() {
        let result = LogSearcher::new("/nonexistent/app.log").search("x", 50);
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_search_tolerates_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bin.log");
        std::fs::write(&path, b"\xff\xff needle\nclean\n").unwrap();

        let result = LogSearcher::new(&path).search("needle", 50).unwrap();
        assert_eq!(result.total_matches, 1);
        assert_eq!(result.matches[0].line_number, 1);
    }

    #[test]
    fn test_search_respects_scan_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.log");
        std::fs::write(&path, "hit one\nhit two\nhit three\n").unwrap();

        let result = LogSearcher::new(&path)
            .with_max_scan_bytes(16)
            .search("hit", 50)
            .unwrap();

        assert!(result.truncated);
        assert_eq!(result.total_matches, 2);
    }
}
