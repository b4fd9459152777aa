//! Entry point used by the boundary layer: the five inspection operations
//! over one configured log directory.

use logwarden_core::{
    format_size, validate_file_name, CleanupReport, InspectorConfig, Level, LogFileInfo, LogLine,
    Result, SearchResult, TailResult,
};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::catalog::FileCatalog;
use crate::errors::ErrorExtractor;
use crate::follow::LogFollower;
use crate::reader::ReverseLineReader;
use crate::retention::RetentionSweeper;
use crate::search::LogSearcher;

/// Stateless inspector; every call re-reads the filesystem
pub struct LogInspector {
    config: InspectorConfig,
    catalog: FileCatalog,
}

impl LogInspector {
    pub fn new(config: InspectorConfig) -> Result<Self> {
        config.validate()?;
        let catalog = FileCatalog::with_pattern(&config.log_dir, &config.file_pattern)?;
        Ok(Self { config, catalog })
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Join a validated single-segment name onto the log directory
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        validate_file_name(name)?;
        Ok(self.config.log_dir.join(name))
    }

    /// Files in the log directory, newest first
    pub fn list(&self) -> Vec<LogFileInfo> {
        self.catalog.list()
    }

    /// Last `lines` lines of `name` (default from config)
    pub fn tail(&self, name: &str, lines: Option<usize>) -> Result<TailResult> {
        let path = self.resolve(name)?;
        let requested = lines.unwrap_or(self.config.tail_lines);
        let snapshot = ReverseLineReader::new(path).read_tail(requested)?;

        debug!("Tail of {}: {} lines", name, snapshot.lines.len());

        Ok(TailResult {
            filename: name.to_string(),
            content: snapshot.text(),
            lines_requested: requested,
            lines_returned: snapshot.lines.len(),
            file_size_bytes: snapshot.len,
            file_size_human: format_size(snapshot.len),
            last_modified: snapshot.modified,
        })
    }

    /// Most recent lines of `name` containing `query`, ignoring case
    pub fn search(&self, name: &str, query: &str, max_results: Option<usize>) -> Result<SearchResult> {
        let path = self.resolve(name)?;
        LogSearcher::new(path)
            .with_max_scan_bytes(self.config.max_scan_bytes)
            .search(query, max_results.unwrap_or(self.config.search_max_results))
    }

    /// Most recent ERROR / CRITICAL lines of `name`
    pub fn recent_errors(
        &self,
        name: &str,
        max_results: Option<usize>,
        level: Option<Level>,
    ) -> Result<Vec<LogLine>> {
        let path = self.resolve(name)?;
        ErrorExtractor::new(path)
            .with_max_scan_bytes(self.config.max_scan_bytes)
            .recent(max_results.unwrap_or(self.config.error_max_results), level)
    }

    /// Delete (or with `dry_run`, list) files older than `days`
    pub fn purge(&self, days: Option<u32>, dry_run: bool) -> Result<CleanupReport> {
        let days = days.unwrap_or(self.config.retention_days);
        let sweeper = RetentionSweeper::new(self.catalog.clone());

        if dry_run {
            return sweeper.dry_run(days);
        }

        let report = sweeper.purge_older_than(days)?;
        info!(
            "Retention sweep of {} ({} days): deleted {} files",
            self.config.log_dir.display(),
            days,
            report.deleted_count
        );
        Ok(report)
    }

    /// Stream lines appended to `name` from now on.
    /// Must be called within a tokio runtime.
    pub fn follow(&self, name: &str) -> Result<mpsc::Receiver<String>> {
        let path = self.resolve(name)?;
        LogFollower::new(path).follow()
    }

    /// Stream lines of `name` from byte `offset` on, e.g. a previous
    /// `TailResult::file_size_bytes`. Must be called within a tokio runtime.
    pub fn follow_from(&self, name: &str, offset: u64) -> Result<mpsc::Receiver<String>> {
        let path = self.resolve(name)?;
        LogFollower::new(path).follow_from(offset)
    }
}
