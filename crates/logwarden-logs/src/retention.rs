//! Age-based deletion of log files

use chrono::{DateTime, Duration, Utc};
use logwarden_core::{CleanupReport, Error, LogFileInfo, Result};
use std::collections::BTreeSet;
use std::fs;
use tracing::{debug, info, warn};

use crate::catalog::FileCatalog;

/// Deletes catalogued files older than a number of days
pub struct RetentionSweeper {
    catalog: FileCatalog,
}

impl RetentionSweeper {
    pub fn new(catalog: FileCatalog) -> Self {
        Self { catalog }
    }

    /// Files modified strictly before `now - max_age_days`
    pub fn plan(&self, max_age_days: u32) -> Result<Vec<LogFileInfo>> {
        let cutoff = cutoff(max_age_days, Utc::now())?;
        Ok(self.expired(cutoff))
    }

    /// Report what `purge_older_than` would delete, deleting nothing
    pub fn dry_run(&self, max_age_days: u32) -> Result<CleanupReport> {
        let names = self.plan(max_age_days)?.into_iter().map(|f| f.name).collect();
        Ok(CleanupReport::new(names, true))
    }

    /// Delete expired files. A file that cannot be removed is left out of
    /// the report and does not stop the sweep.
    pub fn purge_older_than(&self, max_age_days: u32) -> Result<CleanupReport> {
        let cutoff = cutoff(max_age_days, Utc::now())?;
        let deleted = self.delete_files(self.expired(cutoff));
        Ok(CleanupReport::new(deleted, false))
    }

    /// Remove each file, returning the names actually deleted
    fn delete_files(&self, files: Vec<LogFileInfo>) -> BTreeSet<String> {
        let mut deleted = BTreeSet::new();

        for file in files {
            let path = self.catalog.dir().join(&file.name);
            match fs::remove_file(&path) {
                Ok(()) => {
                    info!("Deleted expired log {} (modified {})", file.name, file.modified_at);
                    deleted.insert(file.name);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("Log {} vanished during sweep", file.name);
                }
                Err(e) => {
                    warn!("Failed to delete {}: {}", path.display(), e);
                }
            }
        }

        deleted
    }

    fn expired(&self, cutoff: DateTime<Utc>) -> Vec<LogFileInfo> {
        self.catalog
            .list_unordered()
            .into_iter()
            .filter(|f| f.modified_at < cutoff)
            .collect()
    }
}

fn cutoff(max_age_days: u32, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    if max_age_days == 0 {
        return Err(Error::InvalidRetention(max_age_days));
    }
    Ok(now - Duration::days(i64::from(max_age_days)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::Path;
    use std::time::SystemTime;
    use tempfile::TempDir;

    const DAY: u64 = 86_400;

    fn touch_aged(dir: &Path, name: &str, age_secs: u64) {
        let path = dir.join(name);
        fs::write(&path, "line\n").unwrap();
        let mtime = SystemTime::now() - std::time::Duration::from_secs(age_secs);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    fn sweeper(dir: &TempDir) -> RetentionSweeper {
        RetentionSweeper::new(FileCatalog::new(dir.path()).unwrap())
    }

    #[test]
    fn test_purge_deletes_only_expired() {
        let dir = TempDir::new().unwrap();
        touch_aged(dir.path(), "ancient.log", 30 * DAY);
        touch_aged(dir.path(), "old.log", 8 * DAY);
        touch_aged(dir.path(), "recent.log", 2 * DAY);
        touch_aged(dir.path(), "today.log", 0);

        let report = sweeper(&dir).purge_older_than(7).unwrap();

        let expected: BTreeSet<String> =
            ["ancient.log", "old.log"].iter().map(|s| s.to_string()).collect();
        assert_eq!(report.deleted_files, expected);
        assert_eq!(report.deleted_count, 2);
        assert!(!report.dry_run);
        assert!(!dir.path().join("old.log").exists());
        assert!(dir.path().join("recent.log").exists());
        assert!(dir.path().join("today.log").exists());
    }

    #[test]
    fn test_purge_is_idempotent() {
        let dir = TempDir::new().unwrap();
        touch_aged(dir.path(), "old.log", 10 * DAY);
        touch_aged(dir.path(), "new.log", 0);

        let sweeper = sweeper(&dir);
        assert_eq!(sweeper.purge_older_than(7).unwrap().deleted_count, 1);

        let second = sweeper.purge_older_than(7).unwrap();
        assert!(second.deleted_files.is_empty());
        assert_eq!(second.deleted_count, 0);
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let dir = TempDir::new().unwrap();
        touch_aged(dir.path(), "old.log", 10 * DAY);

        let report = sweeper(&dir).dry_run(7).unwrap();
        assert!(report.dry_run);
        assert_eq!(report.deleted_count, 1);
        assert!(dir.path().join("old.log").exists());
    }

    #[test]
    fn test_purge_ignores_unmatched_files() {
        let dir = TempDir::new().unwrap();
        touch_aged(dir.path(), "keep.txt", 30 * DAY);

        let report = sweeper(&dir).purge_older_than(1).unwrap();
        assert_eq!(report.deleted_count, 0);
        assert!(dir.path().join("keep.txt").exists());
    }

    #[test]
    fn test_purge_missing_directory() {
        let sweeper = RetentionSweeper::new(FileCatalog::new("/nonexistent/logs").unwrap());
        let report = sweeper.purge_older_than(7).unwrap();
        assert_eq!(report.deleted_count, 0);
    }

    #[test]
    fn test_zero_days_rejected() {
        let dir = TempDir::new().unwrap();
        let result = sweeper(&dir).purge_older_than(0);
        assert!(matches!(result, Err(Error::InvalidRetention(0))));
        assert!(sweeper(&dir).plan(0).is_err());
    }

    #[test]
    fn test_delete_failures_skip_only_that_file() {
        let dir = TempDir::new().unwrap();
        touch_aged(dir.path(), "expired.log", 10 * DAY);
        fs::create_dir(dir.path().join("stuck.log")).unwrap();

        let stale = Utc::now() - Duration::days(10);
        let files = vec![
            LogFileInfo::new("vanished.log".to_string(), 5, stale),
            LogFileInfo::new("stuck.log".to_string(), 0, stale),
            LogFileInfo::new("expired.log".to_string(), 5, stale),
        ];

        let deleted = sweeper(&dir).delete_files(files);

        let expected: BTreeSet<String> = ["expired.log".to_string()].into_iter().collect();
        assert_eq!(deleted, expected);
        assert!(!dir.path().join("expired.log").exists());
        assert!(dir.path().join("stuck.log").exists());
    }

    #[test]
    fn test_cutoff() {
        let now = Utc::now();
        assert_eq!(cutoff(7, now).unwrap(), now - Duration::days(7));
    }
}
