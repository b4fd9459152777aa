//! Log directory listing

use chrono::{DateTime, Utc};
use logwarden_core::{constants::DEFAULT_FILE_PATTERN, Error, LogFileInfo, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Enumerates the log files of a single flat directory
#[derive(Debug, Clone)]
pub struct FileCatalog {
    dir: PathBuf,
    pattern: glob::Pattern,
}

impl FileCatalog {
    /// Catalog of `*.log` files in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_pattern(dir, DEFAULT_FILE_PATTERN)
    }

    /// Catalog of files in `dir` whose name matches `pattern`
    pub fn with_pattern(dir: impl Into<PathBuf>, pattern: &str) -> Result<Self> {
        let pattern = glob::Pattern::new(pattern)
            .map_err(|e| Error::config(format!("Invalid file pattern '{}': {}", pattern, e)))?;
        Ok(Self {
            dir: dir.into(),
            pattern,
        })
    }

    /// List files, most recently modified first (ties by name).
    ///
    /// A missing or unreadable directory yields an empty list.
    pub fn list(&self) -> Vec<LogFileInfo> {
        let mut files = self.list_unordered();
        files.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        files
    }

    /// List files in directory order, an unavailable directory yields nothing
    pub fn list_unordered(&self) -> Vec<LogFileInfo> {
        match self.scan() {
            Ok(files) => files,
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        }
    }

    /// Read the directory, failing with `DirectoryUnavailable`
    pub fn scan(&self) -> Result<Vec<LogFileInfo>> {
        let entries =
            fs::read_dir(&self.dir).map_err(|_| Error::DirectoryUnavailable(self.dir.clone()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry in {}: {}", self.dir.display(), e);
                    continue;
                }
            };

            let Ok(name) = entry.file_name().into_string() else {
                debug!("Skipping non UTF-8 file name in {}", self.dir.display());
                continue;
            };
            if !self.pattern.matches(&name) {
                continue;
            }

            // Vanished between read_dir and stat
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }

            let modified_at = match metadata.modified() {
                Ok(time) => DateTime::<Utc>::from(time),
                Err(e) => {
                    debug!("No modification time for {}: {}", name, e);
                    continue;
                }
            };

            files.push(LogFileInfo::new(name, metadata.len(), modified_at));
        }

        debug!("Found {} log files in {}", files.len(), self.dir.display());
        Ok(files)
    }

    /// Get the directory path
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str, content: &str, age_secs: u64) {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    #[test]
    fn test_list_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "old.log", "a", 3600);
        touch(&dir, "new.log", "bb", 10);
        touch(&dir, "mid.log", "ccc", 600);

        let catalog = FileCatalog::new(dir.path()).unwrap();
        let names: Vec<String> = catalog.list().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["new.log", "mid.log", "old.log"]);
    }

    #[test]
    fn test_list_ties_broken_by_name() {
        let dir = TempDir::new().unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(60);
        for name in ["b.log", "c.log", "a.log"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "x").unwrap();
            File::options().write(true).open(&path).unwrap().set_modified(mtime).unwrap();
        }

        let catalog = FileCatalog::new(dir.path()).unwrap();
        let names: Vec<String> = catalog.list().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a.log", "b.log", "c.log"]);
    }

    #[test]
    fn test_list_reports_sizes() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "app.log", &"x".repeat(1536), 0);

        let files = FileCatalog::new(dir.path()).unwrap().list();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size_bytes, 1536);
        assert_eq!(files[0].size_human, "1.5 KB");
    }

    #[test]
    fn test_list_filters_pattern_and_dirs() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "app.log", "x", 0);
        touch(&dir, "notes.txt", "x", 0);
        std::fs::create_dir(dir.path().join("archive.log")).unwrap();

        let files = FileCatalog::new(dir.path()).unwrap().list();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["app.log"]);

        let all = FileCatalog::with_pattern(dir.path(), "*").unwrap().list();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let catalog = FileCatalog::new("/nonexistent/logs").unwrap();
        assert!(catalog.list().is_empty());
        assert!(matches!(catalog.scan(), Err(Error::DirectoryUnavailable(_))));
    }

    #[test]
    fn test_names_are_basenames() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "worker.log", "x", 0);

        for file in FileCatalog::new(dir.path()).unwrap().list() {
            assert!(!file.name.contains('/'));
            assert!(!file.name.contains('\\'));
        }
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(FileCatalog::with_pattern("/tmp", "[").is_err());
    }
}
