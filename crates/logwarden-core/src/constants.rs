//! Constants and default values for logwarden

use std::path::PathBuf;

/// Default logwarden home directory name
pub const LOGWARDEN_DIR: &str = ".logwarden";

/// Default log directory name
pub const LOGS_DIR: &str = "logs";

/// Config file names to search for (in priority order)
pub const CONFIG_FILES: &[&str] = &[
    "logwarden.toml",
    "logwarden.yaml",
    "logwarden.yml",
    "logwarden.json",
];

/// Default glob a file name must match to be listed
pub const DEFAULT_FILE_PATTERN: &str = "*.log";

/// Default number of lines for a tail view
pub const DEFAULT_TAIL_LINES: usize = 100;

/// Default cap on returned search matches
pub const DEFAULT_SEARCH_MAX_RESULTS: usize = 50;

/// Default cap on returned error lines
pub const DEFAULT_ERROR_MAX_RESULTS: usize = 20;

/// Default retention age in days
pub const DEFAULT_RETENTION_DAYS: u32 = 7;

/// Default forward scan limit in bytes (512MB)
pub const DEFAULT_MAX_SCAN_BYTES: u64 = 512 * 1024 * 1024;

/// Chunk size used when reading backwards from the end of a file
pub const REVERSE_CHUNK_SIZE: usize = 8192;

/// Units used for human-readable sizes
pub const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB"];

/// Get the logwarden home directory
pub fn logwarden_home() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(LOGWARDEN_DIR))
        .unwrap_or_else(|| PathBuf::from(LOGWARDEN_DIR))
}

/// Get the default logs directory
pub fn logs_dir() -> PathBuf {
    logwarden_home().join(LOGS_DIR)
}
