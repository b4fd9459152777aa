//! Configuration file parsing for logwarden
//!
//! Supports multiple configuration file formats:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{Error, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

fn default_log_dir() -> PathBuf {
    logs_dir()
}

fn default_file_pattern() -> String {
    DEFAULT_FILE_PATTERN.to_string()
}

fn default_tail_lines() -> usize {
    DEFAULT_TAIL_LINES
}

fn default_search_max_results() -> usize {
    DEFAULT_SEARCH_MAX_RESULTS
}

fn default_error_max_results() -> usize {
    DEFAULT_ERROR_MAX_RESULTS
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

fn default_max_scan_bytes() -> u64 {
    DEFAULT_MAX_SCAN_BYTES
}

/// Inspector configuration (logwarden.toml/yaml/json)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InspectorConfig {
    /// Directory holding the log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Glob a file name must match to be listed
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    #[serde(default = "default_tail_lines")]
    pub tail_lines: usize,
    #[serde(default = "default_search_max_results")]
    pub search_max_results: usize,
    #[serde(default = "default_error_max_results")]
    pub error_max_results: usize,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Forward scans stop after this many bytes
    #[serde(default = "default_max_scan_bytes")]
    pub max_scan_bytes: u64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            file_pattern: default_file_pattern(),
            tail_lines: DEFAULT_TAIL_LINES,
            search_max_results: DEFAULT_SEARCH_MAX_RESULTS,
            error_max_results: DEFAULT_ERROR_MAX_RESULTS,
            retention_days: DEFAULT_RETENTION_DAYS,
            max_scan_bytes: DEFAULT_MAX_SCAN_BYTES,
        }
    }
}

impl InspectorConfig {
    /// Defaults pointed at a specific directory
    pub fn for_dir(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            ..Self::default()
        }
    }

    /// Load config from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            Error::ConfigError(format!(
                "Unsupported config file extension: {}. Expected .toml, .yaml, .yml, or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse config content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: InspectorConfig = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Find and load a config file from a directory
    pub fn find_and_load(dir: &Path) -> Result<(Self, PathBuf)> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok((config, path));
            }
        }
        Err(Error::ConfigError(format!(
            "No config file found in {}. Expected one of: {:?}",
            dir.display(),
            CONFIG_FILES
        )))
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = glob::Pattern::new(&self.file_pattern) {
            return Err(Error::config(format!(
                "Invalid file_pattern '{}': {}",
                self.file_pattern, e
            )));
        }
        if self.retention_days == 0 {
            return Err(Error::InvalidRetention(self.retention_days));
        }
        if self.max_scan_bytes == 0 {
            return Err(Error::config("max_scan_bytes must be greater than 0"));
        }
        Ok(())
    }
}
