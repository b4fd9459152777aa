//! Error types for logwarden

use std::path::PathBuf;

/// logwarden error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Log directory unavailable: {0}")]
    DirectoryUnavailable(PathBuf),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Rejected file name (must be a single path segment): {0:?}")]
    PathTraversalRejected(String),

    #[error("Invalid retention: max age must be at least 1 day, got {0}")]
    InvalidRetention(u32),

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for logwarden
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    /// Map an error raised while opening `path`, keeping "not found" distinct
    pub fn from_open(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.into())
        } else {
            Error::IoError(err)
        }
    }

    /// True for conditions the boundary should render as "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FileNotFound(_) | Error::DirectoryUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FileNotFound(PathBuf::from("/var/log/app.log"));
        assert_eq!(err.to_string(), "File not found: /var/log/app.log");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_from_open_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from_open("app.log", io_err);
        assert!(matches!(err, Error::FileNotFound(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_open_other() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from_open("app.log", io_err);
        assert!(matches!(err, Error::IoError(_)));
        assert!(!err.is_not_found());
    }
}
