//! Timestamp and severity extraction for single log lines

use logwarden_core::{Level, LogLine};
use once_cell::sync::Lazy;
use regex::Regex;

/// `[YYYY-MM-DD HH:MM:SS]` anywhere in the line
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})\]")
        .expect("Invalid timestamp regex")
});

/// Level token followed by a colon, e.g. `local.ERROR:` or `] ERROR:`
static LEVEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(ERROR|CRITICAL|WARNING|INFO|DEBUG):").expect("Invalid level regex")
});

/// Return the first bracketed timestamp in the line, without the brackets
pub fn extract_timestamp(line: &str) -> Option<String> {
    TIMESTAMP_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Return the first severity token in the line, or `Level::Unknown`
pub fn extract_level(line: &str) -> Level {
    let Some(caps) = LEVEL_REGEX.captures(line) else {
        return Level::Unknown;
    };

    match caps.get(1).map(|m| m.as_str()) {
        Some("ERROR") => Level::Error,
        Some("CRITICAL") => Level::Critical,
        Some("WARNING") => Level::Warning,
        Some("INFO") => Level::Info,
        Some("DEBUG") => Level::Debug,
        _ => Level::Unknown,
    }
}

/// Build an annotated line; `content` is trimmed of surrounding whitespace
pub fn classify(line_number: u64, content: &str) -> LogLine {
    let content = content.trim();
    LogLine {
        line_number,
        content: content.to_string(),
        timestamp: extract_timestamp(content),
        level: Some(extract_level(content)),
    }
}
