//! Terminal and JSON output formatting

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use logwarden_core::{CleanupReport, Level, LogFileInfo, LogLine, SearchResult, TailResult};
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Global flag for JSON output mode
static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable JSON output mode
pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::SeqCst);
}

/// Check if JSON output mode is enabled
pub fn is_json_mode() -> bool {
    JSON_MODE.load(Ordering::SeqCst)
}

/// Pretty-print any serializable value
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

#[derive(Tabled)]
pub struct FileRow {
    #[tabled(rename = "name")]
    pub name: String,
    #[tabled(rename = "size")]
    pub size: String,
    #[tabled(rename = "modified")]
    pub modified: String,
}

impl From<&LogFileInfo> for FileRow {
    fn from(info: &LogFileInfo) -> Self {
        FileRow {
            name: info.name.clone(),
            size: info.size_human.clone(),
            modified: format_time(&info.modified_at),
        }
    }
}

pub fn print_files(files: &[LogFileInfo], dir: &Path) {
    if is_json_mode() {
        print_json(files);
        return;
    }

    if files.is_empty() {
        println!("No log files in {}", dir.display());
        return;
    }

    let rows: Vec<FileRow> = files.iter().map(FileRow::from).collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

pub fn print_tail(tail: &TailResult) {
    if is_json_mode() {
        print_json(tail);
        return;
    }

    print!("{}", tail.content);
    if !tail.content.is_empty() && !tail.content.ends_with('\n') {
        println!();
    }
}

pub fn print_search(result: &SearchResult) {
    if is_json_mode() {
        print_json(result);
        return;
    }

    for line in &result.matches {
        println!("{}", format_line(line));
    }

    let summary = format!(
        "showing {} of {} matches for {:?} in {}",
        result.matches.len(),
        result.total_matches,
        result.query,
        result.filename
    );
    print_info(&summary);
    if result.truncated {
        print_error("scan stopped at the configured size limit, older content was not searched");
    }
}

pub fn print_errors(filename: &str, lines: &[LogLine]) {
    if is_json_mode() {
        print_json(lines);
        return;
    }

    if lines.is_empty() {
        print_success(&format!("No errors in {}", filename));
        return;
    }

    for line in lines {
        println!("{}", format_line(line));
    }
}

pub fn print_cleanup(report: &CleanupReport, days: u32) {
    if is_json_mode() {
        print_json(report);
        return;
    }

    if report.dry_run {
        if report.deleted_count == 0 {
            print_info(&format!("No files older than {} days", days));
            return;
        }
        print_info(&format!(
            "Would delete {} file(s) older than {} days:",
            report.deleted_count, days
        ));
    } else {
        print_success(&format!(
            "Deleted {} file(s) older than {} days",
            report.deleted_count, days
        ));
    }

    for name in &report.deleted_files {
        println!("  {}", name);
    }
}

/// `<line>: <content>` with the level token coloured
fn format_line(line: &LogLine) -> String {
    let number = format!("{:>6}", line.line_number).dimmed();
    let content = match line.level {
        Some(level) => colorize_level(level, &line.content),
        None => line.content.clone(),
    };
    format!("{}: {}", number, content)
}

fn colorize_level(level: Level, content: &str) -> String {
    match level {
        Level::Critical => content.red().bold().to_string(),
        Level::Error => content.red().to_string(),
        Level::Warning => content.yellow().to_string(),
        Level::Debug => content.dimmed().to_string(),
        Level::Info | Level::Unknown => content.to_string(),
    }
}

pub fn format_time(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}
