//! Command implementations

pub mod errors;
pub mod list;
pub mod purge;
pub mod search;
pub mod tail;

use anyhow::{Context, Result};
use logwarden_core::InspectorConfig;
use logwarden_logs::LogInspector;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build the inspector from `--config`, a discovered config file, or defaults,
/// then apply `--dir`
pub fn load_inspector(config_path: Option<&Path>, dir: Option<PathBuf>) -> Result<LogInspector> {
    let mut config = match config_path {
        Some(path) => InspectorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => discover_config()?,
    };

    if let Some(dir) = dir {
        config.log_dir = dir;
    }

    debug!("Inspecting {}", config.log_dir.display());
    Ok(LogInspector::new(config)?)
}

fn discover_config() -> Result<InspectorConfig> {
    let cwd = std::env::current_dir()?;
    let found = logwarden_core::CONFIG_FILES
        .iter()
        .any(|name| cwd.join(name).exists());

    if !found {
        return Ok(InspectorConfig::default());
    }

    let (config, path) = InspectorConfig::find_and_load(&cwd)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// 2 for "not found" conditions, 1 for everything else
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<logwarden_core::Error>() {
        Some(e) if e.is_not_found() => 2,
        _ => 1,
    }
}
