//! List command implementation

use anyhow::Result;
use logwarden_logs::LogInspector;

use crate::output::print_files;

pub fn execute(inspector: &LogInspector) -> Result<()> {
    let files = inspector.list();
    print_files(&files, &inspector.config().log_dir);
    Ok(())
}
