//! Errors command implementation

use anyhow::Result;
use logwarden_logs::LogInspector;

use crate::cli::ErrorsArgs;
use crate::output::print_errors;

pub fn execute(inspector: &LogInspector, args: ErrorsArgs) -> Result<()> {
    let lines = inspector.recent_errors(&args.file, args.max, args.level)?;
    print_errors(&args.file, &lines);
    Ok(())
}
