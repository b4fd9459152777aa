//! Search command implementation

use anyhow::Result;
use logwarden_logs::LogInspector;

use crate::cli::SearchArgs;
use crate::output::print_search;

pub fn execute(inspector: &LogInspector, args: SearchArgs) -> Result<()> {
    let result = inspector.search(&args.file, &args.query, args.max)?;
    print_search(&result);
    Ok(())
}
