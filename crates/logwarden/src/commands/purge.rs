//! Purge command implementation - deletes expired log files

use anyhow::{bail, Result};
use logwarden_logs::LogInspector;

use crate::cli::PurgeArgs;
use crate::output::{print_cleanup, print_error};

pub fn execute(inspector: &LogInspector, args: PurgeArgs) -> Result<()> {
    if !args.dry_run && !args.yes {
        print_error("Refusing to delete without --yes (use --dry-run to preview)");
        bail!("purge requires --yes");
    }

    let days = args.days.unwrap_or(inspector.config().retention_days);
    let report = inspector.purge(Some(days), args.dry_run)?;
    print_cleanup(&report, days);
    Ok(())
}
