//! Tail command implementation

use anyhow::Result;
use logwarden_logs::LogInspector;

use crate::cli::TailArgs;
use crate::output::{is_json_mode, print_info, print_json, print_tail};

pub async fn execute(inspector: &LogInspector, args: TailArgs) -> Result<()> {
    let tail = inspector.tail(&args.file, args.lines)?;
    print_tail(&tail);

    if !args.follow {
        return Ok(());
    }

    // Continue from the length the tail saw so no line falls in between
    let mut rx = inspector.follow_from(&args.file, tail.file_size_bytes)?;
    if !is_json_mode() {
        print_info(&format!("Following {} (Ctrl-C to stop)", args.file));
    }

    loop {
        tokio::select! {
            line = rx.recv() => match line {
                Some(line) if is_json_mode() => print_json(&line),
                Some(line) => println!("{}", line),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
