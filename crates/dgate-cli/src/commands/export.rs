//! Args command - regenerate worker arguments
//!
//! Prints the `--whitelist=` and `--blocklist=` tokens that rebuild the
//! current lists when handed to another dgate process.

use anyhow::Result;
use clap::Args;
use dgate_core::DomainLists;
use std::io::Write;

/// Args command arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Prepend `--id=<N>` for the worker being launched
    #[arg(long, value_name = "N")]
    pub worker_id: Option<u32>,

    /// Separate tokens with NUL instead of newline (for `xargs -0`)
    #[arg(short = '0', long)]
    pub null: bool,
}

/// Build the token list for a worker
pub fn worker_args(args: &ExportArgs, lists: &DomainLists) -> Vec<String> {
    let mut argv = Vec::with_capacity(1 + lists.whitelist_count() + lists.blocklist_count());
    if let Some(id) = args.worker_id {
        argv.push(format!("--id={}", id));
    }
    argv.extend(lists.command_line());
    argv
}

/// Execute args command
pub fn execute(args: ExportArgs, lists: &DomainLists) -> Result<()> {
    let separator = if args.null { b'\0' } else { b'\n' };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for token in worker_args(&args, lists) {
        out.write_all(token.as_bytes())?;
        out.write_all(&[separator])?;
    }
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_args() {
        let mut lists = DomainLists::default();
        lists.add_to_whitelist("example.org");
        lists.add_to_blocklist("www.gentoo.org");

        let args = ExportArgs { worker_id: Some(2), null: false };
        assert_eq!(
            worker_args(&args, &lists),
            ["--id=2", "--whitelist=example.org", "--blocklist=gentoo.org"]
        );

        let args = ExportArgs { worker_id: None, null: false };
        assert_eq!(worker_args(&args, &lists).len(), 2);
    }
}
