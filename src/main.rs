use anyhow::Result;
use clap::Parser;
use std::io;

mod cli;
mod commands;

use cli::Cli;
use repo_license_summary::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match commands::handle_summary(&cli) {
        // Don't fail if we are piped to a pager and the user exits before the end
        Err(err) if is_broken_pipe(&err) => Ok(()),
        result => result,
    }
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}
