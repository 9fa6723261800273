//! Recap - learning assistant CLI
//!
//! Summarizes study material through an external summarization model,
//! generates review questions, and tracks weekly learning tasks in a
//! Notion workspace.

mod cli;
mod commands;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use recap_core::error::{RecapError, Result};
use recap_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return exit_for_parse_failure(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    report(&cli, commands::dispatch::run(&cli, start))
}

/// Map a command result onto the process exit code, emitting any error in
/// the requested output format.
fn report(cli: &Cli, result: Result<()>) -> ExitCode {
    let err = match result {
        Ok(()) => return ExitCode::SUCCESS,
        Err(err) => err,
    };

    match cli.format {
        OutputFormat::Json => eprintln!("{}", err.to_json()),
        OutputFormat::Human if !cli.quiet => eprintln!("error: {}", err),
        OutputFormat::Human => {}
    }

    ExitCode::from(err.exit_code() as u8)
}

/// Parsing failed before `Cli.format` existed, so the requested output
/// format has to be sniffed from raw argv to honor `--format json` error
/// envelopes. Help and version requests go through clap untouched.
fn exit_for_parse_failure(err: clap::Error) -> ExitCode {
    use clap::error::ErrorKind;

    let informational = matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    );
    if informational || !cli::json_requested_in_argv(std::env::args().skip(1)) {
        err.exit();
    }

    let err = match err.kind() {
        // A repeated `--format` is the only conflict recap's globals can hit
        ErrorKind::ArgumentConflict => RecapError::DuplicateFormat,
        _ => RecapError::UsageError(err.to_string()),
    };
    eprintln!("{}", err.to_json());
    ExitCode::from(err.exit_code() as u8)
}
