//! Command dispatch logic for recap

use std::time::Instant;

use crate::cli::{Cli, Commands};
use crate::commands;
use recap_core::config::Config;
use recap_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = Config::load()?;
    recap_core::trace_time!(start, "load_config");

    match &cli.command {
        None => handle_no_command(),

        Some(Commands::Summarize {
            file,
            max_words,
            chunk_size,
            no_confirm,
        }) => commands::summarize::execute(
            cli,
            &config,
            file.as_deref(),
            *max_words,
            *chunk_size,
            *no_confirm,
        ),

        Some(Commands::Chunk { file, size }) => {
            commands::chunk::execute(cli, file.as_deref(), *size)
        }

        Some(Commands::Questions { file, count }) => {
            commands::questions::execute(cli, &config, file.as_deref(), *count)
        }

        Some(Commands::Process {
            file,
            max_words,
            no_confirm,
            push,
            title,
        }) => commands::process::execute(
            cli,
            &config,
            file.as_deref(),
            *max_words,
            *no_confirm,
            *push,
            title.as_deref(),
        ),

        Some(Commands::Plan {
            week,
            completion_rate,
        }) => commands::plan::execute(cli, &config, *week, *completion_rate),

        Some(Commands::Progress { week }) => commands::progress::execute(cli, &config, *week),

        Some(Commands::Track { task_id, progress }) => {
            commands::track::execute(cli, &config, task_id, *progress)
        }

        Some(Commands::Setup) => commands::setup::execute(cli, &config),

        Some(Commands::Feedback) => commands::feedback::execute(cli),
    }
}

fn handle_no_command() -> Result<()> {
    println!("recap - learning assistant CLI");
    println!();
    println!("Run `recap --help` to see available commands.");
    Ok(())
}
