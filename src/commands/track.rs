//! `recap track` command - record progress on a task

use crate::cli::{Cli, OutputFormat};
use recap_core::config::Config;
use recap_core::error::{RecapError, Result};
use recap_core::progress::ProgressTracker;

pub fn execute(cli: &Cli, config: &Config, task_id: &str, progress: i64) -> Result<()> {
    if !(0..=100).contains(&progress) {
        return Err(RecapError::invalid_value("progress percentage", progress));
    }

    let client = config.notion_client()?;
    let database_id = config.tasks_database_id()?;

    let tracker = ProgressTracker::new(&client, database_id);
    tracker.track_completion(task_id, progress)?;

    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "task_id": task_id, "progress": progress })
            );
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("task {} set to {}%", task_id, progress);
            }
        }
    }

    Ok(())
}
