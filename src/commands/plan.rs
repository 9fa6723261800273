//! `recap plan` command - create a week's learning tasks in Notion

use chrono::Local;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use recap_core::config::Config;
use recap_core::error::Result;
use recap_core::progress::{adjust_difficulty, plan_week, Difficulty};

pub fn execute(
    cli: &Cli,
    config: &Config,
    week: u32,
    completion_rate: Option<f64>,
) -> Result<()> {
    let client = config.notion_client()?;
    let database_id = config.tasks_database_id()?;

    let difficulty = match completion_rate {
        Some(rate) => adjust_difficulty(rate),
        None => Difficulty::default(),
    };
    debug!(week, ?difficulty, "planning week");

    let today = Local::now().date_naive();
    let task_ids = plan_week(&client, database_id, week, &difficulty, today)?;

    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "week": week,
                    "difficulty": difficulty,
                    "task_ids": task_ids,
                })
            );
        }
        OutputFormat::Human => {
            println!(
                "created {} tasks for week {} ({} question sets)",
                task_ids.len(),
                week,
                difficulty.tasks_per_week
            );
            if cli.verbose {
                for id in &task_ids {
                    println!("  {}", id);
                }
            }
        }
    }

    Ok(())
}
