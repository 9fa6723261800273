//! `recap progress` command - weekly progress statistics

use chrono::Local;

use crate::cli::{Cli, OutputFormat};
use recap_core::config::Config;
use recap_core::error::Result;
use recap_core::progress::{adjust_difficulty, current_week, ProgressTracker};

pub fn execute(cli: &Cli, config: &Config, week: Option<u32>) -> Result<()> {
    let client = config.notion_client()?;
    let database_id = config.tasks_database_id()?;

    let today = Local::now().date_naive();
    let week = week.unwrap_or_else(|| current_week(today));

    let tracker = ProgressTracker::new(&client, database_id);
    let progress = tracker.weekly_progress(week, today)?;
    let suggestion = adjust_difficulty(progress.completion_rate);

    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "progress": progress,
                    "suggested_difficulty": suggestion,
                })
            );
        }
        OutputFormat::Human => {
            println!("Week {} Progress", progress.week_number);
            println!("Total Tasks: {}", progress.total_tasks);
            println!("Completed Tasks: {}", progress.completed_tasks);
            println!("Completion Rate: {:.1}%", progress.completion_rate);
            println!("Average Progress: {:.1}%", progress.average_progress);
            if !cli.quiet {
                println!();
                println!(
                    "Suggested difficulty: {} questions, {} summary words, {} tasks/week",
                    suggestion.question_complexity,
                    suggestion.summary_length,
                    suggestion.tasks_per_week
                );
            }
        }
    }

    Ok(())
}
