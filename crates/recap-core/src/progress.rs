//! Weekly task planning, progress statistics, and difficulty adjustment
//!
//! Tasks live in a Notion database with `Name`, `Due Date`, and `Progress`
//! properties. A week's tasks are found by filtering on the due-date
//! window; statistics and difficulty adjustment are pure functions over
//! the queried pages so they can be tested without a workspace.

use std::fmt;
use std::io::{BufRead, Write};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::Result;
use crate::notion::{NotionClient, NotionError};

/// Reference start date for week numbering
pub const WEEK_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("invalid week epoch"),
};

/// Question complexity level for generated review questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::Low => write!(f, "low"),
            Complexity::Medium => write!(f, "medium"),
            Complexity::High => write!(f, "high"),
        }
    }
}

/// Difficulty parameters for a week of learning tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub question_complexity: Complexity,
    pub summary_length: usize,
    pub tasks_per_week: usize,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty {
            question_complexity: Complexity::Medium,
            summary_length: 200,
            tasks_per_week: 5,
        }
    }
}

/// Adjust difficulty from a completion rate percentage: above 80% steps
/// up, below 50% steps down, otherwise the defaults stand.
pub fn adjust_difficulty(completion_rate: f64) -> Difficulty {
    if completion_rate > 80.0 {
        Difficulty {
            question_complexity: Complexity::High,
            summary_length: 250,
            tasks_per_week: 7,
        }
    } else if completion_rate < 50.0 {
        Difficulty {
            question_complexity: Complexity::Low,
            summary_length: 150,
            tasks_per_week: 3,
        }
    } else {
        Difficulty::default()
    }
}

/// Progress statistics for one week of tasks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyProgress {
    pub week_number: u32,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Share of tasks at 100% progress, as a percentage
    pub completion_rate: f64,
    /// Mean progress across all tasks, as a percentage
    pub average_progress: f64,
}

/// Week number for `today` relative to [`WEEK_EPOCH`]
pub fn current_week(today: NaiveDate) -> u32 {
    let days = (today - WEEK_EPOCH).num_days().max(0);
    (days / 7) as u32 + 1
}

/// Due-date window for a past week's progress: week 1 ends today
pub fn week_window(week_number: u32, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = Days::new(7 * (week_number.saturating_sub(1)) as u64);
    let start = today.checked_sub_days(back).unwrap_or(today);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
    (start, end)
}

/// Notion compound filter matching tasks due within `[start, end]`
pub fn due_date_filter(start: NaiveDate, end: NaiveDate) -> Value {
    json!({
        "and": [
            {
                "property": "Due Date",
                "date": { "on_or_after": start.format("%Y-%m-%d").to_string() }
            },
            {
                "property": "Due Date",
                "date": { "on_or_before": end.format("%Y-%m-%d").to_string() }
            }
        ]
    })
}

/// Progress number recorded on a task page, if any
fn task_progress(task: &Value) -> Option<f64> {
    task.get("properties")?
        .get("Progress")?
        .get("number")?
        .as_f64()
}

/// Compute weekly statistics from queried task pages
pub fn summarize_tasks(week_number: u32, tasks: &[Value]) -> WeeklyProgress {
    let total_tasks = tasks.len();
    let progresses: Vec<f64> = tasks.iter().filter_map(task_progress).collect();
    let completed_tasks = progresses.iter().filter(|p| **p >= 100.0).count();

    let (completion_rate, average_progress) = if total_tasks > 0 {
        (
            completed_tasks as f64 / total_tasks as f64 * 100.0,
            progresses.iter().sum::<f64>() / total_tasks as f64,
        )
    } else {
        (0.0, 0.0)
    };

    WeeklyProgress {
        week_number,
        total_tasks,
        completed_tasks,
        completion_rate,
        average_progress,
    }
}

/// Tracks task completion through the Notion tasks database
pub struct ProgressTracker<'a> {
    client: &'a NotionClient,
    database_id: String,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(client: &'a NotionClient, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
        }
    }

    /// Record progress on a task
    pub fn track_completion(&self, task_id: &str, progress: i64) -> Result<()> {
        self.client.update_progress(task_id, progress)?;
        Ok(())
    }

    /// Query and summarize one week's tasks
    pub fn weekly_progress(&self, week_number: u32, today: NaiveDate) -> Result<WeeklyProgress> {
        let (start, end) = week_window(week_number, today);
        debug!(week_number, %start, %end, "querying weekly tasks");

        let tasks = self
            .client
            .query_database(&self.database_id, Some(due_date_filter(start, end)))?;

        Ok(summarize_tasks(week_number, &tasks))
    }
}

/// Create one week's tasks: a summary task due two days in, then one
/// question-set task per difficulty slot on the following days. Returns
/// the created task page ids.
pub fn plan_week(
    client: &NotionClient,
    database_id: &str,
    week_number: u32,
    difficulty: &Difficulty,
    today: NaiveDate,
) -> std::result::Result<Vec<String>, NotionError> {
    let start = today
        .checked_add_days(Days::new(7 * (week_number.saturating_sub(1)) as u64))
        .unwrap_or(today);

    let mut task_ids = Vec::with_capacity(difficulty.tasks_per_week + 1);

    let summary_due = start.checked_add_days(Days::new(2)).unwrap_or(start);
    task_ids.push(client.create_task(
        database_id,
        &format!("Week {} Summary", week_number),
        &summary_due.format("%Y-%m-%d").to_string(),
        0,
    )?);

    for i in 0..difficulty.tasks_per_week {
        let due = start
            .checked_add_days(Days::new(3 + i as u64))
            .unwrap_or(start);
        task_ids.push(client.create_task(
            database_id,
            &format!("Week {} Question Set {}", week_number, i + 1),
            &due.format("%Y-%m-%d").to_string(),
            0,
        )?);
    }

    Ok(task_ids)
}

/// Reviewer feedback about a week of learning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    /// 1 = too easy, 2 = just right, 3 = too difficult
    pub difficulty_rating: u8,
    pub areas_for_improvement: Option<String>,
}

/// Prompt for feedback on `reader`/`writer`, re-prompting on invalid
/// ratings the same way the acceptance gate does.
pub fn prompt_for_feedback<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
) -> Result<Feedback> {
    writeln!(writer, "\nHow did you feel about this week's learning?")?;
    writeln!(writer, "1. Too easy")?;
    writeln!(writer, "2. Just right")?;
    writeln!(writer, "3. Too difficult")?;
    writer.flush()?;

    let difficulty_rating = loop {
        write!(writer, "Enter your choice (1-3): ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break 2; // input closed, assume "just right"
        }

        match line.trim().parse::<u8>() {
            Ok(rating) if (1..=3).contains(&rating) => break rating,
            Ok(_) => writeln!(writer, "Please enter a number between 1 and 3")?,
            Err(_) => writeln!(writer, "Please enter a valid number")?,
        }
    };

    writeln!(
        writer,
        "\nAny areas you need more help with? (Press Enter to skip)"
    )?;
    writer.flush()?;

    let mut areas = String::new();
    reader.read_line(&mut areas)?;
    let areas = areas.trim();

    Ok(Feedback {
        difficulty_rating,
        areas_for_improvement: if areas.is_empty() {
            None
        } else {
            Some(areas.to_string())
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(progress: Option<i64>) -> Value {
        match progress {
            Some(p) => json!({"properties": {"Progress": {"number": p}}}),
            None => json!({"properties": {"Progress": {"number": null}}}),
        }
    }

    #[test]
    fn test_current_week_numbering() {
        assert_eq!(current_week(day(2024, 1, 1)), 1);
        assert_eq!(current_week(day(2024, 1, 7)), 1);
        assert_eq!(current_week(day(2024, 1, 8)), 2);
    }

    #[test]
    fn test_week_window_week_one_starts_today() {
        let (start, end) = week_window(1, day(2026, 3, 10));
        assert_eq!(start, day(2026, 3, 10));
        assert_eq!(end, day(2026, 3, 16));
    }

    #[test]
    fn test_week_window_counts_back() {
        let (start, end) = week_window(3, day(2026, 3, 20));
        assert_eq!(start, day(2026, 3, 6));
        assert_eq!(end, day(2026, 3, 12));
    }

    #[test]
    fn test_due_date_filter_shape() {
        let filter = due_date_filter(day(2026, 3, 6), day(2026, 3, 12));
        assert_eq!(
            filter["and"][0]["date"]["on_or_after"],
            "2026-03-06"
        );
        assert_eq!(
            filter["and"][1]["date"]["on_or_before"],
            "2026-03-12"
        );
    }

    #[test]
    fn test_summarize_tasks_statistics() {
        let tasks = vec![task(Some(100)), task(Some(50)), task(Some(0)), task(Some(100))];
        let progress = summarize_tasks(4, &tasks);

        assert_eq!(progress.week_number, 4);
        assert_eq!(progress.total_tasks, 4);
        assert_eq!(progress.completed_tasks, 2);
        assert!((progress.completion_rate - 50.0).abs() < 1e-9);
        assert!((progress.average_progress - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_tasks_empty_week() {
        let progress = summarize_tasks(1, &[]);
        assert_eq!(progress.total_tasks, 0);
        assert_eq!(progress.completion_rate, 0.0);
        assert_eq!(progress.average_progress, 0.0);
    }

    #[test]
    fn test_summarize_tasks_ignores_missing_progress() {
        let tasks = vec![task(Some(100)), task(None)];
        let progress = summarize_tasks(1, &tasks);
        assert_eq!(progress.completed_tasks, 1);
        // Missing numbers contribute nothing to the sum but count in the mean
        assert!((progress.average_progress - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_adjust_difficulty_steps_up() {
        let difficulty = adjust_difficulty(90.0);
        assert_eq!(difficulty.question_complexity, Complexity::High);
        assert_eq!(difficulty.summary_length, 250);
        assert_eq!(difficulty.tasks_per_week, 7);
    }

    #[test]
    fn test_adjust_difficulty_steps_down() {
        let difficulty = adjust_difficulty(30.0);
        assert_eq!(difficulty.question_complexity, Complexity::Low);
        assert_eq!(difficulty.summary_length, 150);
        assert_eq!(difficulty.tasks_per_week, 3);
    }

    #[test]
    fn test_adjust_difficulty_middle_band_is_default() {
        assert_eq!(adjust_difficulty(50.0), Difficulty::default());
        assert_eq!(adjust_difficulty(70.0), Difficulty::default());
        assert_eq!(adjust_difficulty(80.0), Difficulty::default());
    }

    #[test]
    fn test_feedback_valid_rating() {
        let input = "2\nmore graph theory\n";
        let mut output = Vec::new();
        let feedback = prompt_for_feedback(input.as_bytes(), &mut output).unwrap();

        assert_eq!(feedback.difficulty_rating, 2);
        assert_eq!(
            feedback.areas_for_improvement.as_deref(),
            Some("more graph theory")
        );
    }

    #[test]
    fn test_feedback_reprompts_on_invalid() {
        let input = "nine\n7\n1\n\n";
        let mut output = Vec::new();
        let feedback = prompt_for_feedback(input.as_bytes(), &mut output).unwrap();

        assert_eq!(feedback.difficulty_rating, 1);
        assert_eq!(feedback.areas_for_improvement, None);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Please enter a valid number"));
        assert!(text.contains("Please enter a number between 1 and 3"));
    }
}
