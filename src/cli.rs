//! CLI argument parsing for recap
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

pub use recap_core::format::OutputFormat;

/// Recap - learning assistant CLI for summaries, review questions, and
/// Notion task tracking
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize material from a file or stdin
    Summarize {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Word budget for the summary
        #[arg(long)]
        max_words: Option<usize>,

        /// Chunk size budget in characters
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Skip the interactive confirmation step
        #[arg(long)]
        no_confirm: bool,
    },

    /// Show how material splits into summarization chunks
    Chunk {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Chunk size budget in characters
        #[arg(long, default_value_t = recap_core::text::DEFAULT_CHUNK_SIZE)]
        size: usize,
    },

    /// Generate review questions from material
    Questions {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Number of questions to generate
        #[arg(long, short = 'n', default_value_t = recap_core::questions::DEFAULT_NUM_QUESTIONS)]
        count: usize,
    },

    /// Full pipeline: summary, confirmation, review questions
    Process {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Word budget for the summary
        #[arg(long)]
        max_words: Option<usize>,

        /// Skip the interactive confirmation step
        #[arg(long)]
        no_confirm: bool,

        /// Store the accepted summary in the Notion tasks database
        #[arg(long)]
        push: bool,

        /// Title for the stored summary page (with --push)
        #[arg(long)]
        title: Option<String>,
    },

    /// Create a week's learning tasks in Notion
    Plan {
        /// Week number (1-based)
        week: u32,

        /// Derive difficulty from a recent completion rate percentage
        #[arg(long)]
        completion_rate: Option<f64>,
    },

    /// Show weekly progress statistics
    Progress {
        /// Week number (defaults to the current week)
        week: Option<u32>,
    },

    /// Record progress on a task
    Track {
        /// Task page id
        task_id: String,

        /// Progress percentage (0-100)
        progress: i64,
    },

    /// Create the Learning Tasks database in Notion
    Setup,

    /// Record feedback about this week's learning
    Feedback,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s).map_err(|e| e.to_string())
}

/// True when the raw arguments ask for JSON output.
///
/// Used when argument parsing fails before `Cli.format` is available, so
/// usage errors can still honor `--format json`.
pub fn json_requested_in_argv(args: impl IntoIterator<Item = String>) -> bool {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format" => {
                if args.next().as_deref() == Some("json") {
                    return true;
                }
            }
            "--format=json" => return true,
            _ => {}
        }
    }
    false
}
