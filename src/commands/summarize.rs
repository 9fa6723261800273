//! `recap summarize` command - generate a length-bounded summary
//!
//! Reads material from a file or stdin, runs chunked summarization with
//! length negotiation, and (unless `--no-confirm`) asks for interactive
//! acceptance before printing the result.

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::read_material;
use recap_core::config::Config;
use recap_core::error::Result;
use recap_core::review::{Confirmer, ConsoleConfirmer};
use recap_core::summary::{SummaryEngine, SummaryResult};

pub fn execute(
    cli: &Cli,
    config: &Config,
    file: Option<&Path>,
    max_words: Option<usize>,
    chunk_size: Option<usize>,
    no_confirm: bool,
) -> Result<()> {
    let start = Instant::now();

    let material = read_material(file)?;
    let max_words = max_words.unwrap_or(config.summary.max_words);
    let chunk_size = chunk_size.unwrap_or(config.summary.chunk_size);

    debug!(
        material_words = recap_core::text::word_count(&material),
        max_words,
        chunk_size,
        "summarize"
    );

    let engine = SummaryEngine::new(config.summary_backend()).with_chunk_size(chunk_size);
    let result = engine.generate(&material, max_words);

    debug!(elapsed = ?start.elapsed(), word_count = result.word_count(), "summary_generated");

    let accepted = if no_confirm || cli.format == OutputFormat::Json {
        None
    } else {
        Some(ConsoleConfirmer.confirm(&result.text)?)
    };

    print_summary(cli, &result, max_words, accepted);
    Ok(())
}

fn print_summary(cli: &Cli, result: &SummaryResult, max_words: usize, accepted: Option<bool>) {
    match cli.format {
        OutputFormat::Json => {
            let mut payload = serde_json::json!({
                "summary": result.text,
                "word_count": result.word_count(),
                "max_words": max_words,
                "within_budget": result.within_budget,
            });
            if let Some(accepted) = accepted {
                payload["accepted"] = serde_json::json!(accepted);
            }
            println!("{}", payload);
        }
        OutputFormat::Human => {
            println!("{}", result.text);
            if !cli.quiet {
                eprintln!();
                eprintln!("words: {} (budget: {})", result.word_count(), max_words);
                if !result.within_budget {
                    eprintln!("warning: summary is not within the word budget");
                }
                if accepted == Some(false) {
                    eprintln!("summary rejected by reviewer");
                }
            }
        }
    }
}
