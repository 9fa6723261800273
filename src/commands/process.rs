//! `recap process` command - full material pipeline
//!
//! Summary generation, interactive acceptance, review questions, and an
//! optional push of the accepted summary to the Notion tasks database.
//! Mirrors the fail-soft policy of the core: an over-budget or rejected
//! summary stops the pipeline with a message, not an error.

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::read_material;
use recap_core::config::Config;
use recap_core::error::Result;
use recap_core::questions::{format_questions, validate, QuestionEngine};
use recap_core::review::{Confirmer, ConsoleConfirmer};
use recap_core::summary::SummaryEngine;

pub fn execute(
    cli: &Cli,
    config: &Config,
    file: Option<&Path>,
    max_words: Option<usize>,
    no_confirm: bool,
    push: bool,
    title: Option<&str>,
) -> Result<()> {
    let start = Instant::now();

    let material = read_material(file)?;
    let max_words = max_words.unwrap_or(config.summary.max_words);

    let engine =
        SummaryEngine::new(config.summary_backend()).with_chunk_size(config.summary.chunk_size);
    let summary = engine.generate(&material, max_words);
    debug!(elapsed = ?start.elapsed(), word_count = summary.word_count(), "summary_generated");

    if !summary.within_budget {
        if !cli.quiet {
            eprintln!(
                "Generated summary exceeds the word limit. Please try with shorter content."
            );
        }
        return Ok(());
    }

    if !no_confirm && !ConsoleConfirmer.confirm(&summary.text)? {
        if !cli.quiet {
            eprintln!("Summary rejected. Please try again with different content.");
        }
        return Ok(());
    }

    let question_engine = QuestionEngine::new(config.question_backend());
    let questions = validate(
        question_engine.generate(&summary.text, recap_core::questions::DEFAULT_NUM_QUESTIONS),
    );

    let page_id = if push {
        let client = config.notion_client()?;
        let database_id = config.tasks_database_id()?;
        let title = title.unwrap_or("Accepted Summary");
        let id = client.create_summary_page(database_id, title, &summary.text)?;
        debug!(page_id = %id, "summary_pushed");
        Some(id)
    } else {
        None
    };

    match cli.format {
        OutputFormat::Json => {
            let mut payload = serde_json::json!({
                "summary": summary.text,
                "word_count": summary.word_count(),
                "within_budget": summary.within_budget,
                "questions": questions,
            });
            if let Some(id) = page_id {
                payload["page_id"] = serde_json::json!(id);
            }
            println!("{}", payload);
        }
        OutputFormat::Human => {
            println!("{}", summary.text);
            println!();
            print!("{}", format_questions(&questions));
            if let Some(id) = page_id {
                if !cli.quiet {
                    eprintln!("stored summary as page {}", id);
                }
            }
        }
    }

    Ok(())
}
