//! `recap questions` command - generate review questions from material

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::read_material;
use recap_core::config::Config;
use recap_core::error::Result;
use recap_core::questions::{format_questions, validate, QuestionEngine};

pub fn execute(cli: &Cli, config: &Config, file: Option<&Path>, count: usize) -> Result<()> {
    let material = read_material(file)?;

    let engine = QuestionEngine::new(config.question_backend());
    let questions = validate(engine.generate(&material, count));

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "questions": questions }));
        }
        OutputFormat::Human => {
            if questions.is_empty() {
                if !cli.quiet {
                    eprintln!("no valid questions were generated");
                }
            } else {
                print!("{}", format_questions(&questions));
            }
        }
    }

    Ok(())
}
