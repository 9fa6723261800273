//! `recap feedback` command - record feedback about the week's learning

use crate::cli::{Cli, OutputFormat};
use recap_core::error::Result;
use recap_core::progress::prompt_for_feedback;

pub fn execute(cli: &Cli) -> Result<()> {
    let stdin = std::io::stdin();
    let feedback = prompt_for_feedback(stdin.lock(), std::io::stdout())?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!(feedback));
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!();
                println!("Thank you for your feedback!");
            }
        }
    }

    Ok(())
}
