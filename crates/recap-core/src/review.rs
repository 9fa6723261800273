//! Human-in-the-loop acceptance gate for generated summaries
//!
//! A summary is only used downstream once a reviewer has confirmed it.
//! The gate is a pluggable seam: the CLI wires in the console prompt,
//! tests wire in scripted input.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::text::word_count;

/// Confirmation seam for generated artifacts
pub trait Confirmer {
    /// Present `summary` for review and block until accepted or rejected
    fn confirm(&mut self, summary: &str) -> Result<bool>;
}

/// Interactive confirmation on stdin/stdout
#[derive(Debug, Default)]
pub struct ConsoleConfirmer;

impl Confirmer for ConsoleConfirmer {
    fn confirm(&mut self, summary: &str) -> Result<bool> {
        let stdin = std::io::stdin();
        prompt_for_confirmation(summary, stdin.lock(), std::io::stdout())
    }
}

/// Present `summary` on `writer` and read a yes/no verdict from `reader`.
///
/// Accepts `yes`/`y` and rejects `no`/`n`, case-insensitively. Anything
/// else re-prompts until a valid answer arrives. Closed input (EOF) counts
/// as rejection.
pub fn prompt_for_confirmation<R: BufRead, W: Write>(
    summary: &str,
    mut reader: R,
    mut writer: W,
) -> Result<bool> {
    writeln!(writer, "\nGenerated Summary:")?;
    writeln!(writer, "{}", summary)?;
    writeln!(writer, "\nWord count: {}", word_count(summary))?;
    writeln!(writer, "\nDo you confirm this summary as accurate? [Yes/No]")?;
    writer.flush()?;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            tracing::debug!("confirmation input closed, treating as rejection");
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => {
                writeln!(writer, "Please answer with Yes/No or Y/N")?;
                writer.flush()?;
            }
        }
    }
}
