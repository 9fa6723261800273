//! `recap chunk` command - show how material splits into chunks
//!
//! Debugging view of the chunker: prints each chunk with its word and
//! character counts so a user can see what the summarization backend
//! would receive.

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::read_material;
use recap_core::error::{RecapError, Result};
use recap_core::text::{split_into_chunks, word_count};

pub fn execute(cli: &Cli, file: Option<&Path>, size: usize) -> Result<()> {
    if size == 0 {
        return Err(RecapError::invalid_value("chunk size", size));
    }

    let material = read_material(file)?;
    let chunks = split_into_chunks(&material, size);

    match cli.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "chunk_size": size,
                "chunk_count": chunks.len(),
                "chunks": chunks
                    .iter()
                    .map(|c| serde_json::json!({
                        "words": word_count(c),
                        "chars": c.len(),
                        "text": c,
                    }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", payload);
        }
        OutputFormat::Human => {
            for (i, chunk) in chunks.iter().enumerate() {
                if !cli.quiet {
                    println!(
                        "--- chunk {} ({} words, {} chars)",
                        i + 1,
                        word_count(chunk),
                        chunk.len()
                    );
                }
                println!("{}", chunk);
            }
        }
    }

    Ok(())
}
