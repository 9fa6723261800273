//! Shared helpers for command implementations

use std::fs;
use std::io::Read;
use std::path::Path;

use recap_core::error::{RecapError, Result};

/// Read input material from a file, or stdin when no file is given.
///
/// Empty input is a usage error: every command that reads material needs
/// at least one word to work with.
pub fn read_material(file: Option<&Path>) -> Result<String> {
    let content = match file {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            RecapError::failed(
                "read input file",
                format!("{}: {}", path.display(), e),
            )
        })?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let content = content.trim_end().to_string();
    if content.split_whitespace().next().is_none() {
        return Err(RecapError::invalid_value("input", "empty text"));
    }

    Ok(content)
}
