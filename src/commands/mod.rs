//! Command implementations for the recap CLI

pub mod chunk;
pub mod dispatch;
pub mod feedback;
pub mod helpers;
pub mod plan;
pub mod process;
pub mod progress;
pub mod questions;
pub mod setup;
pub mod summarize;
pub mod track;
