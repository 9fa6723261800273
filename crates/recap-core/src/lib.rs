//! Recap Core Library
//!
//! Core domain logic for the recap learning assistant: text chunking,
//! summary length negotiation, review question generation, and the
//! Notion task-tracking client.

pub mod config;
pub mod error;
pub mod format;
pub mod inference;
pub mod logging;
pub mod notion;
pub mod progress;
pub mod questions;
pub mod review;
pub mod summary;
pub mod text;
