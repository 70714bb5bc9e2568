//! Core utilities and types for the pygen source generator.
//!
//! This crate provides the output-destination handling and the Python
//! identifier rules shared across the pygen crates.

mod file;
mod utils;

// File operations
pub use file::{FileRules, Overwrite, WriteResult, open_destination, write_destination};
// Identifier utilities
pub use utils::{PYTHON_KEYWORDS, is_python_keyword, validate_identifier};
