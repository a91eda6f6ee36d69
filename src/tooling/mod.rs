//! Command-line surface: argument parsing, dispatch and text formatting.

pub mod cli;
pub mod format;
