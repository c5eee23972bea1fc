//! Storage infrastructure: options file persistence.
//!
//! The `options_file` sub-module handles:
//!
//! - Reading the TOML options file from the platform-appropriate directory.
//! - Writing the canonical options back to disk after a successful commit.
//! - Providing defaults when the file does not exist yet (first run).

pub mod options_file;
