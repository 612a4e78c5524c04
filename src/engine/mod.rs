//! Execution engine for sandbox-shell commands

pub mod executor;

pub use executor::{execute_command, execute_line, CommandOutput};
