//! Error types for sandbox-shell

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Extraction error: {0}")]
    ExtractionError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Carries only the user-supplied argument, never a host path.
    #[error("Path escapes the sandbox: {0}")]
    OutOfBounds(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Script error: {0}")]
    ScriptError(String),

    #[error("Sandbox has been torn down")]
    SandboxClosed,
}

pub type Result<T> = std::result::Result<T, ShellError>;
