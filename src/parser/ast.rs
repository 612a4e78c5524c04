//! Command representation produced by the parser

use serde::{Deserialize, Serialize};

/// A single parsed command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// End the session
    Exit,
    /// Change directory; no argument returns to the sandbox root
    Cd(Option<String>),
    /// List the entries of the current directory
    Ls,
    /// Print the current directory
    Pwd,
    /// Recursively remove a directory
    Rmdir(Option<String>),
    /// Anything outside the vocabulary, kept verbatim
    Unknown(String),
}

impl Command {
    /// The verb as typed, or `None` for unknown input
    pub fn verb(&self) -> Option<&'static str> {
        match self {
            Command::Exit => Some("exit"),
            Command::Cd(_) => Some("cd"),
            Command::Ls => Some("ls"),
            Command::Pwd => Some("pwd"),
            Command::Rmdir(_) => Some("rmdir"),
            Command::Unknown(_) => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Cd(Some(path)) => write!(f, "cd {}", path),
            Command::Rmdir(Some(path)) => write!(f, "rmdir {}", path),
            Command::Unknown(input) => write!(f, "{}", input),
            other => write!(f, "{}", other.verb().unwrap_or_default()),
        }
    }
}
