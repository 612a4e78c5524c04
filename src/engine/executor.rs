//! Command executor

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::context::Context;
use crate::error::{Result, ShellError};
use crate::parser::{parse_command, Command};
use crate::sandbox::Sandbox;

/// What a single command produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Human-readable lines, in display order
    pub lines: Vec<String>,
    /// Set when the caller should end the interaction loop
    pub should_exit: bool,
}

impl CommandOutput {
    /// No output, keep going
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single line of output
    pub fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            should_exit: false,
        }
    }

    /// Several lines of output
    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            should_exit: false,
        }
    }

    /// Ask the caller to terminate the session
    pub fn exit() -> Self {
        Self {
            lines: Vec::new(),
            should_exit: true,
        }
    }
}

/// Parse and execute one input line. Blank lines do nothing.
pub fn execute_line(line: &str, sandbox: &Sandbox, context: &mut Context) -> CommandOutput {
    match parse_command(line) {
        Ok(cmd) => execute_command(&cmd, sandbox, context),
        Err(_) => CommandOutput::empty(),
    }
}

/// Execute a parsed command against the sandbox.
///
/// Never fails: every per-command problem becomes an output line.
pub fn execute_command(cmd: &Command, sandbox: &Sandbox, context: &mut Context) -> CommandOutput {
    debug!(command = %cmd, cwd = %context.prompt(), "Executing");

    match cmd {
        Command::Exit => CommandOutput::exit(),
        Command::Cd(path) => change_directory(path.as_deref(), sandbox, context),
        Command::Ls => list_directory(sandbox, context),
        Command::Pwd => CommandOutput::line(context.prompt()),
        Command::Rmdir(path) => remove_directory(path.as_deref(), sandbox, context),
        Command::Unknown(input) => CommandOutput::line(format!("Unknown command: {}", input)),
    }
}

fn change_directory(path: Option<&str>, sandbox: &Sandbox, context: &mut Context) -> CommandOutput {
    let Some(path) = path else {
        context.reset();
        return CommandOutput::line(format!("Changed directory to {}", context.prompt()));
    };

    match resolve_directory(path, sandbox, context) {
        Ok(target) => {
            if context.enter_folder(target) {
                CommandOutput::line(format!("Changed directory to {}", context.prompt()))
            } else {
                CommandOutput::line(format!("No such directory: {}", path))
            }
        }
        Err(e) => {
            debug!(path, "cd rejected: {}", e);
            CommandOutput::line(format!("No such directory: {}", path))
        }
    }
}

fn list_directory(sandbox: &Sandbox, context: &Context) -> CommandOutput {
    match read_entries(sandbox, context) {
        Ok(names) => CommandOutput::lines(names),
        Err(e) => {
            warn!(cwd = %context.prompt(), "ls failed: {}", e);
            CommandOutput::line(format!("Cannot list directory: {}", context.prompt()))
        }
    }
}

fn read_entries(sandbox: &Sandbox, context: &Context) -> Result<Vec<String>> {
    let directory = sandbox.resolve(context.current_folder(), ".")?;

    let mut names = Vec::new();
    for entry in fs::read_dir(&directory)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }

    Ok(names)
}

fn remove_directory(path: Option<&str>, sandbox: &Sandbox, context: &Context) -> CommandOutput {
    let Some(path) = path else {
        return CommandOutput::line("Usage: rmdir <directory>");
    };

    let target = match resolve_directory(path, sandbox, context) {
        Ok(target) => target,
        Err(e) => {
            debug!(path, "rmdir rejected: {}", e);
            return CommandOutput::line(format!("No such directory: {}", path));
        }
    };

    // The root, the current directory and its ancestors must survive
    if context.current_folder().starts_with(&target) {
        return CommandOutput::line(format!("Cannot remove directory: {}", path));
    }

    // Removing through a link would delete the directory it points at
    if names_symlink(path, sandbox, context) {
        debug!(path, "rmdir refused: target is a symlink");
        return CommandOutput::line(format!("Cannot remove directory: {}", path));
    }

    match fs::remove_dir_all(&target) {
        Ok(()) => {
            info!(path, "Removed directory");
            CommandOutput::line(format!("Removed directory: {}", path))
        }
        Err(e) => {
            warn!(path, "rmdir failed: {}", e);
            CommandOutput::line(format!("Cannot remove directory: {}", path))
        }
    }
}

fn names_symlink(path: &str, sandbox: &Sandbox, context: &Context) -> bool {
    sandbox
        .resolve_lexical(context.current_folder(), path)
        .ok()
        .and_then(|named| fs::symlink_metadata(named).ok())
        .is_some_and(|metadata| metadata.file_type().is_symlink())
}

/// Resolve `path` and require an existing directory
fn resolve_directory(path: &str, sandbox: &Sandbox, context: &Context) -> Result<PathBuf> {
    let target = sandbox.resolve(context.current_folder(), path)?;

    if !target.exists() {
        return Err(ShellError::PathNotFound(path.to_string()));
    }

    if !target.is_dir() {
        return Err(ShellError::NotADirectory(path.to_string()));
    }

    Ok(target)
}
