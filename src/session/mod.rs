//! Session lifecycle
//!
//! A `Session` binds one sandbox to one interpreter state. It is created by
//! `open`, driven with `execute`, and released by `close` (or by dropping
//! it). There is no global state: callers own their sessions.

use std::path::Path;

use tracing::{debug, warn};

use crate::context::Context;
use crate::engine::{execute_line, CommandOutput};
use crate::error::Result;
use crate::sandbox::{ExtractionSummary, Sandbox, SandboxOptions};

/// One interpreter bound to one sandbox
#[derive(Debug)]
pub struct Session {
    sandbox: Sandbox,
    context: Context,
}

impl Session {
    /// Materialize `archive_path` into a fresh sandbox with default options
    pub fn open(archive_path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(archive_path, &SandboxOptions::default())
    }

    /// Materialize `archive_path` using the given sandbox options
    pub fn open_with(archive_path: impl AsRef<Path>, options: &SandboxOptions) -> Result<Self> {
        let sandbox = Sandbox::materialize(archive_path.as_ref(), options)?;
        let context = Context::new(sandbox.root());
        Ok(Self { sandbox, context })
    }

    /// Run one command line
    pub fn execute(&mut self, line: &str) -> CommandOutput {
        if !self.sandbox.is_active() {
            return CommandOutput {
                lines: vec!["Session is closed".to_string()],
                should_exit: true,
            };
        }
        execute_line(line, &self.sandbox, &mut self.context)
    }

    /// Tear the sandbox down. Safe to call any number of times.
    pub fn close(&mut self) {
        if !self.sandbox.is_active() {
            return;
        }
        match self.sandbox.teardown() {
            Ok(()) => debug!("Session closed"),
            Err(e) => warn!("Failed to remove sandbox on close: {}", e),
        }
    }

    /// Whether the sandbox is still available
    pub fn is_open(&self) -> bool {
        self.sandbox.is_active()
    }

    /// Host location of the sandbox root, for collaborators that must clean
    /// up outside the normal `close` path (signal handlers)
    pub fn root(&self) -> &Path {
        self.sandbox.root()
    }

    /// `/`-rooted current directory
    pub fn working_directory(&self) -> String {
        self.context.prompt()
    }

    /// Totals from extracting the archive
    pub fn summary(&self) -> ExtractionSummary {
        self.sandbox.summary()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
