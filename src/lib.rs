//! sandbox-shell - a small shell that runs inside a throwaway sandbox
//!
//! A zip archive is extracted into a private directory tree, and a fixed
//! set of commands (`cd`, `ls`, `pwd`, `rmdir`, `exit`) runs against it.
//! Path resolution guarantees that no command can reach outside the
//! sandbox root, and the tree is removed when the session ends.
//!
//! # Example
//!
//! ```no_run
//! use sandbox_shell::Session;
//!
//! let mut session = Session::open("fs.zip").unwrap();
//! for line in session.execute("ls").lines {
//!     println!("{}", line);
//! }
//! session.close();
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod output;
pub mod parser;
pub mod sandbox;
pub mod script;
pub mod session;

#[cfg(feature = "repl")]
pub mod repl;

pub use config::Config;
pub use context::Context;
pub use engine::{execute_command, execute_line, CommandOutput};
pub use error::{Result, ShellError};
pub use output::{format_output, OutputFormat};
pub use parser::{parse_command, Command};
pub use sandbox::{Sandbox, SandboxOptions};
pub use script::{validate_script, ScriptResult, ScriptRunner};
pub use session::Session;
