//! Startup script support for sandbox-shell
//!
//! Handles validating script files and feeding their lines to a session.

pub mod runner;
pub mod validator;

pub use runner::{ScriptResult, ScriptRunner, ScriptStep};
pub use validator::{has_errors, has_warnings, validate_script, ScriptValidationError, ValidationSeverity};
