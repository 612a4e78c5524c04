//! Script validation for startup scripts
//!
//! Checks a script before it is fed to a session, so obviously broken
//! lines are reported up front instead of as runtime output.

use std::path::{Component, Path};

use crate::parser::{parse_command, Command};
use crate::script::runner::is_skipped;

/// A problem found in a script
#[derive(Debug, Clone)]
pub struct ScriptValidationError {
    pub line: Option<usize>,
    pub message: String,
    pub severity: ValidationSeverity,
}

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ScriptValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            ValidationSeverity::Error => "ERROR",
            ValidationSeverity::Warning => "WARNING",
        };
        if let Some(line) = self.line {
            write!(f, "{} (line {}): {}", prefix, line, self.message)
        } else {
            write!(f, "{}: {}", prefix, self.message)
        }
    }
}

/// Validate script text line by line
pub fn validate_script(content: &str) -> Vec<ScriptValidationError> {
    let mut errors = Vec::new();
    let mut exit_line: Option<usize> = None;

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if is_skipped(text) {
            continue;
        }

        if let Some(exited_at) = exit_line {
            errors.push(ScriptValidationError {
                line: Some(line),
                message: format!("unreachable: the script exits on line {}", exited_at),
                severity: ValidationSeverity::Warning,
            });
            continue;
        }

        let cmd = match parse_command(text) {
            Ok(cmd) => cmd,
            Err(_) => continue,
        };

        validate_command(&cmd, line, &mut errors);

        if cmd == Command::Exit {
            exit_line = Some(line);
        }
    }

    errors
}

fn validate_command(cmd: &Command, line: usize, errors: &mut Vec<ScriptValidationError>) {
    match cmd {
        Command::Unknown(input) => errors.push(ScriptValidationError {
            line: Some(line),
            message: format!("unknown command: {}", input),
            severity: ValidationSeverity::Warning,
        }),

        Command::Rmdir(None) => errors.push(ScriptValidationError {
            line: Some(line),
            message: "rmdir needs a directory argument".to_string(),
            severity: ValidationSeverity::Error,
        }),

        Command::Rmdir(Some(path)) if targets_current_or_ancestor(path) => {
            errors.push(ScriptValidationError {
                line: Some(line),
                message: format!(
                    "rmdir {} always fails: it names the current directory or one of its parents",
                    path
                ),
                severity: ValidationSeverity::Error,
            })
        }

        _ => {}
    }
}

/// `/`, `.`, `..` and combinations of them never name a removable directory
fn targets_current_or_ancestor(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::RootDir | Component::CurDir | Component::ParentDir))
}

/// Check if a script has any validation errors (not just warnings)
pub fn has_errors(errors: &[ScriptValidationError]) -> bool {
    errors
        .iter()
        .any(|e| e.severity == ValidationSeverity::Error)
}

/// Check if a script has any validation warnings
pub fn has_warnings(errors: &[ScriptValidationError]) -> bool {
    errors
        .iter()
        .any(|e| e.severity == ValidationSeverity::Warning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_safe_script() {
        let errors = validate_script("# setup\ncd docs\nls\npwd\ncd ..\nrmdir docs\n");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_unknown_command() {
        let errors = validate_script("pwd\nmkdir new\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, Some(2));
        assert!(has_warnings(&errors));
        assert!(!has_errors(&errors));
    }

    #[test]
    fn test_validate_rmdir_without_argument() {
        let errors = validate_script("rmdir\n");
        assert!(has_errors(&errors));
    }

    #[test]
    fn test_validate_rmdir_of_root_or_parent() {
        for script in ["rmdir /", "rmdir .", "rmdir ..", "rmdir ./../"] {
            let errors = validate_script(script);
            assert!(has_errors(&errors), "{} should be an error", script);
        }
        assert!(validate_script("rmdir ../sibling").is_empty());
    }

    #[test]
    fn test_validate_lines_after_exit() {
        let errors = validate_script("pwd\nexit\n\nls\nfoobar\n");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.severity == ValidationSeverity::Warning));
        assert_eq!(errors[0].line, Some(4));
        assert!(errors[0].message.contains("line 2"));
    }

    #[test]
    fn test_error_display() {
        let error = ScriptValidationError {
            line: Some(3),
            message: "unknown command: x".to_string(),
            severity: ValidationSeverity::Warning,
        };
        assert_eq!(error.to_string(), "WARNING (line 3): unknown command: x");
    }
}
