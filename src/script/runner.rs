//! Script runner for startup scripts

use crate::engine::CommandOutput;
use crate::session::Session;

/// One executed script line and what it produced
#[derive(Debug, Clone)]
pub struct ScriptStep {
    /// 1-based line number in the script
    pub line_number: usize,
    pub command: String,
    pub output: CommandOutput,
}

/// Result of script execution
#[derive(Debug, Default)]
pub struct ScriptResult {
    /// Every executed line, in order
    pub steps: Vec<ScriptStep>,
    /// Total statements executed
    pub statements_executed: usize,
    /// Whether the script ran `exit`
    pub exited: bool,
}

/// Feeds script lines to a session
pub struct ScriptRunner<'a> {
    session: &'a mut Session,
}

impl<'a> ScriptRunner<'a> {
    /// Create a new script runner
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Run script text line by line.
    ///
    /// Blank lines and `#` comments are skipped. Execution stops at the
    /// first command that asks to exit.
    pub fn run_script(&mut self, content: &str) -> ScriptResult {
        let mut result = ScriptResult::default();

        for (index, raw) in content.lines().enumerate() {
            let command = raw.trim();
            if is_skipped(command) {
                continue;
            }

            let output = self.session.execute(command);
            result.statements_executed += 1;
            let should_exit = output.should_exit;

            result.steps.push(ScriptStep {
                line_number: index + 1,
                command: command.to_string(),
                output,
            });

            if should_exit {
                result.exited = true;
                break;
            }
        }

        result
    }
}

/// Lines a script may contain that are not commands
pub(crate) fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}
