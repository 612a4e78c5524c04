//! Human-readable output formatting

use crate::engine::CommandOutput;

pub fn format_human(output: &CommandOutput) -> Option<String> {
    if output.lines.is_empty() {
        return None;
    }
    Some(output.lines.join("\n"))
}
