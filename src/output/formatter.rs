//! Output formatting

use crate::engine::CommandOutput;
use crate::output::human::format_human;
use crate::output::json::format_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Render a command's output. `None` means nothing should be printed.
pub fn format_output(output: &CommandOutput, format: &OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Human => format_human(output),
        OutputFormat::Json => Some(format_json(output)),
    }
}
