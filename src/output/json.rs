//! JSON output formatting
//!
//! One compact object per command, so a transcript is valid JSON Lines.

use crate::engine::CommandOutput;
use serde_json::json;

pub fn format_json(output: &CommandOutput) -> String {
    serde_json::to_string(output)
        .unwrap_or_else(|_| json!({ "lines": [], "should_exit": output.should_exit }).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_format_json_fields() {
        let output = CommandOutput::line("Changed directory to /docs");
        let value: Value = serde_json::from_str(&format_json(&output)).unwrap();
        assert_eq!(value["lines"][0], "Changed directory to /docs");
        assert_eq!(value["should_exit"], false);
    }

    #[test]
    fn test_format_json_is_single_line() {
        let output = CommandOutput::lines(vec!["a".to_string(), "b".to_string()]);
        assert!(!format_json(&output).contains('\n'));
    }
}
