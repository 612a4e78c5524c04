//! Pest grammar parser for sandbox-shell command lines

use pest::Parser;
use pest_derive::Parser;

use crate::error::{Result, ShellError};
use crate::parser::ast::Command;

#[derive(Parser)]
#[grammar = "../grammar/shell.pest"]
pub struct ShellParser;

/// Parse a command line into a `Command`.
///
/// Only blank input is an error; any other text parses, falling back to
/// `Command::Unknown` when the verb or argument shape is not recognized.
pub fn parse_command(input: &str) -> Result<Command> {
    let pairs = ShellParser::parse(Rule::line, input)
        .map_err(|e| ShellError::ParseError(e.to_string()))?;

    let line = pairs
        .into_iter()
        .next()
        .ok_or_else(|| ShellError::ParseError("Empty input".to_string()))?;

    let mut verb = None;
    let mut argument = None;

    for pair in line.into_inner() {
        match pair.as_rule() {
            Rule::verb => verb = Some(pair.as_str()),
            Rule::argument => argument = Some(pair.as_str().to_string()),
            _ => {}
        }
    }

    let verb = verb.ok_or_else(|| ShellError::ParseError("Expected a command".to_string()))?;

    let command = match (verb, argument) {
        ("exit", None) => Command::Exit,
        ("ls", None) => Command::Ls,
        ("pwd", None) => Command::Pwd,
        ("cd", argument) => Command::Cd(argument),
        ("rmdir", argument) => Command::Rmdir(argument),
        _ => Command::Unknown(input.trim().to_string()),
    };

    Ok(command)
}
