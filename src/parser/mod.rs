//! Parser module for sandbox-shell command lines

pub mod ast;
pub mod grammar;

pub use ast::*;
pub use grammar::parse_command;
