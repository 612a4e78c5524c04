//! Interactive REPL implementation

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::{Result, ShellError};
use crate::output::{format_output, OutputFormat};
use crate::session::Session;

/// Read commands interactively until `exit`, Ctrl+D, or a terminal error.
///
/// The caller keeps ownership of the session and is responsible for
/// closing it afterwards.
pub fn run_repl(session: &mut Session, format: &OutputFormat) -> Result<()> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| ShellError::IoError(std::io::Error::other(e.to_string())))?;

    println!("sandbox-shell v{} - Interactive Mode", env!("CARGO_PKG_VERSION"));
    println!("Commands: cd <dir>, ls, pwd, rmdir <dir>, exit\n");

    loop {
        let prompt = format!("sandbox:{}$ ", session.working_directory());

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                let output = session.execute(line);
                if let Some(text) = format_output(&output, format) {
                    println!("{}", text);
                }

                if output.should_exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - cancel current input
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
