//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sandbox-shell")]
#[command(author, version, about = "Run shell commands inside a sandbox extracted from a zip archive", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<SubCommand>,

    /// YAML settings file (defaults to ./config.yaml when present)
    #[arg(long, short, global = true, env = "SANDBOX_SHELL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Zip archive to materialize, overriding the config
    #[arg(long, global = true)]
    pub archive: Option<PathBuf>,

    /// Startup script, overriding the config
    #[arg(long, global = true)]
    pub script: Option<PathBuf>,

    /// Skip the startup script
    #[arg(long, global = true)]
    pub no_startup: bool,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SubCommand {
    /// Run the startup script, then read commands from stdin (default)
    Run,

    /// Run the startup script, then the given commands
    Exec {
        /// Commands to run, one per argument
        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// Validate the startup script without opening a sandbox
    Check,

    /// Start interactive REPL mode
    Repl,
}
