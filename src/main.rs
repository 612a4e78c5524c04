//! sandbox-shell CLI - run shell commands inside an extracted archive

use std::io::{self, BufRead};
use std::path::Path;

use anyhow::{bail, Context as _};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sandbox_shell::cli::{Args, SubCommand};
use sandbox_shell::config::{Config, DEFAULT_CONFIG_FILE};
use sandbox_shell::script::{has_errors, validate_script, ScriptRunner, ValidationSeverity};
use sandbox_shell::{format_output, CommandOutput, OutputFormat, Session};

fn main() {
    let args = Args::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if args.verbose {
        "sandbox_shell=debug"
    } else {
        "sandbox_shell=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let command = args.command.clone().unwrap_or(SubCommand::Run);

    if command == SubCommand::Check {
        return check_startup_script(&config);
    }

    let archive = config.archive()?;
    let mut session = Session::open_with(archive, &config.sandbox_options())
        .with_context(|| format!("failed to open sandbox from {}", archive.display()))?;
    info!("Sandbox ready ({})", session.summary());

    install_interrupt_handler(&session)?;

    let result = drive(&mut session, &config, &args, command, &format);
    session.close();
    result
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None if default_path.is_file() => Config::load(default_path)?,
        None => Config::default(),
    };

    if let Some(archive) = &args.archive {
        config.filesystem_path = Some(archive.clone());
    }
    if let Some(script) = &args.script {
        config.startup_script = Some(script.clone());
    }
    if args.no_startup {
        config.startup_script = None;
    }

    Ok(config)
}

/// Remove the sandbox before the process dies on SIGINT, SIGTERM or SIGHUP
fn install_interrupt_handler(session: &Session) -> anyhow::Result<()> {
    let root = session.root().to_path_buf();
    ctrlc::set_handler(move || {
        if let Err(e) = std::fs::remove_dir_all(&root) {
            if e.kind() != io::ErrorKind::NotFound {
                eprintln!("Failed to remove sandbox: {}", e);
            }
        }
        std::process::exit(130);
    })
    .context("failed to install signal handler")
}

fn drive(
    session: &mut Session,
    config: &Config,
    args: &Args,
    command: SubCommand,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    if let Some(script) = &config.startup_script {
        if run_startup_script(session, script, format, args.verbose)? {
            return Ok(());
        }
    }

    match command {
        SubCommand::Run => {
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read from stdin")?;
                if emit(&session.execute(&line), format) {
                    break;
                }
            }
            Ok(())
        }
        SubCommand::Exec { commands } => {
            for line in &commands {
                if emit(&session.execute(line), format) {
                    break;
                }
            }
            Ok(())
        }
        #[cfg(feature = "repl")]
        SubCommand::Repl => Ok(sandbox_shell::repl::run_repl(session, format)?),
        #[cfg(not(feature = "repl"))]
        SubCommand::Repl => bail!("REPL support not enabled. Rebuild with --features repl"),
        SubCommand::Check => Ok(()),
    }
}

/// Validate and run the startup script. Returns true if it ran `exit`.
fn run_startup_script(
    session: &mut Session,
    script: &Path,
    format: &OutputFormat,
    verbose: bool,
) -> anyhow::Result<bool> {
    let content = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read startup script {}", script.display()))?;

    let issues = validate_script(&content);
    for issue in issues
        .iter()
        .filter(|i| i.severity == ValidationSeverity::Warning)
    {
        eprintln!("Warning: {}", issue);
    }
    if has_errors(&issues) {
        for issue in issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Error)
        {
            eprintln!("Error: {}", issue);
        }
        bail!("startup script {} failed validation", script.display());
    }

    let result = ScriptRunner::new(session).run_script(&content);
    for step in &result.steps {
        emit(&step.output, format);
    }

    if verbose {
        eprintln!(
            "--- Startup script completed: {} statements executed ---",
            result.statements_executed
        );
    }

    Ok(result.exited)
}

fn check_startup_script(config: &Config) -> anyhow::Result<()> {
    let Some(script) = &config.startup_script else {
        println!("No startup script configured");
        return Ok(());
    };

    let content = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read startup script {}", script.display()))?;
    let issues = validate_script(&content);

    println!("Script: {}", script.display());
    if issues.is_empty() {
        println!("No issues found");
        return Ok(());
    }

    for issue in &issues {
        println!("  - {}", issue);
    }

    if has_errors(&issues) {
        bail!("startup script has errors");
    }
    Ok(())
}

/// Print a command's output. Returns true when the session should end.
fn emit(output: &CommandOutput, format: &OutputFormat) -> bool {
    if let Some(text) = format_output(output, format) {
        println!("{}", text);
    }
    output.should_exit
}
