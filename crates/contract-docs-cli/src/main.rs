// crates/contract-docs-cli/src/main.rs
// ============================================================================
// Module: Contract Docs CLI Entry Point
// Description: Command dispatcher for contract documentation generation.
// Purpose: Generate, verify, and configure Mintlify contract docs from a shell.
// Dependencies: clap, contract-docs, contract-docs-config, thiserror
// ============================================================================

//! ## Overview
//! `contract-docs generate` runs the full docs pipeline, `contract-docs check`
//! verifies the output directory against the current contract directory, and
//! `contract-docs config validate` loads and validates the configuration.
//! Progress is rendered through the message catalog; fatal errors exit 1.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use contract_docs::DocsBuilder;
use contract_docs::ProgressEvent;
use contract_docs::ProgressReporter;
use contract_docs_cli::t;
use contract_docs_config::DocsConfig;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "contract-docs", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate markdown pages, `index.md`, and `docs_tab.json`.
    Generate(RunArgs),
    /// Verify the output directory is up to date without writing.
    Check(RunArgs),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a contract-docs configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments shared by `generate` and `check`.
#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Config file path (defaults to contract-docs.toml or `CONTRACT_DOCS_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Contract directory JSON (overrides `paths.input`).
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Output directory (overrides `paths.output`).
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Config file path (defaults to contract-docs.toml or `CONTRACT_DOCS_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog-formatted error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a formatted message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Generate(args) => command_generate(&args),
        Commands::Check(args) => command_check(&args),
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(command) => command_config_validate(&command),
        },
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout_line(help.trim_end()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `generate` command.
fn command_generate(args: &RunArgs) -> CliResult<ExitCode> {
    let config = load_run_config(args)?;
    let mut reporter = CliReporter::default();
    let result = DocsBuilder::new(config).generate(&mut reporter);
    reporter.finish()?;
    result.map_err(|err| CliError::new(t!("generate.failed", error = err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `check` command.
fn command_check(args: &RunArgs) -> CliResult<ExitCode> {
    let config = load_run_config(args)?;
    let output_dir = config.output_dir();
    let mut reporter = CliReporter::default();
    let result = DocsBuilder::new(config).check(&mut reporter);
    reporter.finish()?;
    let count = result.map_err(|err| CliError::new(t!("check.failed", error = err)))?;
    write_stdout_line(&t!("check.ok", count = count, path = output_dir.display()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = DocsConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration and applies `--input` / `--out` overrides.
fn load_run_config(args: &RunArgs) -> CliResult<DocsConfig> {
    let mut config = DocsConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    if let Some(input) = &args.input {
        config.paths.input = override_path("--input", input)?;
    }
    if let Some(out) = &args.out {
        config.paths.output = override_path("--out", out)?;
    }
    config.validate().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    Ok(config)
}

/// Resolves a path flag against the working directory.
fn override_path(flag: &str, path: &Path) -> CliResult<String> {
    let invalid = |error: String| {
        CliError::new(t!("config.override_invalid", flag = flag, path = path.display(), error = error))
    };
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_err(|err| invalid(err.to_string()))?.join(path)
    };
    absolute.to_str().map(str::to_string).ok_or_else(|| invalid(String::from("path must be utf-8")))
}

// ============================================================================
// SECTION: Progress Rendering
// ============================================================================

/// Renders progress events as catalog lines; warnings go to stderr.
#[derive(Default)]
struct CliReporter {
    /// First output failure, surfaced once the run completes.
    error: Option<String>,
}

impl CliReporter {
    /// Returns the catalog line for an event, and whether it is a warning.
    fn render(event: &ProgressEvent) -> Option<(String, bool)> {
        let line = match event {
            ProgressEvent::Started => t!("generate.started"),
            ProgressEvent::CheckStarted => t!("check.started"),
            ProgressEvent::IgnoreFileChecked {
                path,
                updated,
            } => {
                if !updated {
                    return None;
                }
                t!("generate.ignore_updated", path = path.display())
            }
            ProgressEvent::RegeneratingInput {
                path,
            } => t!("generate.regenerating", path = path.display()),
            ProgressEvent::DirectoryLoaded {
                count,
            } => t!("generate.loaded", count = count),
            ProgressEvent::OutputRecreated {
                path,
            } => t!("generate.output_recreated", path = path.display()),
            ProgressEvent::PageWritten {
                ..
            } => return None,
            ProgressEvent::IndexWritten => t!("generate.index_written"),
            ProgressEvent::NavigationWritten {
                path,
            } => t!("generate.navigation_written", path = path.display()),
            ProgressEvent::Warning(warning) => {
                return Some((t!("generate.warning", warning = warning), true));
            }
            ProgressEvent::Finished {
                count,
                output_dir,
            } => t!("generate.finished", count = count, path = output_dir.display()),
        };
        Some((line, false))
    }

    /// Surfaces the first output failure, if any.
    fn finish(self) -> CliResult<()> {
        self.error.map_or(Ok(()), |message| Err(CliError::new(message)))
    }
}

impl ProgressReporter for CliReporter {
    fn report(&mut self, event: &ProgressEvent) {
        let Some((line, is_warning)) = Self::render(event) else {
            return;
        };
        let (stream, result) = if is_warning {
            ("stderr", write_stderr_line(&line))
        } else {
            ("stdout", write_stdout_line(&line))
        };
        if let Err(err) = result
            && self.error.is_none()
        {
            self.error = Some(output_error(stream, &err));
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
