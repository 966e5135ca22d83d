// crates/contract-docs-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and progress rendering.
// Purpose: Ensure flags map onto configuration and events onto catalog lines.
// Dependencies: contract-docs-cli main helpers
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use clap::CommandFactory;
use clap::Parser;
use contract_docs::DocsWarning;
use contract_docs::ProgressEvent;

use super::Cli;
use super::CliReporter;
use super::Commands;
use super::ConfigCommand;
use super::override_path;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn generate_accepts_path_overrides() {
    let cli = Cli::try_parse_from([
        "contract-docs",
        "generate",
        "--config",
        "docs.toml",
        "--input",
        "data/contracts.json",
        "--out",
        "site/contracts",
    ])
    .expect("parse generate");
    let Some(Commands::Generate(args)) = cli.command else {
        panic!("expected generate command");
    };
    assert_eq!(args.config, Some(PathBuf::from("docs.toml")));
    assert_eq!(args.input, Some(PathBuf::from("data/contracts.json")));
    assert_eq!(args.out, Some(PathBuf::from("site/contracts")));
}

#[test]
fn config_validate_and_version_parse() {
    let cli = Cli::try_parse_from(["contract-docs", "config", "validate"]).expect("parse config");
    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommand::Validate(_),
        })
    ));
    let cli = Cli::try_parse_from(["contract-docs", "--version"]).expect("parse version");
    assert!(cli.show_version);
    assert!(cli.command.is_none());
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["contract-docs", "publish"]).is_err());
}

#[test]
fn relative_override_is_made_absolute() {
    let resolved = override_path("--out", &PathBuf::from("site")).expect("resolve override");
    assert!(PathBuf::from(&resolved).is_absolute());
    assert!(resolved.ends_with("site"));
}

#[test]
fn finished_event_renders_summary_line() {
    let rendered = CliReporter::render(&ProgressEvent::Finished {
        count: 4,
        output_dir: PathBuf::from("mintlify_context"),
    });
    assert_eq!(rendered, Some((String::from("Wrote 4 markdown files to mintlify_context"), false)));
}

#[test]
fn warnings_render_to_stderr_and_pages_are_quiet() {
    let warning = ProgressEvent::Warning(DocsWarning::Navigation(String::from("boom")));
    let rendered = CliReporter::render(&warning).expect("warning line");
    assert!(rendered.1);
    assert_eq!(rendered.0, "Warning: could not write navigation tab: boom");
    let page = ProgressEvent::PageWritten {
        path: String::from("vb/Token.md"),
    };
    assert_eq!(CliReporter::render(&page), None);
    let unchanged = ProgressEvent::IgnoreFileChecked {
        path: PathBuf::from(".gitignore"),
        updated: false,
    };
    assert_eq!(CliReporter::render(&unchanged), None);
}

#[test]
fn check_start_has_its_own_line() {
    assert_eq!(
        CliReporter::render(&ProgressEvent::CheckStarted),
        Some((String::from("Checking Mintlify context markdown..."), false))
    );
    assert_ne!(
        CliReporter::render(&ProgressEvent::Started),
        CliReporter::render(&ProgressEvent::CheckStarted)
    );
}
