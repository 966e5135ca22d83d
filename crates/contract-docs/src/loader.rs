// crates/contract-docs/src/loader.rs
// ============================================================================
// Module: Contract Directory Loader
// Description: Reads the contract directory JSON, regenerating it if missing.
// Purpose: Produce normalized contract descriptors for the docs pipeline.
// Dependencies: contract-docs-config, serde_json, std
// ============================================================================

//! ## Overview
//! The contract directory is a JSON array written by an external generator
//! script. When the file is missing and a regeneration command is configured,
//! the loader runs that command once (inheriting stdio, in the project root)
//! and reads the file again. Every other failure is fatal: an unreadable,
//! oversized, non-UTF-8, or non-array file, or an entry that is not an object.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use contract_docs_config::DocsConfig;
use serde_json::Value;

use crate::DocsError;
use crate::descriptor::ContractDescriptor;
use crate::progress::ProgressEvent;
use crate::progress::ProgressReporter;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum contract directory size in bytes.
pub const MAX_DIRECTORY_BYTES: u64 = 64 * 1024 * 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// External command that writes the contract directory JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerateCommand {
    /// Program to execute.
    pub program: String,
    /// Program arguments.
    pub args: Vec<String>,
    /// Working directory for the command.
    pub working_dir: PathBuf,
}

impl RegenerateCommand {
    /// Builds the command from configuration; `None` when regeneration is
    /// disabled.
    #[must_use]
    pub fn from_config(config: &DocsConfig) -> Option<Self> {
        let (program, args) = config.generator.regenerate_command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            working_dir: config.root_dir(),
        })
    }

    /// Runs the command to completion with inherited stdio.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Regeneration`] when the command cannot be spawned
    /// or exits unsuccessfully.
    pub fn run(&self) -> Result<(), DocsError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|err| DocsError::Regeneration(format!("{}: {err}", self.program)))?;
        if status.success() {
            return Ok(());
        }
        Err(DocsError::Regeneration(format!("{} exited with {status}", self.command_line())))
    }

    /// Returns the command line as a single string for diagnostics.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Contract directory loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDirectory {
    /// Normalized descriptors in file order.
    pub descriptors: Vec<ContractDescriptor>,
    /// Whether the regeneration command ran first.
    pub regenerated: bool,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads the contract directory at `input`, regenerating it when missing.
///
/// # Errors
///
/// Returns [`DocsError::MissingInput`] when the file is absent and no
/// regeneration command is configured, [`DocsError::Regeneration`] when the
/// command fails, and [`DocsError::InvalidDirectory`] or
/// [`DocsError::InvalidDescriptor`] when the content is malformed.
pub fn load_contract_directory(
    input: &Path,
    regenerate: Option<&RegenerateCommand>,
    reporter: &mut dyn ProgressReporter,
) -> Result<LoadedDirectory, DocsError> {
    let mut regenerated = false;
    if !input.exists() {
        let Some(command) = regenerate else {
            return Err(DocsError::MissingInput(input.to_path_buf()));
        };
        reporter.report(&ProgressEvent::RegeneratingInput {
            path: input.to_path_buf(),
        });
        command.run()?;
        regenerated = true;
    }
    let bytes = read_directory_bytes(input)?;
    let descriptors = parse_contract_directory(&bytes)?;
    reporter.report(&ProgressEvent::DirectoryLoaded {
        count: descriptors.len(),
    });
    Ok(LoadedDirectory {
        descriptors,
        regenerated,
    })
}

/// Parses contract directory bytes into descriptors.
///
/// # Errors
///
/// Returns [`DocsError::InvalidDirectory`] when the bytes are not a UTF-8 JSON
/// array, or [`DocsError::InvalidDescriptor`] for the first bad entry.
pub fn parse_contract_directory(bytes: &[u8]) -> Result<Vec<ContractDescriptor>, DocsError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| DocsError::InvalidDirectory(String::from("file must be utf-8")))?;
    let value: Value =
        serde_json::from_str(text).map_err(|err| DocsError::InvalidDirectory(err.to_string()))?;
    let Value::Array(entries) = value else {
        return Err(DocsError::InvalidDirectory(String::from("expected a JSON array")));
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            ContractDescriptor::from_value(entry)
                .map_err(|reason| DocsError::InvalidDescriptor { index, reason })
        })
        .collect()
}

/// Reads the contract directory, enforcing the size limit.
fn read_directory_bytes(input: &Path) -> Result<Vec<u8>, DocsError> {
    let metadata = fs::metadata(input).map_err(|err| match err.kind() {
        ErrorKind::NotFound => DocsError::MissingInput(input.to_path_buf()),
        _ => DocsError::Io(err.to_string()),
    })?;
    if !metadata.is_file() {
        return Err(DocsError::InvalidDirectory(format!("not a file: {}", input.display())));
    }
    if metadata.len() > MAX_DIRECTORY_BYTES {
        return Err(DocsError::InvalidDirectory(String::from("file exceeds size limit")));
    }
    fs::read(input).map_err(|err| DocsError::Io(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
