// crates/contract-docs/src/ignore_file.rs
// ============================================================================
// Module: Ignore File Maintenance
// Description: Keeps the generated output directory listed in the ignore file.
// Purpose: Stop generated docs from being committed by accident.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`ensure_ignore_entry`] appends the output directory entry to the project
//! ignore file unless a line already matches it after trimming. A file that
//! lacks a trailing newline is repaired before appending. Callers treat every
//! failure here as a warning.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::DocsError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of [`ensure_ignore_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreUpdate {
    /// The ignore file did not exist and was created with the entry.
    Created,
    /// The entry was appended to an existing file.
    Appended,
    /// A matching line was already present.
    AlreadyPresent,
}

impl IgnoreUpdate {
    /// Returns true when the file was changed.
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::AlreadyPresent)
    }
}

// ============================================================================
// SECTION: Update
// ============================================================================

/// Ensures `entry` appears as a line of the ignore file at `path`.
///
/// # Errors
///
/// Returns [`DocsError::Io`] when the file cannot be read or written, or is
/// not UTF-8.
pub fn ensure_ignore_entry(path: &Path, entry: &str) -> Result<IgnoreUpdate, DocsError> {
    let current = match fs::read_to_string(path) {
        Ok(current) => current,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            fs::write(path, format!("{entry}\n")).map_err(|err| DocsError::Io(err.to_string()))?;
            return Ok(IgnoreUpdate::Created);
        }
        Err(err) => return Err(DocsError::Io(err.to_string())),
    };
    if contains_entry(&current, entry) {
        return Ok(IgnoreUpdate::AlreadyPresent);
    }
    fs::write(path, append_entry(&current, entry)).map_err(|err| DocsError::Io(err.to_string()))?;
    Ok(IgnoreUpdate::Appended)
}

/// Returns true when any line matches `entry` after trimming.
fn contains_entry(content: &str, entry: &str) -> bool {
    content.lines().any(|line| line.trim() == entry)
}

/// Appends `entry` on its own line.
fn append_entry(content: &str, entry: &str) -> String {
    let separator = if content.ends_with('\n') { "" } else { "\n" };
    format!("{content}{separator}{entry}\n")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
