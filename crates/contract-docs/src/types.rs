// crates/contract-docs/src/types.rs
// ============================================================================
// Module: Docs Types
// Description: Shared data models for generated contract documentation.
// Purpose: Provide canonical shapes for artifacts, bundles, and run reports.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Shapes produced by [`crate::DocsBuilder`]: the in-memory bundle of rendered
//! pages, the warnings collected during a run, and the report returned once
//! the output directory has been written.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// SECTION: Artifact Types
// ============================================================================

/// Generated artifact with payload bytes.
///
/// # Invariants
/// - When produced by [`crate::DocsBuilder`], `path` is a safe, relative,
///   `/`-separated path under the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsArtifact {
    /// Relative artifact path under the output directory.
    pub path: String,
    /// Artifact payload bytes.
    pub bytes: Vec<u8>,
}

impl DocsArtifact {
    /// Builds a markdown artifact from rendered text.
    #[must_use]
    pub fn markdown(path: impl Into<String>, content: String) -> Self {
        Self {
            path: path.into(),
            bytes: content.into_bytes(),
        }
    }

    /// Builds a JSON artifact from serialized bytes.
    #[must_use]
    pub fn json(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

// ============================================================================
// SECTION: Bundle Types
// ============================================================================

/// Generated docs bundle held in memory.
///
/// # Invariants
/// - `pages` keep contract directory order and have unique paths.
/// - `navigation` is `None` only when building it failed; the failure is
///   recorded in `warnings` and reported when the bundle is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsBundle {
    /// One markdown page per contract descriptor.
    pub pages: Vec<DocsArtifact>,
    /// Landing page written as `index.md`.
    pub index: DocsArtifact,
    /// Navigation tab written as `docs_tab.json`.
    pub navigation: Option<DocsArtifact>,
    /// Non-fatal problems encountered while building.
    pub warnings: Vec<DocsWarning>,
}

impl DocsBundle {
    /// Iterates every artifact in write order.
    pub fn artifacts(&self) -> impl Iterator<Item = &DocsArtifact> {
        self.pages.iter().chain(std::iter::once(&self.index)).chain(self.navigation.as_ref())
    }
}

// ============================================================================
// SECTION: Warnings
// ============================================================================

/// Non-fatal problems; the run continues after reporting them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocsWarning {
    /// The project ignore file could not be read or updated.
    #[error("could not update ignore file: {0}")]
    IgnoreFile(String),
    /// `index.md` could not be written.
    #[error("could not write index page: {0}")]
    IndexPage(String),
    /// `docs_tab.json` could not be built or written.
    #[error("could not write navigation tab: {0}")]
    Navigation(String),
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Summary of a completed generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Number of contract pages written (excludes `index.md`).
    pub pages_written: usize,
    /// Output directory the run wrote into.
    pub output_dir: PathBuf,
    /// Relative paths of every markdown file written, in write order.
    pub written: Vec<String>,
    /// Whether the contract directory had to be regenerated first.
    pub regenerated_input: bool,
    /// Warnings raised during the run.
    pub warnings: Vec<DocsWarning>,
}
