// crates/contract-docs/src/progress.rs
// ============================================================================
// Module: Progress Reporting
// Description: Events emitted while a docs generation run advances.
// Purpose: Keep user-facing output out of the library.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The generator never writes to stdout or stderr itself. It emits
//! [`ProgressEvent`]s to a caller-supplied [`ProgressReporter`]; the CLI
//! renders them through its message catalog, tests use [`SilentReporter`]
//! or a recording reporter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use crate::types::DocsWarning;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Milestones of a generation or check run, in the order they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Generation started.
    Started,
    /// A drift check started.
    CheckStarted,
    /// The ignore file now lists the output directory.
    IgnoreFileChecked {
        /// Ignore file path.
        path: PathBuf,
        /// Whether an entry was added.
        updated: bool,
    },
    /// The contract directory is missing and is being regenerated.
    RegeneratingInput {
        /// Expected contract directory path.
        path: PathBuf,
    },
    /// The contract directory was parsed.
    DirectoryLoaded {
        /// Number of descriptors.
        count: usize,
    },
    /// The output directory was removed and created empty.
    OutputRecreated {
        /// Output directory.
        path: PathBuf,
    },
    /// A contract page was written.
    PageWritten {
        /// Relative page path.
        path: String,
    },
    /// `index.md` was written.
    IndexWritten,
    /// `docs_tab.json` was written.
    NavigationWritten {
        /// Navigation file path.
        path: PathBuf,
    },
    /// A non-fatal problem occurred.
    Warning(DocsWarning),
    /// The run completed.
    Finished {
        /// Number of contract pages written.
        count: usize,
        /// Output directory.
        output_dir: PathBuf,
    },
}

// ============================================================================
// SECTION: Reporters
// ============================================================================

/// Receives progress events from the generator.
pub trait ProgressReporter {
    /// Handles one event.
    fn report(&mut self, event: &ProgressEvent);
}

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&mut self, _event: &ProgressEvent) {}
}

impl ProgressReporter for Vec<ProgressEvent> {
    fn report(&mut self, event: &ProgressEvent) {
        self.push(event.clone());
    }
}
