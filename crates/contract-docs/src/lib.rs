// crates/contract-docs/src/lib.rs
// ============================================================================
// Module: Contract Docs Library
// Description: Contract directory to Mintlify markdown and navigation.
// Purpose: Load contract descriptors and emit deterministic docs artifacts.
// Dependencies: cap-primitives, cap-std, contract-docs-config, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The contract docs library turns the contract directory JSON (one record per
//! deployed contract: addresses per network, ABI, function signatures) into a
//! Mintlify documentation tree: one markdown page per contract, an `index.md`
//! landing page, and a `docs_tab.json` navigation tab mirroring the directory
//! layout.
//!
//! The pipeline is a single synchronous pass. Loose JSON is normalized into
//! [`ContractDescriptor`] at the load boundary; rendering and navigation are
//! pure functions; only [`DocsBuilder`] touches the filesystem.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod descriptor;
pub mod generator;
pub mod ignore_file;
pub mod loader;
pub mod markdown;
pub mod navigation;
pub mod progress;
pub mod types;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading descriptors or generating docs artifacts.
///
/// # Invariants
/// - Variants carry human-readable context for diagnostics.
/// - [`DocsError::OutputPath`] and [`DocsError::MissingInput`] always include
///   the offending path.
#[derive(Debug, Error)]
pub enum DocsError {
    /// IO failure while reading inputs or writing artifacts.
    #[error("io error: {0}")]
    Io(String),
    /// Serialization failure while rendering artifacts.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Contract directory JSON is missing and could not be regenerated.
    #[error("contract directory not found: {}", .0.display())]
    MissingInput(PathBuf),
    /// The collaborator command that writes the contract directory failed.
    #[error("contract directory regeneration failed: {0}")]
    Regeneration(String),
    /// Contract directory JSON is unreadable or not an array.
    #[error("invalid contract directory: {0}")]
    InvalidDirectory(String),
    /// A contract directory entry could not be normalized.
    #[error("invalid contract descriptor at index {index}: {reason}")]
    InvalidDescriptor {
        /// Position of the entry in the contract directory array.
        index: usize,
        /// Why the entry was rejected.
        reason: String,
    },
    /// Output path invalid or inaccessible.
    #[error("invalid output path: {}", .0.display())]
    OutputPath(PathBuf),
    /// Docs generation failed.
    #[error("docs generation error: {0}")]
    Generation(String),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use descriptor::ContractDescriptor;
pub use descriptor::Network;
pub use descriptor::OriginChain;
pub use generator::DocsBuilder;
pub use loader::LoadedDirectory;
pub use loader::RegenerateCommand;
pub use markdown::render_contract_markdown;
pub use navigation::NavigationGroup;
pub use navigation::NavigationSettings;
pub use navigation::NavigationTab;
pub use navigation::build_navigation_tab;
pub use progress::ProgressEvent;
pub use progress::ProgressReporter;
pub use progress::SilentReporter;
pub use types::DocsArtifact;
pub use types::DocsBundle;
pub use types::DocsWarning;
pub use types::GenerationReport;
