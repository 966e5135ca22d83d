// crates/contract-docs-config/src/lib.rs
// ============================================================================
// Module: Contract Docs Config Library
// Description: Canonical config model and validation for the docs generator.
// Purpose: Single source of truth for contract-docs.toml semantics.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! `contract-docs-config` defines the configuration model for the contract
//! documentation generator: where the contract directory JSON lives, where the
//! generated Mintlify pages go, how the navigation tab is labelled, and which
//! collaborator command regenerates a missing contract directory.
//!
//! Validation is strict and fail-closed. Every path handed to the generator is
//! resolved from this model; nothing is derived from the process working
//! directory implicitly.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
