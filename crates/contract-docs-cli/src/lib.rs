// crates/contract-docs-cli/src/lib.rs
// ============================================================================
// Module: Contract Docs CLI Library
// Description: Shared helpers for the contract-docs binary.
// Purpose: Expose the message catalog to the binary and its tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Library half of the `contract-docs` CLI. Every user-facing string lives in
//! the [`i18n`] catalog and is formatted through the [`t!`] macro.

pub mod i18n;
