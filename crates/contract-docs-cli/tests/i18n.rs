// crates/contract-docs-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Exercises the message catalog and placeholder substitution.
// Purpose: Ensure progress and error lines render from stable catalog keys.
// Dependencies: contract-docs-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates catalog lookups, key fallback, and the
//! [`t!`](contract_docs_cli::t) macro's named-argument formatting.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use contract_docs_cli::i18n::MessageArg;
use contract_docs_cli::i18n::translate;
use contract_docs_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms catalog entries resolve and replace every placeholder.
#[test]
fn translate_substitutes_placeholders() {
    let args = vec![MessageArg::new("count", "3"), MessageArg::new("path", "mintlify_context")];
    let result = translate("generate.finished", args);
    assert_eq!(result, "Wrote 3 markdown files to mintlify_context");
}

/// Confirms missing keys fall back to the key string.
#[test]
fn translate_falls_back_to_key() {
    assert_eq!(translate("generate.unknown", Vec::new()), "generate.unknown");
}

/// Confirms unmatched arguments leave the template untouched.
#[test]
fn unused_arguments_are_ignored() {
    let result = translate("generate.index_written", vec![MessageArg::new("path", "x")]);
    assert_eq!(result, "Wrote index.md");
}

/// Confirms the t! macro formats named arguments of any displayable type.
#[test]
fn t_macro_formats_message() {
    let count = 12_usize;
    assert_eq!(t!("generate.loaded", count = count), "Loaded 12 contract descriptors");
    let rendered = t!("main.version", version = "0.1.0");
    assert_eq!(rendered, "contract-docs 0.1.0");
}
