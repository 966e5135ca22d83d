// crates/contract-docs-cli/src/i18n.rs
// ============================================================================
// Module: CLI Message Catalog
// Description: Message catalog and placeholder substitution for CLI output.
// Purpose: Centralize user-facing strings of the contract-docs CLI.
// Dependencies: std
// ============================================================================

//! ## Overview
//! All runtime output of the CLI is routed through the [`t!`](crate::t)
//! macro, which looks a key up in the catalog and substitutes `{name}`
//! placeholders.
//!
//! ## Invariants
//! - The catalog is built once and read-only thereafter.
//! - Missing keys fall back to the key itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces (e.g., `"path"`).
    pub key: &'static str,
    /// Preformatted value substituted for the placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Catalog entries.
const CATALOG: &[(&str, &str)] = &[
    ("main.version", "contract-docs {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("config.override_invalid", "Invalid {flag} path {path}: {error}"),
    ("generate.started", "Generating Mintlify context markdown..."),
    ("generate.ignore_updated", "Added output directory to {path}"),
    ("generate.regenerating", "{path} not found. Generating it first..."),
    ("generate.loaded", "Loaded {count} contract descriptors"),
    ("generate.output_recreated", "Recreated {path}"),
    ("generate.index_written", "Wrote index.md"),
    ("generate.navigation_written", "Wrote navigation tab to {path}"),
    ("generate.warning", "Warning: {warning}"),
    ("generate.finished", "Wrote {count} markdown files to {path}"),
    ("generate.failed", "Docs generation failed: {error}"),
    ("check.started", "Checking Mintlify context markdown..."),
    ("check.ok", "Docs up to date: {count} contract pages verified in {path}"),
    ("check.failed", "Docs check failed: {error}"),
];

/// Returns the catalog as a lookup map.
fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    CATALOG_MAP.get_or_init(|| CATALOG.iter().copied().collect())
}

/// Looks up `key` and substitutes `args` into its placeholders.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a catalog message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
