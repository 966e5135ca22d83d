// crates/contract-docs/src/markdown.rs
// ============================================================================
// Module: Contract Markdown Renderer
// Description: Renders one Mintlify markdown page per contract descriptor.
// Purpose: Produce deterministic, explorer-linked contract reference pages.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Pages open with YAML frontmatter (`title`, `description`) followed by an
//! Overview list and optional Addresses, Origin addresses, Function
//! signatures, and ABI sections. Sections with nothing to show are omitted.
//! Rendering is pure; the same descriptor always yields the same bytes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::DocsError;
use crate::descriptor::ContractDescriptor;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the markdown page for a contract descriptor.
///
/// # Errors
///
/// Returns [`DocsError::Serialization`] when the ABI cannot be pretty-printed.
pub fn render_contract_markdown(descriptor: &ContractDescriptor) -> Result<String, DocsError> {
    let mut lines: Vec<String> = Vec::new();
    push_frontmatter(&mut lines, descriptor.title(), &descriptor.description_text());
    push_overview(&mut lines, descriptor);
    push_addresses(&mut lines, descriptor);
    push_origin_addresses(&mut lines, descriptor);
    push_signatures(&mut lines, descriptor);
    push_abi(&mut lines, descriptor)?;
    Ok(lines.join("\n"))
}

/// Renders the static landing page.
#[must_use]
pub fn render_index_markdown(title: &str, description: &str, body: &str) -> String {
    let mut lines = Vec::new();
    push_frontmatter(&mut lines, title, description);
    lines.push(body.to_string());
    lines.join("\n")
}

/// Emits the frontmatter block and the blank line after it.
fn push_frontmatter(lines: &mut Vec<String>, title: &str, description: &str) {
    lines.push(String::from("---"));
    lines.push(format!("title: \"{}\"", frontmatter_value(title)));
    lines.push(format!("description: \"{}\"", frontmatter_value(description)));
    lines.push(String::from("---"));
    lines.push(String::new());
}

/// Emits the Overview section.
fn push_overview(lines: &mut Vec<String>, descriptor: &ContractDescriptor) {
    lines.push(String::from("### Overview"));
    lines.push(String::new());
    lines.push(format!("- **name**: {}", descriptor.title()));
    lines.push(format!("- **path**: `{}`", descriptor.path_text()));
    lines.push(format!("- **context**: {}", descriptor.context_text()));
    let metadata = &descriptor.metadata;
    if !metadata.tags.is_empty() {
        lines.push(format!("- **tags**: {}", metadata.tags.join(", ")));
    }
    let natspec = [("title", &metadata.title), ("notice", &metadata.notice), ("dev", &metadata.dev)];
    for (label, value) in natspec {
        if let Some(value) = value {
            lines.push(format!("- **{label}**: {value}"));
        }
    }
    lines.push(String::new());
}

/// Emits the Addresses section when at least one address is set.
fn push_addresses(lines: &mut Vec<String>, descriptor: &ContractDescriptor) {
    if descriptor.addresses.is_empty() {
        return;
    }
    lines.push(String::from("### Addresses"));
    lines.push(String::new());
    for entry in &descriptor.addresses {
        let linked = linked_address(&entry.address, entry.network.explorer_url(&entry.address));
        lines.push(format!("- **{}**: {linked}", entry.label));
    }
    lines.push(String::new());
}

/// Emits the Origin addresses section when at least one entry is set.
fn push_origin_addresses(lines: &mut Vec<String>, descriptor: &ContractDescriptor) {
    if descriptor.origin_addresses.is_empty() {
        return;
    }
    lines.push(String::from("### Origin addresses"));
    lines.push(String::new());
    for entry in &descriptor.origin_addresses {
        let linked = linked_address(&entry.address, entry.chain.explorer_url(&entry.address));
        lines.push(format!(
            "- **{network}**: {chain} ({network}) \u{2013} {linked}",
            network = entry.network_label,
            chain = entry.chain_label,
        ));
    }
    lines.push(String::new());
}

/// Emits the Function signatures code block when any signature is set.
fn push_signatures(lines: &mut Vec<String>, descriptor: &ContractDescriptor) {
    if descriptor.function_signatures.is_empty() {
        return;
    }
    lines.push(String::from("### Function signatures"));
    lines.push(String::new());
    lines.push(String::from("```"));
    lines.extend(descriptor.function_signatures.iter().cloned());
    lines.push(String::from("```"));
    lines.push(String::new());
}

/// Emits the ABI as pretty JSON when present.
fn push_abi(lines: &mut Vec<String>, descriptor: &ContractDescriptor) -> Result<(), DocsError> {
    let Some(abi) = &descriptor.abi else {
        return Ok(());
    };
    let pretty =
        serde_json::to_string_pretty(abi).map_err(|err| DocsError::Serialization(err.to_string()))?;
    lines.push(String::from("### ABI"));
    lines.push(String::new());
    lines.push(String::from("```json"));
    lines.push(pretty);
    lines.push(String::from("```"));
    lines.push(String::new());
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Wraps an address in code formatting, linking it when an explorer is known.
fn linked_address(address: &str, href: Option<String>) -> String {
    match href {
        Some(href) => format!("[`{address}`]({href})"),
        None => format!("`{address}`"),
    }
}

/// Escapes a value for a double-quoted YAML frontmatter scalar.
#[must_use]
pub fn frontmatter_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// Replaces every character outside `[A-Za-z0-9_.-]` with `_`.
///
/// Characters beyond the basic multilingual plane become two underscores so
/// file names match those produced by UTF-16 based tooling.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-') {
            sanitized.push(ch);
        } else {
            sanitized.extend(std::iter::repeat_n('_', ch.len_utf16()));
        }
    }
    sanitized
}

// ============================================================================
// SECTION: Tests
// ============================================================================
