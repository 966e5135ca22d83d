// crates/contract-docs/src/navigation.rs
// ============================================================================
// Module: Navigation Tree Builder
// Description: Builds the Mintlify navigation tab from written page paths.
// Purpose: Mirror the output directory layout as nested navigation groups.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Written page paths (relative, `/`-separated) are folded into an explicit
//! [`DirectoryNode`] tree, then rendered recursively into a [`NavigationTab`]:
//! one group per directory, pages sorted within a directory, child groups in
//! first-seen order. Root pages other than `index.md` are collected into a
//! synthetic utilities group placed first; the root `index.md` becomes the
//! tab-level page.
//!
//! ## Invariants
//! - `index.md` never appears in a group's page list, at any depth.
//! - Empty `pages` and `groups` lists are omitted from the serialized JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::DocsError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Landing page file name.
pub const INDEX_FILE_NAME: &str = "index.md";
/// Markdown extension recognized as a page.
const MARKDOWN_EXTENSION: &str = ".md";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Settings for the generated navigation tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSettings {
    /// Tab label.
    pub tab: String,
    /// Docs-site path prefix for every page id.
    pub base_path: String,
    /// Group holding pages written at the output root.
    pub utilities_group: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            tab: String::from("Contracts"),
            base_path: String::from("mintlify_context"),
            utilities_group: String::from("utilities"),
        }
    }
}

/// Mintlify navigation tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTab {
    /// Tab label.
    pub tab: String,
    /// Tab-level pages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<String>,
    /// Top-level groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<NavigationGroup>,
}

/// Mintlify navigation group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationGroup {
    /// Group label (directory name).
    pub group: String,
    /// Page ids, sorted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<String>,
    /// Nested groups, in first-seen order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Self>,
}

/// Directory node of the written-files tree.
#[derive(Debug, Default)]
struct DirectoryNode {
    /// File names directly in this directory, in insertion order.
    files: Vec<String>,
    /// Child directories, in insertion order.
    children: Vec<(String, Self)>,
}

impl DirectoryNode {
    /// Inserts a file given its directory segments and file name.
    fn insert(&mut self, directories: &[&str], file: &str) {
        match directories.split_first() {
            None => self.files.push(file.to_string()),
            Some((head, rest)) => self.child_mut(head).insert(rest, file),
        }
    }

    /// Returns the named child, creating it on first use.
    fn child_mut(&mut self, name: &str) -> &mut Self {
        let existing = self.children.iter().position(|(child, _)| child == name);
        let position = match existing {
            Some(position) => position,
            None => {
                self.children.push((name.to_string(), Self::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[position].1
    }

    /// Returns this directory's page file names, excluding `index.md`, sorted.
    fn page_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self
            .files
            .iter()
            .map(String::as_str)
            .filter(|name| !name.eq_ignore_ascii_case(INDEX_FILE_NAME))
            .collect();
        files.sort_by(|lhs, rhs| compare_names(lhs, rhs));
        files
    }
}

// ============================================================================
// SECTION: Building
// ============================================================================

/// Builds the navigation tab from written page paths.
///
/// Paths that do not end in `.md` are ignored.
#[must_use]
pub fn build_navigation_tab(files: &[String], settings: &NavigationSettings) -> NavigationTab {
    let mut root = DirectoryNode::default();
    for path in files.iter().filter(|path| path.ends_with(MARKDOWN_EXTENSION)) {
        let segments: Vec<&str> = path.split('/').collect();
        if let Some((file, directories)) = segments.split_last() {
            root.insert(directories, file);
        }
    }

    let mut groups: Vec<NavigationGroup> = root
        .children
        .iter()
        .map(|(name, node)| build_group(name, node, &[], &settings.base_path))
        .collect();
    let root_pages: Vec<String> =
        root.page_files().into_iter().map(|file| page_id(&settings.base_path, &[file])).collect();
    if !root_pages.is_empty() {
        groups.insert(
            0,
            NavigationGroup {
                group: settings.utilities_group.clone(),
                pages: root_pages,
                groups: Vec::new(),
            },
        );
    }

    let mut pages = Vec::new();
    if root.files.iter().any(|name| name == INDEX_FILE_NAME) {
        pages.push(page_id(&settings.base_path, &[INDEX_FILE_NAME]));
    }

    NavigationTab {
        tab: settings.tab.clone(),
        pages,
        groups,
    }
}

/// Renders one directory node as a group.
fn build_group(name: &str, node: &DirectoryNode, parents: &[&str], base: &str) -> NavigationGroup {
    let mut lineage: Vec<&str> = parents.to_vec();
    lineage.push(name);
    let pages = node
        .page_files()
        .into_iter()
        .map(|file| {
            let mut segments = lineage.clone();
            segments.push(file);
            page_id(base, &segments)
        })
        .collect();
    let groups =
        node.children.iter().map(|(child, node)| build_group(child, node, &lineage, base)).collect();
    NavigationGroup {
        group: name.to_string(),
        pages,
        groups,
    }
}

/// Joins the base path and segments, stripping `.md` from the last segment.
fn page_id(base: &str, segments: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(segments.len() + 1);
    parts.push(base);
    if let Some((file, directories)) = segments.split_last() {
        parts.extend_from_slice(directories);
        parts.push(strip_markdown_extension(file));
    }
    parts.retain(|part| !part.is_empty());
    parts.join("/")
}

/// Removes a trailing `.md`, matched case-insensitively.
fn strip_markdown_extension(file: &str) -> &str {
    let split = file.len().saturating_sub(MARKDOWN_EXTENSION.len());
    match (file.get(.. split), file.get(split ..)) {
        (Some(stem), Some(extension)) if extension.eq_ignore_ascii_case(MARKDOWN_EXTENSION) => stem,
        _ => file,
    }
}

/// Orders names case-insensitively, falling back to byte order for ties.
fn compare_names(lhs: &str, rhs: &str) -> Ordering {
    lhs.to_lowercase().cmp(&rhs.to_lowercase()).then_with(|| lhs.cmp(rhs))
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Serializes the tab as pretty JSON with two-space indentation and no
/// trailing newline.
///
/// # Errors
///
/// Returns [`DocsError::Serialization`] when serialization fails.
pub fn navigation_json(tab: &NavigationTab) -> Result<Vec<u8>, DocsError> {
    serde_json::to_vec_pretty(tab).map_err(|err| DocsError::Serialization(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
