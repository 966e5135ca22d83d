// crates/contract-docs/src/navigation/tests.rs
// ============================================================================
// Module: Navigation Builder Unit Tests
// Description: Unit coverage for navigation tab construction.
// Purpose: Ensure grouping, ordering, and index handling stay stable.
// Dependencies: contract-docs, serde_json
// ============================================================================

#![allow(
    clippy::panic_in_result_fn,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions inside Result-returning tests."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use super::NavigationGroup;
use super::NavigationSettings;
use super::NavigationTab;
use super::build_navigation_tab;
use super::navigation_json;
use super::strip_markdown_extension;

fn files(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|path| (*path).to_string()).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn nested_directories_become_groups() -> Result<(), Box<dyn std::error::Error>> {
    let tab = build_navigation_tab(
        &files(&["vb/tokens/IvbETH.md", "vb/IMigrationManager.md", "Root.md", "index.md"]),
        &NavigationSettings::default(),
    );
    let actual = serde_json::to_value(&tab)?;
    let expected = json!({
        "tab": "Contracts",
        "pages": ["mintlify_context/index"],
        "groups": [
            { "group": "utilities", "pages": ["mintlify_context/Root"] },
            {
                "group": "vb",
                "pages": ["mintlify_context/vb/IMigrationManager"],
                "groups": [
                    { "group": "tokens", "pages": ["mintlify_context/vb/tokens/IvbETH"] }
                ]
            }
        ]
    });
    assert_eq!(actual, expected);
    Ok(())
}

#[test]
fn pages_are_sorted_and_groups_keep_first_seen_order() {
    let tab = build_navigation_tab(
        &files(&["zeta/b.md", "alpha/x.md", "zeta/A.md", "zeta/c.md"]),
        &NavigationSettings::default(),
    );
    let groups: Vec<&str> = tab.groups.iter().map(|group| group.group.as_str()).collect();
    assert_eq!(groups, ["zeta", "alpha"]);
    assert_eq!(
        tab.groups[0].pages,
        ["mintlify_context/zeta/A", "mintlify_context/zeta/b", "mintlify_context/zeta/c"]
    );
}

#[test]
fn nested_index_pages_are_excluded() {
    let tab = build_navigation_tab(
        &files(&["vb/Index.md", "vb/Token.md", "INDEX.md"]),
        &NavigationSettings::default(),
    );
    assert!(tab.pages.is_empty());
    assert_eq!(tab.groups.len(), 1);
    assert_eq!(tab.groups[0].pages, ["mintlify_context/vb/Token"]);
}

#[test]
fn non_markdown_paths_are_ignored() {
    let tab = build_navigation_tab(
        &files(&["docs_tab.json", "notes.txt", "Token.MD"]),
        &NavigationSettings::default(),
    );
    assert_eq!(tab, NavigationTab {
        tab: String::from("Contracts"),
        pages: Vec::new(),
        groups: Vec::new(),
    });
}

#[test]
fn settings_drive_labels_and_prefixes() {
    let settings = NavigationSettings {
        tab: String::from("Reference"),
        base_path: String::from("docs/contracts"),
        utilities_group: String::from("misc"),
    };
    let tab = build_navigation_tab(&files(&["Token.md", "index.md"]), &settings);
    assert_eq!(tab.tab, "Reference");
    assert_eq!(tab.pages, ["docs/contracts/index"]);
    assert_eq!(tab.groups, [NavigationGroup {
        group: String::from("misc"),
        pages: vec![String::from("docs/contracts/Token")],
        groups: Vec::new(),
    }]);
}

#[test]
fn empty_input_serializes_to_bare_tab() -> Result<(), Box<dyn std::error::Error>> {
    let tab = build_navigation_tab(&[], &NavigationSettings::default());
    let bytes = navigation_json(&tab)?;
    assert_eq!(String::from_utf8(bytes)?, "{\n  \"tab\": \"Contracts\"\n}");
    Ok(())
}

#[test]
fn serialized_field_order_is_tab_pages_groups() -> Result<(), Box<dyn std::error::Error>> {
    let tab = build_navigation_tab(&files(&["a/B.md", "index.md"]), &NavigationSettings::default());
    let text = String::from_utf8(navigation_json(&tab)?)?;
    let expected = r#"{
  "tab": "Contracts",
  "pages": [
    "mintlify_context/index"
  ],
  "groups": [
    {
      "group": "a",
      "pages": [
        "mintlify_context/a/B"
      ]
    }
  ]
}"#;
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn markdown_extension_is_stripped_case_insensitively() {
    assert_eq!(strip_markdown_extension("Token.md"), "Token");
    assert_eq!(strip_markdown_extension("Token.Md"), "Token");
    assert_eq!(strip_markdown_extension("md"), "md");
    assert_eq!(strip_markdown_extension("Token"), "Token");
}
