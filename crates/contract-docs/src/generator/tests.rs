// crates/contract-docs/src/generator/tests.rs
// ============================================================================
// Module: Docs Builder Unit Tests
// Description: Unit coverage for output layout and write safety checks.
// Purpose: Ensure unsafe layouts fail closed before the output is touched.
// Dependencies: contract-docs, tempfile, serde_json, std
// ============================================================================

//! ## Overview
//! Tests path mapping, duplicate rejection, output directory recreation, and
//! drift detection in [`DocsBuilder::verify_output`].

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Test functions are named for the behavior they cover."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;

use contract_docs_config::DocsConfig;
use serde_json::Value;
use serde_json::json;

use crate::DocsBuilder;
use crate::DocsError;
use crate::descriptor::ContractDescriptor;
use crate::generator::output_path_for;
use crate::generator::resolve_path;
use crate::progress::ProgressEvent;
use crate::progress::SilentReporter;

/// Normalizes a list of JSON entries.
fn descriptors(values: &[Value]) -> Result<Vec<ContractDescriptor>, String> {
    values.iter().map(ContractDescriptor::from_value).collect()
}

/// Creates a symlink to a directory target.
#[cfg(unix)]
fn create_dir_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Creates a symlink to a directory target.
#[cfg(windows)]
fn create_dir_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Creates a symlink to a file target.
#[cfg(unix)]
fn create_file_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Creates a symlink to a file target.
#[cfg(windows)]
fn create_file_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Lists every entry name under `root`, recursively.
fn entry_names(root: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                pending.push(entry.path());
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Returns true when symlink creation failures should be treated as skip.
fn symlink_error_is_skip(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::PermissionDenied | io::ErrorKind::Unsupported)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn output_path_mirrors_relative_path() -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = ContractDescriptor::from_value(&json!({
        "name": "Ivb ETH",
        "relativePath": "./vb\\tokens/"
    }))?;
    if output_path_for(&descriptor)? != "vb/tokens/Ivb_ETH.md" {
        return Err("unexpected output path".into());
    }
    let missing = ContractDescriptor::from_value(&json!({}))?;
    if output_path_for(&missing)? != "undefined.md" {
        return Err("expected undefined.md for a missing name".into());
    }
    Ok(())
}

#[test]
fn escaping_relative_paths_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    for relative in ["../outside", "vb/../../x", "/etc", "\\share", "C:/tmp", "vb/D:x"] {
        let descriptor =
            ContractDescriptor::from_value(&json!({ "name": "A", "relativePath": relative }))?;
        if !matches!(output_path_for(&descriptor), Err(DocsError::OutputPath(_))) {
            return Err(format!("expected {relative} to be rejected").into());
        }
    }
    Ok(())
}

#[test]
fn duplicate_paths_fail_before_output_is_touched() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    fs::create_dir(&output_dir)?;
    fs::write(output_dir.join("keep.md"), "previous run")?;

    let builder = DocsBuilder::new(DocsConfig::default());
    let entries = descriptors(&[json!({ "name": "A B" }), json!({ "name": "A_B" })])?;
    let Err(err) = builder.write_to(&output_dir, &entries, &mut SilentReporter) else {
        return Err("expected duplicate paths to be rejected".into());
    };
    if !matches!(err, DocsError::Generation(_)) {
        return Err("expected generation error".into());
    }
    if !output_dir.join("keep.md").exists() {
        return Err("output was modified before validation".into());
    }
    Ok(())
}

#[test]
fn root_index_descriptor_collides_with_landing_page() -> Result<(), Box<dyn std::error::Error>> {
    let builder = DocsBuilder::new(DocsConfig::default());
    let entries = descriptors(&[json!({ "name": "index" })])?;
    if builder.build(&entries).is_ok() {
        return Err("expected index.md collision to be rejected".into());
    }
    Ok(())
}

#[test]
fn write_replaces_stale_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    fs::create_dir_all(output_dir.join("stale"))?;
    fs::write(output_dir.join("stale/Old.md"), "old")?;

    let builder = DocsBuilder::new(DocsConfig::default());
    let entries = descriptors(&[json!({ "name": "Vault", "relativePath": "core" })])?;
    let mut events: Vec<ProgressEvent> = Vec::new();
    let report = builder.write_to(&output_dir, &entries, &mut events)?;

    if output_dir.join("stale").exists() {
        return Err("stale output survived".into());
    }
    if report.written != ["core/Vault.md", "index.md"] || report.pages_written != 1 {
        return Err("unexpected written list".into());
    }
    if !report.warnings.is_empty() {
        return Err("unexpected warnings".into());
    }
    let navigation: Value = serde_json::from_slice(&fs::read(output_dir.join("docs_tab.json"))?)?;
    if navigation["groups"][0]["pages"][0] != "mintlify_context/core/Vault" {
        return Err("navigation does not list the page".into());
    }
    if !events.contains(&ProgressEvent::IndexWritten) {
        return Err("expected index event".into());
    }
    Ok(())
}

#[test]
fn file_at_output_path_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    fs::write(&output_dir, "not a directory")?;
    let builder = DocsBuilder::new(DocsConfig::default());
    let result = builder.write_to(&output_dir, &[], &mut SilentReporter);
    if !matches!(result, Err(DocsError::OutputPath(_))) {
        return Err("expected output path error".into());
    }
    Ok(())
}

#[test]
fn symlinked_output_dir_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let target = temp.path().join("target");
    fs::create_dir(&target)?;
    fs::write(target.join("precious.txt"), "keep")?;
    let output_dir = temp.path().join("out");
    if let Err(err) = create_dir_symlink(&target, &output_dir) {
        if symlink_error_is_skip(&err) {
            return Ok(());
        }
        return Err(err.into());
    }
    let builder = DocsBuilder::new(DocsConfig::default());
    let result = builder.write_to(&output_dir, &[], &mut SilentReporter);
    if !matches!(result, Err(DocsError::OutputPath(_))) {
        return Err("expected symlinked output dir to be rejected".into());
    }
    if !target.join("precious.txt").exists() {
        return Err("symlink target was modified".into());
    }
    Ok(())
}

#[test]
fn verify_output_detects_drift() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    let builder = DocsBuilder::new(DocsConfig::default());
    let entries = descriptors(&[json!({ "name": "Vault", "abi": [] })])?;
    builder.write_to(&output_dir, &entries, &mut SilentReporter)?;
    builder.verify_output(&output_dir, &entries)?;

    fs::write(output_dir.join("extra.md"), "extra")?;
    let Err(err) = builder.verify_output(&output_dir, &entries) else {
        return Err("expected unexpected file to be rejected".into());
    };
    if !matches!(err, DocsError::Generation(_)) {
        return Err("expected generation error for extra file".into());
    }
    fs::remove_file(output_dir.join("extra.md"))?;

    let page = output_dir.join("Vault.md");
    let mut bytes = fs::read(&page)?;
    bytes.extend_from_slice(b"extra");
    fs::write(&page, &bytes)?;
    if builder.verify_output(&output_dir, &entries).is_ok() {
        return Err("expected size mismatch to be rejected".into());
    }
    Ok(())
}

#[test]
fn verify_output_requires_existing_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let builder = DocsBuilder::new(DocsConfig::default());
    let result = builder.verify_output(&temp.path().join("missing"), &[]);
    if !matches!(result, Err(DocsError::OutputPath(_))) {
        return Err("expected missing output dir to be rejected".into());
    }
    Ok(())
}

#[test]
fn write_creates_parents_without_temp_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("site/docs/out");
    let builder = DocsBuilder::new(DocsConfig::default());
    let entries = descriptors(&[json!({ "name": "Vault", "relativePath": "core/vaults" })])?;
    builder.write_to(&output_dir, &entries, &mut SilentReporter)?;

    if fs::read_to_string(output_dir.join("core/vaults/Vault.md"))?.is_empty() {
        return Err("page was not written".into());
    }
    let names = entry_names(&output_dir)?;
    if names.iter().any(|name| name.starts_with(".tmp-")) {
        return Err("temporary file left behind".into());
    }
    builder.verify_output(&output_dir, &entries)?;
    Ok(())
}

#[test]
fn verify_output_rejects_symlinked_page() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    let builder = DocsBuilder::new(DocsConfig::default());
    let entries = descriptors(&[json!({ "name": "Vault" })])?;
    builder.write_to(&output_dir, &entries, &mut SilentReporter)?;

    let page = output_dir.join("Vault.md");
    let replacement = temp.path().join("replacement.md");
    fs::copy(&page, &replacement)?;
    fs::remove_file(&page)?;
    if let Err(err) = create_file_symlink(&replacement, &page) {
        if symlink_error_is_skip(&err) {
            return Ok(());
        }
        return Err(err.into());
    }
    let result = builder.verify_output(&output_dir, &entries);
    if !matches!(result, Err(DocsError::OutputPath(_))) {
        return Err("expected symlinked page to be rejected".into());
    }
    Ok(())
}

#[test]
fn verify_output_rejects_symlinked_page_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    let builder = DocsBuilder::new(DocsConfig::default());
    let entries = descriptors(&[json!({ "name": "Vault", "relativePath": "core" })])?;
    builder.write_to(&output_dir, &entries, &mut SilentReporter)?;

    let elsewhere = temp.path().join("elsewhere");
    fs::rename(output_dir.join("core"), &elsewhere)?;
    if let Err(err) = create_dir_symlink(&elsewhere, &output_dir.join("core")) {
        if symlink_error_is_skip(&err) {
            return Ok(());
        }
        return Err(err.into());
    }
    let result = builder.verify_output(&output_dir, &entries);
    if !matches!(result, Err(DocsError::OutputPath(_))) {
        return Err("expected symlinked page directory to be rejected".into());
    }
    Ok(())
}

#[test]
fn resolve_path_removes_parent_segments() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    fs::create_dir_all(temp.path().join("sub"))?;
    fs::create_dir_all(temp.path().join("utils"))?;
    let direct = resolve_path(&temp.path().join("utils/contractdir.json"))?;
    let via_existing = resolve_path(&temp.path().join("sub/../utils/contractdir.json"))?;
    let via_missing = resolve_path(&temp.path().join("missing/../utils/contractdir.json"))?;
    if via_existing != direct || via_missing != direct {
        return Err("parent segments were not resolved".into());
    }
    if !direct.starts_with(resolve_path(&temp.path().join("utils"))?) {
        return Err("resolved input is not under the resolved directory".into());
    }
    Ok(())
}

#[test]
fn written_navigation_is_the_bundled_tab() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output_dir = temp.path().join("out");
    let builder = DocsBuilder::new(DocsConfig::default());
    let entries = descriptors(&[json!({ "name": "Vault", "relativePath": "core" })])?;
    let bundle = builder.build(&entries)?;
    let navigation = bundle.navigation.ok_or("expected a navigation artifact")?;
    if !bundle.warnings.is_empty() {
        return Err("unexpected build warnings".into());
    }

    builder.write_to(&output_dir, &entries, &mut SilentReporter)?;
    if fs::read(output_dir.join(&navigation.path))? != navigation.bytes {
        return Err("written tab differs from the bundled tab".into());
    }
    Ok(())
}
