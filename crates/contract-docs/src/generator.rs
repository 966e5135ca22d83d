// crates/contract-docs/src/generator.rs
// ============================================================================
// Module: Docs Builder
// Description: Generator for contract documentation artifacts.
// Purpose: Assemble deterministic docs outputs and write them to disk.
// Dependencies: cap-primitives, cap-std, contract-docs-config, std
// ============================================================================

//! ## Overview
//! [`DocsBuilder`] turns normalized descriptors into a [`DocsBundle`] (one page
//! per contract, `index.md`, and `docs_tab.json`) and owns every filesystem
//! side effect of a run: recreating the output directory, writing artifacts,
//! and verifying an existing tree for drift.
//!
//! ## Invariants
//! - Every artifact path is relative, `/`-separated, and free of `..`.
//! - Artifact paths are unique; a clash fails the run before anything is
//!   deleted or written.
//! - The output directory is exclusively owned by the run: it is removed and
//!   recreated, and it may not contain the contract directory input once both
//!   paths are resolved.
//! - Output files are reached through a capability handle without following
//!   symlinks, and each file lands through a temporary sibling and a rename.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use cap_primitives::fs::FollowSymlinks;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use cap_std::fs::OpenOptions;
use contract_docs_config::DocsConfig;

use crate::DocsError;
use crate::descriptor::ContractDescriptor;
use crate::ignore_file::ensure_ignore_entry;
use crate::loader::RegenerateCommand;
use crate::loader::load_contract_directory;
use crate::markdown::render_contract_markdown;
use crate::markdown::render_index_markdown;
use crate::markdown::sanitize_file_name;
use crate::navigation::INDEX_FILE_NAME;
use crate::navigation::NavigationSettings;
use crate::navigation::build_navigation_tab;
use crate::navigation::navigation_json;
use crate::progress::ProgressEvent;
use crate::progress::ProgressReporter;
use crate::types::DocsArtifact;
use crate::types::DocsBundle;
use crate::types::DocsWarning;
use crate::types::GenerationReport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Navigation tab file name.
pub const NAVIGATION_FILE_NAME: &str = "docs_tab.json";

// ============================================================================
// SECTION: Docs Builder
// ============================================================================

/// Builder for contract documentation artifacts.
///
/// # Invariants
/// - All paths come from the wrapped [`DocsConfig`]; nothing is read from the
///   process environment.
#[derive(Debug, Clone)]
pub struct DocsBuilder {
    /// Validated configuration.
    config: DocsConfig,
}

impl DocsBuilder {
    /// Creates a builder from validated configuration.
    #[must_use]
    pub const fn new(config: DocsConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns the builder configuration.
    #[must_use]
    pub const fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// Returns navigation settings derived from configuration.
    #[must_use]
    pub fn navigation_settings(&self) -> NavigationSettings {
        let navigation = &self.config.navigation;
        NavigationSettings {
            tab: navigation.tab.clone(),
            base_path: navigation.base_path.clone(),
            utilities_group: navigation.utilities_group.clone(),
        }
    }

    /// Builds the docs bundle without writing to disk.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError`] when a descriptor maps to an unsafe or duplicate
    /// path, or a page cannot be rendered.
    pub fn build(&self, descriptors: &[ContractDescriptor]) -> Result<DocsBundle, DocsError> {
        let mut pages = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let path = output_path_for(descriptor)?;
            pages.push(DocsArtifact::markdown(path, render_contract_markdown(descriptor)?));
        }
        ensure_unique_paths(&pages)?;

        let index = self.index_artifact();
        let mut written: Vec<String> = pages.iter().map(|page| page.path.clone()).collect();
        written.push(index.path.clone());

        let mut warnings = Vec::new();
        let navigation = match self.navigation_artifact(&written) {
            Ok(artifact) => Some(artifact),
            Err(err) => {
                warnings.push(DocsWarning::Navigation(err.to_string()));
                None
            }
        };
        Ok(DocsBundle {
            pages,
            index,
            navigation,
            warnings,
        })
    }

    /// Writes docs for `descriptors` into `output_dir`, replacing its contents.
    ///
    /// Index and navigation failures are reported as warnings; page failures
    /// abort the run.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError`] when building fails, the output directory cannot
    /// be recreated, or a page cannot be written.
    pub fn write_to(
        &self,
        output_dir: &Path,
        descriptors: &[ContractDescriptor],
        reporter: &mut dyn ProgressReporter,
    ) -> Result<GenerationReport, DocsError> {
        let bundle = self.build(descriptors)?;
        let output = open_output_dir(output_dir, true)?;
        reporter.report(&ProgressEvent::OutputRecreated {
            path: output_dir.to_path_buf(),
        });
        let mut warnings = Vec::new();
        for warning in &bundle.warnings {
            warn(reporter, &mut warnings, warning.clone());
        }

        let mut written = Vec::with_capacity(bundle.pages.len() + 1);
        for page in &bundle.pages {
            write_artifact(&output, page)?;
            reporter.report(&ProgressEvent::PageWritten {
                path: page.path.clone(),
            });
            written.push(page.path.clone());
        }

        let index_written = match write_artifact(&output, &bundle.index) {
            Ok(()) => {
                reporter.report(&ProgressEvent::IndexWritten);
                written.push(bundle.index.path.clone());
                true
            }
            Err(err) => {
                warn(reporter, &mut warnings, DocsWarning::IndexPage(err.to_string()));
                false
            }
        };

        // The bundled tab lists index.md; rebuild it from what was written
        // when the index is missing.
        let navigation = match &bundle.navigation {
            Some(artifact) if index_written => Some(Ok(artifact.clone())),
            Some(_) => Some(self.navigation_artifact(&written)),
            None => None,
        };
        if let Some(navigation) = navigation {
            let written_navigation = navigation
                .and_then(|artifact| write_artifact(&output, &artifact).map(|()| artifact));
            match written_navigation {
                Ok(artifact) => reporter.report(&ProgressEvent::NavigationWritten {
                    path: output_dir.join(artifact.path),
                }),
                Err(err) => warn(reporter, &mut warnings, DocsWarning::Navigation(err.to_string())),
            }
        }

        Ok(GenerationReport {
            pages_written: bundle.pages.len(),
            output_dir: output_dir.to_path_buf(),
            written,
            regenerated_input: false,
            warnings,
        })
    }

    /// Verifies the on-disk docs match what `descriptors` would generate.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError`] when any artifact is missing, differs, or an
    /// unexpected file is present.
    pub fn verify_output(
        &self,
        output_dir: &Path,
        descriptors: &[ContractDescriptor],
    ) -> Result<(), DocsError> {
        let bundle = self.build(descriptors)?;
        let output = open_output_dir(output_dir, false)?;
        let mut expected = BTreeSet::new();
        for artifact in bundle.artifacts() {
            let relative = validate_relative_path(&artifact.path)?;
            let bytes = read_expected_bytes(&output, &relative, artifact.bytes.len())?;
            if bytes != artifact.bytes {
                return Err(DocsError::Generation(format!("artifact mismatch: {}", artifact.path)));
            }
            expected.insert(artifact.path.clone());
        }
        let mut actual = BTreeSet::new();
        collect_files_recursive(&output, Path::new(""), &mut actual)?;
        if let Some(path) = actual.difference(&expected).next() {
            return Err(DocsError::Generation(format!("unexpected artifact: {path}")));
        }
        Ok(())
    }

    /// Runs the full pipeline: ignore file, load (regenerating when missing),
    /// then write.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError`] on any fatal failure; warnings are collected in
    /// the report instead.
    pub fn generate(
        &self,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<GenerationReport, DocsError> {
        reporter.report(&ProgressEvent::Started);
        let mut warnings = Vec::new();
        if self.config.generator.update_ignore_file {
            let path = self.config.ignore_file_path();
            match ensure_ignore_entry(&path, &self.config.generator.ignore_entry) {
                Ok(update) => reporter.report(&ProgressEvent::IgnoreFileChecked {
                    path,
                    updated: update.changed(),
                }),
                Err(err) => warn(reporter, &mut warnings, DocsWarning::IgnoreFile(err.to_string())),
            }
        }

        let (input, output_dir) = self.checked_paths()?;
        let regenerate = RegenerateCommand::from_config(&self.config);
        let loaded = load_contract_directory(&input, regenerate.as_ref(), reporter)?;
        let mut report = self.write_to(&output_dir, &loaded.descriptors, reporter)?;
        report.regenerated_input = loaded.regenerated;
        warnings.append(&mut report.warnings);
        report.warnings = warnings;

        reporter.report(&ProgressEvent::Finished {
            count: report.pages_written,
            output_dir: report.output_dir.clone(),
        });
        Ok(report)
    }

    /// Verifies the output directory against the current contract directory
    /// without regenerating input or touching the ignore file.
    ///
    /// Returns the number of contract pages checked.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError`] when loading fails or the output has drifted.
    pub fn check(&self, reporter: &mut dyn ProgressReporter) -> Result<usize, DocsError> {
        reporter.report(&ProgressEvent::CheckStarted);
        let (input, output_dir) = self.checked_paths()?;
        let loaded = load_contract_directory(&input, None, reporter)?;
        self.verify_output(&output_dir, &loaded.descriptors)?;
        Ok(loaded.descriptors.len())
    }

    /// Returns the input and output paths, rejecting an input inside the
    /// output directory.
    ///
    /// Both sides are resolved first so `..` segments, symlinked ancestors,
    /// and relative spellings cannot hide the overlap.
    fn checked_paths(&self) -> Result<(PathBuf, PathBuf), DocsError> {
        let input = self.config.input_path();
        let output_dir = self.config.output_dir();
        if resolve_path(&input)?.starts_with(resolve_path(&output_dir)?) {
            return Err(DocsError::OutputPath(output_dir));
        }
        Ok((input, output_dir))
    }

    /// Builds the landing page artifact.
    fn index_artifact(&self) -> DocsArtifact {
        let index = &self.config.index;
        DocsArtifact::markdown(
            INDEX_FILE_NAME,
            render_index_markdown(&index.title, &index.description, &index.body),
        )
    }

    /// Builds the navigation artifact from written markdown paths.
    fn navigation_artifact(&self, written: &[String]) -> Result<DocsArtifact, DocsError> {
        let tab = build_navigation_tab(written, &self.navigation_settings());
        Ok(DocsArtifact::json(NAVIGATION_FILE_NAME, navigation_json(&tab)?))
    }
}

/// Records a warning and forwards it to the reporter.
fn warn(reporter: &mut dyn ProgressReporter, warnings: &mut Vec<DocsWarning>, warning: DocsWarning) {
    reporter.report(&ProgressEvent::Warning(warning.clone()));
    warnings.push(warning);
}

// ============================================================================
// SECTION: Output Layout
// ============================================================================

/// Returns the page path for a descriptor, relative to the output directory.
///
/// The relative directory mirrors `relativePath`; the file name is the
/// sanitized `"{name}.md"`.
///
/// # Errors
///
/// Returns [`DocsError::OutputPath`] when `relativePath` is absolute or
/// climbs out of the output directory.
pub fn output_path_for(descriptor: &ContractDescriptor) -> Result<String, DocsError> {
    let mut segments: Vec<String> = Vec::new();
    if let Some(relative) = descriptor.relative_path.as_deref() {
        if is_anchored(relative) {
            return Err(DocsError::OutputPath(PathBuf::from(relative)));
        }
        for segment in relative.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                other if other == ".." || is_anchored(other) => {
                    return Err(DocsError::OutputPath(PathBuf::from(relative)));
                }
                other => segments.push(other.to_string()),
            }
        }
    }
    segments.push(sanitize_file_name(&format!("{}.md", descriptor.name_text())));
    Ok(segments.join("/"))
}

/// Returns true for rooted paths and drive-letter prefixes.
fn is_anchored(path: &str) -> bool {
    let bytes = path.as_bytes();
    let drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    drive || path.starts_with(['/', '\\'])
}

/// Ensures artifact paths are unique and do not shadow `index.md`.
fn ensure_unique_paths(pages: &[DocsArtifact]) -> Result<(), DocsError> {
    let mut seen = BTreeSet::from([INDEX_FILE_NAME]);
    for page in pages {
        if !seen.insert(page.path.as_str()) {
            return Err(DocsError::Generation(format!("duplicate output path: {}", page.path)));
        }
    }
    Ok(())
}

/// Validates that the artifact path is relative and safe.
fn validate_relative_path(path: &str) -> Result<PathBuf, DocsError> {
    if path.trim().is_empty() {
        return Err(DocsError::Generation(String::from("artifact path is empty")));
    }
    let mut relative = PathBuf::new();
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." || is_anchored(segment) {
            return Err(DocsError::Generation(format!(
                "artifact path contains invalid component: {path}"
            )));
        }
        relative.push(segment);
    }
    Ok(relative)
}

// ============================================================================
// SECTION: Filesystem
// ============================================================================

/// Resolves `path` to an absolute path with `..` and symlinks removed.
///
/// Existing prefixes are canonicalized one component at a time; components
/// that do not exist yet are appended as written. A `..` after a canonical
/// prefix is a plain parent step.
///
/// # Errors
///
/// Returns [`DocsError::Io`] when the working directory cannot be read.
pub fn resolve_path(path: &Path) -> Result<PathBuf, DocsError> {
    let absolute = absolute_path(path)?;
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if let Ok(real) = fs::canonicalize(&resolved) {
                    resolved = real;
                }
            }
        }
    }
    Ok(resolved)
}

/// Joins a relative path onto the working directory.
fn absolute_path(path: &Path) -> Result<PathBuf, DocsError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir().map(|cwd| cwd.join(path)).map_err(|err| DocsError::Io(err.to_string()))
}

/// Opens the output directory as a capability handle.
///
/// The parent is resolved and walked without following symlinks. With
/// `recreate`, missing parents are created and the directory itself is
/// removed and created empty; a symlink or file in its place is rejected.
///
/// # Errors
///
/// Returns [`DocsError::OutputPath`] when the path is unsafe or missing, and
/// [`DocsError::Io`] when removal or creation fails.
fn open_output_dir(output_dir: &Path, recreate: bool) -> Result<Dir, DocsError> {
    let Some(name) = output_dir.file_name() else {
        return Err(DocsError::OutputPath(output_dir.to_path_buf()));
    };
    let name = Path::new(name);
    let parent_path = resolve_path(output_dir.parent().unwrap_or_else(|| Path::new("")))?;
    let (anchor, components) = split_anchor_and_components(&parent_path)?;
    let mut parent = Dir::open_ambient_dir(&anchor, ambient_authority())
        .map_err(|err| DocsError::Io(err.to_string()))?;
    for component in components {
        parent = open_or_create_child_dir_nofollow(&parent, Path::new(&component), recreate)
            .map_err(|err| map_open_error(&err, output_dir))?;
    }
    if recreate {
        match parent.symlink_metadata(name) {
            Ok(metadata) if metadata.is_dir() => {
                parent.remove_dir_all(name).map_err(|err| DocsError::Io(err.to_string()))?;
            }
            Ok(_) => return Err(DocsError::OutputPath(output_dir.to_path_buf())),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(DocsError::Io(err.to_string())),
        }
        parent.create_dir(name).map_err(|err| DocsError::Io(err.to_string()))?;
    }
    open_child_dir_nofollow(&parent, name).map_err(|err| map_open_error(&err, output_dir))
}

/// Splits an absolute path into an anchor root and normal child components.
fn split_anchor_and_components(path: &Path) -> Result<(PathBuf, Vec<OsString>), DocsError> {
    let mut anchor = PathBuf::new();
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component.as_os_str()),
            Component::CurDir => {}
            Component::Normal(value) => components.push(value.to_os_string()),
            Component::ParentDir => return Err(DocsError::OutputPath(path.to_path_buf())),
        }
    }
    if anchor.as_os_str().is_empty() {
        return Err(DocsError::OutputPath(path.to_path_buf()));
    }
    Ok((anchor, components))
}

/// Opens a child directory without following symlinks.
fn open_child_dir_nofollow(parent: &Dir, child: &Path) -> std::io::Result<Dir> {
    let mut options = OpenOptions::new();
    options.read(true);
    options._cap_fs_ext_follow(FollowSymlinks::No);
    let file = parent.open_with(child, &options)?;
    if !file.metadata()?.is_dir() {
        return Err(std::io::Error::new(
            ErrorKind::InvalidInput,
            "path component is not a directory",
        ));
    }
    Ok(Dir::from_std_file(file.into_std()))
}

/// Opens or creates a child directory without following symlinks.
fn open_or_create_child_dir_nofollow(
    parent: &Dir,
    child: &Path,
    create_missing: bool,
) -> std::io::Result<Dir> {
    match open_child_dir_nofollow(parent, child) {
        Ok(dir) => Ok(dir),
        Err(err) if err.kind() == ErrorKind::NotFound && create_missing => {
            parent.create_dir(child)?;
            open_child_dir_nofollow(parent, child)
        }
        Err(err) => Err(err),
    }
}

/// Maps low-level open errors into output path errors.
fn map_open_error(err: &std::io::Error, path: &Path) -> DocsError {
    if matches!(
        err.kind(),
        ErrorKind::NotFound
            | ErrorKind::InvalidInput
            | ErrorKind::PermissionDenied
            | ErrorKind::NotADirectory
            | ErrorKind::Unsupported
    ) {
        return DocsError::OutputPath(path.to_path_buf());
    }
    // ELOOP: a symlink where a directory or file was expected.
    #[cfg(unix)]
    if err.raw_os_error() == Some(40) {
        return DocsError::OutputPath(path.to_path_buf());
    }
    #[cfg(windows)]
    if matches!(err.raw_os_error(), Some(681 | 1920)) {
        return DocsError::OutputPath(path.to_path_buf());
    }
    DocsError::Io(err.to_string())
}

/// Writes an artifact under the output directory, creating parent folders.
fn write_artifact(output: &Dir, artifact: &DocsArtifact) -> Result<(), DocsError> {
    let relative = validate_relative_path(&artifact.path)?;
    let (parent, file_name, file_path) = open_parent_dir(output, &relative, true)?;
    write_file_atomic(&parent, Path::new(&file_name), &file_path, &artifact.bytes)
}

/// Opens the parent directory of a relative artifact path.
fn open_parent_dir(
    output: &Dir,
    relative: &Path,
    create_missing: bool,
) -> Result<(Dir, OsString, PathBuf), DocsError> {
    let mut current = output.try_clone().map_err(|err| DocsError::Io(err.to_string()))?;
    let mut components = relative.components().peekable();
    while let Some(component) = components.next() {
        let Component::Normal(name) = component else {
            return Err(DocsError::OutputPath(relative.to_path_buf()));
        };
        if components.peek().is_none() {
            return Ok((current, name.to_os_string(), relative.to_path_buf()));
        }
        current = open_or_create_child_dir_nofollow(&current, Path::new(name), create_missing)
            .map_err(|err| map_open_error(&err, relative))?;
    }
    Err(DocsError::OutputPath(relative.to_path_buf()))
}

/// Writes file bytes through a temporary sibling and an atomic rename.
fn write_file_atomic(
    parent: &Dir,
    file_name: &Path,
    file_path: &Path,
    bytes: &[u8],
) -> Result<(), DocsError> {
    for attempt in 0 .. 64_u32 {
        let temp_name = temp_file_name(file_name, attempt);
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        options._cap_fs_ext_follow(FollowSymlinks::No);
        match parent.open_with(&temp_name, &options) {
            Ok(mut temp_file) => {
                let written = temp_file
                    .write_all(bytes)
                    .and_then(|()| temp_file.sync_all())
                    .and_then(|()| parent.rename(&temp_name, parent, file_name));
                if let Err(err) = written {
                    let _ = parent.remove_file(&temp_name);
                    return Err(DocsError::Io(format!("{}: {err}", file_path.display())));
                }
                return Ok(());
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(map_open_error(&err, file_path)),
        }
    }
    Err(DocsError::Generation(String::from("unable to allocate temporary output file")))
}

/// Builds a deterministic temporary file name for atomic writes.
fn temp_file_name(file_name: &Path, attempt: u32) -> PathBuf {
    let mut temp = OsString::from(".tmp-");
    temp.push(file_name.as_os_str());
    temp.push(format!(".{}.{attempt}", std::process::id()));
    PathBuf::from(temp)
}

/// Reads a file and verifies its length matches the expected size.
fn read_expected_bytes(
    output: &Dir,
    relative: &Path,
    expected_len: usize,
) -> Result<Vec<u8>, DocsError> {
    let (parent, file_name, file_path) = open_parent_dir(output, relative, false)?;
    let mut options = OpenOptions::new();
    options.read(true);
    options._cap_fs_ext_follow(FollowSymlinks::No);
    let mut file =
        parent.open_with(Path::new(&file_name), &options).map_err(|err| match err.kind() {
            ErrorKind::NotFound => {
                DocsError::Generation(format!("missing artifact: {}", relative.display()))
            }
            _ => map_open_error(&err, &file_path),
        })?;
    let metadata = file.metadata().map_err(|err| DocsError::Io(err.to_string()))?;
    if !metadata.is_file() {
        return Err(DocsError::OutputPath(file_path));
    }
    let expected_len = u64::try_from(expected_len).map_err(|_| {
        DocsError::Generation(String::from("expected length exceeds addressable size"))
    })?;
    if metadata.len() != expected_len {
        return Err(DocsError::Generation(format!(
            "artifact size mismatch: {}",
            relative.display()
        )));
    }
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|err| DocsError::Io(err.to_string()))?;
    Ok(bytes)
}

/// Recursively collects file paths relative to the output directory.
fn collect_files_recursive(
    current: &Dir,
    prefix: &Path,
    files: &mut BTreeSet<String>,
) -> Result<(), DocsError> {
    let entries = current.entries().map_err(|err| DocsError::Io(err.to_string()))?;
    for entry in entries {
        let entry = entry.map_err(|err| DocsError::Io(err.to_string()))?;
        let relative = prefix.join(entry.file_name());
        let file_type = entry.file_type().map_err(|err| DocsError::Io(err.to_string()))?;
        if file_type.is_symlink() {
            return Err(DocsError::OutputPath(relative));
        }
        if file_type.is_dir() {
            let directory = entry.open_dir().map_err(|err| DocsError::Io(err.to_string()))?;
            collect_files_recursive(&directory, &relative, files)?;
        } else if file_type.is_file() {
            let text = relative.to_str().ok_or_else(|| DocsError::OutputPath(relative.clone()))?;
            files.insert(text.replace('\\', "/"));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
