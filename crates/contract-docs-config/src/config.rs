// crates/contract-docs-config/src/config.rs
// ============================================================================
// Module: Contract Docs Configuration
// Description: Configuration loading and validation for the docs generator.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Resolution order is CLI flag, then `CONTRACT_DOCS_CONFIG`, then
//! `contract-docs.toml` in the working directory. Only the implicit default
//! file may be absent; in that case the built-in defaults apply, which match
//! the historical layout (`utils/contractdir.json` in, `mintlify_context/`
//! out).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "contract-docs.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "CONTRACT_DOCS_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of arguments in the regeneration command.
pub(crate) const MAX_REGENERATE_ARGS: usize = 64;
/// Maximum length of a navigation or index label.
pub(crate) const MAX_LABEL_LENGTH: usize = 512;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Contract docs generator configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Generator behavior.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Navigation tab settings.
    #[serde(default)]
    pub navigation: NavigationConfig,
    /// Landing page content.
    #[serde(default)]
    pub index: IndexPageConfig,
    /// Path the configuration was read from (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl DocsConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved.path)?;
        if !resolved.explicit && !resolved.path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved.path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml_str(content)?;
        config.source = Some(resolved.path);
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paths.validate()?;
        self.generator.validate()?;
        self.navigation.validate()?;
        self.index.validate()?;
        Ok(())
    }

    /// Returns the contract directory JSON path resolved against the root.
    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        self.paths.resolve(&self.paths.input)
    }

    /// Returns the output directory resolved against the root.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.paths.resolve(&self.paths.output)
    }

    /// Returns the ignore-list file path resolved against the root.
    #[must_use]
    pub fn ignore_file_path(&self) -> PathBuf {
        self.paths.resolve(&self.paths.ignore_file)
    }

    /// Returns the project root directory.
    #[must_use]
    pub fn root_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.root)
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Project root; relative paths below resolve against it.
    #[serde(default = "default_root")]
    pub root: String,
    /// Contract directory JSON file.
    #[serde(default = "default_input")]
    pub input: String,
    /// Output directory, destroyed and recreated on every run.
    #[serde(default = "default_output")]
    pub output: String,
    /// Ignore-list file that must exclude the output directory.
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            input: default_input(),
            output: default_output(),
            ignore_file: default_ignore_file(),
        }
    }
}

impl PathsConfig {
    /// Validates path configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("paths.root", &self.root)?;
        validate_path_string("paths.input", &self.input)?;
        validate_path_string("paths.output", &self.output)?;
        validate_path_string("paths.ignore_file", &self.ignore_file)?;
        validate_output_dir(&self.output)?;
        Ok(())
    }

    /// Resolves a configured path against the project root.
    fn resolve(&self, value: &str) -> PathBuf {
        let candidate = Path::new(value.trim());
        if candidate.is_absolute() {
            return candidate.to_path_buf();
        }
        Path::new(self.root.trim()).join(candidate)
    }
}

/// Generator behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Command (program followed by arguments) that writes the contract
    /// directory when it is missing. Empty disables regeneration.
    #[serde(default = "default_regenerate_command")]
    pub regenerate_command: Vec<String>,
    /// Whether to maintain the ignore-list entry for the output directory.
    #[serde(default = "default_update_ignore_file")]
    pub update_ignore_file: bool,
    /// Ignore-list line that excludes the output directory.
    #[serde(default = "default_ignore_entry")]
    pub ignore_entry: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            regenerate_command: default_regenerate_command(),
            update_ignore_file: default_update_ignore_file(),
            ignore_entry: default_ignore_entry(),
        }
    }
}

impl GeneratorConfig {
    /// Validates generator configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.regenerate_command.len() > MAX_REGENERATE_ARGS {
            return Err(ConfigError::Invalid(
                "generator.regenerate_command has too many arguments".to_string(),
            ));
        }
        if let Some(program) = self.regenerate_command.first()
            && program.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "generator.regenerate_command program must be non-empty".to_string(),
            ));
        }
        if self.update_ignore_file {
            validate_label("generator.ignore_entry", &self.ignore_entry)?;
            if self.ignore_entry.contains(['\n', '\r']) {
                return Err(ConfigError::Invalid(
                    "generator.ignore_entry must be a single line".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Navigation tab settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationConfig {
    /// Tab label written to `docs_tab.json`.
    #[serde(default = "default_nav_tab")]
    pub tab: String,
    /// Path prefix used for every page identifier.
    #[serde(default = "default_nav_base_path")]
    pub base_path: String,
    /// Group that collects pages written at the output root.
    #[serde(default = "default_utilities_group")]
    pub utilities_group: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            tab: default_nav_tab(),
            base_path: default_nav_base_path(),
            utilities_group: default_utilities_group(),
        }
    }
}

impl NavigationConfig {
    /// Validates navigation configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_label("navigation.tab", &self.tab)?;
        validate_label("navigation.base_path", &self.base_path)?;
        validate_label("navigation.utilities_group", &self.utilities_group)?;
        if self.base_path.starts_with('/') || self.base_path.ends_with('/') {
            return Err(ConfigError::Invalid(
                "navigation.base_path must not start or end with '/'".to_string(),
            ));
        }
        Ok(())
    }
}

/// Landing page content.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexPageConfig {
    /// Frontmatter title.
    #[serde(default = "default_index_title")]
    pub title: String,
    /// Frontmatter description.
    #[serde(default = "default_index_description")]
    pub description: String,
    /// Body text.
    #[serde(default = "default_index_body")]
    pub body: String,
}

impl Default for IndexPageConfig {
    fn default() -> Self {
        Self {
            title: default_index_title(),
            description: default_index_description(),
            body: default_index_body(),
        }
    }
}

impl IndexPageConfig {
    /// Validates landing page configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_label("index.title", &self.title)?;
        validate_label("index.description", &self.description)?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Config path resolved from CLI or environment defaults.
struct ResolvedPath {
    /// Candidate config file path.
    path: PathBuf,
    /// True when the path was requested explicitly and must exist.
    explicit: bool,
}

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<ResolvedPath, ConfigError> {
    if let Some(path) = path {
        return Ok(ResolvedPath {
            path: path.to_path_buf(),
            explicit: true,
        });
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ResolvedPath {
            path: PathBuf::from(env_path),
            explicit: true,
        });
    }
    Ok(ResolvedPath {
        path: PathBuf::from(DEFAULT_CONFIG_NAME),
        explicit: false,
    })
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Rejects output directories that would delete the project root or escape it.
fn validate_output_dir(value: &str) -> Result<(), ConfigError> {
    let path = Path::new(value.trim());
    let mut named = 0_usize;
    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(ConfigError::Invalid(
                    "paths.output must not contain '..' components".to_string(),
                ));
            }
            Component::Normal(_) => named += 1,
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    if named == 0 {
        return Err(ConfigError::Invalid(
            "paths.output must name a directory below the root".to_string(),
        ));
    }
    Ok(())
}

/// Validates a single-line display label.
fn validate_label(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_LABEL_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default project root.
fn default_root() -> String {
    ".".to_string()
}

/// Default contract directory location.
fn default_input() -> String {
    "utils/contractdir.json".to_string()
}

/// Default output directory.
fn default_output() -> String {
    "mintlify_context".to_string()
}

/// Default ignore-list file.
fn default_ignore_file() -> String {
    ".gitignore".to_string()
}

/// Default contract directory regeneration command.
fn default_regenerate_command() -> Vec<String> {
    vec!["node".to_string(), "scripts/generate_contract_dir.js".to_string()]
}

/// Default to maintaining the ignore-list entry.
const fn default_update_ignore_file() -> bool {
    true
}

/// Default ignore-list entry.
fn default_ignore_entry() -> String {
    "mintlify_context/".to_string()
}

/// Default navigation tab label.
fn default_nav_tab() -> String {
    "Contracts".to_string()
}

/// Default navigation page prefix.
fn default_nav_base_path() -> String {
    "mintlify_context".to_string()
}

/// Default group for root-level pages.
fn default_utilities_group() -> String {
    "utilities".to_string()
}

/// Default landing page title.
fn default_index_title() -> String {
    "Contract Index".to_string()
}

/// Default landing page description.
fn default_index_description() -> String {
    "Index of generated contract docs".to_string()
}

/// Default landing page body.
fn default_index_body() -> String {
    "Generated contract documentation for Mintlify RAG.".to_string()
}
