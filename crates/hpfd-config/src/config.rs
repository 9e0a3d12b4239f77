// crates/hpfd-config/src/config.rs
// ============================================================================
// Module: Health Plan Form Data Configuration
// Description: Configuration loading and validation for the offline tools.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: hpfd-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then the `HPFD_CONFIG` environment
//! variable, then `hpfd.toml` in the working directory. Only the implicit
//! default file may be absent; an explicit path that cannot be read fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use hpfd_core::MAX_DOCUMENT_BYTES;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "hpfd.toml";
/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "HPFD_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of one path component.
pub const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a file extension.
pub const MAX_EXTENSION_LENGTH: usize = 16;

/// Default corpus directory.
const DEFAULT_CORPUS_DIR: &str = "corpus";
/// Default ledger file name.
const DEFAULT_LEDGER_FILE: &str = "migration-ledger.json";
/// Default extension of stored documents.
const DEFAULT_DOCUMENT_EXTENSION: &str = "pb";
/// Default fixture directory.
const DEFAULT_FIXTURE_DIR: &str = "fixtures";

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpfdConfig {
    /// Offline corpus migration settings.
    #[serde(default)]
    pub migrator: MigratorConfig,
    /// Fixture regression settings.
    #[serde(default)]
    pub fixtures: FixturesConfig,
}

impl HpfdConfig {
    /// Loads configuration from disk using the standard resolution order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text cannot be parsed or validated.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any section is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.migrator.validate()?;
        self.fixtures.validate()
    }
}

/// Offline corpus migration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigratorConfig {
    /// Directory holding stored documents.
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: String,
    /// Ledger file; relative paths resolve inside the corpus directory.
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
    /// Extension of stored documents, without the dot.
    #[serde(default = "default_document_extension")]
    pub file_extension: String,
    /// Largest document file the migrator will read.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self {
            corpus_dir: default_corpus_dir(),
            ledger_file: default_ledger_file(),
            file_extension: default_document_extension(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl MigratorConfig {
    /// Validates migrator configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("migrator.corpus_dir", &self.corpus_dir)?;
        validate_path_string("migrator.ledger_file", &self.ledger_file)?;
        validate_extension("migrator.file_extension", &self.file_extension)?;
        if self.max_file_bytes == 0 || self.max_file_bytes > MAX_DOCUMENT_BYTES {
            return Err(ConfigError::Invalid("migrator.max_file_bytes out of range".to_string()));
        }
        Ok(())
    }

    /// Returns the configured corpus directory.
    #[must_use]
    pub fn corpus_path(&self) -> PathBuf {
        PathBuf::from(self.corpus_dir.trim())
    }

    /// Returns the ledger path for a corpus directory.
    #[must_use]
    pub fn ledger_path(&self, corpus_dir: &Path) -> PathBuf {
        let ledger = Path::new(self.ledger_file.trim());
        if ledger.is_absolute() { ledger.to_path_buf() } else { corpus_dir.join(ledger) }
    }
}

/// Fixture regression settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixturesConfig {
    /// Directory holding dated fixture files.
    #[serde(default = "default_fixture_dir")]
    pub dir: String,
    /// Extension of fixture files, without the dot.
    #[serde(default = "default_document_extension")]
    pub file_extension: String,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            dir: default_fixture_dir(),
            file_extension: default_document_extension(),
        }
    }
}

impl FixturesConfig {
    /// Validates fixture configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("fixtures.dir", &self.dir)?;
        validate_extension("fixtures.file_extension", &self.file_extension)
    }

    /// Returns the configured fixture directory.
    #[must_use]
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(self.dir.trim())
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

/// Resolves the config path; the flag reports whether it was explicit.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
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
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a bare file extension.
fn validate_extension(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.len() > MAX_EXTENSION_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} length out of range")));
    }
    if !value.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return Err(ConfigError::Invalid(format!("{field} must be ascii alphanumeric")));
    }
    Ok(())
}

/// Default corpus directory.
fn default_corpus_dir() -> String {
    DEFAULT_CORPUS_DIR.to_string()
}

/// Default ledger file.
fn default_ledger_file() -> String {
    DEFAULT_LEDGER_FILE.to_string()
}

/// Default document extension.
fn default_document_extension() -> String {
    DEFAULT_DOCUMENT_EXTENSION.to_string()
}

/// Default per-file size limit.
const fn default_max_file_bytes() -> usize {
    MAX_DOCUMENT_BYTES
}

/// Default fixture directory.
fn default_fixture_dir() -> String {
    DEFAULT_FIXTURE_DIR.to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_rejects_dots_and_separators() {
        assert!(validate_extension("x", "pb").is_ok());
        assert!(validate_extension("x", ".pb").is_err());
        assert!(validate_extension("x", "a/b").is_err());
        assert!(validate_extension("x", "").is_err());
    }

    #[test]
    fn path_string_rejects_whitespace_only() {
        assert!(validate_path_string("x", "   ").is_err());
        assert!(validate_path_string("x", "./corpus").is_ok());
    }
}
