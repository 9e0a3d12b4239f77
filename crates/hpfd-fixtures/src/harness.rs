// crates/hpfd-fixtures/src/harness.rs
// ============================================================================
// Module: Fixture Regression Harness
// Description: Dated fixture files compared against freshly encoded mocks.
// Purpose: Fail loudly when the wire encoding of a mock changes.
// Dependencies: hpfd-core, hpfd-config, hpfd-migrator, serde, time
// ============================================================================

//! ## Overview
//! Fixture files are named `{mock}-{YYYY-MM-DD}.{ext}`. The newest date per
//! mock is the current expectation. [`FixtureHarness::check`] re-encodes
//! each mock and compares bytes; a mismatch or a missing fixture writes a new
//! file dated `today` and marks the report as drifted, so the next commit
//! carries the new expectation alongside the code change that caused it.
//! [`FixtureHarness::verify_history`] proves every stored fixture, of every
//! date, still loads through decode, migrate, and map.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use hpfd_config::FixturesConfig;
use hpfd_core::ContentDigest;
use hpfd_core::FormDataError;
use hpfd_core::ISO_DATE_FORMAT;
use hpfd_core::MAX_DOCUMENT_BYTES;
use hpfd_core::hash_bytes;
use hpfd_core::to_domain_traced;
use hpfd_core::to_proto_buffer;
use hpfd_migrator::ReadLimitError;
use hpfd_migrator::read_bytes_with_limit;
use hpfd_migrator::write_atomic;
use serde::Serialize;
use thiserror::Error;
use time::Date;

use crate::mocks::MockDocument;
use crate::mocks::canonical_mocks;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Length of a formatted fixture date.
const FIXTURE_DATE_LEN: usize = 10;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fixture harness errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture directory or file I/O failed.
    #[error("fixture io error at {path}: {message}")]
    Io {
        /// Path involved.
        path: String,
        /// Underlying error.
        message: String,
    },
    /// A stored fixture no longer loads.
    #[error("fixture {path} no longer loads: {source}")]
    Document {
        /// Path of the fixture.
        path: String,
        /// Core failure.
        source: FormDataError,
    },
    /// A date could not be formatted into a file name.
    #[error("fixture date error: {0}")]
    Date(String),
}

impl FixtureError {
    /// Builds an I/O error for a path.
    fn io(path: &Path, message: impl ToString) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Per-mock result of a check or generate pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    /// Encoding matches the newest stored fixture.
    Unchanged,
    /// No fixture was stored; one was written.
    Missing,
    /// Encoding differs from the newest fixture; a new one was written.
    Drifted,
    /// Written unconditionally by `generate`.
    Generated,
}

/// Outcome for one mock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureOutcome {
    /// Mock name.
    pub name: &'static str,
    /// Result.
    pub status: FixtureStatus,
    /// Fixture file compared against or written.
    pub file: String,
    /// Digest of the freshly encoded mock.
    pub digest: ContentDigest,
    /// Digest of the newest stored fixture before this pass, if any.
    pub previous_digest: Option<ContentDigest>,
}

/// Outcome of a check or generate pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureReport {
    /// Date stamped on any file written.
    pub today: String,
    /// Per-mock outcomes in registry order.
    pub fixtures: Vec<FixtureOutcome>,
}

impl FixtureReport {
    /// Returns true when a check wrote any new fixture.
    #[must_use]
    pub fn drift_detected(&self) -> bool {
        self.fixtures
            .iter()
            .any(|outcome| matches!(outcome.status, FixtureStatus::Missing | FixtureStatus::Drifted))
    }
}

/// One stored fixture that loaded successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Fixture file name.
    pub file: String,
    /// Mock name parsed from the file name.
    pub name: String,
    /// Date parsed from the file name.
    pub date: String,
    /// Stored `proto_version`.
    pub starting_version: u32,
    /// Migrations that changed the document on load.
    pub changed: Vec<&'static str>,
}

/// Outcome of a history verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryReport {
    /// Every stored fixture, sorted by name then date.
    pub fixtures: Vec<HistoryEntry>,
}

/// A fixture file recognized by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureFile {
    /// Full path.
    pub path: PathBuf,
    /// Mock name prefix.
    pub name: String,
    /// Fixture date.
    pub date: Date,
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Fixture harness over one fixture directory layout.
#[derive(Debug, Clone)]
pub struct FixtureHarness {
    /// Mocks to encode.
    mocks: &'static [MockDocument],
    /// Extension of fixture files, without the dot.
    file_extension: String,
}

impl Default for FixtureHarness {
    fn default() -> Self {
        Self::from_config(&FixturesConfig::default())
    }
}

impl FixtureHarness {
    /// Builds a harness over the canonical mocks.
    #[must_use]
    pub fn from_config(config: &FixturesConfig) -> Self {
        Self {
            mocks: canonical_mocks(),
            file_extension: config.file_extension.clone(),
        }
    }

    /// Replaces the mock registry.
    #[must_use]
    pub fn with_mocks(mut self, mocks: &'static [MockDocument]) -> Self {
        self.mocks = mocks;
        self
    }

    /// Compares each mock with its newest fixture, writing new ones on drift.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the directory cannot be read or a new
    /// fixture cannot be written.
    pub fn check(&self, dir: &Path, today: Date) -> Result<FixtureReport, FixtureError> {
        let stored = self.list_fixtures(dir)?;
        let mut fixtures = Vec::with_capacity(self.mocks.len());
        for mock in self.mocks {
            let bytes = to_proto_buffer(&(mock.build)());
            let digest = hash_bytes(&bytes);
            let newest = stored.iter().filter(|file| file.name == mock.name).max_by_key(|file| file.date);
            let (status, file, previous_digest) = match newest {
                Some(newest) => {
                    let existing = read_fixture(&newest.path)?;
                    let previous = hash_bytes(&existing);
                    if existing == bytes {
                        (FixtureStatus::Unchanged, newest.path.clone(), Some(previous))
                    } else {
                        let path = self.write_fixture(dir, mock.name, today, &bytes)?;
                        (FixtureStatus::Drifted, path, Some(previous))
                    }
                }
                None => {
                    let path = self.write_fixture(dir, mock.name, today, &bytes)?;
                    (FixtureStatus::Missing, path, None)
                }
            };
            fixtures.push(FixtureOutcome {
                name: mock.name,
                status,
                file: file_name(&file),
                digest,
                previous_digest,
            });
        }
        Ok(FixtureReport {
            today: format_date(today)?,
            fixtures,
        })
    }

    /// Writes every mock dated `today`, replacing same-day files.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when a fixture cannot be written.
    pub fn generate(&self, dir: &Path, today: Date) -> Result<FixtureReport, FixtureError> {
        let mut fixtures = Vec::with_capacity(self.mocks.len());
        for mock in self.mocks {
            let bytes = to_proto_buffer(&(mock.build)());
            let path = self.write_fixture(dir, mock.name, today, &bytes)?;
            fixtures.push(FixtureOutcome {
                name: mock.name,
                status: FixtureStatus::Generated,
                file: file_name(&path),
                digest: hash_bytes(&bytes),
                previous_digest: None,
            });
        }
        Ok(FixtureReport {
            today: format_date(today)?,
            fixtures,
        })
    }

    /// Loads every stored fixture through the full read path.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Document`] for the first fixture that fails to
    /// decode, migrate, or map, and [`FixtureError::Io`] for read failures.
    pub fn verify_history(&self, dir: &Path) -> Result<HistoryReport, FixtureError> {
        if !dir.is_dir() {
            return Err(FixtureError::io(dir, "fixture directory not found"));
        }
        let mut fixtures = Vec::new();
        for file in self.list_fixtures(dir)? {
            let bytes = read_fixture(&file.path)?;
            let (_, trace) = to_domain_traced(&bytes).map_err(|source| FixtureError::Document {
                path: file.path.display().to_string(),
                source,
            })?;
            fixtures.push(HistoryEntry {
                file: file_name(&file.path),
                name: file.name,
                date: format_date(file.date)?,
                starting_version: trace.starting_version,
                changed: trace.changed,
            });
        }
        Ok(HistoryReport {
            fixtures,
        })
    }

    /// Lists recognized fixture files sorted by name then date.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Io`] when the directory exists but cannot be
    /// read. A missing directory lists as empty.
    pub fn list_fixtures(&self, dir: &Path) -> Result<Vec<FixtureFile>, FixtureError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(FixtureError::io(dir, err)),
        };
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| FixtureError::io(dir, err))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some((name, date)) = self.parse_file_name(&path) {
                files.push(FixtureFile {
                    path,
                    name,
                    date,
                });
            }
        }
        files.sort_by(|a, b| a.name.cmp(&b.name).then(a.date.cmp(&b.date)));
        Ok(files)
    }

    /// Returns the fixture path for a mock and date.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Date`] when the date cannot be formatted.
    pub fn fixture_path(&self, dir: &Path, name: &str, date: Date) -> Result<PathBuf, FixtureError> {
        Ok(dir.join(format!("{name}-{}.{}", format_date(date)?, self.file_extension)))
    }

    /// Writes one fixture file.
    fn write_fixture(
        &self,
        dir: &Path,
        name: &str,
        date: Date,
        bytes: &[u8],
    ) -> Result<PathBuf, FixtureError> {
        let path = self.fixture_path(dir, name, date)?;
        write_atomic(&path, bytes).map_err(|err| FixtureError::io(&path, err))?;
        Ok(path)
    }

    /// Splits `{name}-{YYYY-MM-DD}.{ext}` into its name and date.
    fn parse_file_name(&self, path: &Path) -> Option<(String, Date)> {
        if path.extension()? != self.file_extension.as_str() {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        let split = stem.len().checked_sub(FIXTURE_DATE_LEN)?;
        let (prefix, date) = stem.split_at_checked(split)?;
        let name = prefix.strip_suffix('-').filter(|name| !name.is_empty())?;
        let date = Date::parse(date, ISO_DATE_FORMAT).ok()?;
        Some((name.to_string(), date))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a stored fixture.
fn read_fixture(path: &Path) -> Result<Vec<u8>, FixtureError> {
    read_bytes_with_limit(path, MAX_DOCUMENT_BYTES).map_err(|err| match err {
        ReadLimitError::TooLarge {
            ..
        } => FixtureError::Document {
            path: path.display().to_string(),
            source: FormDataError::Decode(err.to_string()),
        },
        ReadLimitError::Io(err) => FixtureError::io(path, err),
    })
}

/// Formats a fixture date.
fn format_date(date: Date) -> Result<String, FixtureError> {
    date.format(ISO_DATE_FORMAT).map_err(|err| FixtureError::Date(err.to_string()))
}

/// Returns the file name of a path for reports.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn parses_dated_file_names() {
        let harness = FixtureHarness::default();
        let parsed = harness.parse_file_name(Path::new("chip_amendment-2024-02-29.pb"));
        assert_eq!(parsed, Some(("chip_amendment".to_string(), date!(2024 - 02 - 29))));
    }

    #[test]
    fn ignores_unrecognized_names() {
        let harness = FixtureHarness::default();
        for name in ["chip_amendment.pb", "-2024-02-29.pb", "x-2024-13-01.pb", "x-2024-02-29.bin"] {
            assert_eq!(harness.parse_file_name(Path::new(name)), None, "{name}");
        }
    }
}
