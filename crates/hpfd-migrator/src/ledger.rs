// crates/hpfd-migrator/src/ledger.rs
// ============================================================================
// Module: Migration Ledger
// Description: Versioned record of migrations applied to a stored corpus.
// Purpose: Let offline runs skip migrations a corpus has already absorbed.
// Dependencies: hpfd-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The ledger is a JSON side file holding a format version and the set of
//! migration names already applied to every document in a corpus. Merging is
//! a set union, so a ledger never forgets a name. Names this build does not
//! know are preserved untouched. Saved bytes are RFC 8785 canonical JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;

use hpfd_core::Migration;
use hpfd_core::canonical_json_bytes;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::storage::ReadLimitError;
use crate::storage::read_bytes_with_limit;
use crate::storage::write_atomic;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Ledger format version written by this build.
pub const LEDGER_VERSION: u32 = 1;
/// Maximum ledger file size in bytes.
pub const MAX_LEDGER_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Ledger load and save errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// I/O failure while reading or writing the ledger.
    #[error("ledger io error: {0}")]
    Io(String),
    /// The ledger file is not valid ledger JSON.
    #[error("ledger parse error: {0}")]
    Parse(String),
    /// The ledger was written by an unknown format version.
    #[error("unsupported ledger_version {0} (expected {LEDGER_VERSION})")]
    UnsupportedVersion(u32),
    /// The ledger could not be canonicalized.
    #[error("ledger encode error: {0}")]
    Encode(String),
}

impl From<ReadLimitError> for LedgerError {
    fn from(error: ReadLimitError) -> Self {
        Self::Io(error.to_string())
    }
}

// ============================================================================
// SECTION: Ledger
// ============================================================================

/// Applied-migration ledger for one corpus.
///
/// # Invariants
/// - `ledger_version` equals [`LEDGER_VERSION`] for any loaded ledger.
/// - `applied` only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationLedger {
    /// Ledger format version.
    pub ledger_version: u32,
    /// Names of migrations applied to the whole corpus.
    pub applied: BTreeSet<String>,
}

impl Default for MigrationLedger {
    fn default() -> Self {
        Self {
            ledger_version: LEDGER_VERSION,
            applied: BTreeSet::new(),
        }
    }
}

impl MigrationLedger {
    /// Loads a ledger; a missing file yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the file is unreadable, malformed, or of
    /// an unknown version.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let bytes = match read_bytes_with_limit(path, MAX_LEDGER_BYTES) {
            Ok(bytes) => bytes,
            Err(ReadLimitError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Self::from_json_slice(&bytes)
    }

    /// Parses ledger JSON and checks its version.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the JSON is malformed or of an unknown
    /// version.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, LedgerError> {
        let ledger: Self =
            serde_json::from_slice(bytes).map_err(|err| LedgerError::Parse(err.to_string()))?;
        if ledger.ledger_version != LEDGER_VERSION {
            return Err(LedgerError::UnsupportedVersion(ledger.ledger_version));
        }
        Ok(ledger)
    }

    /// Returns canonical JSON bytes for the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Encode`] when canonicalization fails.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        canonical_json_bytes(self).map_err(|err| LedgerError::Encode(err.to_string()))
    }

    /// Saves the ledger through a temp file and rename.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        let bytes = self.to_canonical_bytes()?;
        write_atomic(path, &bytes).map_err(|err| LedgerError::Io(err.to_string()))
    }

    /// Adds every name from `other`.
    pub fn merge(&mut self, other: &Self) {
        self.applied.extend(other.applied.iter().cloned());
    }

    /// Records one applied migration; returns `false` if already present.
    pub fn record(&mut self, name: &str) -> bool {
        self.applied.insert(name.to_string())
    }

    /// Returns whether `name` has been applied.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.applied.contains(name)
    }

    /// Returns registry migrations not yet recorded, in registry order.
    #[must_use]
    pub fn pending(&self, registry: &[Migration]) -> Vec<&'static str> {
        registry
            .iter()
            .map(|migration| migration.name)
            .filter(|name| !self.applied.contains(*name))
            .collect()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
