// crates/hpfd-migrator/src/corpus.rs
// ============================================================================
// Module: Corpus Migrator
// Description: Plan-then-commit migration of a directory of stored documents.
// Purpose: Bring a corpus to the current schema without partial failures.
// Dependencies: hpfd-core, hpfd-config, serde
// ============================================================================

//! ## Overview
//! A run has two phases. Planning reads every matching file in name order,
//! applies the migrations the ledger has not recorded, and re-encodes the
//! result. A recorded migration still runs on a document whose
//! `proto_version` shows it never went through it. Nothing is written during planning, so any decode or migration
//! failure leaves the corpus and its ledger exactly as they were. Commit then
//! rewrites the files whose bytes changed and saves the merged ledger.
//!
//! Each file is replaced atomically. A crash part way through commit can
//! leave some files rewritten and the ledger unsaved; rerunning is safe
//! because every migration is a no-op on already-upgraded documents.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use hpfd_config::MigratorConfig;
use hpfd_core::ContentDigest;
use hpfd_core::FormDataError;
use hpfd_core::MAX_DOCUMENT_BYTES;
use hpfd_core::MigrationRunner;
use hpfd_core::codec;
use hpfd_core::hash_bytes;
use serde::Serialize;
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::ledger::MigrationLedger;
use crate::storage::ReadLimitError;
use crate::storage::read_bytes_with_limit;
use crate::storage::write_atomic;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Corpus migration errors.
#[derive(Debug, Error)]
pub enum MigratorError {
    /// Ledger could not be loaded or saved.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// Corpus directory or file I/O failed.
    #[error("corpus io error at {path}: {message}")]
    Io {
        /// Path involved.
        path: String,
        /// Underlying error.
        message: String,
    },
    /// A stored document could not be decoded or migrated.
    #[error("failed to migrate {path}: {source}")]
    Document {
        /// Path of the offending document.
        path: String,
        /// Core failure.
        source: FormDataError,
    },
}

impl MigratorError {
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

/// Outcome for one corpus file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// File name within the corpus directory.
    pub file: String,
    /// `proto_version` before migration.
    pub starting_version: u32,
    /// `proto_version` after migration.
    pub final_version: u32,
    /// Migrations that changed this document, in application order.
    pub changed: Vec<&'static str>,
    /// Ledger-recorded migrations this document was already past.
    pub skipped: Vec<&'static str>,
    /// SHA-256 of the stored bytes before the run.
    pub digest_before: ContentDigest,
    /// SHA-256 of the bytes after the run.
    pub digest_after: ContentDigest,
    /// Whether the file was rewritten.
    pub rewritten: bool,
}

/// Outcome of a corpus run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusReport {
    /// Corpus directory.
    pub corpus_dir: String,
    /// Ledger file.
    pub ledger_path: String,
    /// Migrations applied by this run and newly recorded in the ledger.
    pub applied: Vec<&'static str>,
    /// Migrations the ledger already recorded. Documents still below one of
    /// them get it applied anyway.
    pub skipped: Vec<&'static str>,
    /// Per-file outcomes in name order.
    pub files: Vec<FileReport>,
}

impl CorpusReport {
    /// Returns the number of rewritten files.
    #[must_use]
    pub fn rewritten_count(&self) -> usize {
        self.files.iter().filter(|file| file.rewritten).count()
    }
}

// ============================================================================
// SECTION: Migrator
// ============================================================================

/// Offline migrator for one corpus layout.
#[derive(Debug, Clone)]
pub struct CorpusMigrator {
    /// Registry runner.
    runner: MigrationRunner,
    /// Extension of corpus documents, without the dot.
    file_extension: String,
    /// Largest file read.
    max_file_bytes: usize,
}

impl Default for CorpusMigrator {
    fn default() -> Self {
        Self::from_config(&MigratorConfig::default())
    }
}

/// A planned rewrite.
struct PendingWrite {
    /// Target file.
    path: PathBuf,
    /// New contents.
    bytes: Vec<u8>,
}

impl CorpusMigrator {
    /// Builds a migrator from validated configuration.
    #[must_use]
    pub fn from_config(config: &MigratorConfig) -> Self {
        Self {
            runner: MigrationRunner::standard(),
            file_extension: config.file_extension.clone(),
            max_file_bytes: config.max_file_bytes.min(MAX_DOCUMENT_BYTES),
        }
    }

    /// Replaces the migration runner.
    #[must_use]
    pub fn with_runner(mut self, runner: MigrationRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Migrates every document in `dir` and records the run in the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`MigratorError`] when the ledger, the directory, or any
    /// document fails. Planning failures leave every file untouched.
    pub fn run(&self, dir: &Path, ledger_path: &Path) -> Result<CorpusReport, MigratorError> {
        let ledger = MigrationLedger::load(ledger_path)?;
        let registry = self.runner.migrations();
        let applied = ledger.pending(registry);
        let skip: BTreeSet<String> = ledger.applied.clone();
        let skipped: Vec<&'static str> = registry
            .iter()
            .map(|migration| migration.name)
            .filter(|name| skip.contains(*name))
            .collect();

        let mut files = Vec::new();
        let mut writes = Vec::new();
        for path in self.list_documents(dir, ledger_path)? {
            let (report, write) = self.plan_file(&path, &skip)?;
            files.push(report);
            writes.extend(write);
        }

        for write in &writes {
            write_atomic(&write.path, &write.bytes)
                .map_err(|err| MigratorError::io(&write.path, err))?;
        }
        if !applied.is_empty() {
            let mut merged = ledger;
            for name in &applied {
                merged.record(name);
            }
            merged.save(ledger_path)?;
        }

        Ok(CorpusReport {
            corpus_dir: dir.display().to_string(),
            ledger_path: ledger_path.display().to_string(),
            applied,
            skipped,
            files,
        })
    }

    /// Lists corpus documents sorted by file name.
    fn list_documents(&self, dir: &Path, ledger_path: &Path) -> Result<Vec<PathBuf>, MigratorError> {
        let entries = fs::read_dir(dir).map_err(|err| MigratorError::io(dir, err))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| MigratorError::io(dir, err))?;
            let file_type = entry.file_type().map_err(|err| MigratorError::io(&entry.path(), err))?;
            let path = entry.path();
            if !file_type.is_file() || path == ledger_path {
                continue;
            }
            let matches = path
                .extension()
                .is_some_and(|extension| extension == self.file_extension.as_str());
            if matches {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Migrates one file in memory.
    fn plan_file(
        &self,
        path: &Path,
        skip: &BTreeSet<String>,
    ) -> Result<(FileReport, Option<PendingWrite>), MigratorError> {
        let before = read_bytes_with_limit(path, self.max_file_bytes).map_err(|err| match err {
            ReadLimitError::TooLarge {
                ..
            } => MigratorError::Document {
                path: path.display().to_string(),
                source: FormDataError::Decode(err.to_string()),
            },
            ReadLimitError::Io(err) => MigratorError::io(path, err),
        })?;
        let document_error = |source| MigratorError::Document {
            path: path.display().to_string(),
            source,
        };
        let wire = codec::decode(&before).map_err(document_error)?;
        let outcome = self.runner.apply_pending(wire, skip).map_err(document_error)?;
        let rewritten = !outcome.trace.changed.is_empty();
        let after = if rewritten { codec::encode(&outcome.document) } else { before.clone() };
        let report = FileReport {
            file: path
                .file_name()
                .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned()),
            starting_version: outcome.trace.starting_version,
            final_version: outcome.trace.final_version,
            changed: outcome.trace.changed,
            skipped: outcome.trace.skipped,
            digest_before: hash_bytes(&before),
            digest_after: hash_bytes(&after),
            rewritten,
        };
        let write = rewritten.then(|| PendingWrite {
            path: path.to_path_buf(),
            bytes: after,
        });
        Ok((report, write))
    }
}
