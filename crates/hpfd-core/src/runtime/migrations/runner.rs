// crates/hpfd-core/src/runtime/migrations/runner.rs
// ============================================================================
// Module: Migration Runner
// Description: Ordered fold of registered migrations over a wire document.
// Purpose: Produce the latest wire document plus a trace of what changed.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The live read path calls [`MigrationRunner::apply_all`], which applies the
//! full registry every time instead of gating on `proto_version`; each
//! migration's own guard makes the repeat a no-op. The offline corpus tool
//! calls [`MigrationRunner::apply_pending`] to skip names already recorded in
//! its ledger. A recorded name is only skipped for documents already past
//! that migration's `from_version`; a document that never went through it
//! still gets it, so every migration sees input brought forward by all
//! earlier ones. Failures are never swallowed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Serialize;

use super::MIGRATIONS;
use super::Migration;
use crate::core::error::FormDataError;
use crate::wire::WireDocument;

// ============================================================================
// SECTION: Trace
// ============================================================================

/// Record of a single runner pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationTrace {
    /// `proto_version` before the pass.
    pub starting_version: u32,
    /// `proto_version` after the pass.
    pub final_version: u32,
    /// Migrations that altered the document, in application order.
    pub changed: Vec<&'static str>,
    /// Migrations not attempted because the caller skipped them and the
    /// document was already past them.
    pub skipped: Vec<&'static str>,
}

/// Latest document together with its trace.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    /// Upgraded document.
    pub document: WireDocument,
    /// What the pass did.
    pub trace: MigrationTrace,
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Applies registered migrations in declared order.
#[derive(Debug, Clone, Copy)]
pub struct MigrationRunner {
    /// Registry to apply.
    migrations: &'static [Migration],
}

impl Default for MigrationRunner {
    fn default() -> Self {
        Self::standard()
    }
}

impl MigrationRunner {
    /// Creates a runner over the built-in registry.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            migrations: MIGRATIONS,
        }
    }

    /// Creates a runner over a custom registry.
    #[must_use]
    pub const fn with_registry(migrations: &'static [Migration]) -> Self {
        Self {
            migrations,
        }
    }

    /// Returns the registry this runner applies.
    #[must_use]
    pub const fn migrations(&self) -> &'static [Migration] {
        self.migrations
    }

    /// Applies every registered migration.
    ///
    /// # Errors
    ///
    /// Returns [`FormDataError::MigrationInvariant`] from the first failing
    /// migration.
    pub fn apply_all(&self, document: WireDocument) -> Result<MigrationOutcome, FormDataError> {
        self.apply_pending(document, &BTreeSet::new())
    }

    /// Applies every registered migration whose name is not in `skip`.
    ///
    /// Names in `skip` are ignored for a document whose `proto_version` is
    /// still at or below the migration's `from_version`.
    ///
    /// # Errors
    ///
    /// Returns [`FormDataError::MigrationInvariant`] from the first failing
    /// migration.
    pub fn apply_pending(
        &self,
        document: WireDocument,
        skip: &BTreeSet<String>,
    ) -> Result<MigrationOutcome, FormDataError> {
        let starting_version = document.proto_version;
        let mut changed = Vec::new();
        let mut skipped = Vec::new();
        let mut current = document;
        for migration in self.migrations {
            if skip.contains(migration.name) && current.proto_version > migration.from_version {
                skipped.push(migration.name);
                continue;
            }
            let before = current.clone();
            let proto_version = current.proto_version;
            current = (migration.apply)(current).map_err(|err| {
                FormDataError::MigrationInvariant {
                    migration: migration.name,
                    proto_version,
                    message: err.0,
                }
            })?;
            if current != before {
                changed.push(migration.name);
            }
        }
        let final_version = current.proto_version;
        Ok(MigrationOutcome {
            document: current,
            trace: MigrationTrace {
                starting_version,
                final_version,
                changed,
                skipped,
            },
        })
    }
}
