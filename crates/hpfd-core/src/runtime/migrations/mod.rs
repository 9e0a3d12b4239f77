// crates/hpfd-core/src/runtime/migrations/mod.rs
// ============================================================================
// Module: Migration Registry
// Description: Ordered, read-only registry of wire schema migrations.
// Purpose: Upgrade any historical wire document to the current schema.
// Dependencies: crate::{core, wire}
// ============================================================================

//! ## Overview
//! Each migration is a pure `WireDocument -> Result<WireDocument, _>`
//! function. Every migration begins with a guard of its own precondition and
//! returns the document unchanged when the post-condition already holds, so
//! the runner can fold the whole registry over every decoded document.
//!
//! Migration names are numeric-prefixed; registry order is name order.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod add_one_month;
pub mod items_being_amended;
pub mod runner;
pub mod split_actuary_contacts;

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::error::MigrationError;
use crate::wire::WireDocument;

pub use runner::MigrationOutcome;
pub use runner::MigrationRunner;
pub use runner::MigrationTrace;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Signature of a migration function.
pub type MigrationFn = fn(WireDocument) -> Result<WireDocument, MigrationError>;

/// A registered schema migration.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    /// Unique, numeric-prefixed name.
    pub name: &'static str,
    /// Schema generation the migration upgrades from.
    pub from_version: u32,
    /// Migration function.
    pub apply: MigrationFn,
}

/// Every migration, in application order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: add_one_month::NAME,
        from_version: add_one_month::FROM_VERSION,
        apply: add_one_month::migrate,
    },
    Migration {
        name: split_actuary_contacts::NAME,
        from_version: split_actuary_contacts::FROM_VERSION,
        apply: split_actuary_contacts::migrate,
    },
    Migration {
        name: items_being_amended::NAME,
        from_version: items_being_amended::FROM_VERSION,
        apply: items_being_amended::migrate,
    },
];

/// Schema generation written by this build.
pub const CURRENT_PROTO_VERSION: u32 = latest_version(MIGRATIONS);

/// Returns one past the highest `from_version` in a registry.
const fn latest_version(migrations: &[Migration]) -> u32 {
    let mut latest = 1;
    let mut index = 0;
    while index < migrations.len() {
        let next = migrations[index].from_version.saturating_add(1);
        if next > latest {
            latest = next;
        }
        index += 1;
    }
    latest
}

/// Raises `proto_version` to `from_version + 1` once the migration's
/// post-condition holds.
///
/// A document still below `from_version` has not been through an earlier
/// migration and keeps its version, so later passes still see the gap.
pub(crate) fn mark_upgraded(document: &mut WireDocument, from_version: u32) {
    if document.proto_version >= from_version {
        document.proto_version = document.proto_version.max(from_version.saturating_add(1));
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_version_follows_registry() {
        assert_eq!(CURRENT_PROTO_VERSION, 4);
    }

    #[test]
    fn names_are_unique_and_ordered() {
        let names: Vec<&str> = MIGRATIONS.iter().map(|migration| migration.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn from_versions_are_strictly_increasing() {
        for pair in MIGRATIONS.windows(2) {
            assert!(pair[0].from_version < pair[1].from_version);
        }
    }

    #[test]
    fn mark_upgraded_never_skips_a_generation() {
        let mut document = WireDocument {
            proto_version: 1,
            ..WireDocument::default()
        };
        mark_upgraded(&mut document, 2);
        assert_eq!(document.proto_version, 1);
        mark_upgraded(&mut document, 1);
        assert_eq!(document.proto_version, 2);
        mark_upgraded(&mut document, 2);
        assert_eq!(document.proto_version, 3);
    }

    #[test]
    fn mark_upgraded_keeps_newer_versions() {
        let mut document = WireDocument {
            proto_version: 4,
            ..WireDocument::default()
        };
        mark_upgraded(&mut document, 2);
        assert_eq!(document.proto_version, 4);
    }
}
