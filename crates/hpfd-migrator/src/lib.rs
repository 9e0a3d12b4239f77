// crates/hpfd-migrator/src/lib.rs
// ============================================================================
// Module: Health Plan Form Data Migrator Library
// Description: Offline migration of stored document corpora.
// Purpose: Upgrade every stored document in place and record what ran.
// Dependencies: hpfd-core, hpfd-config, serde, serde_json
// ============================================================================

//! ## Overview
//! The live read path upgrades documents in memory on every read. This crate
//! is the offline counterpart: it rewrites a directory of stored documents to
//! the current schema and keeps a ledger of the migrations already applied
//! to that corpus so later runs skip them.
//!
//! Security posture: corpus files are untrusted; reads are size-limited and
//! nothing is written until every file has been migrated successfully.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod corpus;
pub mod ledger;
pub mod storage;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use corpus::CorpusMigrator;
pub use corpus::CorpusReport;
pub use corpus::FileReport;
pub use corpus::MigratorError;
pub use ledger::LEDGER_VERSION;
pub use ledger::LedgerError;
pub use ledger::MAX_LEDGER_BYTES;
pub use ledger::MigrationLedger;
pub use storage::ReadLimitError;
pub use storage::read_bytes_with_limit;
pub use storage::write_atomic;
