// crates/hpfd-fixtures/src/lib.rs
// ============================================================================
// Module: Health Plan Form Data Fixtures Library
// Description: Canonical mocks and dated fixture regression checks.
// Purpose: Detect unintended wire format drift between releases.
// Dependencies: hpfd-core, hpfd-config, hpfd-migrator, time
// ============================================================================

//! ## Overview
//! Every release stores the encoded bytes of a fixed set of mock documents
//! under `{name}-{YYYY-MM-DD}.{ext}`. A check re-encodes the mocks and
//! compares them with the newest stored copy; older copies must still load
//! through the full read path.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod harness;
pub mod mocks;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use harness::FixtureError;
pub use harness::FixtureFile;
pub use harness::FixtureHarness;
pub use harness::FixtureOutcome;
pub use harness::FixtureReport;
pub use harness::FixtureStatus;
pub use harness::HistoryEntry;
pub use harness::HistoryReport;
pub use mocks::MockDocument;
pub use mocks::canonical_mocks;
