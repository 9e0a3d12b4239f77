// crates/hpfd-core/src/core/mod.rs
// ============================================================================
// Module: Form Data Core Types
// Description: Errors, identifiers, time values, and content digests.
// Purpose: Provide the shared vocabulary of the form data engine.
// Dependencies: serde, serde_jcs, sha2, thiserror, time
// ============================================================================

//! ## Overview
//! Core types are shared by the wire schema, the migrations, and the domain
//! mapper. None of them perform I/O.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod error;
pub mod hashing;
pub mod identifiers;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::FormDataError;
pub use error::MigrationError;
pub use error::USER_FACING_LOAD_FAILURE;
pub use hashing::ContentDigest;
pub use hashing::HashError;
pub use hashing::canonical_json_bytes;
pub use hashing::hash_bytes;
pub use identifiers::DocumentId;
pub use identifiers::RateId;
pub use identifiers::StateCode;
pub use self::time::ISO_DATE_FORMAT;
pub use self::time::UtcInstant;
