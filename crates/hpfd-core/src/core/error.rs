// crates/hpfd-core/src/core/error.rs
// ============================================================================
// Module: Form Data Errors
// Description: Error taxonomy for decoding, version gating, and migrations.
// Purpose: Surface every hard failure as a typed error at the service boundary.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! All hard failures raised by the engine are variants of [`FormDataError`].
//! None of them are recoverable inside the engine: a document that cannot be
//! decoded, was written by a newer schema, or cannot be migrated is rejected
//! as a whole. Provision keys that do not belong to a document's variant are
//! not errors at all; they are discarded during mapping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Message shown to end users when a stored submission cannot be loaded.
pub const USER_FACING_LOAD_FAILURE: &str = "We could not read this submission. Please try again \
                                            later or contact the help desk.";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Hard failures raised while reading or upgrading a form data document.
///
/// # Invariants
/// - Every variant is terminal for the document being processed.
/// - [`FormDataError::MigrationInvariant`] always names the failing migration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormDataError {
    /// Bytes are not a valid wire message or cannot be mapped to the domain.
    #[error("form data decode error: {0}")]
    Decode(String),
    /// The document was written by a newer schema than this build supports.
    #[error("unsupported protoVersion {version} (max supported {max_supported})")]
    UnsupportedVersion {
        /// Version found in the stored document.
        version: u32,
        /// Highest version this build can upgrade.
        max_supported: u32,
    },
    /// A migration could not establish its post-condition.
    #[error("migration {migration} failed at protoVersion {proto_version}: {message}")]
    MigrationInvariant {
        /// Name of the failing migration.
        migration: &'static str,
        /// Document version when the migration was attempted.
        proto_version: u32,
        /// Description of the violated precondition.
        message: String,
    },
}

impl FormDataError {
    /// Returns the generic message suitable for end users.
    ///
    /// Migration internals and byte-level details are never exposed here.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        USER_FACING_LOAD_FAILURE
    }

    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::UnsupportedVersion {
                ..
            } => "unsupported_version",
            Self::MigrationInvariant {
                ..
            } => "migration_invariant",
        }
    }
}

impl From<prost::DecodeError> for FormDataError {
    fn from(error: prost::DecodeError) -> Self {
        Self::Decode(error.to_string())
    }
}

/// Failure reported by a single migration function.
///
/// The runner attaches the migration name and document version before the
/// error leaves the registry as [`FormDataError::MigrationInvariant`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct MigrationError(pub String);

impl MigrationError {
    /// Creates a migration error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
