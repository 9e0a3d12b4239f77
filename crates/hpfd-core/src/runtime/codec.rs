// crates/hpfd-core/src/runtime/codec.rs
// ============================================================================
// Module: Form Data Codec
// Description: Deterministic encode and bounded decode of wire documents.
// Purpose: Convert between stored bytes and raw wire structs of any version.
// Dependencies: prost
// ============================================================================

//! ## Overview
//! `encode` is deterministic: prost writes fields in tag order and omits
//! defaults, so the same logical document always yields the same bytes.
//! `decode` never panics and never returns a partially populated document.
//! It accepts every `proto_version` in `1..=CURRENT_PROTO_VERSION` and
//! refuses newer versions outright.
//!
//! Security posture: stored bytes are untrusted input; size is bounded before
//! parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use prost::Message;

use crate::core::error::FormDataError;
use crate::runtime::migrations::CURRENT_PROTO_VERSION;
use crate::wire::PROTO_NAME;
use crate::wire::WireDocument;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum encoded document size accepted by [`decode`].
pub const MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Codec
// ============================================================================

/// Encodes a wire document.
#[must_use]
pub fn encode(document: &WireDocument) -> Vec<u8> {
    document.encode_to_vec()
}

/// Decodes stored bytes into a wire document of any supported version.
///
/// # Errors
///
/// Returns [`FormDataError::Decode`] for oversize or malformed bytes, a wrong
/// message family name, or a missing version, and
/// [`FormDataError::UnsupportedVersion`] for versions newer than this build.
pub fn decode(bytes: &[u8]) -> Result<WireDocument, FormDataError> {
    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(FormDataError::Decode(format!(
            "document is {} bytes, limit is {MAX_DOCUMENT_BYTES}",
            bytes.len()
        )));
    }
    let document = WireDocument::decode(bytes)?;
    if document.proto_name != PROTO_NAME {
        return Err(FormDataError::Decode(format!(
            "unexpected protoName {:?}, expected {PROTO_NAME:?}",
            document.proto_name
        )));
    }
    match document.proto_version {
        0 => Err(FormDataError::Decode("missing protoVersion".to_string())),
        version if version > CURRENT_PROTO_VERSION => Err(FormDataError::UnsupportedVersion {
            version,
            max_supported: CURRENT_PROTO_VERSION,
        }),
        _ => Ok(document),
    }
}
