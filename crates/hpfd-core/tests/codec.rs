// crates/hpfd-core/tests/codec.rs
// ============================================================================
// Module: Codec Tests
// Description: Golden vector, determinism, and decode rejection tests.
// Purpose: Pin the byte layout and the version contract of stored documents.
// ============================================================================

//! ## Overview
//! The golden vector fails loudly if the encoding of a minimal document ever
//! changes. Rejection tests cover malformed bytes, foreign messages, and
//! version skew.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use hpfd_core::CURRENT_PROTO_VERSION;
use hpfd_core::FormDataError;
use hpfd_core::MAX_DOCUMENT_BYTES;
use hpfd_core::PROTO_NAME;
use hpfd_core::USER_FACING_LOAD_FAILURE;
use hpfd_core::WireDocument;
use hpfd_core::codec::decode;
use hpfd_core::codec::encode;
use hpfd_core::core::hashing::hex_encode;
use proptest::prelude::*;

// ============================================================================
// SECTION: Golden Vector
// ============================================================================

/// Tests a minimal current document encodes to fixed bytes.
#[test]
fn minimal_document_matches_golden_vector() {
    let document = WireDocument {
        proto_name: PROTO_NAME.to_string(),
        proto_version: CURRENT_PROTO_VERSION,
        ..WireDocument::default()
    };
    assert_eq!(hex_encode(&encode(&document)), "0a1053544154455f5355424d495353494f4e1004");
}

/// Tests encoding the same document twice is byte-identical.
#[test]
fn encoding_is_deterministic() {
    let document = common::legacy_v1_document();
    assert_eq!(encode(&document), encode(&document.clone()));
    assert_eq!(decode(&encode(&document)).unwrap(), document);
}

// ============================================================================
// SECTION: Rejections
// ============================================================================

/// Tests truncated bytes are a decode error.
#[test]
fn truncated_bytes_fail_to_decode() {
    let err = decode(&[0x0a, 0x05, b'S']).unwrap_err();
    assert_eq!(err.kind(), "decode");
}

/// Tests a message from another family is rejected.
#[test]
fn foreign_proto_name_is_rejected() {
    let mut document = common::wire_document(CURRENT_PROTO_VERSION);
    document.proto_name = "OTHER".to_string();
    let err = decode(&encode(&document)).unwrap_err();
    assert!(matches!(err, FormDataError::Decode(message) if message.contains("OTHER")));
}

/// Tests empty input is rejected.
#[test]
fn empty_input_is_rejected() {
    assert!(matches!(decode(&[]), Err(FormDataError::Decode(_))));
}

/// Tests a missing version is a decode error.
#[test]
fn zero_version_is_rejected() {
    let err = decode(&encode(&common::wire_document(0))).unwrap_err();
    assert_eq!(err, FormDataError::Decode("missing protoVersion".to_string()));
}

/// Tests versions newer than this build are refused with the version number.
#[test]
fn newer_version_is_unsupported() {
    let bytes = encode(&common::wire_document(CURRENT_PROTO_VERSION + 1));
    let err = decode(&bytes).unwrap_err();
    assert_eq!(
        err,
        FormDataError::UnsupportedVersion {
            version: CURRENT_PROTO_VERSION + 1,
            max_supported: CURRENT_PROTO_VERSION,
        }
    );
    assert!(err.to_string().contains("unsupported protoVersion 5"));
    assert_eq!(err.user_message(), USER_FACING_LOAD_FAILURE);
}

/// Tests every historical version is accepted.
#[test]
fn every_supported_version_decodes() {
    for version in 1..=CURRENT_PROTO_VERSION {
        let bytes = encode(&common::wire_document(version));
        assert_eq!(decode(&bytes).unwrap().proto_version, version);
    }
}

/// Tests oversize payloads are rejected before parsing.
#[test]
fn oversize_payload_is_rejected() {
    let bytes = vec![0_u8; MAX_DOCUMENT_BYTES + 1];
    let err = decode(&bytes).unwrap_err();
    assert!(matches!(err, FormDataError::Decode(message) if message.contains("limit")));
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    /// Tests arbitrary bytes never panic the decoder.
    #[test]
    fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode(&bytes);
    }
}
