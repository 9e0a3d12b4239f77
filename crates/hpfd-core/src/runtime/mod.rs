// crates/hpfd-core/src/runtime/mod.rs
// ============================================================================
// Module: Form Data Runtime
// Description: Codec, migration registry, and domain mapper.
// Purpose: Turn stored bytes of any version into the domain model and back.
// Dependencies: crate::{core, domain, wire}, prost
// ============================================================================

//! ## Overview
//! Runtime modules are pure, synchronous transformations. The only shared
//! state is the static migration registry, which is read-only.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod codec;
pub mod mapper;
pub mod migrations;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use codec::MAX_DOCUMENT_BYTES;
pub use codec::decode;
pub use codec::encode;
pub use mapper::to_domain;
pub use mapper::to_domain_document;
pub use mapper::to_domain_traced;
pub use mapper::to_proto_buffer;
pub use mapper::to_wire_document;
pub use migrations::CURRENT_PROTO_VERSION;
pub use migrations::MIGRATIONS;
pub use migrations::Migration;
pub use migrations::MigrationOutcome;
pub use migrations::MigrationRunner;
pub use migrations::MigrationTrace;
