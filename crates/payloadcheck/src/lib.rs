//! Validate JSON payloads against JSON Schema documents.
//!
//! # Crate Structure
//!
//! - [`schema`] — Schema loading, validation, and violation reporting
//!
//! The `payloadcheck` binary (behind the `cli` feature) wraps the same API.

/// Re-export schema validation types.
pub mod schema {
    pub use payloadcheck_schema::*;
}

pub use payloadcheck_schema::{validate, Rejection, SchemaError, SchemaValidator};
