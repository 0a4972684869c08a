//! JSON Schema validation for request payloads.
//!
//! Load a schema document from disk, validate a payload against it, and
//! report every violation in a single error. Schemas are re-read on each
//! call; nothing is cached.
//!
//! Schemas compile as Draft 7 unless [`ValidatorConfig::draft`] says
//! otherwise.
//!
//! ```no_run
//! use serde_json::json;
//!
//! let payload = json!({ "name": "ok" });
//! match payloadcheck_schema::validate(&payload, "schemas/user.schema.json") {
//!     Ok(()) => {}
//!     Err(err) => match err.rejection() {
//!         Some(rejection) => eprintln!("{}: {}", rejection.status(), rejection.details),
//!         None => panic!("schema problem: {err}"),
//!     },
//! }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod rejection;
pub mod validator;
pub mod violation;

pub use config::{SchemaDraft, ValidatorConfig};
pub use error::{Result, SchemaError};
pub use loader::load_schema;
pub use rejection::Rejection;
pub use validator::{validate, CompiledSchema, SchemaValidator};
pub use violation::{Violation, Violations};
