use std::path::PathBuf;

use crate::violation::Violations;

/// Errors that can occur while loading a schema or validating a payload.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// No file exists at the schema path.
    #[error("schema not found: {}", path.display())]
    SchemaNotFound { path: PathBuf },

    /// The schema path exists but could not be read as a regular file.
    #[error("failed to read schema {}: {source}", path.display())]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema file exceeds the configured size limit.
    #[error("schema file too large ({size} bytes, max {max}): {}", path.display())]
    SchemaTooLarge { path: PathBuf, size: u64, max: usize },

    /// The schema file is not valid JSON.
    #[error("failed to parse schema {}: {source}", path.display())]
    SchemaParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The schema is JSON but not a usable JSON Schema.
    #[error("failed to compile schema {}: {reason}", path.display())]
    SchemaCompile { path: PathBuf, reason: String },

    /// The payload could not be turned into a JSON value.
    #[error("payload is not valid JSON: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// The payload violates one or more schema constraints.
    #[error("{0}")]
    ValidationFailed(Violations),
}

impl SchemaError {
    /// Violations carried by a failed validation, if this is one.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            SchemaError::ValidationFailed(violations) => Some(violations),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
