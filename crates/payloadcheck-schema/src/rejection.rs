use serde::Serialize;

use crate::error::SchemaError;

/// Client-facing body for a payload that failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub message: &'static str,
    pub details: String,
}

impl Rejection {
    /// Status code a request boundary should answer with.
    pub const STATUS: u16 = 422;
    pub const MESSAGE: &'static str = "Invalid payload schema.";

    pub fn new(details: impl Into<String>) -> Self {
        Self {
            message: Self::MESSAGE,
            details: details.into(),
        }
    }

    pub fn status(&self) -> u16 {
        Self::STATUS
    }
}

impl SchemaError {
    /// Map a validation failure to its client-facing rejection.
    ///
    /// Every other error kind returns `None`: those are faults on the
    /// server side and must not be reported as a bad payload.
    pub fn rejection(&self) -> Option<Rejection> {
        self.violations()
            .map(|violations| Rejection::new(violations.to_string()))
    }
}
