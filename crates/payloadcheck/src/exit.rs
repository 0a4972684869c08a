use std::fmt;
use std::io;

use payloadcheck_schema::SchemaError;

// Exit codes follow sysexits.h where one fits.
pub const SUCCESS: i32 = 0;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const SCHEMA_INVALID: i32 = 65;
pub const NO_INPUT: i32 = 66;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => NO_INPUT,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    match err {
        SchemaError::SchemaNotFound { .. } => {
            CliError::new(NO_INPUT, format!("{context}: {err}"))
        }
        SchemaError::SchemaRead { ref source, .. } => {
            let code = match source.kind() {
                io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
                _ => SCHEMA_INVALID,
            };
            CliError::new(code, format!("{context}: {err}"))
        }
        SchemaError::SchemaTooLarge { .. }
        | SchemaError::SchemaParse { .. }
        | SchemaError::SchemaCompile { .. } => {
            CliError::new(SCHEMA_INVALID, format!("{context}: {err}"))
        }
        SchemaError::InvalidPayload(_) | SchemaError::ValidationFailed(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}
