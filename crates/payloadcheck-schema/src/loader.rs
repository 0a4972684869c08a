use std::io::{ErrorKind, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, SchemaError};

/// Read and parse the schema document at `path`.
///
/// The file is re-read on every call. Reads stop one byte past `max_bytes`
/// so a file that grows after the size check is still rejected.
pub fn load_schema(path: &Path, max_bytes: usize) -> Result<Value> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(SchemaError::SchemaNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(SchemaError::SchemaRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !metadata.is_file() {
        return Err(SchemaError::SchemaRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
        });
    }

    if metadata.len() > max_bytes as u64 {
        return Err(SchemaError::SchemaTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: max_bytes,
        });
    }

    let file = std::fs::File::open(path).map_err(|source| read_error(path, source))?;
    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = Vec::new();
    file.take(read_limit)
        .read_to_end(&mut content)
        .map_err(|source| read_error(path, source))?;
    if content.len() > max_bytes {
        return Err(SchemaError::SchemaTooLarge {
            path: path.to_path_buf(),
            size: content.len() as u64,
            max: max_bytes,
        });
    }

    let schema = serde_json::from_slice(&content).map_err(|source| SchemaError::SchemaParse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded schema");
    Ok(schema)
}

fn read_error(path: &Path, source: std::io::Error) -> SchemaError {
    if source.kind() == ErrorKind::NotFound {
        SchemaError::SchemaNotFound {
            path: path.to_path_buf(),
        }
    } else {
        SchemaError::SchemaRead {
            path: path.to_path_buf(),
            source,
        }
    }
}
