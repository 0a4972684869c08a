use std::fmt;

/// JSON Schema draft used to compile schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaDraft {
    Draft4,
    Draft6,
    #[default]
    Draft7,
    Draft201909,
    Draft202012,
}

impl SchemaDraft {
    /// Short name used on the command line and in reports (`7`, `2020-12`).
    pub fn name(self) -> &'static str {
        match self {
            SchemaDraft::Draft4 => "4",
            SchemaDraft::Draft6 => "6",
            SchemaDraft::Draft7 => "7",
            SchemaDraft::Draft201909 => "2019-09",
            SchemaDraft::Draft202012 => "2020-12",
        }
    }

    /// Draft named by a `$schema` meta-schema URI, if it is a known one.
    pub fn from_uri(uri: &str) -> Option<Self> {
        let uri = uri
            .trim_end_matches('#')
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        match uri {
            "json-schema.org/draft-04/schema" => Some(SchemaDraft::Draft4),
            "json-schema.org/draft-06/schema" => Some(SchemaDraft::Draft6),
            "json-schema.org/draft-07/schema" => Some(SchemaDraft::Draft7),
            "json-schema.org/draft/2019-09/schema" => Some(SchemaDraft::Draft201909),
            "json-schema.org/draft/2020-12/schema" => Some(SchemaDraft::Draft202012),
            _ => None,
        }
    }

    pub(crate) fn as_jsonschema(self) -> jsonschema::Draft {
        match self {
            SchemaDraft::Draft4 => jsonschema::Draft::Draft4,
            SchemaDraft::Draft6 => jsonschema::Draft::Draft6,
            SchemaDraft::Draft7 => jsonschema::Draft::Draft7,
            SchemaDraft::Draft201909 => jsonschema::Draft::Draft201909,
            SchemaDraft::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

impl fmt::Display for SchemaDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Controls schema loading and validation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Draft used when compiling the schema.
    pub draft: SchemaDraft,
    /// Maximum bytes accepted for a schema file.
    pub max_schema_file_size: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            draft: SchemaDraft::default(),
            max_schema_file_size: 256 * 1024,
        }
    }
}
