use std::path::{Path, PathBuf};

use jsonschema::Validator;
use serde::Serialize;
use serde_json::Value;

use crate::config::{SchemaDraft, ValidatorConfig};
use crate::error::{Result, SchemaError};
use crate::loader::load_schema;
use crate::violation::{Violation, Violations};

/// Validates payloads against schema files.
///
/// Holds no compiled state: the schema is loaded and compiled on every call.
///
/// Schemas always compile with [`ValidatorConfig::draft`]. A `$schema`
/// keyword naming another draft does not change that; the mismatch is
/// logged at debug level.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    config: ValidatorConfig,
}

impl SchemaValidator {
    /// Create a validator with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with explicit config.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Get validator configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate any serializable payload against the schema at `schema_path`.
    pub fn validate<T>(&self, payload: &T, schema_path: impl AsRef<Path>) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let compiled = self.compile(schema_path)?;
        let instance = serde_json::to_value(payload)?;
        compiled.validate(&instance)
    }

    /// Validate an already-normalized JSON value.
    pub fn validate_value(&self, instance: &Value, schema_path: impl AsRef<Path>) -> Result<()> {
        self.compile(schema_path)?.validate(instance)
    }

    /// Validate raw JSON payload bytes.
    pub fn validate_json(&self, payload: &[u8], schema_path: impl AsRef<Path>) -> Result<()> {
        let compiled = self.compile(schema_path)?;
        let instance: Value = serde_json::from_slice(payload)?;
        compiled.validate(&instance)
    }

    /// Collect every violation of `instance` without failing on them.
    pub fn violations(&self, instance: &Value, schema_path: impl AsRef<Path>) -> Result<Violations> {
        Ok(self.compile(schema_path)?.violations(instance))
    }

    /// Load and compile the schema at `schema_path` without validating anything.
    pub fn check_schema(&self, schema_path: impl AsRef<Path>) -> Result<()> {
        self.compile(schema_path).map(|_| ())
    }

    /// Load and compile the schema at `schema_path` once, for callers that
    /// need to do more work between loading the schema and validating.
    pub fn compile(&self, schema_path: impl AsRef<Path>) -> Result<CompiledSchema> {
        let schema_path = schema_path.as_ref();
        let schema = load_schema(schema_path, self.config.max_schema_file_size)?;
        let draft = self.config.draft;

        if let Some(declared) = schema.get("$schema").and_then(Value::as_str) {
            if SchemaDraft::from_uri(declared) != Some(draft) {
                tracing::debug!(
                    path = %schema_path.display(),
                    declared,
                    draft = %draft,
                    "schema declares a different draft; compiling with the configured one"
                );
            }
        }

        let validator = jsonschema::options()
            .with_draft(draft.as_jsonschema())
            .build(&schema)
            .map_err(|err| SchemaError::SchemaCompile {
                path: schema_path.to_path_buf(),
                reason: err.to_string(),
            })?;

        tracing::debug!(path = %schema_path.display(), draft = %draft, "compiled schema");
        Ok(CompiledSchema {
            path: schema_path.to_path_buf(),
            validator,
        })
    }
}

/// A schema loaded and compiled by [`SchemaValidator::compile`].
pub struct CompiledSchema {
    path: PathBuf,
    validator: Validator,
}

impl CompiledSchema {
    /// Path the schema was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Collect every violation of `instance`, in validator order.
    pub fn violations(&self, instance: &Value) -> Violations {
        self.validator
            .iter_errors(instance)
            .map(|err| Violation::from_error(&err, instance))
            .collect()
    }

    /// Fail with [`SchemaError::ValidationFailed`] if `instance` has any violation.
    pub fn validate(&self, instance: &Value) -> Result<()> {
        let violations = self.violations(instance);
        if violations.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            path = %self.path.display(),
            violations = violations.len(),
            "payload failed schema validation"
        );
        Err(SchemaError::ValidationFailed(violations))
    }
}

/// Validate `payload` against the schema at `schema_path` with default config.
pub fn validate<T>(payload: &T, schema_path: impl AsRef<Path>) -> Result<()>
where
    T: Serialize + ?Sized,
{
    SchemaValidator::new().validate(payload, schema_path)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;

    const NAME_SCHEMA: &str = r#"{
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": { "type": "string" }
        }
    }"#;

    fn make_temp_schema_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "payloadcheck-schema-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_schema(dir: &Path, file_name: &str, contents: &str) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, contents.as_bytes()).unwrap();
        path
    }

    #[derive(Serialize)]
    struct Named<'a> {
        name: &'a str,
    }

    #[test]
    fn conforming_payload_passes() {
        let dir = make_temp_schema_dir("conforming");
        let schema = write_schema(&dir, "name.schema.json", NAME_SCHEMA);

        assert!(validate(&json!({"name": "ok"}), &schema).is_ok());
        assert!(validate(&Named { name: "typed" }, &schema).is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn wrong_type_reports_property_path() {
        let dir = make_temp_schema_dir("wrong-type");
        let schema = write_schema(&dir, "name.schema.json", NAME_SCHEMA);

        let err = validate(&json!({"name": 42}), &schema).unwrap_err();
        assert!(matches!(err, SchemaError::ValidationFailed(_)));
        assert_eq!(err.to_string(), r#"name: 42 is not of type "string""#);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_required_property_is_named() {
        let dir = make_temp_schema_dir("required");
        let schema = write_schema(&dir, "name.schema.json", NAME_SCHEMA);

        let err = validate(&json!({}), &schema).unwrap_err();
        let violations = err.violations().expect("should carry violations");
        assert_eq!(violations.len(), 1);

        let violation = violations.iter().next().unwrap();
        assert_eq!(violation.location, "name");
        assert!(violation.message.contains("required"));
        assert!(err.to_string().starts_with("name: "));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn nested_required_property_includes_parent_path() {
        let dir = make_temp_schema_dir("nested-required");
        let schema = write_schema(
            &dir,
            "nested.schema.json",
            r#"{
                "type": "object",
                "properties": {
                    "items": {
                        "type": "array",
                        "items": { "type": "object", "required": ["sku"] }
                    }
                }
            }"#,
        );

        let err = validate(&json!({"items": [{"sku": "a"}, {}]}), &schema).unwrap_err();
        let violation = err.violations().unwrap().iter().next().unwrap().clone();
        assert_eq!(violation.location, "items[1].sku");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn all_violations_are_joined_in_one_error() {
        let dir = make_temp_schema_dir("multiple");
        let schema = write_schema(
            &dir,
            "multi.schema.json",
            r#"{
                "type": "object",
                "properties": {
                    "id": { "type": "integer" },
                    "name": { "type": "string" }
                }
            }"#,
        );

        let err = validate(&json!({"id": "x", "name": 1}), &schema).unwrap_err();
        let violations = err.violations().unwrap();
        assert_eq!(violations.len(), 2);

        let message = err.to_string();
        assert_eq!(message.matches("; ").count(), 1);
        assert!(message.contains(r#"id: "x" is not of type "integer""#));
        assert!(message.contains(r#"name: 1 is not of type "string""#));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_schema_fails_before_payload_is_inspected() {
        let dir = make_temp_schema_dir("missing");
        let schema = dir.join("absent.schema.json");

        let err = SchemaValidator::new()
            .validate_json(b"not-json", &schema)
            .unwrap_err();
        assert!(matches!(err, SchemaError::SchemaNotFound { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_schema_is_parse_error_not_validation_failure() {
        let dir = make_temp_schema_dir("malformed");
        let schema = write_schema(&dir, "broken.schema.json", r#"{"type": "object""#);

        let err = validate(&json!({"name": "ok"}), &schema).unwrap_err();
        assert!(matches!(err, SchemaError::SchemaParse { .. }));
        assert!(err.violations().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_schema_fails_compile() {
        let dir = make_temp_schema_dir("compile");
        let schema = write_schema(
            &dir,
            "invalid.schema.json",
            r#"{"type":"definitely-not-a-type"}"#,
        );

        assert!(matches!(
            SchemaValidator::new().check_schema(&schema),
            Err(SchemaError::SchemaCompile { .. })
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_json_payload_fails() {
        let dir = make_temp_schema_dir("payload-json");
        let schema = write_schema(&dir, "name.schema.json", NAME_SCHEMA);

        assert!(matches!(
            SchemaValidator::new().validate_json(b"not-json", &schema),
            Err(SchemaError::InvalidPayload(_))
        ));
        assert!(SchemaValidator::new()
            .validate_json(br#"{"name":"ok"}"#, &schema)
            .is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn violations_returns_empty_for_valid_payload() {
        let dir = make_temp_schema_dir("violations");
        let schema = write_schema(&dir, "name.schema.json", NAME_SCHEMA);
        let validator = SchemaValidator::new();

        assert!(validator
            .violations(&json!({"name": "ok"}), &schema)
            .unwrap()
            .is_empty());
        assert_eq!(
            validator
                .violations(&json!({"name": false}), &schema)
                .unwrap()
                .len(),
            1
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_edits_are_picked_up_between_calls() {
        let dir = make_temp_schema_dir("reload");
        let schema = write_schema(&dir, "name.schema.json", NAME_SCHEMA);
        let validator = SchemaValidator::new();
        let payload = json!({"name": "ok"});

        assert!(validator.validate_value(&payload, &schema).is_ok());

        write_schema(
            &dir,
            "name.schema.json",
            r#"{"type":"object","required":["name","id"]}"#,
        );
        assert!(validator.validate_value(&payload, &schema).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn draft_selection_controls_keywords() {
        let dir = make_temp_schema_dir("draft");
        let schema = write_schema(
            &dir,
            "dependent.schema.json",
            r#"{"type":"object","dependentRequired":{"card":["billing"]}}"#,
        );
        let payload = json!({"card": "4111"});

        let draft7 = SchemaValidator::new();
        assert_eq!(draft7.config().draft, SchemaDraft::Draft7);
        assert!(draft7.validate_value(&payload, &schema).is_ok());

        let draft2020 = SchemaValidator::with_config(ValidatorConfig {
            draft: SchemaDraft::Draft202012,
            ..ValidatorConfig::default()
        });
        assert!(matches!(
            draft2020.validate_value(&payload, &schema),
            Err(SchemaError::ValidationFailed(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn validator_is_shareable_across_threads() {
        let dir = make_temp_schema_dir("threads");
        let schema = write_schema(&dir, "name.schema.json", NAME_SCHEMA);
        let validator = std::sync::Arc::new(SchemaValidator::new());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let validator = validator.clone();
                let schema = schema.clone();
                std::thread::spawn(move || {
                    let name = format!("worker-{i}");
                    validator.validate(&json!({ "name": name }), &schema)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn failing_serialize_is_invalid_payload() {
        let dir = make_temp_schema_dir("unserializable");
        let schema = write_schema(&dir, "name.schema.json", NAME_SCHEMA);

        let err = validate(&Unserializable, &schema).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPayload(_)));
        assert!(err.rejection().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn configured_draft_wins_over_declared_schema() {
        let dir = make_temp_schema_dir("declared-draft");
        let schema = write_schema(
            &dir,
            "declared.schema.json",
            r#"{
                "$schema": "https://json-schema.org/draft/2020-12/schema",
                "type": "object",
                "dependentRequired": {"card": ["billing"]}
            }"#,
        );
        let payload = json!({"card": "4111"});

        assert!(SchemaValidator::new().validate_value(&payload, &schema).is_ok());

        let draft2020 = SchemaValidator::with_config(ValidatorConfig {
            draft: SchemaDraft::Draft202012,
            ..ValidatorConfig::default()
        });
        assert!(draft2020.validate_value(&payload, &schema).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn compiled_schema_is_reused_for_several_payloads() {
        let dir = make_temp_schema_dir("compiled");
        let schema = write_schema(&dir, "name.schema.json", NAME_SCHEMA);

        let compiled = SchemaValidator::new().compile(&schema).unwrap();
        assert_eq!(compiled.path(), schema.as_path());

        std::fs::remove_file(&schema).unwrap();
        assert!(compiled.validate(&json!({"name": "ok"})).is_ok());
        assert_eq!(compiled.violations(&json!({})).len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
