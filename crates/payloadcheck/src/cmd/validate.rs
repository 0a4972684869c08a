use std::fs;
use std::io::Read;

use payloadcheck_schema::{Rejection, SchemaValidator};
use serde_json::Value;

use crate::cmd::ValidateArgs;
use crate::exit::{io_error, schema_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, OutputFormat, ValidationReport};

pub fn run(args: ValidateArgs, format: OutputFormat) -> CliResult<i32> {
    let validator = SchemaValidator::with_config(args.schema.validator_config());
    let schema_path = &args.schema.schema;

    // Schema errors are reported before payload errors.
    let compiled = validator
        .compile(schema_path)
        .map_err(|err| schema_error("schema load failed", err))?;

    let payload = resolve_payload(&args)?;
    let instance: Value = serde_json::from_slice(&payload)
        .map_err(|err| CliError::new(DATA_INVALID, format!("payload is not valid JSON: {err}")))?;

    let violations = compiled.violations(&instance);
    let rejection = (!violations.is_empty()).then(|| Rejection::new(violations.to_string()));

    let report = ValidationReport::new(schema_path, &violations, rejection);
    print_report(&report, format);

    if violations.is_empty() {
        tracing::info!(schema = %schema_path.display(), "payload valid");
        Ok(SUCCESS)
    } else {
        tracing::info!(
            schema = %schema_path.display(),
            violations = violations.len(),
            "payload invalid"
        );
        Ok(DATA_INVALID)
    }
}

fn resolve_payload(args: &ValidateArgs) -> CliResult<Vec<u8>> {
    if let Some(json) = &args.json {
        return Ok(json.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }

    let mut payload = Vec::new();
    std::io::stdin()
        .read_to_end(&mut payload)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(payload)
}
