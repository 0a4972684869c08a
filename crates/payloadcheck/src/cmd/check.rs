use payloadcheck_schema::SchemaValidator;

use crate::cmd::CheckArgs;
use crate::exit::{schema_error, CliResult, SUCCESS};
use crate::output::{print_schema_check, OutputFormat};

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let config = args.schema.validator_config();
    SchemaValidator::with_config(config)
        .check_schema(&args.schema.schema)
        .map_err(|err| schema_error("schema check failed", err))?;

    tracing::info!(schema = %args.schema.schema.display(), "schema compiled");
    print_schema_check(&args.schema.schema, config.draft, format);
    Ok(SUCCESS)
}
