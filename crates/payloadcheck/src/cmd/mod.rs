use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use payloadcheck_schema::{SchemaDraft, ValidatorConfig};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON payload against a schema file.
    Validate(ValidateArgs),
    /// Load and compile a schema file without validating a payload.
    Check(CheckArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Validate(args) => validate::run(args, format),
        Command::Check(args) => check::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum DraftArg {
    #[value(name = "4")]
    Draft4,
    #[value(name = "6")]
    Draft6,
    #[value(name = "7")]
    Draft7,
    #[value(name = "2019-09")]
    Draft201909,
    #[value(name = "2020-12")]
    Draft202012,
}

impl From<DraftArg> for SchemaDraft {
    fn from(arg: DraftArg) -> Self {
        match arg {
            DraftArg::Draft4 => SchemaDraft::Draft4,
            DraftArg::Draft6 => SchemaDraft::Draft6,
            DraftArg::Draft7 => SchemaDraft::Draft7,
            DraftArg::Draft201909 => SchemaDraft::Draft201909,
            DraftArg::Draft202012 => SchemaDraft::Draft202012,
        }
    }
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Path to the JSON Schema document.
    pub schema: PathBuf,
    /// JSON Schema draft used to compile the schema.
    #[arg(long, value_enum, default_value = "7")]
    pub draft: DraftArg,
    /// Maximum schema file size in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_schema_size: Option<usize>,
}

impl SchemaArgs {
    pub fn validator_config(&self) -> ValidatorConfig {
        let defaults = ValidatorConfig::default();
        ValidatorConfig {
            draft: self.draft.into(),
            max_schema_file_size: self
                .max_schema_size
                .unwrap_or(defaults.max_schema_file_size),
        }
    }
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// Inline JSON payload.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read payload from file. Without --json or --file the payload is read from stdin.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
