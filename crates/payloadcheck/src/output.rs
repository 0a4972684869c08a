use std::io::IsTerminal;
use std::path::Path;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use payloadcheck_schema::{Rejection, SchemaDraft, Violations};
use serde::Serialize;

const REPORT_SCHEMA_ID: &str = "payloadcheck/cli/v1/validation-report";
const CHECK_SCHEMA_ID: &str = "payloadcheck/cli/v1/schema-check";

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    schema_id: &'static str,
    schema: String,
    valid: bool,
    violations: &'a Violations,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<Rejection>,
}

impl<'a> ValidationReport<'a> {
    pub fn new(schema: &Path, violations: &'a Violations, rejection: Option<Rejection>) -> Self {
        Self {
            schema_id: REPORT_SCHEMA_ID,
            schema: schema.display().to_string(),
            valid: violations.is_empty(),
            violations,
            rejection,
        }
    }
}

#[derive(Debug, Serialize)]
struct SchemaCheckOutput {
    schema_id: &'static str,
    schema: String,
    draft: &'static str,
    ok: bool,
}

pub fn print_report(report: &ValidationReport<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            if report.valid {
                println!("{}: valid", report.schema);
                return;
            }
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["LOCATION", "MESSAGE"]);
            for violation in report.violations {
                table.add_row(vec![
                    display_location(&violation.location).to_string(),
                    violation.message.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if report.valid {
                println!("valid schema={}", report.schema);
                return;
            }
            println!(
                "invalid schema={} violations={}",
                report.schema,
                report.violations.len()
            );
            for violation in report.violations {
                println!(
                    "  {} {}",
                    display_location(&violation.location),
                    violation.message
                );
            }
        }
        OutputFormat::Raw => {
            if report.valid {
                println!("valid");
            } else {
                println!("{}", report.violations);
            }
        }
    }
}

pub fn print_schema_check(schema: &Path, draft: SchemaDraft, format: OutputFormat) {
    let out = SchemaCheckOutput {
        schema_id: CHECK_SCHEMA_ID,
        schema: schema.display().to_string(),
        draft: draft.name(),
        ok: true,
    };
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("schema={} draft={} ok", out.schema, out.draft);
        }
        OutputFormat::Raw => println!("ok"),
    }
}

fn display_location(location: &str) -> &str {
    if location.is_empty() {
        "(root)"
    } else {
        location
    }
}
