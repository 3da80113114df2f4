//! Schema Rules CLI
//!
//! Command-line interface for translating JSON Schemas into rule trees
//! and checking values against them.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schema_rules::{
    check_against_rule, load_schema, load_schema_auto, translate_with_diagnostics, CheckError,
    TranslateOptions,
};

#[derive(Parser)]
#[command(name = "schema-rules")]
#[command(about = "Translate JSON Schemas into validation rule trees")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a schema and print the resulting rule tree
    Translate {
        /// Schema source: file path or URL (http:// or https://)
        schema: String,

        /// Named sub-schema for $ref resolution, as id=path (repeatable)
        #[arg(long = "sub-schema", value_name = "ID=PATH")]
        sub_schemas: Vec<String>,

        /// Strict mode: built rules reject coerced values (default: false)
        #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
        strict: bool,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Check a JSON value against a schema
    Check {
        /// Value file to check
        value: PathBuf,

        /// Schema source: file path or URL
        #[arg(long)]
        schema: String,

        /// Named sub-schema for $ref resolution, as id=path (repeatable)
        #[arg(long = "sub-schema", value_name = "ID=PATH")]
        sub_schemas: Vec<String>,

        /// Strict mode: reject coerced values (default: false)
        #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
        strict: bool,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Translate {
            schema,
            sub_schemas,
            strict,
            output,
            pretty,
        } => run_translate(&schema, &sub_schemas, strict, output, pretty),

        Commands::Check {
            value,
            schema,
            sub_schemas,
            strict,
            json,
        } => run_check(&value, &schema, &sub_schemas, strict, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

/// Build translate options from CLI flags, loading any id=path
/// sub-schema registrations.
fn build_options(sub_schemas: &[String], strict: bool) -> Result<TranslateOptions, u8> {
    let mut options = TranslateOptions::new().strict(strict);

    for entry in sub_schemas {
        let Some((id, path)) = entry.split_once('=') else {
            eprintln!("Error: --sub-schema expects id=path, got \"{}\"", entry);
            return Err(2);
        };
        let schema = load_schema(std::path::Path::new(path)).map_err(|e| {
            eprintln!("Error loading sub-schema {}: {}", id, e);
            e.exit_code() as u8
        })?;
        options = options.sub_schema(id, schema);
    }

    Ok(options)
}

fn run_translate(
    schema_source: &str,
    sub_schemas: &[String],
    strict: bool,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), u8> {
    let schema = load_schema_auto(schema_source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let options = build_options(sub_schemas, strict)?;
    let translation = translate_with_diagnostics(&schema, &options).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    for diagnostic in &translation.diagnostics {
        eprintln!("{}", diagnostic);
    }

    let json_output = if pretty {
        serde_json::to_string_pretty(&translation.rule)
    } else {
        serde_json::to_string(&translation.rule)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_check(
    value_path: &PathBuf,
    schema_source: &str,
    sub_schemas: &[String],
    strict: bool,
    json_output: bool,
) -> Result<(), u8> {
    let value = load_schema(value_path).map_err(|e| {
        report_error(json_output, &format!("loading value: {}", e));
        e.exit_code() as u8
    })?;

    let schema = load_schema_auto(schema_source).map_err(|e| {
        report_error(json_output, &format!("loading schema: {}", e));
        e.exit_code() as u8
    })?;

    let options = build_options(sub_schemas, strict)?;
    let translation = translate_with_diagnostics(&schema, &options).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    if !json_output {
        for diagnostic in &translation.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    match check_against_rule(&translation.rule, &value) {
        Ok(()) => {
            if json_output {
                println!(r#"{{"valid":true}}"#);
            } else {
                println!("Valid");
            }
            Ok(())
        }
        Err(CheckError::Invalid { violations }) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "violations": violations
                });
                println!("{}", output);
            } else {
                eprintln!("Check failed:");
                for violation in violations {
                    eprintln!("  {}", violation);
                }
            }
            Err(1)
        }
        Err(CheckError::Translate(e)) => {
            report_error(json_output, &e.to_string());
            Err(e.exit_code() as u8)
        }
    }
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!(r#"{{"valid":false,"error":"{}"}}"#, msg);
    } else {
        eprintln!("Error: {}", msg);
    }
}
