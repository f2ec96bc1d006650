//! # Validate Subcommand
//!
//! Validates one instance file against a schema node of an API description
//! document. The node is either a named component schema (`--schema`) or
//! the body schema of a declared response (`--path`, `--method`,
//! `--status`, optionally `--media-type`).
//!
//! Documents and instances may be JSON or YAML; the format follows the file
//! extension.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use oas_core::{load_instance, Document, OperationType, Reference, Schema};
use oas_schema::{JsonValidator, ValidationError, ValidatorOptions};

use crate::{OutputFormat, EXIT_INVALID, EXIT_OK};

/// Arguments for the `oas validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// API description document (JSON or YAML).
    #[arg(long)]
    pub document: PathBuf,

    /// Instance to validate (JSON or YAML).
    #[arg(long)]
    pub instance: PathBuf,

    /// Name of a schema under `components.schemas`.
    #[arg(long, required_unless_present = "path", conflicts_with = "path")]
    pub schema: Option<String>,

    /// Path template of the operation whose response schema is used.
    #[arg(long, requires_all = ["method", "status"])]
    pub path: Option<String>,

    /// HTTP method of the operation (case-insensitive).
    #[arg(long, requires = "path")]
    pub method: Option<String>,

    /// Declared response status key (e.g. 200, 4XX, default).
    #[arg(long, requires = "path")]
    pub status: Option<String>,

    /// Response media type. Defaults to the first one declared.
    #[arg(long, requires = "path")]
    pub media_type: Option<String>,

    /// Longest reference chain followed before reporting a cycle. Without
    /// it only chains that revisit a component are rejected.
    #[arg(long)]
    pub max_reference_hops: Option<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Outcome of one validation, as printed with `--format json`.
#[derive(Debug, Serialize)]
struct ValidationReport {
    instance: String,
    target: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let document = Document::from_path(&args.document)
        .with_context(|| format!("loading document {}", args.document.display()))?;
    let (schema, target) = select_schema(&document, args)?;
    let instance = load_instance(&args.instance)
        .with_context(|| format!("loading instance {}", args.instance.display()))?;

    tracing::debug!(schema = %target, instance = %args.instance.display(), "validating");

    let options = ValidatorOptions {
        max_reference_hops: args.max_reference_hops,
    };
    let outcome = JsonValidator::with_options(&document, options).validate(&schema, &instance);

    let failure = match outcome {
        Ok(()) => None,
        Err(ValidationError::Failure(failure)) => Some(failure),
        Err(ValidationError::Schema(e)) => {
            return Err(e).with_context(|| format!("schema for {target} cannot be evaluated"))
        }
    };

    let report = ValidationReport {
        instance: args.instance.display().to_string(),
        target,
        valid: failure.is_none(),
        path: failure.as_ref().map(|f| f.path().to_string()),
        message: failure.as_ref().map(|f| f.message()),
    };
    print_report(&report, args.format)?;

    Ok(if report.valid { EXIT_OK } else { EXIT_INVALID })
}

/// The schema node to validate against and a description of where it came
/// from.
fn select_schema(document: &Document, args: &ValidateArgs) -> Result<(Schema, String)> {
    if let Some(name) = &args.schema {
        let reference = Reference::component_schema(name);
        document
            .resolve_reference(&reference)
            .with_context(|| format!("schema '{name}' is not declared in components.schemas"))?;
        return Ok((Schema::reference(reference), format!("schema {name}")));
    }

    let (Some(template), Some(method), Some(status)) = (&args.path, &args.method, &args.status)
    else {
        bail!("either --schema or --path with --method and --status is required");
    };
    let operation: OperationType = method.parse()?;
    let response = document.response(template, operation, status)?;

    let (media_type, declared) = match &args.media_type {
        Some(media_type) => {
            let declared = response.content.get(media_type).with_context(|| {
                format!("{operation} {template} {status} does not declare {media_type}")
            })?;
            (media_type.as_str(), declared)
        }
        None => response
            .content
            .first()
            .map(|(k, v)| (k.as_str(), v))
            .with_context(|| format!("{operation} {template} {status} declares no content"))?,
    };
    let schema = declared.schema.clone().with_context(|| {
        format!("{operation} {template} {status} {media_type} declares no schema")
    })?;

    Ok((schema, format!("{operation} {template} {status} {media_type}")))
}

fn print_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text if report.valid => {
            println!("OK    {} conforms to {}", report.instance, report.target);
        }
        OutputFormat::Text => {
            println!(
                "FAIL  {} does not conform to {}",
                report.instance, report.target
            );
            println!(
                "      Path: {}. {}",
                report.path.as_deref().unwrap_or("."),
                report.message.as_deref().unwrap_or_default()
            );
        }
    }
    Ok(())
}
