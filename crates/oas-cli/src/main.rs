//! # oas CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Handlers return the process exit code; any error they propagate means
//! the inputs were unusable and maps to exit code 2.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use oas_cli::operations::{run_operations, OperationsArgs};
use oas_cli::validate::{run_validate, ValidateArgs};
use oas_cli::EXIT_ERROR;

/// API contract checks against OpenAPI-style description documents.
#[derive(Parser, Debug)]
#[command(name = "oas", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an instance file against a component or response schema.
    Validate(ValidateArgs),

    /// List the operations a document declares.
    Operations(OperationsArgs),
}

/// Log filter for a `-v` count. `RUST_LOG` applies when no flag is given.
fn log_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so `--format json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("oas CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Operations(args) => run_operations(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oas_cli::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_validate_component_schema() {
        let cli = Cli::try_parse_from([
            "oas",
            "validate",
            "--document",
            "openapi.yaml",
            "--instance",
            "product.json",
            "--schema",
            "Product",
        ])
        .unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.document, PathBuf::from("openapi.yaml"));
            assert_eq!(args.schema.as_deref(), Some("Product"));
            assert!(args.path.is_none());
            assert_eq!(args.format, OutputFormat::Text);
            assert_eq!(args.max_reference_hops, None);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_response_schema() {
        let cli = Cli::try_parse_from([
            "oas",
            "-vv",
            "validate",
            "--document",
            "openapi.json",
            "--instance",
            "body.json",
            "--path",
            "/api/products",
            "--method",
            "get",
            "--status",
            "200",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.path.as_deref(), Some("/api/products"));
            assert_eq!(args.method.as_deref(), Some("get"));
            assert_eq!(args.status.as_deref(), Some("200"));
            assert_eq!(args.format, OutputFormat::Json);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_rejects_schema_with_path() {
        let result = Cli::try_parse_from([
            "oas",
            "validate",
            "--document",
            "d.json",
            "--instance",
            "i.json",
            "--schema",
            "Product",
            "--path",
            "/x",
            "--method",
            "get",
            "--status",
            "200",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_requires_a_schema_target() {
        let result = Cli::try_parse_from([
            "oas",
            "validate",
            "--document",
            "d.json",
            "--instance",
            "i.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_path_requires_method_and_status() {
        let result = Cli::try_parse_from([
            "oas",
            "validate",
            "--document",
            "d.json",
            "--instance",
            "i.json",
            "--path",
            "/x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_operations() {
        let cli = Cli::try_parse_from(["oas", "operations", "--document", "openapi.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::Operations(_)));
    }

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(log_filter(1).to_string(), "info");
        assert_eq!(log_filter(2).to_string(), "debug");
        assert_eq!(log_filter(5).to_string(), "trace");
    }
}
