//! # Operations Subcommand
//!
//! Lists every operation a document declares, one per line:
//! `METHOD template -> status, status`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use oas_core::Document;

use crate::{OutputFormat, EXIT_OK};

/// Arguments for the `oas operations` subcommand.
#[derive(Args, Debug)]
pub struct OperationsArgs {
    /// API description document (JSON or YAML).
    #[arg(long)]
    pub document: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// One declared operation.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct OperationSummary {
    /// Upper-case HTTP method.
    pub method: String,
    /// Path template.
    pub path: String,
    /// `operationId`, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Declared response status keys, in declaration order.
    pub statuses: Vec<String>,
}

/// Execute the operations subcommand.
pub fn run_operations(args: &OperationsArgs) -> Result<u8> {
    let document = Document::from_path(&args.document)
        .with_context(|| format!("loading document {}", args.document.display()))?;
    let summaries = summarize(&document);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Text => {
            for s in &summaries {
                println!("{:<7} {} -> {}", s.method, s.path, s.statuses.join(", "));
            }
        }
    }
    Ok(EXIT_OK)
}

/// Operations in document path order, then method order.
pub fn summarize(document: &Document) -> Vec<OperationSummary> {
    document
        .paths
        .iter()
        .flat_map(|(template, item)| {
            item.operations().map(move |(method, operation)| OperationSummary {
                method: method.method().to_string(),
                path: template.clone(),
                operation_id: operation.operation_id.clone(),
                statuses: operation.responses.keys().cloned().collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
      "openapi": "3.0.1",
      "info": { "title": "API V1", "version": "V1" },
      "paths": {
        "/api/products": {
          "post": { "operationId": "CreateProduct", "responses": { "201": { "description": "Created" }, "400": { "description": "Bad" } } },
          "get": { "operationId": "GetProducts", "responses": { "200": { "description": "OK" } } }
        },
        "/api/products/{id}": {
          "delete": { "responses": { "204": { "description": "Gone" } } }
        }
      }
    }"#;

    #[test]
    fn summaries_follow_path_then_method_order() {
        let doc = Document::from_json_str(DOCUMENT).unwrap();
        let summaries = summarize(&doc);
        let lines: Vec<_> = summaries
            .iter()
            .map(|s| format!("{} {} -> {}", s.method, s.path, s.statuses.join(", ")))
            .collect();
        assert_eq!(
            lines,
            vec![
                "GET /api/products -> 200",
                "POST /api/products -> 201, 400",
                "DELETE /api/products/{id} -> 204",
            ]
        );
        assert_eq!(summaries[0].operation_id.as_deref(), Some("GetProducts"));
        assert_eq!(summaries[2].operation_id, None);
    }

    #[test]
    fn run_operations_reads_yaml_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yml");
        std::fs::write(
            &path,
            "openapi: 3.0.1\ninfo: { title: t, version: v1 }\npaths:\n  /ping:\n    get:\n      responses:\n        \"204\": { description: ok }\n",
        )
        .unwrap();
        let args = OperationsArgs {
            document: path,
            format: OutputFormat::Json,
        };
        assert_eq!(run_operations(&args).unwrap(), EXIT_OK);
    }

    #[test]
    fn missing_document_is_an_error() {
        let args = OperationsArgs {
            document: PathBuf::from("/nonexistent/openapi.json"),
            format: OutputFormat::Text,
        };
        let err = run_operations(&args).unwrap_err();
        assert!(format!("{err:#}").contains("loading document"));
    }
}
