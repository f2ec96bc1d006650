//! # oas-cli — Command Line Contract Checks
//!
//! Provides the `oas` command-line interface over `oas-core` and
//! `oas-schema`.
//!
//! ## Subcommands
//!
//! - `oas validate` — Validate an instance file against a named component
//!   schema or the schema of a declared response.
//! - `oas operations` — List the operations a document declares.
//!
//! ```bash
//! oas validate --document openapi.yaml --instance product.json --schema Product
//! oas validate --document openapi.json --instance body.json \
//!     --path /api/products --method get --status 200 --format json
//! oas operations --document openapi.yaml
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0    | The instance conforms. |
//! | 1    | The instance violates its schema. |
//! | 2    | The document, instance or schema could not be used. |

pub mod operations;
pub mod validate;

use clap::ValueEnum;

/// The instance conforms, or the command otherwise succeeded.
pub const EXIT_OK: u8 = 0;
/// The instance violates its schema.
pub const EXIT_INVALID: u8 = 1;
/// The document, instance or schema could not be used.
pub const EXIT_ERROR: u8 = 2;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per result.
    #[default]
    Text,
    /// One JSON document on stdout.
    Json,
}
