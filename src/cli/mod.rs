//! # CLI Module
//!
//! Command-line interface for the `oas-gherkin` binary.
//!
//! ## Commands
//!
//! ### `list`
//!
//! List the operations of a document:
//!
//! ```bash
//! oas-gherkin list --spec openapi.yaml --tag pets --group-by-tag
//! ```
//!
//! ### `analyze`
//!
//! Print the resolved analysis of one operation as JSON:
//!
//! ```bash
//! oas-gherkin analyze --spec openapi.yaml --path /pets/{id} --method get
//! ```
//!
//! ### `generate`
//!
//! Generate scenarios for one operation (printed to stdout) or for every
//! operation (one file per operation under `--output`):
//!
//! ```bash
//! oas-gherkin generate --spec openapi.yaml --path /pets/{id} --method get
//! oas-gherkin generate --spec openapi.yaml --output features --format markdown --force
//! ```
//!
//! Options:
//! - `--types <LIST>` - Comma-separated scenario types (default: all enabled)
//! - `--format <FORMAT>` - gherkin, json or markdown
//! - `--output <DIR>` - Write `<operation_id>.<ext>` files here
//! - `--force` - Overwrite existing files
//! - `--dry-run` - Report what would be written without writing
//! - `--config <FILE>` - Settings file (default: `oas-gherkin.toml` next to the spec)
//!
//! Errors are printed to stderr as a JSON error report and the process exits
//! non-zero.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{error_report, run_cli, Cli, Commands};
