//! tasklist - a to-do client for a remote task service
//!
//! Lists, creates, edits and deletes tasks over HTTP, either one action per
//! invocation or as an interactive session that keeps the list fresh.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;

/// Main entry point for the tasklist CLI
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
