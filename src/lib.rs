#![warn(missing_docs)]
//! Library support for the postkit CLI.
//!
//! postkit searches the posts and pages of a static site, narrows them with
//! search terms and structured filters, and then edits, renames, removes,
//! or temporarily isolates the chosen content files.

/// Command-line interface wiring and dispatch.
mod cli;
/// Command implementations.
mod commands;
/// Configuration loading for the user and the site.
mod config;
/// Common diagnostics and warning aggregation.
mod diagnostics;
/// Opening files in an editor or the desktop opener.
mod editor;
/// Error handling for the crate.
mod error;
/// Moves, renames, and deletions of content files.
mod fileops;
/// Filter criteria and the narrowing pipeline.
mod filter;
/// YAML front matter parsing for content files.
mod frontmatter;
/// Color palette and styling for CLI output.
mod palette;
/// Path expansion and normalization utilities.
mod paths;
/// Individual record predicates used by filters.
mod predicates;
/// Interactive prompt abstraction.
mod prompt;
/// Content records and collections.
mod record;
/// Selection of a single record from a match list.
mod select;
/// File name slugs.
mod slug;
/// Loading the content database from a site tree.
mod store;
/// Shared fixtures for unit tests.
#[cfg(test)]
mod testutil;

pub use crate::error::{Error, Result};

/// Run the CLI, returning a structured error on failure.
pub async fn run() -> Result<()> {
    cli::run().await
}
