//! CLI command implementations.
//!
//! Each command exposes an async `run` entry used by the CLI and an
//! `execute` step that takes its prompter and database explicitly.

use std::io::{self, IsTerminal};

use crate::error::{Error, Result};

/// Output color handling selection.
#[derive(Debug, Clone, Copy)]
pub enum ColorChoice {
    /// Colorize only when output is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

impl ColorChoice {
    /// Determine whether color output should be enabled.
    pub(crate) fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Fail with `message` unless at least one non-blank search term was given.
pub(crate) fn require_terms(terms: &[String], message: &str) -> Result<()> {
    if terms.iter().all(|term| term.trim().is_empty()) {
        return Err(Error::validation(message));
    }
    Ok(())
}

// Command modules are ordered alphabetically - maintain this order.
/// Edit command implementation.
pub mod edit;
/// Integrate command implementation.
pub mod integrate;
/// Isolate command implementation.
pub mod isolate;
/// New command implementation.
pub mod new;
/// Remove command implementation.
pub mod remove;
/// Rename command implementation.
pub mod rename;
