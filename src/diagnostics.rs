//! Warning aggregation and diagnostic summaries.

use std::path::{Path, PathBuf};

/// Details about a content file that was skipped or failed.
#[derive(Debug, Clone)]
pub struct PathIssue {
    /// Path the issue concerns.
    pub(crate) path: PathBuf,
    /// Reason for the issue.
    pub(crate) reason: String,
}

/// Aggregates warnings, skipped files, and per-item failures for a command run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Whether informational notes are printed.
    verbose: bool,
    /// Collected warning messages.
    warnings: Vec<String>,
    /// Content files skipped while loading the database.
    skipped: Vec<PathIssue>,
    /// Batch items whose file operation failed.
    failures: Vec<PathIssue>,
}

impl Diagnostics {
    /// Create a new diagnostics collector.
    pub(crate) fn new(verbose: bool) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    /// Record a warning and print it immediately.
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        eprintln!("Warning: {message}");
        self.warnings.push(message);
    }

    /// Print an informational line when running verbosely.
    pub(crate) fn info(&self, message: impl Into<String>) {
        if self.verbose {
            eprintln!("{}", message.into());
        }
    }

    /// Record a skipped content file and emit the warning.
    pub(crate) fn warn_skipped(&mut self, path: &Path, reason: impl Into<String>) {
        let reason = reason.into();
        self.warn(format!("{} - {reason}", path.display()));
        self.skipped.push(PathIssue {
            path: path.to_path_buf(),
            reason,
        });
    }

    /// Record a failed batch item and print it; the batch continues.
    pub(crate) fn fail_item(&mut self, path: &Path, reason: impl Into<String>) {
        let reason = reason.into();
        eprintln!("{reason}");
        self.failures.push(PathIssue {
            path: path.to_path_buf(),
            reason,
        });
    }

    /// Return the number of failed batch items.
    pub(crate) fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Return the number of warnings emitted so far.
    #[cfg(test)]
    pub(crate) fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Print a summary for skipped files if any were recorded.
    pub(crate) fn print_skipped_summary(&self) {
        if self.skipped.is_empty() {
            return;
        }

        eprintln!("Skipped {} files due to errors:", self.skipped.len());
        for skipped in &self.skipped {
            eprintln!("  - {}: {}", skipped.path.display(), skipped.reason);
        }
    }

    /// Print a summary for failed batch items if any were recorded.
    pub(crate) fn print_failure_summary(&self) {
        let count = self.failure_count();
        if count == 0 {
            return;
        }

        eprintln!("{count} item(s) could not be moved:");
        for failure in &self.failures {
            eprintln!("  - {}", failure.path.display());
        }
    }
}
