//! Error types for the postkit CLI.

use std::{
    env::VarError,
    io,
    path::PathBuf,
    process::{ExitCode, ExitStatus},
    result::Result as StdResult,
};

use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for postkit operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// The user configuration file could not be read.
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The user configuration file could not be parsed.
    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        source: TomlError,
    },
    /// The site configuration could not be parsed.
    #[error("Failed to parse site config at {path}: {source}")]
    SiteConfigParse {
        /// Path to `_config.yml`.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
    /// No site configuration was found at the site root.
    #[error("No site found at {path}; run inside a site or pass --site.")]
    SiteNotFound {
        /// Path where `_config.yml` was expected.
        path: PathBuf,
    },
    /// Home directory resolution failed.
    #[error("Failed to resolve the home directory.")]
    HomeDirMissing,
    /// A path argument could not be expanded.
    #[error("Invalid path: {path}: {source}")]
    PathExpansion {
        /// Input path that failed to expand.
        path: String,
        /// Underlying expansion error.
        source: shellexpand::LookupError<VarError>,
    },
    /// Required arguments were missing or malformed.
    #[error("{message}")]
    ValidationFailed {
        /// Error message describing the validation failure.
        message: String,
    },
    /// A search or filter pattern was not a valid regular expression.
    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// Pattern as supplied by the user.
        pattern: String,
        /// Underlying regex error.
        source: Box<regex::Error>,
    },
    /// No records matched the query.
    #[error("{message}")]
    EmptySelection {
        /// Message shown to the user.
        message: String,
    },
    /// A prompt answer could not be mapped back to a record.
    #[error("Invalid choice: index {index} out of {len} entries.")]
    SelectionOutOfRange {
        /// Index returned by the prompt.
        index: usize,
        /// Number of entries offered.
        len: usize,
    },
    /// The user chose to cancel the operation.
    #[error("OK. Nothing was changed.")]
    Cancelled,
    /// An interactive prompt was interrupted or canceled.
    #[error("Prompt canceled.")]
    PromptCanceled,
    /// An interactive prompt failed.
    #[error("Prompt failed: {message}")]
    PromptFailed {
        /// Error message describing the prompt failure.
        message: String,
    },
    /// A filesystem operation on a content path failed.
    #[error("Failed to {action} {path}: {source}")]
    FileOperation {
        /// Short description of the attempted action.
        action: &'static str,
        /// Path the action targeted.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A file or directory could not be moved.
    #[error("{from} could not be moved to {to}: {source}")]
    FileMove {
        /// Source path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A destination path already exists.
    #[error("Path already exists: {path}")]
    PathExists {
        /// Path that already exists.
        path: PathBuf,
    },
    /// A path required for operation does not exist.
    #[error("Path does not exist: {path}")]
    PathMissing {
        /// Path that does not exist.
        path: PathBuf,
    },
    /// A record's backing path is not a regular file.
    #[error("Not a regular file: {path}")]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },
    /// A content file has no `title:` line to rewrite.
    #[error("No title line found in {path}")]
    TitleMissing {
        /// Content file path.
        path: PathBuf,
    },
    /// The exile path exists but is a regular file.
    #[error("{path} is a file; it needs to be a directory or absent. Rename it before isolating.")]
    ExileIsFile {
        /// Exile directory path.
        path: PathBuf,
    },
    /// The exile directory does not exist.
    #[error("No exile directory at {path}. Have you run `postkit isolate` first?")]
    ExileMissing {
        /// Exile directory path.
        path: PathBuf,
    },
    /// The exile directory holds nothing to restore.
    #[error("No exiled posts detected in {path}.")]
    ExileEmpty {
        /// Exile directory path.
        path: PathBuf,
    },
    /// The editor command could not be parsed.
    #[error("Invalid editor command: {message}")]
    EditorParse {
        /// Error message describing the parse failure.
        message: String,
    },
    /// The editor process could not be spawned.
    #[error("Failed to run editor `{editor}`: {source}")]
    EditorSpawn {
        /// Editor command that failed.
        editor: String,
        /// Underlying spawn error.
        source: io::Error,
    },
    /// The editor process exited with a non-zero status.
    #[error("Editor `{editor}` exited with status {status}")]
    EditorStatus {
        /// Editor command that exited.
        editor: String,
        /// Exit status returned by the editor.
        status: ExitStatus,
    },
    /// The default-application opener failed.
    #[error("Failed to open {path}: {source}")]
    OpenFailed {
        /// File that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl Error {
    /// Map errors to exit codes for CLI termination.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Cancelled => ExitCode::SUCCESS,
            _ => ExitCode::from(1),
        }
    }

    /// Build a validation error from a message.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Build a file operation error.
    pub(crate) fn file_op(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileOperation {
            action,
            path: path.into(),
            source,
        }
    }
}
