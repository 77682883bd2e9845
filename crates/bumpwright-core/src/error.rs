//! Error types for bumpwright

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BumpwrightError
pub type Result<T> = std::result::Result<T, BumpwrightError>;

/// Main error type for bumpwright operations
#[derive(Debug, Error)]
pub enum BumpwrightError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Source-control host and local git errors
    #[error(transparent)]
    Host(#[from] HostError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Commit analysis errors
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    /// Version file errors
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the source-control host and local git operations
#[derive(Debug, Error)]
pub enum HostError {
    /// Repository slug missing or malformed
    #[error("Repository must be given as owner/name, got '{0}'")]
    InvalidRepository(String),

    /// Git repository not found
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// The host API answered with a failure status
    #[error("Host API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure talking to the host
    #[error("Host request failed: {0}")]
    Request(String),

    /// Unexpected response body
    #[error("Unexpected host response: {0}")]
    Decode(String),

    /// A git command exited unsuccessfully
    #[error("Command failed: {command} - {reason}")]
    CommandFailed { command: String, reason: String },

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// The string is not a semantic version
    #[error("Invalid version: {0}")]
    InvalidVersion(String),
}

/// Commit analysis errors
///
/// Every variant raised on the language-model path is recovered by the
/// deterministic classifier; none of them abort a run.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Transport-level failure
    #[error("Model request failed: {0}")]
    Request(String),

    /// The model API answered with a failure status
    #[error("Model API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The completion carried no content
    #[error("Model returned an empty response")]
    EmptyResponse,

    /// The completion was not the requested JSON document
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

/// Version file errors
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Manifest not found
    #[error("Manifest not found at {0}")]
    ManifestNotFound(PathBuf),

    /// Failed to parse manifest
    #[error("Failed to parse {path}: {reason}")]
    ManifestParseError { path: PathBuf, reason: String },

    /// The manifest has no version field to rewrite
    #[error("No version field found in {0}")]
    VersionFieldMissing(PathBuf),

    /// Failed to write manifest
    #[error("Failed to update {path}: {reason}")]
    ManifestUpdateError { path: PathBuf, reason: String },

    /// Invalid search pattern
    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdapterError {
    /// Parse failure for the file at `path`
    pub fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ManifestParseError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Write failure for the file at `path`
    pub fn update(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ManifestUpdateError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
