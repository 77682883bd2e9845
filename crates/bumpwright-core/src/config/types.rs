//! Configuration types

use serde::{Deserialize, Serialize};

/// Main configuration for bumpwright
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Versioning configuration
    pub versioning: VersioningConfig,

    /// Commit analyzer configuration
    pub analyzer: AnalyzerConfig,

    /// Source-control host configuration
    pub host: HostConfig,

    /// Version file configuration
    pub files: FilesConfig,

    /// Git configuration
    pub git: GitConfig,

    /// Release configuration
    pub release: ReleaseConfig,
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Prefix prepended to versions to form tag names
    pub tag_prefix: String,

    /// Version assumed when no release tag exists
    pub initial_version: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            tag_prefix: "v".to_string(),
            initial_version: "0.0.0".to_string(),
        }
    }
}

/// Commit analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Whether to consult the language model at all
    pub enabled: bool,

    /// Model name
    pub model: String,

    /// Base URL of the chat completions API
    pub api_base: String,

    /// Sampling temperature
    pub temperature: f64,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gpt-4o-mini".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            temperature: 0.1,
            timeout_secs: 60,
        }
    }
}

/// Source-control host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// REST API base URL
    pub api_url: String,

    /// Repository as `owner/name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Page size for tag, commit and release listings
    pub page_size: u8,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            repository: None,
            page_size: 100,
        }
    }
}

/// Version file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Whether to rewrite version files
    pub update: bool,

    /// Generic version marker file
    pub version_file: String,

    /// Directory names skipped by recursive searches
    pub exclude_dirs: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            update: true,
            version_file: ".version".to_string(),
            exclude_dirs: vec![
                "node_modules".to_string(),
                "venv".to_string(),
                ".venv".to_string(),
                "target".to_string(),
            ],
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Whether to commit and tag the rewritten files
    pub commit: bool,

    /// Whether to push the commit and tag
    pub push: bool,

    /// Remote name
    pub remote: String,

    /// Committer name
    pub user_name: String,

    /// Committer email
    pub user_email: String,

    /// Commit message template
    pub commit_message: String,

    /// Annotated tag message template
    pub tag_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            commit: true,
            push: true,
            remote: "origin".to_string(),
            user_name: "GitHub Action".to_string(),
            user_email: "action@github.com".to_string(),
            commit_message: "chore(release): bump version to {version} [skip ci]".to_string(),
            tag_message: "Release version {version}".to_string(),
        }
    }
}

/// Release configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Whether to create a release on the host
    pub create: bool,

    /// Mark the release as a draft
    pub draft: bool,

    /// Mark the release as a prerelease
    pub prerelease: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            create: true,
            draft: false,
            prerelease: false,
        }
    }
}
