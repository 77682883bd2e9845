//! Core types for bumpwright

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Semantic version component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// Bug fixes and maintenance
    Patch,
    /// New backwards compatible features
    Minor,
    /// Breaking changes
    Major,
}

impl BumpType {
    /// Returns the string representation of the bump type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }

    /// Parse a bump type, treating anything unrecognised as a patch
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Patch)
    }

    /// Get the higher priority bump type
    pub fn max(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }
}

impl Default for BumpType {
    fn default() -> Self {
        Self::Patch
    }
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BumpType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(format!("Unknown bump type: {}", s)),
        }
    }
}

/// Classified view of the commits going into a release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAnalysis {
    /// Aggregate bump for the release
    pub bump_type: BumpType,
    /// Rendered release notes
    pub changelog: String,
    /// Why the bump type was chosen
    pub reasons: Vec<String>,
    /// Breaking changes, in collection order
    pub breaking_changes: Vec<String>,
    /// New features, in collection order
    pub features: Vec<String>,
    /// Bug fixes and maintenance, in collection order
    pub fixes: Vec<String>,
}

impl CommitAnalysis {
    /// Set the rendered changelog
    pub fn with_changelog(mut self, changelog: impl Into<String>) -> Self {
        self.changelog = changelog.into();
        self
    }

    /// True when nothing was categorised
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
            && self.breaking_changes.is_empty()
            && self.features.is_empty()
            && self.fixes.is_empty()
    }
}

/// How the next version was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpSource {
    /// Derived from commit analysis
    Analyzed(BumpType),
    /// Supplied explicitly by the caller
    Forced,
}

impl std::fmt::Display for BumpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Analyzed(bump) => write!(f, "{}", bump),
            Self::Forced => write!(f, "forced"),
        }
    }
}

/// Result of a release run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseSummary {
    /// Version before this run
    pub previous_version: String,
    /// Version produced by this run
    pub version: String,
    /// Bump applied, or `forced`
    pub bump_type: String,
    /// Rendered changelog (empty for forced versions)
    pub changelog: String,
    /// Tag name for the new version
    pub tag: String,
    /// Files rewritten with the new version
    pub updated_files: Vec<PathBuf>,
    /// URL of the created or existing release
    pub release_url: Option<String>,
}

impl ReleaseSummary {
    /// Create a new release summary
    pub fn new(
        previous_version: impl Into<String>,
        version: impl Into<String>,
        source: BumpSource,
    ) -> Self {
        Self {
            previous_version: previous_version.into(),
            version: version.into(),
            bump_type: source.to_string(),
            changelog: String::new(),
            tag: String::new(),
            updated_files: Vec::new(),
            release_url: None,
        }
    }

    /// Set the changelog
    pub fn with_changelog(mut self, changelog: impl Into<String>) -> Self {
        self.changelog = changelog.into();
        self
    }

    /// Set the tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Named outputs exposed to the calling workflow
    pub fn outputs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("previous_version", self.previous_version.as_str()),
            ("version", self.version.as_str()),
            ("bump_type", self.bump_type.as_str()),
            ("changelog", self.changelog.as_str()),
        ]
    }
}
