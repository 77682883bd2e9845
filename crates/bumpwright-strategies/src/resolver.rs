//! Version resolution from tags and commit history

use ::semver::Version;
use tracing::{debug, info, instrument, warn};

use bumpwright_core::error::Result;
use bumpwright_git::{CommitHistory, CommitInfo};

use crate::semver::SemVerStrategy;
use crate::traits::VersionStrategy;

/// Fallback version when no release tag exists
pub const INITIAL_VERSION: &str = "0.0.0";

/// Result of looking up the latest release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Highest released version
    pub current_version: Version,
    /// Name of the tag that carries it, if any
    pub tag: Option<String>,
}

impl Resolution {
    fn initial(version: Version) -> Self {
        Self {
            current_version: version,
            tag: None,
        }
    }
}

/// True for commits the analyzer should never see: merges and
/// commits carrying a CI-skip marker (usually a previous release commit).
pub fn is_release_noise(message: &str) -> bool {
    message.starts_with("Merge") || message.contains("[skip ci]") || message.contains("[ci skip]")
}

/// Resolves the current version and pending commits against a history source
pub struct VersionResolver<'a, H: CommitHistory + ?Sized> {
    history: &'a H,
    tag_prefix: String,
    page_size: u8,
    initial_version: Version,
    strategy: SemVerStrategy,
}

impl<'a, H: CommitHistory + ?Sized> VersionResolver<'a, H> {
    /// Create a resolver with the default `v` prefix
    pub fn new(history: &'a H) -> Self {
        Self {
            history,
            tag_prefix: "v".to_string(),
            page_size: 100,
            initial_version: Version::new(0, 0, 0),
            strategy: SemVerStrategy::new(),
        }
    }

    /// Set the tag prefix
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    /// Set the page size for tag and commit listings (clamped to 1..=100)
    pub fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size.clamp(1, 100);
        self
    }

    /// Set the version reported when no tag exists
    pub fn with_initial_version(mut self, version: &str) -> Result<Self> {
        self.initial_version = self.strategy.parse(version)?;
        Ok(self)
    }

    /// Strip the prefix (first occurrence only) and parse the remainder
    fn version_from_tag(&self, name: &str) -> Option<Version> {
        let stripped = if self.tag_prefix.is_empty() {
            name.to_string()
        } else {
            name.replacen(&self.tag_prefix, "", 1)
        };
        Version::parse(&stripped).ok()
    }

    /// Find the highest semver tag.
    ///
    /// A failed tag listing is not an error: the initial version is returned.
    #[instrument(skip(self), fields(host = self.history.name()))]
    pub async fn resolve(&self) -> Resolution {
        let tags = match self.history.list_tags(self.page_size).await {
            Ok(tags) => tags,
            Err(e) => {
                warn!(error = %e, "Failed to list tags, assuming no previous release");
                return Resolution::initial(self.initial_version.clone());
            }
        };

        let latest = tags
            .into_iter()
            .filter_map(|tag| self.version_from_tag(&tag.name).map(|v| (v, tag.name)))
            .max_by(|(a, _), (b, _)| a.cmp(b));

        match latest {
            Some((version, tag)) => {
                info!(%version, %tag, "Resolved current version");
                Resolution {
                    current_version: version,
                    tag: Some(tag),
                }
            }
            None => {
                info!(version = %self.initial_version, "No release tags found");
                Resolution::initial(self.initial_version.clone())
            }
        }
    }

    /// Current released version
    pub async fn current_version(&self) -> Version {
        self.resolve().await.current_version
    }

    /// Commits after the resolved tag, or recent history when there is none.
    /// Merge and CI-skip commits are dropped.
    #[instrument(skip(self, resolution), fields(tag = ?resolution.tag))]
    pub async fn commits_since(&self, resolution: &Resolution) -> Result<Vec<String>> {
        let commits: Vec<CommitInfo> = match &resolution.tag {
            Some(tag) => self.history.compare(tag, "HEAD").await?,
            None => self.history.recent_commits(self.page_size).await?,
        };
        let total = commits.len();

        let messages: Vec<String> = commits
            .iter()
            .map(CommitInfo::full_message)
            .filter(|m| !is_release_noise(m))
            .collect();

        debug!(total, kept = messages.len(), "Collected commits");
        Ok(messages)
    }

    /// Resolve the latest tag and list the commits after it
    pub async fn commits_since_last_tag(&self) -> Result<Vec<String>> {
        let resolution = self.resolve().await;
        self.commits_since(&resolution).await
    }
}
