//! Source-control host collaborator traits

use async_trait::async_trait;

use bumpwright_core::error::HostError;

use crate::types::{CommitInfo, CreateReleaseOutcome, NewRelease, ReleaseInfo, TagInfo};

/// Read access to tags and commit history
#[async_trait]
pub trait CommitHistory: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// List up to `per_page` tags
    async fn list_tags(&self, per_page: u8) -> Result<Vec<TagInfo>, HostError>;

    /// Commits reachable from `head` but not from `base`
    async fn compare(&self, base: &str, head: &str) -> Result<Vec<CommitInfo>, HostError>;

    /// The most recent `limit` commits on the current branch
    async fn recent_commits(&self, limit: u8) -> Result<Vec<CommitInfo>, HostError>;
}

/// Release management on the host
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    /// Create a release, reporting a conflicting existing release as a value
    async fn create_release(&self, release: &NewRelease) -> Result<CreateReleaseOutcome, HostError>;

    /// List up to `per_page` releases
    async fn list_releases(&self, per_page: u8) -> Result<Vec<ReleaseInfo>, HostError>;
}
