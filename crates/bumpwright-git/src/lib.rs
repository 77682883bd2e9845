//! bumpwright git - source-control collaborators
//!
//! This crate provides the host traits used by the version resolver and the
//! release publisher, a GitHub REST implementation, a local git2-backed
//! history, and the git command-line operations for committing, tagging and
//! pushing a release.

mod github;
mod host;
mod local;
mod publisher;
mod remote;
mod repository;
pub mod types;

pub use github::{GitHubClient, GitHubRepository};
pub use host::{CommitHistory, ReleaseHost};
pub use local::LocalHistory;
pub use publisher::{default_release_body, ReleasePublisher};
pub use remote::{branch_from_ref, GitCli};
pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, CreateReleaseOutcome, NewRelease, ReleaseInfo, TagInfo};
