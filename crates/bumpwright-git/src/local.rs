//! Commit history read from the local repository

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use git2::{Oid, Sort};
use tracing::{debug, instrument};

use bumpwright_core::error::HostError;

use crate::host::CommitHistory;
use crate::repository::{GitRepo, Result};
use crate::types::{CommitInfo, TagInfo};

/// History backed by a local git repository
///
/// Used when no host repository or credential is configured. The repository
/// is reopened per call so the history can be shared across threads.
#[derive(Debug, Clone)]
pub struct LocalHistory {
    path: PathBuf,
}

impl LocalHistory {
    /// Create a history for the repository containing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn repo(&self) -> Result<GitRepo> {
        GitRepo::discover(&self.path)
    }
}

impl GitRepo {
    /// Get all tags with the commit they point to
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            let mut tag = TagInfo::new(name);
            if let Ok(commit) = self
                .repo
                .find_object(oid, None)
                .and_then(|obj| obj.peel_to_commit())
            {
                tag = tag.with_commit(commit.id().to_string());
            }
            tags.push(tag);

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Commits reachable from `head` and not from `base`, oldest first
    pub fn commits_between(&self, base: &str, head: &str) -> Result<Vec<CommitInfo>> {
        let base = self.repo.revparse_single(base)?.peel_to_commit()?.id();
        let head = self.repo.revparse_single(head)?.peel_to_commit()?.id();
        self.walk(head, Some(base), true, None)
    }

    /// The most recent `count` commits from HEAD, newest first
    pub fn recent_commits(&self, count: usize) -> Result<Vec<CommitInfo>> {
        let head = self.head_commit()?.id();
        self.walk(head, None, false, Some(count))
    }

    fn walk(
        &self,
        head: Oid,
        hide: Option<Oid>,
        oldest_first: bool,
        limit: Option<usize>,
    ) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        let mut sorting = Sort::TOPOLOGICAL | Sort::TIME;
        if oldest_first {
            sorting |= Sort::REVERSE;
        }
        revwalk.set_sorting(sorting)?;
        revwalk.push(head)?;
        if let Some(hide) = hide {
            revwalk.hide(hide)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk.take(limit.unwrap_or(usize::MAX)) {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(commit_to_info(&commit));
        }

        Ok(commits)
    }
}

fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();
    let mut info = CommitInfo::new(
        commit.id().to_string(),
        &String::from_utf8_lossy(commit.message_bytes()),
    )
    .with_author(author.name().unwrap_or_default());

    if let Some(timestamp) = Utc.timestamp_opt(commit.time().seconds(), 0).single() {
        info = info.with_timestamp(timestamp);
    }

    info
}

#[async_trait]
impl CommitHistory for LocalHistory {
    fn name(&self) -> &str {
        "local"
    }

    async fn list_tags(&self, _per_page: u8) -> std::result::Result<Vec<TagInfo>, HostError> {
        self.repo()?.tags()
    }

    async fn compare(&self, base: &str, head: &str) -> std::result::Result<Vec<CommitInfo>, HostError> {
        self.repo()?.commits_between(base, head)
    }

    async fn recent_commits(&self, limit: u8) -> std::result::Result<Vec<CommitInfo>, HostError> {
        self.repo()?.recent_commits(limit as usize)
    }
}
