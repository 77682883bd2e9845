//! Git and host types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Subject line
    pub message: String,
    /// Remaining message text after the subject
    pub body: Option<String>,
    /// Author name
    pub author: String,
    /// Commit timestamp
    pub timestamp: Option<DateTime<Utc>>,
}

impl CommitInfo {
    /// Create a CommitInfo from a full commit message
    pub fn new(hash: impl Into<String>, full_message: &str) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();
        let (message, body) = split_message(full_message);

        Self {
            hash,
            short_hash,
            message,
            body,
            author: String::new(),
            timestamp: None,
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Get the full message including body
    pub fn full_message(&self) -> String {
        match &self.body {
            Some(body) => format!("{}\n\n{}", self.message, body),
            None => self.message.clone(),
        }
    }
}

fn split_message(full: &str) -> (String, Option<String>) {
    let full = full.trim_end();
    match full.split_once('\n') {
        Some((subject, rest)) => {
            let rest = rest.trim();
            let body = (!rest.is_empty()).then(|| rest.to_string());
            (subject.trim_end().to_string(), body)
        }
        None => (full.to_string(), None),
    }
}

/// Information about a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: Option<String>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_hash: None,
        }
    }

    /// Set the target commit
    pub fn with_commit(mut self, hash: impl Into<String>) -> Self {
        self.commit_hash = Some(hash.into());
        self
    }
}

/// A release to be created on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    /// Tag the release is attached to
    pub tag_name: String,
    /// Release title
    pub name: String,
    /// Release notes
    pub body: String,
    /// Draft flag
    pub draft: bool,
    /// Prerelease flag
    pub prerelease: bool,
    /// Commit the tag is created at, when the tag does not exist yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
}

/// A release as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Host identifier
    #[serde(default)]
    pub id: u64,
    /// Tag name
    pub tag_name: String,
    /// Release title
    #[serde(default)]
    pub name: Option<String>,
    /// Web URL
    #[serde(default)]
    pub html_url: String,
    /// Draft flag
    #[serde(default)]
    pub draft: bool,
    /// Prerelease flag
    #[serde(default)]
    pub prerelease: bool,
}

/// Outcome of a create-release call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateReleaseOutcome {
    /// The release was created
    Created(ReleaseInfo),
    /// A release for the tag already exists
    AlreadyExists,
}
