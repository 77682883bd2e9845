//! GitHub REST API client

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use bumpwright_core::error::HostError;

use crate::host::{CommitHistory, ReleaseHost};
use crate::types::{CommitInfo, CreateReleaseOutcome, NewRelease, ReleaseInfo, TagInfo};

const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("bumpwright/", env!("CARGO_PKG_VERSION"));

/// Repository coordinates on GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepository {
    /// Owner (user or organisation)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl FromStr for GitHubRepository {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(HostError::InvalidRepository(s.to_string())),
        }
    }
}

impl std::fmt::Display for GitHubRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct ApiTag {
    name: String,
    commit: Option<ApiCommitRef>,
}

#[derive(Debug, Deserialize)]
struct ApiCommitRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ApiCommit {
    sha: String,
    commit: ApiCommitDetail,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetail {
    message: String,
    author: Option<ApiAuthor>,
}

#[derive(Debug, Deserialize)]
struct ApiAuthor {
    name: Option<String>,
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ApiComparison {
    #[serde(default)]
    commits: Vec<ApiCommit>,
}

fn commit_from_api(api: ApiCommit) -> CommitInfo {
    let mut info = CommitInfo::new(api.sha, &api.commit.message);
    if let Some(author) = api.commit.author {
        if let Some(name) = author.name {
            info = info.with_author(name);
        }
        if let Some(date) = author.date {
            info = info.with_timestamp(date);
        }
    }
    info
}

/// GitHub API client for one repository
pub struct GitHubClient {
    client: Client,
    api_url: String,
    repository: GitHubRepository,
    token: String,
}

impl GitHubClient {
    /// Create a client for `repository` authenticated with `token`
    pub fn new(repository: GitHubRepository, token: impl Into<String>) -> Result<Self, HostError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HostError::Request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            repository,
            token: token.into(),
        })
    }

    /// Use a different API base URL (GitHub Enterprise)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Repository this client talks to
    pub fn repository(&self) -> &GitHubRepository {
        &self.repository
    }

    /// Endpoint under `repos/{owner}/{name}`; each segment is percent-encoded
    fn repo_url(&self, segments: &[&str], per_page: Option<u8>) -> Result<Url, HostError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| HostError::Request(format!("invalid API URL {}: {}", self.api_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| HostError::Request(format!("API URL cannot be a base: {}", self.api_url)))?
            .pop_if_empty()
            .extend(["repos", self.repository.owner.as_str(), self.repository.name.as_str()])
            .extend(segments);
        if let Some(per_page) = per_page {
            url.query_pairs_mut().append_pair("per_page", &per_page.to_string());
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, HostError> {
        debug!(url = %url, "GET");
        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| HostError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HostError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| HostError::Decode(e.to_string()))
    }
}

/// A 422 whose body names `already_exists` is the host's conflict signal
fn is_already_exists(status: StatusCode, body: &str) -> bool {
    status == StatusCode::UNPROCESSABLE_ENTITY && body.contains("already_exists")
}

#[async_trait]
impl CommitHistory for GitHubClient {
    fn name(&self) -> &str {
        "github"
    }

    #[instrument(skip(self), fields(repository = %self.repository))]
    async fn list_tags(&self, per_page: u8) -> Result<Vec<TagInfo>, HostError> {
        let url = self.repo_url(&["tags"], Some(per_page))?;
        let tags: Vec<ApiTag> = self.get_json(url).await?;
        debug!(count = tags.len(), "listed tags");

        Ok(tags
            .into_iter()
            .map(|t| {
                let tag = TagInfo::new(t.name);
                match t.commit {
                    Some(commit) => tag.with_commit(commit.sha),
                    None => tag,
                }
            })
            .collect())
    }

    #[instrument(skip(self), fields(repository = %self.repository))]
    async fn compare(&self, base: &str, head: &str) -> Result<Vec<CommitInfo>, HostError> {
        let range = format!("{}...{}", base, head);
        let url = self.repo_url(&["compare", range.as_str()], None)?;
        let comparison: ApiComparison = self.get_json(url).await?;
        debug!(count = comparison.commits.len(), "compared commits");
        Ok(comparison.commits.into_iter().map(commit_from_api).collect())
    }

    #[instrument(skip(self), fields(repository = %self.repository))]
    async fn recent_commits(&self, limit: u8) -> Result<Vec<CommitInfo>, HostError> {
        let url = self.repo_url(&["commits"], Some(limit))?;
        let commits: Vec<ApiCommit> = self.get_json(url).await?;
        debug!(count = commits.len(), "listed commits");
        Ok(commits.into_iter().map(commit_from_api).collect())
    }
}

#[async_trait]
impl ReleaseHost for GitHubClient {
    #[instrument(skip(self, release), fields(repository = %self.repository, tag = %release.tag_name))]
    async fn create_release(&self, release: &NewRelease) -> Result<CreateReleaseOutcome, HostError> {
        let url = self.repo_url(&["releases"], None)?;
        let response = self
            .authorized(self.client.post(url))
            .json(release)
            .send()
            .await
            .map_err(|e| HostError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let created: ReleaseInfo = response
                .json()
                .await
                .map_err(|e| HostError::Decode(e.to_string()))?;
            info!(tag = %created.tag_name, url = %created.html_url, "created release");
            return Ok(CreateReleaseOutcome::Created(created));
        }

        let body = response.text().await.unwrap_or_default();
        if is_already_exists(status, &body) {
            warn!(tag = %release.tag_name, "release already exists");
            return Ok(CreateReleaseOutcome::AlreadyExists);
        }

        Err(HostError::Api {
            status: status.as_u16(),
            message: body,
        })
    }

    #[instrument(skip(self), fields(repository = %self.repository))]
    async fn list_releases(&self, per_page: u8) -> Result<Vec<ReleaseInfo>, HostError> {
        let url = self.repo_url(&["releases"], Some(per_page))?;
        self.get_json(url).await
    }
}
