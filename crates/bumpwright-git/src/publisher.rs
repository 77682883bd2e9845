//! Release publishing

use tracing::{info, instrument, warn};

use bumpwright_core::error::HostError;
use bumpwright_core::workflow::format_tag;

use crate::host::ReleaseHost;
use crate::types::{CreateReleaseOutcome, NewRelease};

/// Body used when the changelog is empty
pub fn default_release_body(version: &str) -> String {
    format!(
        "## Release {}\n\nAutomated release created by bumpwright.",
        version
    )
}

/// Creates the host release for a version, or finds the existing one
pub struct ReleasePublisher<'a, H: ReleaseHost + ?Sized> {
    host: &'a H,
    draft: bool,
    prerelease: bool,
    target_commitish: Option<String>,
    page_size: u8,
}

impl<'a, H: ReleaseHost + ?Sized> ReleasePublisher<'a, H> {
    /// Create a publisher over `host`
    pub fn new(host: &'a H) -> Self {
        Self {
            host,
            draft: false,
            prerelease: false,
            target_commitish: None,
            page_size: 100,
        }
    }

    /// Set the draft flag
    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    /// Set the prerelease flag
    pub fn with_prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = prerelease;
        self
    }

    /// Point the release at a specific commit
    pub fn with_target(mut self, sha: impl Into<String>) -> Self {
        self.target_commitish = Some(sha.into());
        self
    }

    /// Page size for the existing-release lookup
    pub fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size;
        self
    }

    /// The release request for `version`
    pub fn build_release(&self, version: &str, changelog: &str, tag_prefix: &str) -> NewRelease {
        let tag_name = format_tag(tag_prefix, version);
        let body = if changelog.trim().is_empty() {
            default_release_body(version)
        } else {
            changelog.to_string()
        };

        NewRelease {
            name: format!("Release {}", tag_name),
            tag_name,
            body,
            draft: self.draft,
            prerelease: self.prerelease,
            target_commitish: self.target_commitish.clone(),
        }
    }

    /// Publish the release and return its URL.
    ///
    /// When a release for the tag already exists its URL is returned instead,
    /// or an empty string when the listing does not contain it.
    #[instrument(skip(self, changelog))]
    pub async fn publish(
        &self,
        version: &str,
        changelog: &str,
        tag_prefix: &str,
    ) -> Result<String, HostError> {
        let release = self.build_release(version, changelog, tag_prefix);

        match self.host.create_release(&release).await? {
            CreateReleaseOutcome::Created(created) => {
                info!(tag = %created.tag_name, url = %created.html_url, "release published");
                Ok(created.html_url)
            }
            CreateReleaseOutcome::AlreadyExists => {
                warn!(tag = %release.tag_name, "release already exists, looking it up");
                let existing = self
                    .host
                    .list_releases(self.page_size)
                    .await?
                    .into_iter()
                    .find(|r| r.tag_name == release.tag_name);

                match existing {
                    Some(found) => Ok(found.html_url),
                    None => {
                        warn!(tag = %release.tag_name, "existing release not found in listing");
                        Ok(String::new())
                    }
                }
            }
        }
    }
}
