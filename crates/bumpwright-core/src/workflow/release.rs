//! Release run options

use tracing::debug;

use crate::config::Config;

/// Resolved switches for a release run
///
/// Starts from the configuration file and is then overridden by command-line
/// flags and environment inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// Prefix for tag names
    pub tag_prefix: String,
    /// Explicit version that bypasses analysis
    pub force_version: Option<String>,
    /// Rewrite version files
    pub update_files: bool,
    /// Commit and tag the rewritten files
    pub commit: bool,
    /// Push the commit and tag
    pub push: bool,
    /// Create a release on the host
    pub create_release: bool,
    /// Compute and report without touching files, git or the host
    pub dry_run: bool,
}

impl ReleaseOptions {
    /// Options as described by the configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            tag_prefix: config.versioning.tag_prefix.clone(),
            force_version: None,
            update_files: config.files.update,
            commit: config.git.commit,
            push: config.git.push,
            create_release: config.release.create,
            dry_run: false,
        }
    }

    /// Set the tag prefix
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    /// Force an explicit version
    pub fn with_force_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        if !version.trim().is_empty() {
            self.force_version = Some(version.trim().to_string());
        }
        self
    }

    /// Enable dry run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether version files are rewritten in this run
    pub fn should_update_files(&self) -> bool {
        self.update_files && !self.dry_run
    }

    /// Whether a bump commit and tag are made. Requires file updates.
    pub fn should_commit(&self) -> bool {
        let commit = self.commit && self.should_update_files();
        debug!(commit, "resolved commit switch");
        commit
    }

    /// Whether the commit and tag are pushed
    pub fn should_push(&self) -> bool {
        self.push && self.should_commit()
    }

    /// Whether a host release is created
    pub fn should_create_release(&self) -> bool {
        self.create_release && !self.dry_run
    }
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
