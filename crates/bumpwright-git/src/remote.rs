//! Git command-line operations
//!
//! Committing, tagging and pushing go through the `git` binary so the
//! runner's configured credentials and hooks apply.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, instrument};

use bumpwright_core::error::HostError;

use crate::repository::Result;

/// Runs git commands inside a working tree
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Create a runner for `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Working tree the commands run in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Whether a `git` executable is on PATH
    pub fn is_available() -> bool {
        which::which("git").is_ok()
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        debug!(command = %command, "running git");
        let start = std::time::Instant::now();

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| HostError::CommandFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            command = %command,
            status = ?output.status.code(),
            duration_ms = start.elapsed().as_millis(),
            "git finished"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            return Err(HostError::CommandFailed {
                command,
                reason: if stderr.is_empty() { stdout } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Set the committer identity for this repository
    pub fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        self.run(&["config", "--local", "user.email", email])?;
        self.run(&["config", "--local", "user.name", name])?;
        Ok(())
    }

    /// Stage every change in the working tree
    pub fn add_all(&self) -> Result<()> {
        self.run(&["add", "-A"]).map(|_| ())
    }

    /// Whether the index differs from HEAD
    pub fn has_staged_changes(&self) -> Result<bool> {
        let status = Command::new("git")
            .args(["diff", "--cached", "--quiet"])
            .current_dir(&self.workdir)
            .status()
            .map_err(|e| HostError::CommandFailed {
                command: "git diff --cached --quiet".to_string(),
                reason: e.to_string(),
            })?;
        Ok(!status.success())
    }

    /// Commit the staged changes
    #[instrument(skip(self))]
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message])?;
        info!(message, "committed version changes");
        Ok(())
    }

    /// Create an annotated tag at HEAD
    #[instrument(skip(self))]
    pub fn tag(&self, name: &str, message: &str) -> Result<()> {
        self.run(&["tag", name, "-m", message])?;
        info!(name, "created tag");
        Ok(())
    }

    /// Push HEAD to `branch` on `remote`
    #[instrument(skip(self))]
    pub fn push_head(&self, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!("HEAD:{}", branch);
        self.run(&["push", remote, &refspec])?;
        info!(remote, branch, "pushed commits");
        Ok(())
    }

    /// Push a single tag to `remote`
    #[instrument(skip(self))]
    pub fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.run(&["push", remote, tag])?;
        info!(remote, tag, "pushed tag");
        Ok(())
    }
}

/// Branch name from a fully qualified ref such as `refs/heads/main`
pub fn branch_from_ref(git_ref: &str) -> &str {
    git_ref.strip_prefix("refs/heads/").unwrap_or(git_ref)
}
