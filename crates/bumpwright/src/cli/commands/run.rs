//! Run command: resolve, analyze, update, tag and publish a release

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info, warn};

use bumpwright_adapters::{OsWorkspace, UpdateReport, VersionFileUpdater};
use bumpwright_core::config::Config;
use bumpwright_core::types::{BumpSource, ReleaseSummary};
use bumpwright_core::workflow::{commit_message, format_tag, tag_message, ReleaseOptions};
use bumpwright_git::{branch_from_ref, GitCli, GitRepo, ReleasePublisher};
use bumpwright_strategies::{SemVerStrategy, VersionStrategy};

use crate::cli::output::{self, ActionOutputs};
use crate::cli::{Cli, HostArgs, OutputFormat, Session};

/// Resolve, analyze, update files, tag and publish a release
#[derive(Debug, Args)]
pub struct RunCommand {
    #[command(flatten)]
    pub host: HostArgs,

    /// Release this exact version instead of analyzing commits
    #[arg(long, env = "FORCE_VERSION")]
    pub force_version: Option<String>,

    /// Create a release on the host
    #[arg(long, overrides_with = "no_create_release")]
    pub create_release: bool,

    /// Do not create a host release
    #[arg(long, overrides_with = "create_release")]
    pub no_create_release: bool,

    /// Rewrite version files
    #[arg(long, overrides_with = "no_update_files")]
    pub update_files: bool,

    /// Leave version files untouched
    #[arg(long, overrides_with = "update_files")]
    pub no_update_files: bool,

    /// Commit and tag the version bump
    #[arg(long, overrides_with = "no_commit")]
    pub commit: bool,

    /// Do not commit or tag
    #[arg(long, overrides_with = "commit")]
    pub no_commit: bool,

    /// Push the bump commit and tag
    #[arg(long, overrides_with = "no_push")]
    pub push: bool,

    /// Do not push
    #[arg(long, overrides_with = "push")]
    pub no_push: bool,

    /// Compute the release without touching files, git or the host
    #[arg(long)]
    pub dry_run: bool,

    /// Commit the release points at when nothing was committed
    #[arg(long, env = "GITHUB_SHA")]
    pub sha: Option<String>,

    /// Ref whose branch receives the bump commit
    #[arg(long = "ref", env = "GITHUB_REF")]
    pub git_ref: Option<String>,

    /// File that receives step outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,
}

/// `--x` / `--no-x` pair; `None` keeps the configured value
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl RunCommand {
    /// Execute the run command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(dry_run = self.dry_run, "executing run command");
        let session = Session::load(&self.host)?;
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run(&session, cli))
    }

    fn options(&self, config: &Config) -> ReleaseOptions {
        let mut opts = ReleaseOptions::from_config(config).with_dry_run(self.dry_run);
        if let Some(version) = non_blank(&self.force_version) {
            opts = opts.with_force_version(version);
        }
        if let Some(v) = switch(self.update_files, self.no_update_files) {
            opts.update_files = v;
        }
        if let Some(v) = switch(self.commit, self.no_commit) {
            opts.commit = v;
        }
        if let Some(v) = switch(self.push, self.no_push) {
            opts.push = v;
        }
        if let Some(v) = switch(self.create_release, self.no_create_release) {
            opts.create_release = v;
        }
        opts
    }

    async fn run(&self, session: &Session, cli: &Cli) -> anyhow::Result<()> {
        let opts = self.options(&session.config);
        let outputs = ActionOutputs::new(self.output_file.clone());
        if outputs.is_enabled() {
            debug!(path = ?outputs.path(), "recording step outputs");
        }
        let strategy = SemVerStrategy::new();

        let resolver = session.resolver()?;
        let resolution = resolver.resolve().await;
        let previous = resolution.current_version.to_string();
        info!(version = %previous, tag = ?resolution.tag, "current version");
        outputs.set("previous_version", &previous)?;

        let mut summary = match &opts.force_version {
            Some(forced) => {
                let version = strategy.parse(forced)?;
                info!(version = %version, "using forced version");
                ReleaseSummary::new(&previous, version.to_string(), BumpSource::Forced)
            }
            None => {
                let commits = resolver.commits_since(&resolution).await?;
                if commits.is_empty() {
                    warn!("no commits found since last tag");
                    if cli.shows_notices() {
                        output::warning("No commits since the last release, nothing to do");
                    }
                    return Ok(());
                }
                info!(count = commits.len(), model = session.uses_model(), "analyzing commits");

                let analysis = session.analyzer().analyze(&commits).await;
                let next = strategy.bump(&resolution.current_version, analysis.bump_type);
                info!(bump = %analysis.bump_type, version = %next, "next version");
                ReleaseSummary::new(&previous, next.to_string(), BumpSource::Analyzed(analysis.bump_type))
                    .with_changelog(analysis.changelog)
            }
        };
        let tag = format_tag(&opts.tag_prefix, &summary.version);
        summary = summary.with_tag(tag);

        // previous_version is already recorded
        outputs.set_all(&summary.outputs()[1..])?;

        if opts.should_update_files() {
            let report = self.update_files(session, &summary.version)?;
            print_skipped(&report, cli);
            summary.updated_files = report.updated;
        }

        let committed = if opts.should_commit() {
            self.commit_and_tag(session, &opts, &summary)?
        } else {
            false
        };

        if opts.should_create_release() {
            match session.release_host() {
                Some(host) => {
                    let release = &session.config.release;
                    let mut publisher = ReleasePublisher::new(host)
                        .with_draft(release.draft)
                        .with_prerelease(release.prerelease)
                        .with_page_size(session.config.host.page_size);
                    if let Some(sha) = self.target_sha(&session.root, committed) {
                        publisher = publisher.with_target(sha);
                    }
                    let url = publisher
                        .publish(&summary.version, &summary.changelog, &opts.tag_prefix)
                        .await?;
                    summary.release_url = Some(url).filter(|u| !u.is_empty());
                }
                None => {
                    warn!("release creation requested but no GitHub token and repository configured");
                    if cli.shows_notices() {
                        output::warning("Skipping release: set GITHUB_TOKEN and GITHUB_REPOSITORY");
                    }
                }
            }
        }

        print_summary(&summary, &opts, cli)
    }

    fn update_files(&self, session: &Session, version: &str) -> anyhow::Result<UpdateReport> {
        let files = &session.config.files;
        let workspace = OsWorkspace::new(&session.root).with_exclude_dirs(files.exclude_dirs.clone());
        let report = VersionFileUpdater::new(&workspace)
            .with_version_file(&files.version_file)
            .update(version)?;
        info!(
            updated = report.updated.len(),
            skipped = report.skipped.len(),
            "updated version files"
        );
        Ok(report)
    }

    /// Returns whether a commit and tag were made
    fn commit_and_tag(
        &self,
        session: &Session,
        opts: &ReleaseOptions,
        summary: &ReleaseSummary,
    ) -> anyhow::Result<bool> {
        anyhow::ensure!(GitCli::is_available(), "git executable not found on PATH");
        let config = &session.config;
        let git = GitCli::new(&session.root);

        git.configure_identity(&config.git.user_name, &config.git.user_email)?;
        git.add_all()?;

        if !git.has_staged_changes()? {
            info!("no changes to commit");
            return Ok(false);
        }
        if let Err(e) = git.commit(&commit_message(config, &summary.version)) {
            warn!(error = %e, "commit failed, skipping tag and push");
            return Ok(false);
        }

        git.tag(&summary.tag, &tag_message(config, &summary.version))?;
        info!(tag = %summary.tag, "created tag");

        if opts.should_push() {
            let branch = self.push_branch(&session.root)?;
            git.push_head(&config.git.remote, &branch)?;
            git.push_tag(&config.git.remote, &summary.tag)?;
            info!(remote = %config.git.remote, branch = %branch, "pushed changes and tag");
        }
        Ok(true)
    }

    fn push_branch(&self, root: &Path) -> anyhow::Result<String> {
        if let Some(git_ref) = non_blank(&self.git_ref) {
            return Ok(branch_from_ref(git_ref).to_string());
        }
        GitRepo::open(root)?
            .current_branch()?
            .ok_or_else(|| anyhow::anyhow!("HEAD is detached; pass --ref to choose the branch to push"))
    }

    /// The bump commit when one was made, else `--sha`, else the local HEAD
    fn target_sha(&self, root: &Path, committed: bool) -> Option<String> {
        let head = || GitRepo::open(root).and_then(|repo| repo.head_sha()).ok();
        if committed {
            return head();
        }
        non_blank(&self.sha).map(str::to_string).or_else(head)
    }
}

fn print_skipped(report: &UpdateReport, cli: &Cli) {
    if !cli.shows_notices() {
        return;
    }
    for skipped in &report.skipped {
        output::warning(&format!("Skipped {}: {}", skipped.path.display(), skipped.error));
    }
}

fn print_summary(summary: &ReleaseSummary, opts: &ReleaseOptions, cli: &Cli) -> anyhow::Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(summary)?;
            value["dry_run"] = serde_json::Value::Bool(opts.dry_run);
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text if cli.quiet => println!("{}", summary.version),
        OutputFormat::Text => {
            if opts.dry_run {
                output::info("Dry run: no files, commits or releases were changed");
                println!();
            }
            println!("{}", output::header("Release"));
            println!();
            println!("{}", output::key_value("Previous version", &summary.previous_version));
            println!("{}", output::key_value("Version", output::version(&summary.version)));
            println!("{}", output::key_value("Bump type", output::bump(&summary.bump_type)));
            println!("{}", output::key_value("Tag", output::tag(&summary.tag)));

            if !summary.updated_files.is_empty() {
                println!();
                println!("{}", output::header("Updated files"));
                for path in &summary.updated_files {
                    println!("  {}", output::path(path.display()));
                }
            }
            if let Some(url) = &summary.release_url {
                println!();
                println!("{}", output::key_value("Release", url));
            }
            if !summary.changelog.is_empty() {
                println!();
                print!("{}", summary.changelog);
            }
            println!();
            output::success(&format!("Released {}", summary.version));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse_run(args: &[&str]) -> RunCommand {
        let argv = std::iter::once("bumpwright").chain(std::iter::once("run")).chain(args.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            crate::cli::Commands::Run(cmd) => cmd,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_switch() {
        assert_eq!(switch(false, false), None);
        assert_eq!(switch(true, false), Some(true));
        assert_eq!(switch(false, true), Some(false));
    }

    #[test]
    fn test_flags_override_config() {
        let cmd = parse_run(&["--no-push", "--no-create-release", "--force-version", "2.0.0"]);
        let opts = cmd.options(&Config::default());

        assert!(opts.commit);
        assert!(!opts.push);
        assert!(!opts.create_release);
        assert_eq!(opts.force_version.as_deref(), Some("2.0.0"));
        assert!(opts.should_commit());
        assert!(!opts.should_push());
    }

    #[test]
    fn test_later_flag_wins() {
        let cmd = parse_run(&["--no-commit", "--commit"]);
        assert!(cmd.options(&Config::default()).commit);

        let mut config = Config::default();
        config.git.commit = false;
        let cmd = parse_run(&[]);
        assert!(!cmd.options(&config).commit);
    }

    #[test]
    fn test_dry_run_and_blank_force_version() {
        let cmd = RunCommand {
            force_version: Some("   ".to_string()),
            ..parse_run(&["--dry-run"])
        };
        let opts = cmd.options(&Config::default());
        assert!(opts.force_version.is_none());
        assert!(!opts.should_update_files());
        assert!(!opts.should_create_release());
    }

    #[test]
    fn test_push_branch_from_ref() {
        let cmd = RunCommand {
            git_ref: Some("refs/heads/main".to_string()),
            ..parse_run(&[])
        };
        assert_eq!(cmd.push_branch(Path::new("/nonexistent")).unwrap(), "main");
    }

    /// Repository whose only commit is tagged v1.0.0
    fn tagged_repo() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("README.md"), "# widgets\n").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let oid = repo.commit(Some("HEAD"), &sig, &sig, "chore: initial", &tree, &[]).unwrap();

        let commit = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight("v1.0.0", &commit, false).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_no_new_commits_records_only_previous_version() {
        let repo = tagged_repo();
        let out = repo.path().join("github_output");
        let session = Session::local(repo.path().to_path_buf(), Config::default());
        let cli = Cli::try_parse_from(["bumpwright", "--format", "json", "version"]).unwrap();
        let cmd = RunCommand {
            force_version: None,
            output_file: Some(out.clone()),
            ..parse_run(&[])
        };

        cmd.run(&session, &cli).await.unwrap();

        let recorded = std::fs::read_to_string(&out).unwrap();
        assert_eq!(recorded, "previous_version=1.0.0\n");
        let readme = std::fs::read_to_string(repo.path().join("README.md")).unwrap();
        assert_eq!(readme, "# widgets\n");
    }

    #[test]
    fn test_target_sha_prefers_explicit_sha() {
        let dir = tempfile::TempDir::new().unwrap();
        let cmd = RunCommand {
            sha: Some("abc123".to_string()),
            ..parse_run(&[])
        };
        assert_eq!(cmd.target_sha(dir.path(), false).as_deref(), Some("abc123"));
        assert_eq!(cmd.target_sha(dir.path(), true), None);
    }
}
