//! Version command

use clap::Args;
use tracing::info;

use bumpwright_core::types::BumpType;
use bumpwright_strategies::{SemVerStrategy, VersionStrategy};

use crate::cli::{output, Cli, HostArgs, OutputFormat, Session};

/// Show the current version and the version the next release would get
#[derive(Debug, Args)]
pub struct VersionCommand {
    #[command(flatten)]
    pub host: HostArgs,

    /// Show current version only
    #[arg(long)]
    pub current: bool,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(current = self.current, "executing version command");
        let session = Session::load(&self.host)?;
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run(&session, cli))
    }

    async fn run(&self, session: &Session, cli: &Cli) -> anyhow::Result<()> {
        let resolver = session.resolver()?;
        let resolution = resolver.resolve().await;
        let current = resolution.current_version.to_string();

        if self.current {
            return self.output_current(&current, cli);
        }

        let commits = resolver.commits_since(&resolution).await?;
        if commits.is_empty() {
            return self.output_result(&current, None, 0, cli);
        }

        let analysis = session.analyzer().analyze(&commits).await;
        let next = SemVerStrategy::new().bump(&resolution.current_version, analysis.bump_type);
        let next = next.to_string();

        self.output_result(&current, Some((&next, analysis.bump_type)), commits.len(), cli)
    }

    fn output_current(&self, version: &str, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "current": version });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => println!("{}", version),
        }
        Ok(())
    }

    fn output_result(
        &self,
        current: &str,
        next: Option<(&str, BumpType)>,
        commit_count: usize,
        cli: &Cli,
    ) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "current": current,
                    "next": next.map(|(v, _)| v),
                    "bump_type": next.map(|(_, b)| b.to_string()),
                    "commits": commit_count,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text if cli.quiet => {
                println!("{}", next.map(|(v, _)| v).unwrap_or(current));
            }
            OutputFormat::Text => {
                println!("{}", output::header("Version Calculation"));
                println!();
                println!("{}", output::key_value("Current version", current));
                match next {
                    Some((version, bump)) => {
                        println!("{}", output::key_value("Next version", output::version(version)));
                        println!("{}", output::key_value("Bump type", output::bump(bump)));
                    }
                    None => {
                        println!();
                        output::info("No commits since the last release");
                    }
                }
                println!("{}", output::key_value("Commits", commit_count));
            }
        }
        Ok(())
    }
}
