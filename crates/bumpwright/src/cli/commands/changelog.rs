//! Changelog command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::{output, Cli, HostArgs, OutputFormat, Session};

/// Print release notes for the commits since the last tag
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    #[command(flatten)]
    pub host: HostArgs,

    /// Write the release notes to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(output = ?self.output, "executing changelog command");
        let session = Session::load(&self.host)?;
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run(&session, cli))
    }

    async fn run(&self, session: &Session, cli: &Cli) -> anyhow::Result<()> {
        let resolver = session.resolver()?;
        let commits = resolver.commits_since_last_tag().await?;

        if commits.is_empty() {
            if cli.shows_notices() {
                output::info("No commits since the last release");
            }
            return Ok(());
        }

        let analysis = session.analyzer().analyze(&commits).await;

        if let Some(path) = &self.output {
            std::fs::write(path, &analysis.changelog)?;
            if cli.shows_notices() {
                output::success(&format!(
                    "Release notes written to {}",
                    output::path(path.display())
                ));
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
            OutputFormat::Text => print!("{}", analysis.changelog),
        }
        Ok(())
    }
}
