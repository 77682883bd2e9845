//! Configuration and collaborators shared by the commands

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing::{debug, info, warn};

use bumpwright_changelog::{CommitAnalyzer, MarkdownFormatter, OpenAiClient};
use bumpwright_core::config::{load_config_or_default, validate_config, Config};
use bumpwright_git::{CommitHistory, GitHubClient, GitHubRepository, GitRepo, LocalHistory, ReleaseHost};
use bumpwright_strategies::VersionResolver;

/// Credentials and host inputs, usually supplied through the environment
#[derive(Debug, Clone, Default, Args)]
pub struct HostArgs {
    /// Token for the GitHub API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// API key for the language model
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Language model used for commit analysis
    #[arg(long, env = "OPENAI_API_MODEL")]
    pub model: Option<String>,

    /// Prefix for version tags
    #[arg(long)]
    pub tag_prefix: Option<String>,

    /// Classify commits by conventional-commit patterns only
    #[arg(long)]
    pub no_ai: bool,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Loaded configuration plus the host and model clients it selects
pub struct Session {
    /// Repository working tree, or the current directory outside a repository
    pub root: PathBuf,
    /// Effective configuration after overrides
    pub config: Config,
    github: Option<GitHubClient>,
    local: LocalHistory,
    model: Option<OpenAiClient>,
}

impl Session {
    /// Load configuration from the current directory and apply `args`
    pub fn load(args: &HostArgs) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        let (mut config, config_path) = load_config_or_default(&cwd)?;
        apply_overrides(&mut config, args);
        validate_config(&config)?;

        let root = match GitRepo::discover(&cwd) {
            Ok(repo) => repo.path().to_path_buf(),
            Err(e) => {
                debug!(error = %e, "not inside a git repository");
                cwd
            }
        };

        debug!(config = ?config_path, root = %root.display(), "loaded session");
        let github = github_client(&config, args)?;
        let model = model_client(&config, args)?;

        Ok(Self {
            github,
            model,
            ..Self::local(root, config)
        })
    }

    /// Session backed by the repository at `root` with no host or model clients
    pub(crate) fn local(root: PathBuf, config: Config) -> Self {
        Self {
            local: LocalHistory::new(&root),
            root,
            config,
            github: None,
            model: None,
        }
    }

    /// Tag and commit source: GitHub when configured, else the local repository
    pub fn history(&self) -> &dyn CommitHistory {
        match &self.github {
            Some(client) => client,
            None => &self.local,
        }
    }

    /// Host to publish releases on, if credentials were supplied
    pub fn release_host(&self) -> Option<&dyn ReleaseHost> {
        self.github.as_ref().map(|c| c as &dyn ReleaseHost)
    }

    /// Resolver configured from the versioning and host sections
    pub fn resolver(&self) -> anyhow::Result<VersionResolver<'_, dyn CommitHistory + '_>> {
        let resolver = VersionResolver::new(self.history())
            .with_tag_prefix(&self.config.versioning.tag_prefix)
            .with_page_size(self.config.host.page_size)
            .with_initial_version(&self.config.versioning.initial_version)?;
        Ok(resolver)
    }

    /// Analyzer that uses the model when one is configured
    pub fn analyzer(&self) -> CommitAnalyzer<'_> {
        let analyzer = match &self.model {
            Some(model) => CommitAnalyzer::with_model(model),
            None => CommitAnalyzer::conventional(),
        };
        analyzer
            .model_name(&self.config.analyzer.model)
            .temperature(self.config.analyzer.temperature)
            .formatter(MarkdownFormatter::new())
    }

    /// Whether a language model will be consulted
    pub fn uses_model(&self) -> bool {
        self.model.is_some()
    }
}

fn apply_overrides(config: &mut Config, args: &HostArgs) {
    if let Some(prefix) = &args.tag_prefix {
        config.versioning.tag_prefix = prefix.trim().to_string();
    }
    if let Some(model) = non_empty(&args.model) {
        config.analyzer.model = model;
    }
    if let Some(repository) = non_empty(&args.repository) {
        config.host.repository = Some(repository);
    }
    if args.no_ai {
        config.analyzer.enabled = false;
    }
}

fn github_client(config: &Config, args: &HostArgs) -> anyhow::Result<Option<GitHubClient>> {
    let token = non_empty(&args.github_token);
    match (token, config.host.repository.as_deref()) {
        (Some(token), Some(repository)) => {
            let repository: GitHubRepository = repository.parse()?;
            info!(repository = %repository, "using GitHub API");
            let client = GitHubClient::new(repository, token)?.with_api_url(&config.host.api_url);
            Ok(Some(client))
        }
        (Some(_), None) => {
            warn!("GITHUB_TOKEN is set but no repository is configured, using local history");
            Ok(None)
        }
        (None, _) => {
            debug!("no GitHub token, using local history");
            Ok(None)
        }
    }
}

fn model_client(config: &Config, args: &HostArgs) -> anyhow::Result<Option<OpenAiClient>> {
    if !config.analyzer.enabled {
        debug!("language model analysis disabled");
        return Ok(None);
    }
    let Some(key) = non_empty(&args.openai_api_key) else {
        info!("no OPENAI_API_KEY, using conventional commit classification");
        return Ok(None);
    };

    let client = OpenAiClient::with_timeout(key, Duration::from_secs(config.analyzer.timeout_secs))?
        .with_api_base(&config.analyzer.api_base);
    Ok(Some(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(non_empty(&Some("  ".to_string())), None);
        assert_eq!(non_empty(&None), None);
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = Config::default();
        let args = HostArgs {
            repository: Some("acme/widgets".to_string()),
            model: Some("gpt-4o".to_string()),
            tag_prefix: Some("release-".to_string()),
            no_ai: true,
            ..Default::default()
        };
        apply_overrides(&mut config, &args);

        assert_eq!(config.versioning.tag_prefix, "release-");
        assert_eq!(config.analyzer.model, "gpt-4o");
        assert_eq!(config.host.repository.as_deref(), Some("acme/widgets"));
        assert!(!config.analyzer.enabled);
    }

    #[test]
    fn test_github_requires_token_and_repository() {
        let mut config = Config::default();
        let args = HostArgs::default();
        assert!(github_client(&config, &args).unwrap().is_none());

        let args = HostArgs {
            github_token: Some("t".to_string()),
            ..Default::default()
        };
        assert!(github_client(&config, &args).unwrap().is_none());

        config.host.repository = Some("acme/widgets".to_string());
        let client = github_client(&config, &args).unwrap().unwrap();
        assert_eq!(client.repository().to_string(), "acme/widgets");

        config.host.repository = Some("not-a-slug".to_string());
        assert!(github_client(&config, &args).is_err());
    }

    #[test]
    fn test_model_requires_key_and_enabled() {
        let mut config = Config::default();
        assert!(model_client(&config, &HostArgs::default()).unwrap().is_none());

        let args = HostArgs {
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert!(model_client(&config, &args).unwrap().is_some());

        config.analyzer.enabled = false;
        assert!(model_client(&config, &args).unwrap().is_none());
    }
}
