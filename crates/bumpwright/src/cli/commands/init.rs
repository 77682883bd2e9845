//! Init command

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use dialoguer::Confirm;
use tracing::info;

use bumpwright_core::config::{Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML};

use crate::cli::{output, Cli};

/// Configuration file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Yaml,
}

impl ConfigFormat {
    fn file_name(self) -> &'static str {
        match self {
            Self::Toml => DEFAULT_CONFIG_TOML,
            Self::Yaml => DEFAULT_CONFIG_YAML,
        }
    }

    fn render(self) -> anyhow::Result<String> {
        Ok(match self {
            Self::Toml => DEFAULT_CONFIG_TEMPLATE.to_string(),
            Self::Yaml => serde_yaml::to_string(&Config::default())?,
        })
    }
}

/// Write a default bumpwright configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration format
    #[arg(long = "config-format", value_enum, default_value_t = ConfigFormat::Toml)]
    pub config_format: ConfigFormat,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(self.config_format.file_name()));

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                output::warning("Aborted.");
                return Ok(());
            }
        }

        std::fs::write(&config_path, self.config_format.render()?)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to adjust versioning and release settings", config_path.display());
            println!(
                "  2. Run {} to preview the next version",
                output::command("bumpwright version")
            );
            println!(
                "  3. Run {} to cut a release",
                output::command("bumpwright run")
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_configs_parse() {
        let toml_text = ConfigFormat::Toml.render().unwrap();
        assert!(toml_text.contains("[versioning]"));

        let yaml_text = ConfigFormat::Yaml.render().unwrap();
        let config: Config = serde_yaml::from_str(&yaml_text).unwrap();
        assert_eq!(config.versioning.tag_prefix, "v");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ConfigFormat::Toml.file_name(), "bumpwright.toml");
        assert_eq!(ConfigFormat::Yaml.file_name(), "bumpwright.yaml");
    }
}
