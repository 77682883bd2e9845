//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "bumpwright.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "bumpwright.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".bumpwright.toml",
        ".bumpwright.yaml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# bumpwright configuration

[versioning]
tag_prefix = "v"
initial_version = "0.0.0"

[analyzer]
enabled = true
model = "gpt-4o-mini"
api_base = "https://api.openai.com/v1"
temperature = 0.1
timeout_secs = 60

[host]
api_url = "https://api.github.com"
page_size = 100

[files]
update = true
version_file = ".version"
exclude_dirs = ["node_modules", "venv", ".venv", "target"]

[git]
commit = true
push = true
remote = "origin"
user_name = "GitHub Action"
user_email = "action@github.com"
commit_message = "chore(release): bump version to {version} [skip ci]"
tag_message = "Release version {version}"

[release]
create = true
draft = false
prerelease = false
"#;
