//! Tag and message templating

use tracing::debug;

use crate::config::Config;

/// Build a tag name from a prefix and a version
pub fn format_tag(tag_prefix: &str, version: &str) -> String {
    format!("{}{}", tag_prefix, version)
}

/// Substitute `{version}` in a template
pub fn render_template(template: &str, version: &str) -> String {
    template.replace("{version}", version)
}

/// Commit message for the version bump commit
pub fn commit_message(config: &Config, version: &str) -> String {
    let message = render_template(&config.git.commit_message, version);
    debug!(version, message = %message, "rendered commit message");
    message
}

/// Message for the annotated release tag
pub fn tag_message(config: &Config, version: &str) -> String {
    render_template(&config.git.tag_message, version)
}
