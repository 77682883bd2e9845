//! Markdown release notes formatter

use bumpwright_core::types::CommitAnalysis;
use tracing::{debug, instrument};

use super::ChangelogFormatter;

const HEADER: &str = "## 📦 Release Notes";
const BREAKING_TITLE: &str = "### 🚨 Breaking Changes";
const FEATURES_TITLE: &str = "### ✨ New Features";
const FIXES_TITLE: &str = "### 🐛 Bug Fixes";
const DETAILS_TITLE: &str = "### 📝 Details";

/// Markdown release notes formatter
///
/// Sections are emitted in a fixed order and only when they have items.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    /// Emit the "Details" section built from the analysis reasons
    pub include_details: bool,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            include_details: true,
        }
    }

    /// Toggle the details section
    pub fn with_details(mut self, include: bool) -> Self {
        self.include_details = include;
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_section(output: &mut String, title: &str, items: &[String]) {
    output.push_str(title);
    output.push('\n');
    for item in items {
        output.push_str(&format!("- {}\n", item));
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, analysis), fields(bump = %analysis.bump_type))]
    fn format(&self, analysis: &CommitAnalysis) -> String {
        let mut output = format!("{}\n\n", HEADER);

        let sections = [
            (BREAKING_TITLE, &analysis.breaking_changes),
            (FEATURES_TITLE, &analysis.features),
            (FIXES_TITLE, &analysis.fixes),
        ];
        for (title, items) in sections {
            if items.is_empty() {
                continue;
            }
            push_section(&mut output, title, items);
            output.push('\n');
        }

        if self.include_details && !analysis.reasons.is_empty() {
            push_section(&mut output, DETAILS_TITLE, &analysis.reasons);
        }

        debug!(output_len = output.len(), "release notes formatted");
        output
    }
}
