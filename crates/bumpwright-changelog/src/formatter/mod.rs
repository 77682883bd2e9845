//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use bumpwright_core::types::CommitAnalysis;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render the categorised lists of an analysis
    fn format(&self, analysis: &CommitAnalysis) -> String;
}
