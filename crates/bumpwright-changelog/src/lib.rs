//! bumpwright changelog - Commit analysis and release notes
//!
//! Classifies commit messages into a semantic version bump, either through a
//! language model or a deterministic conventional-commit classifier, and
//! renders the result as markdown release notes.

pub mod analyzer;
pub mod classifier;
pub mod formatter;
pub mod llm;

pub use analyzer::CommitAnalyzer;
pub use classifier::ConventionalClassifier;
pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use llm::{CompletionRequest, LanguageModel, ModelVerdict, OpenAiClient};
