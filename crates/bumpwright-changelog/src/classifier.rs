//! Deterministic conventional-commit classifier
//!
//! Used whenever the language model is unavailable or its answer cannot be
//! used. Each commit lands in at most one category, checked in the order
//! breaking change, feature, fix.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use bumpwright_core::types::{BumpType, CommitAnalysis};

/// `BREAKING CHANGE` anywhere, or a `type!:` / `type(scope)!:` subject
static BREAKING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)BREAKING CHANGE|^[^:]+!:").expect("Invalid regex"));

static FEATURE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(feat|feature)(\(.+\))?:").expect("Invalid regex"));

static FIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(fix|bugfix|perf|refactor)(\(.+\))?:").expect("Invalid regex")
});

/// Maximum length of a recorded item
const ITEM_LIMIT: usize = 100;
/// Maximum length of the commit excerpt in a reason
const REASON_LIMIT: usize = 50;

/// Category a single commit falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    Breaking,
    Feature,
    Fix,
}

impl CommitKind {
    fn reason_label(&self) -> &'static str {
        match self {
            Self::Breaking => "Breaking change",
            Self::Feature => "New feature",
            Self::Fix => "Bug fix",
        }
    }
}

/// Pattern-based commit classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalClassifier;

impl ConventionalClassifier {
    /// Create a new classifier
    pub fn new() -> Self {
        Self
    }

    /// Categorise one commit message, or `None` when it matches no pattern
    pub fn kind_of(&self, commit: &str) -> Option<CommitKind> {
        if BREAKING_REGEX.is_match(commit) {
            Some(CommitKind::Breaking)
        } else if FEATURE_REGEX.is_match(commit) {
            Some(CommitKind::Feature)
        } else if FIX_REGEX.is_match(commit) {
            Some(CommitKind::Fix)
        } else {
            None
        }
    }

    /// Classify all commits. The changelog field is left empty.
    pub fn classify<S: AsRef<str>>(&self, commits: &[S]) -> CommitAnalysis {
        let mut analysis = CommitAnalysis::default();

        for commit in commits {
            let commit = commit.as_ref();
            let Some(kind) = self.kind_of(commit) else {
                continue;
            };

            let item = truncate(commit, ITEM_LIMIT);
            match kind {
                CommitKind::Breaking => analysis.breaking_changes.push(item),
                CommitKind::Feature => analysis.features.push(item),
                CommitKind::Fix => analysis.fixes.push(item),
            }
            analysis.reasons.push(format!(
                "{}: {}",
                kind.reason_label(),
                truncate(commit, REASON_LIMIT)
            ));
        }

        analysis.bump_type = if !analysis.breaking_changes.is_empty() {
            BumpType::Major
        } else if !analysis.features.is_empty() {
            BumpType::Minor
        } else {
            BumpType::Patch
        };

        debug!(
            commits = commits.len(),
            bump = %analysis.bump_type,
            breaking = analysis.breaking_changes.len(),
            features = analysis.features.len(),
            fixes = analysis.fixes.len(),
            "classified commits"
        );
        analysis
    }
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
