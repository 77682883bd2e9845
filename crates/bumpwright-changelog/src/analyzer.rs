//! Commit analyzer
//!
//! Asks the language model first and degrades to the conventional-commit
//! classifier on any failure. The result always carries a rendered changelog.

use tracing::{info, instrument, warn};

use bumpwright_core::error::AnalyzerError;
use bumpwright_core::types::{BumpType, CommitAnalysis};

use crate::classifier::ConventionalClassifier;
use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::llm::{CompletionRequest, LanguageModel, ModelVerdict};

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Classifies commits into a bump type and release notes
pub struct CommitAnalyzer<'a> {
    model: Option<&'a dyn LanguageModel>,
    model_name: String,
    temperature: f64,
    classifier: ConventionalClassifier,
    formatter: MarkdownFormatter,
}

impl<'a> CommitAnalyzer<'a> {
    /// Analyzer that only uses the deterministic classifier
    pub fn conventional() -> Self {
        Self {
            model: None,
            model_name: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            classifier: ConventionalClassifier::new(),
            formatter: MarkdownFormatter::new(),
        }
    }

    /// Analyzer that consults `model` first
    pub fn with_model(model: &'a dyn LanguageModel) -> Self {
        Self {
            model: Some(model),
            ..Self::conventional()
        }
    }

    /// Set the model identifier sent with requests
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Replace the changelog formatter
    pub fn formatter(mut self, formatter: MarkdownFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Classify `commits`. Never fails: model errors fall back to pattern matching.
    #[instrument(skip(self, commits), fields(commits = commits.len()))]
    pub async fn analyze<S: AsRef<str> + Sync>(&self, commits: &[S]) -> CommitAnalysis {
        let analysis = match self.model {
            Some(model) => match self.ask_model(model, commits).await {
                Ok(analysis) => analysis,
                Err(e) => {
                    warn!(error = %e, model = model.name(), "Model analysis failed, falling back to conventional commits");
                    self.classifier.classify(commits)
                }
            },
            None => self.classifier.classify(commits),
        };

        let changelog = self.formatter.format(&analysis);
        info!(bump = %analysis.bump_type, "Commit analysis complete");
        analysis.with_changelog(changelog)
    }

    async fn ask_model<S: AsRef<str> + Sync>(
        &self,
        model: &dyn LanguageModel,
        commits: &[S],
    ) -> Result<CommitAnalysis, AnalyzerError> {
        let request = CompletionRequest::for_commits(&self.model_name, commits)
            .with_temperature(self.temperature);
        let content = model.complete(&request).await?;
        let verdict = ModelVerdict::parse(&content)?;
        Ok(reconcile(verdict))
    }
}

/// Raise the model's bump type to what its own category lists imply
fn reconcile(verdict: ModelVerdict) -> CommitAnalysis {
    let stated = verdict.bump_type;
    let implied = verdict.implied_bump();
    let mut analysis = verdict.into_analysis();

    if implied > stated {
        warn!(%stated, %implied, "Model bump type contradicts its categories, raising");
        analysis.bump_type = BumpType::max(stated, implied);
    }
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockModel {
        reply: Result<String, fn() -> AnalyzerError>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing_with(error: fn() -> AnalyzerError) -> Self {
            Self {
                reply: Err(error),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self::failing_with(|| AnalyzerError::Request("connection reset".to_string()))
        }
    }

    #[async_trait]
    impl LanguageModel for MockModel {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, AnalyzerError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(error) => Err(error()),
            }
        }
    }

    const COMMITS: [&str; 3] = ["feat: add login", "fix: crash on null", "chore: cleanup"];

    #[tokio::test]
    async fn test_model_verdict_used() {
        let model = MockModel::replying(
            r#"{"bump_type":"minor","reasons":["login added"],"features":["Login page"],"fixes":[]}"#,
        );
        let analysis = CommitAnalyzer::with_model(&model)
            .model_name("gpt-4o")
            .temperature(0.2)
            .analyze(&COMMITS)
            .await;

        assert_eq!(analysis.bump_type, BumpType::Minor);
        assert_eq!(analysis.features, vec!["Login page"]);
        assert!(analysis.changelog.contains("- Login page\n"));

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-4o");
        assert_eq!(requests[0].temperature, 0.2);
    }

    #[tokio::test]
    async fn test_model_failure_falls_back() {
        let model = MockModel::failing();
        let analysis = CommitAnalyzer::with_model(&model).analyze(&COMMITS).await;

        assert_eq!(analysis.bump_type, BumpType::Minor);
        assert_eq!(analysis.features, vec!["feat: add login"]);
        assert_eq!(analysis.fixes, vec!["fix: crash on null"]);
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back() {
        let model = MockModel::failing_with(|| AnalyzerError::EmptyResponse);
        let analysis = CommitAnalyzer::with_model(&model).analyze(&COMMITS).await;

        assert_eq!(model.requests.lock().unwrap().len(), 1);
        assert_eq!(analysis.bump_type, BumpType::Minor);
        assert_eq!(analysis.features, vec!["feat: add login"]);
        assert!(analysis.changelog.contains("feat: add login"));
    }

    #[tokio::test]
    async fn test_malformed_reply_falls_back() {
        let model = MockModel::replying("Sure! Here is the analysis: minor");
        let analysis = CommitAnalyzer::with_model(&model)
            .analyze(&["feat!: drop v1"])
            .await;

        assert_eq!(analysis.bump_type, BumpType::Major);
        assert_eq!(analysis.breaking_changes, vec!["feat!: drop v1"]);
    }

    #[tokio::test]
    async fn test_missing_fields_default_to_patch() {
        let model = MockModel::replying("{}");
        let analysis = CommitAnalyzer::with_model(&model).analyze(&COMMITS).await;

        assert_eq!(analysis.bump_type, BumpType::Patch);
        assert!(analysis.is_empty());
        assert_eq!(analysis.changelog, "## 📦 Release Notes\n\n");
    }

    #[tokio::test]
    async fn test_contradictory_bump_raised() {
        let model = MockModel::replying(
            r#"{"bump_type":"patch","breaking_changes":["removed /v1"],"features":["x"]}"#,
        );
        let analysis = CommitAnalyzer::with_model(&model).analyze(&COMMITS).await;
        assert_eq!(analysis.bump_type, BumpType::Major);

        let model = MockModel::replying(r#"{"bump_type":"patch","features":["x"]}"#);
        let analysis = CommitAnalyzer::with_model(&model).analyze(&COMMITS).await;
        assert_eq!(analysis.bump_type, BumpType::Minor);
    }

    #[tokio::test]
    async fn test_higher_stated_bump_kept() {
        let model = MockModel::replying(r#"{"bump_type":"major","fixes":["x"]}"#);
        let analysis = CommitAnalyzer::with_model(&model).analyze(&COMMITS).await;
        assert_eq!(analysis.bump_type, BumpType::Major);
    }

    #[tokio::test]
    async fn test_conventional_only() {
        let analysis = CommitAnalyzer::conventional()
            .analyze(&["fix: a", "refactor(core)!: b\n\nBREAKING CHANGE: removes v1 endpoint"])
            .await;

        assert_eq!(analysis.bump_type, BumpType::Major);
        assert!(analysis.changelog.starts_with("## 📦 Release Notes\n\n### 🚨 Breaking Changes\n"));
        assert!(analysis.changelog.contains("### 📝 Details\n"));
    }
}
