//! Language model collaborator

mod openai;
mod prompt;
mod verdict;

pub use openai::OpenAiClient;
pub use prompt::{system_prompt, user_prompt};
pub use verdict::ModelVerdict;

use async_trait::async_trait;
use serde::Serialize;

use bumpwright_core::error::AnalyzerError;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// A single chat-style completion asking for a JSON object reply
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation, system instruction first
    pub messages: Vec<Message>,
    /// Sampling temperature
    pub temperature: f64,
}

impl CompletionRequest {
    /// Build the classification request for a batch of commits
    pub fn for_commits<S: AsRef<str>>(model: impl Into<String>, commits: &[S]) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                Message {
                    role: Role::System,
                    content: system_prompt().to_string(),
                },
                Message {
                    role: Role::User,
                    content: user_prompt(commits),
                },
            ],
            temperature: 0.1,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Chat completion capability
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Run one completion and return the raw message content
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AnalyzerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_for_commits() {
        let request = CompletionRequest::for_commits("gpt-4o-mini", &["feat: a", "fix: b"])
            .with_temperature(0.3);

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[1].content.contains("feat: a\nfix: b"));
        assert_eq!(request.temperature, 0.3);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::System).unwrap();
        assert_eq!(json, "\"system\"");
    }
}
