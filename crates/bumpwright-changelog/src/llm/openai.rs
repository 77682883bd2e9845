//! OpenAI-compatible chat completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use bumpwright_core::error::AnalyzerError;

use super::{CompletionRequest, LanguageModel, Message};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
    response_format: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Client for `/chat/completions` on an OpenAI-compatible API
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, AnalyzerError> {
        Self::with_timeout(api_key, Duration::from_secs(60))
    }

    /// Create a client with a request timeout
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self, AnalyzerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalyzerError::Request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Point the client at another OpenAI-compatible endpoint
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

/// Pull the first choice's content out of a response body.
/// Null or blank content is `EmptyResponse`, never an empty verdict.
fn extract_content(body: &str) -> Result<String, AnalyzerError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(AnalyzerError::EmptyResponse)
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AnalyzerError> {
        let body = ChatRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            response_format: json!({ "type": "json_object" }),
        };

        let url = self.completions_url();
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalyzerError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AnalyzerError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(AnalyzerError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        extract_content(&text)
    }
}
