//! OpenAI chat-completions summarizer adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::application::ports::{SummarizationError, Summarizer};
use crate::domain::config::DEFAULT_SUMMARY_MODEL;
use crate::domain::summary::{is_no_data_transcript, Summary, SummaryPrompt};

/// OpenAI API base URL
const API_BASE_URL: &str = "https://api.openai.com/v1";

/// Upper bound on the generated summary
const MAX_TOKENS: u32 = 5000;

// Request types for the chat completions API

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

// Response types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// JSON object the model is instructed to return
#[derive(Debug, Deserialize)]
struct ModelSummary {
    title: Option<String>,
    summary: Option<String>,
}

/// OpenAI summarizer
pub struct OpenAiSummarizer {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiSummarizer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_SUMMARY_MODEL)
    }

    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the adapter at another endpoint (e.g. a local mock)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_request(&self, transcript: &str) -> ChatRequest {
        let prompt = SummaryPrompt::build(transcript);
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt.system().to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.user().to_string(),
                },
            ],
            temperature: 0.0,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }

    /// Parse the model's JSON content and apply the fallbacks
    fn parse_content(content: &str) -> Result<Summary, SummarizationError> {
        let parsed: ModelSummary = serde_json::from_str(content)
            .map_err(|e| SummarizationError::ParseError(e.to_string()))?;
        Ok(Summary::from_model(parsed.title, parsed.summary))
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<Summary, SummarizationError> {
        if is_no_data_transcript(transcript) {
            info!(chars = transcript.trim().chars().count(), "Transcript has no usable content");
            return Ok(Summary::no_data());
        }

        debug!(model = %self.model, "Requesting meeting summary");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.build_request(transcript))
            .send()
            .await
            .map_err(|e| SummarizationError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SummarizationError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SummarizationError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizationError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummarizationError::ParseError(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| SummarizationError::ParseError("no choices returned".to_string()))?;

        let summary = Self::parse_content(&content)?;
        if summary.is_no_data() {
            info!("Model produced no usable summary");
        }
        Ok(summary)
    }
}
