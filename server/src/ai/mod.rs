use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod api;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the elaboration prompt, embedding the task text verbatim.
pub fn elaboration_prompt(task_text: &str) -> String {
    format!(
        "Please provide more details, break down into sub-steps, or give tips for completing the following task:\n\nTask: \"{}\"",
        task_text
    )
}

/// Fixed prompt for the motivational message; takes no caller input.
pub const MOTIVATION_PROMPT: &str = "Generate a short, punchy, and slightly quirky motivational message \
for someone using a to-do list app. Make it encouraging but maybe a little funny or unexpected. \
Keep it under 50 words.";

/// Error type for relay operations against the text-generation provider.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The provider credential is not configured; no outbound call is made.
    #[error("Provider API key is not configured")]
    MissingApiKey,
    /// The HTTP round trip to the provider failed.
    #[error("HTTP request to provider failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The provider answered with a non-success status.
    #[error("Provider returned status {0}")]
    Provider(reqwest::StatusCode),
    /// The provider response carried no generated text.
    #[error("Provider response contained no generated text")]
    EmptyResponse,
}

/// Narrow seam over the text-generation provider: prompt in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, RelayError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

/// Production `TextGenerator` backed by the Gemini `generateContent` API.
///
/// Each call is one synchronous round trip; no caching, no retries.
#[derive(Debug)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiGenerator {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    #[tracing::instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> Result<String, RelayError> {
        let api_key = self.api_key.as_deref().ok_or(RelayError::MissingApiKey)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RelayError::Provider(response.status()));
        }

        let generated: GenerateContentResponse = response.json().await?;
        generated
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(RelayError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elaboration_prompt_embeds_task_text_verbatim() {
        let prompt = elaboration_prompt("Buy milk");
        assert!(prompt.contains("Task: \"Buy milk\""));
        assert!(prompt.starts_with("Please provide more details"));
    }

    #[tokio::test]
    async fn generate_without_api_key_fails_before_any_outbound_call() {
        let generator = GeminiGenerator::new(None, "gemini-1.5-flash".to_string());
        let result = generator.generate("some prompt").await;
        assert!(matches!(result, Err(RelayError::MissingApiKey)));
    }

    #[test]
    fn can_decode_generate_content_response() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Step one: start."}],"role":"model"},"finishReason":"STOP"}]}"#;
        let decoded: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let text = decoded
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text);
        assert_eq!(text.as_deref(), Some("Step one: start."));
    }

    #[test]
    fn can_decode_response_without_candidates() {
        let decoded: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(decoded.candidates.is_empty());
    }
}
