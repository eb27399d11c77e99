//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::assistant::{prompt, AssistantError, GenerationRequest, TextGenerator};
use crate::ChatRole;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self { api_key: None, model: DEFAULT_MODEL.to_string(), base_url: DEFAULT_BASE_URL.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

/// Text generator backed by the Generative Language REST API.
///
/// A missing API key is not a construction error: every call fails instead,
/// which the assistant turns into its fallback reply.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl Content {
    fn text(role: &str, text: impl Into<String>) -> Self {
        Self { role: Some(role.to_string()), parts: vec![Part { text: Some(text.into()) }] }
    }
}

fn role_name(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    }
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AssistantError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        tracing::info!(model = %config.model, has_key = config.api_key.is_some(), "initialized Gemini client");
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.config.base_url.trim_end_matches('/'), self.config.model)
    }

    fn request_body(request: &GenerationRequest) -> GenerateContentRequest {
        let mut contents = Vec::with_capacity(request.history.len() + 2);
        if let Some(preamble) = &request.preamble {
            contents.push(Content::text("user", format!("{}{}", prompt::PREAMBLE_PREFIX, preamble)));
        }
        contents.extend(request.history.iter().map(|turn| Content::text(role_name(turn.role), turn.text.clone())));
        contents.push(Content::text("user", request.prompt.clone()));
        GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: request.sampling.temperature,
                top_p: request.sampling.top_p,
                max_output_tokens: request.sampling.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError> {
        let api_key = self.config.api_key.as_deref().ok_or(AssistantError::MissingApiKey)?;
        let body = Self::request_body(request);
        tracing::debug!(model = %self.config.model, contents = body.contents.len(), "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, body);
            return Err(AssistantError::Status { status: status.as_u16(), body });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Decode(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default();
        tracing::debug!(chars = text.len(), "received generateContent response");
        Ok(text)
    }
}
