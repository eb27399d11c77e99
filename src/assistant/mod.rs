//! Shopping assistant.
//!
//! A chat transcript that forwards recent turns, plus a behavioral preamble,
//! to an external text generator. Generator failures never reach the
//! transcript consumer: they are replaced by fixed fallback replies.

pub mod gemini;
pub mod prompt;
pub mod session;

use async_trait::async_trait;
use thiserror::Error;

use crate::ChatTurn;

pub use gemini::{GeminiClient, GeminiConfig};
pub use session::AssistantSession;

/// Sampling knobs passed through to the generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub max_output_tokens: u32,
}

impl SamplingParams {
    pub const CHAT: SamplingParams = SamplingParams { temperature: 0.7, top_p: Some(0.95), max_output_tokens: 500 };
    pub const PITCH: SamplingParams = SamplingParams { temperature: 0.9, top_p: None, max_output_tokens: 100 };
}

/// One outbound generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    /// Sent ahead of the history when present.
    pub preamble: Option<String>,
    pub history: Vec<ChatTurn>,
    pub prompt: String,
    pub sampling: SamplingParams,
}

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("No API key configured for the text generator")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generator returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode generator response: {0}")]
    Decode(String),
}

/// External text-generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError>;
}

/// One-sentence sales blurb for a product. Falls back to a stock line on any failure.
pub async fn pitch(generator: &dyn TextGenerator, product_name: &str) -> String {
    let request = GenerationRequest {
        preamble: None,
        history: vec![],
        prompt: prompt::pitch_prompt(product_name),
        sampling: SamplingParams::PITCH,
    };
    match generator.generate(&request).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => prompt::PITCH_FALLBACK.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, product = product_name, "pitch generation failed");
            prompt::PITCH_FALLBACK.to_string()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedGenerator;
    use super::*;

    #[tokio::test]
    async fn test_pitch_uses_pitch_sampling() {
        let generator = ScriptedGenerator::replying(vec![Ok("  Tick tock, style o'clock.  ".into())]);
        let text = pitch(&generator, "Minimalist Wall Clock").await;
        assert_eq!(text, "Tick tock, style o'clock.");
        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen[0].sampling, SamplingParams::PITCH);
        assert!(seen[0].preamble.is_none());
        assert!(seen[0].prompt.contains("\"Minimalist Wall Clock\""));
    }

    #[tokio::test]
    async fn test_pitch_falls_back() {
        let generator = ScriptedGenerator::replying(vec![Err(AssistantError::MissingApiKey), Ok(" ".into())]);
        assert_eq!(pitch(&generator, "Boots").await, prompt::PITCH_FALLBACK);
        assert_eq!(pitch(&generator, "Boots").await, prompt::PITCH_FALLBACK);
    }
}
