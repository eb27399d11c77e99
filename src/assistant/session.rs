//! Assistant transcript and turn cycle.

use crate::assistant::{prompt, AssistantError, GenerationRequest, SamplingParams, TextGenerator};
use crate::domain::aggregates::Product;
use crate::ChatTurn;

pub const DEFAULT_HISTORY_TURNS: usize = 10;

/// Ordered, append-only conversation with the assistant.
///
/// `pending` is set between [`AssistantSession::submit`] and
/// [`AssistantSession::record_reply`]; new messages are refused meanwhile.
#[derive(Clone, Debug)]
pub struct AssistantSession {
    transcript: Vec<ChatTurn>,
    pending: bool,
    history_turns: usize,
}

impl AssistantSession {
    pub fn new(history_turns: usize) -> Self {
        Self { transcript: vec![ChatTurn::model(prompt::GREETING)], pending: false, history_turns }
    }

    pub fn transcript(&self) -> &[ChatTurn] { &self.transcript }
    pub fn is_pending(&self) -> bool { self.pending }

    /// Appends a user turn and builds the outbound request.
    ///
    /// Returns `None` for blank input or while a reply is still pending.
    pub fn submit(&mut self, text: &str, preamble: String) -> Option<GenerationRequest> {
        if self.pending || text.trim().is_empty() {
            return None;
        }
        let start = self.transcript.len().saturating_sub(self.history_turns);
        let history = self.transcript[start..].to_vec();
        self.transcript.push(ChatTurn::user(text));
        self.pending = true;
        Some(GenerationRequest {
            preamble: Some(preamble),
            history,
            prompt: text.to_string(),
            sampling: SamplingParams::CHAT,
        })
    }

    /// Appends the assistant's answer, substituting a fixed reply on failure.
    pub fn record_reply(&mut self, reply: Result<String, AssistantError>) -> ChatTurn {
        let text = match reply {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => prompt::EMPTY_REPLY.to_string(),
            Err(e) => {
                tracing::error!(error = %e, "assistant request failed");
                prompt::FALLBACK_REPLY.to_string()
            }
        };
        let turn = ChatTurn::model(text);
        self.transcript.push(turn.clone());
        self.pending = false;
        turn
    }

    /// Runs one full turn: submit, a single awaited request, record.
    pub async fn send(&mut self, generator: &dyn TextGenerator, text: &str, catalog: &[Product]) -> Option<ChatTurn> {
        let request = self.submit(text, prompt::preamble(catalog))?;
        tracing::debug!(history = request.history.len(), "sending assistant request");
        let reply = generator.generate(&request).await;
        Some(self.record_reply(reply))
    }
}

impl Default for AssistantSession {
    fn default() -> Self { Self::new(DEFAULT_HISTORY_TURNS) }
}
