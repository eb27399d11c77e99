use std::path::PathBuf;
use std::time::Duration;

use crate::assistant::gemini::{self, GeminiConfig};
use crate::assistant::session::DEFAULT_HISTORY_TURNS;
use crate::payment::DEFAULT_PAYMENT_DELAY;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gemini: GeminiConfig,
    pub history_turns: usize,
    pub payment_delay: Duration,
    pub state_path: PathBuf,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("no GEMINI_API_KEY set; the assistant will answer with its fallback reply");
        }
        let gemini = GeminiConfig {
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| gemini::DEFAULT_MODEL.into()),
            base_url: std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| gemini::DEFAULT_BASE_URL.into()),
            timeout: env_parse("GEMINI_TIMEOUT_SECS").map(Duration::from_secs).unwrap_or(gemini::DEFAULT_TIMEOUT),
        };
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| anyhow::anyhow!("invalid PORT {raw:?}: {e}"))?,
            Err(_) => 8083,
        };
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            gemini,
            history_turns: env_parse("ASSISTANT_HISTORY_TURNS").unwrap_or(DEFAULT_HISTORY_TURNS),
            payment_delay: env_parse("PAYMENT_DELAY_MS").map(Duration::from_millis).unwrap_or(DEFAULT_PAYMENT_DELAY),
            state_path: std::env::var("SHOPORBIT_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".shoporbit/state.json")),
        })
    }

    pub fn bind_addr(&self) -> String { format!("{}:{}", self.host, self.port) }
}
