//! Chat tuning loaded from config/chat.toml, plus backend credentials from
//! the environment.
use std::{env, fmt, time::Duration};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/chat.toml";
const CHAT_ENDPOINT_PATH: &str = "/chat/new";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Default)]
struct RawChatConfig {
    #[serde(default)]
    debounce: RawDebounce,
    #[serde(default)]
    reveal: RawReveal,
    #[serde(default)]
    history: RawHistory,
}

#[derive(Debug, Deserialize)]
struct RawDebounce {
    seconds: f32,
}

impl Default for RawDebounce {
    fn default() -> Self {
        Self { seconds: 3.0 }
    }
}

#[derive(Debug, Deserialize)]
struct RawReveal {
    per_char_millis: u64,
    base_millis: u64,
}

impl Default for RawReveal {
    fn default() -> Self {
        Self {
            per_char_millis: 50,
            base_millis: 300,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawHistory {
    limit: usize,
}

impl Default for RawHistory {
    fn default() -> Self {
        Self { limit: 20 }
    }
}

/// Validated chat timing configuration.
#[derive(Resource, Debug, Clone)]
pub struct ChatConfig {
    pub debounce_seconds: f32,
    pub per_char_millis: u64,
    pub base_millis: u64,
    pub history_limit: usize,
}

impl ChatConfig {
    pub fn load_or_default() -> Self {
        match std::fs::read_to_string(CONFIG_PATH) {
            Ok(raw) => match toml::from_str::<RawChatConfig>(&raw) {
                Ok(parsed) => parsed.into(),
                Err(err) => {
                    warn!("Failed to parse {CONFIG_PATH} ({err}); using built-in chat defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!("Could not read {CONFIG_PATH} ({err}); using built-in chat defaults");
                Self::default()
            }
        }
    }

    /// Delay before a queued reply replaces the typing indicator, scaled by
    /// its length so longer replies "take longer to type".
    pub fn reveal_delay_seconds(&self, content: &str) -> f32 {
        let chars = content.chars().count() as u64;
        (chars * self.per_char_millis + self.base_millis) as f32 / 1000.0
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        RawChatConfig::default().into()
    }
}

impl From<RawChatConfig> for ChatConfig {
    fn from(raw: RawChatConfig) -> Self {
        Self {
            debounce_seconds: raw.debounce.seconds.max(0.1),
            per_char_millis: raw.reveal.per_char_millis,
            base_millis: raw.reveal.base_millis,
            history_limit: raw.history.limit.max(1),
        }
    }
}

/// Backend credentials sourced from the environment.
#[derive(Debug, Clone)]
pub struct ChatCredentials {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl ChatCredentials {
    pub fn from_env() -> Result<Self, ChatCredentialsError> {
        let base_url = required_env("CHAT_API_URL", ChatCredentialsError::MissingBaseUrl)?;
        let token = required_env("CHAT_API_TOKEN", ChatCredentialsError::MissingToken)?;

        let timeout = env::var("CHAT_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            base_url,
            token,
            timeout,
        })
    }

    pub fn chat_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHAT_ENDPOINT_PATH
        )
    }
}

fn required_env(
    key: &str,
    missing: ChatCredentialsError,
) -> Result<String, ChatCredentialsError> {
    env::var(key)
        .map_err(|_| missing.clone())
        .and_then(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(missing)
            } else {
                Ok(trimmed.to_string())
            }
        })
}

#[derive(Debug, Clone)]
pub enum ChatCredentialsError {
    MissingBaseUrl,
    MissingToken,
    ClientBuild(String),
}

impl fmt::Display for ChatCredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBaseUrl => write!(f, "missing CHAT_API_URL"),
            Self::MissingToken => write!(f, "missing CHAT_API_TOKEN"),
            Self::ClientBuild(message) => write!(f, "client build failure: {}", message),
        }
    }
}

impl std::error::Error for ChatCredentialsError {}
