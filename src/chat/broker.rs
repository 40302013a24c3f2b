//! Chat broker trait and the HTTP-backed implementation with local fallback.
use std::sync::Arc;

use bevy::log::warn;
use bevy::prelude::Resource;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::pet::state::{MemoryEntry, PetMood};

use super::{
    config::{ChatCredentials, ChatCredentialsError},
    errors::ChatError,
    types::{ChatLogLine, ChatRole},
};

/// Everything one outbound request carries: the rolling message window, the
/// accumulated memories, and the pet snapshot.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub history: Vec<ChatLogLine>,
    pub memories: Vec<MemoryEntry>,
    pub hunger: i64,
    pub love: i64,
    pub mood: PetMood,
}

/// Result of one chat round trip: zero or more assistant replies in order.
pub type ChatOutcome = Result<Vec<String>, ChatError>;

/// Contract every chat backend must satisfy.
pub trait ChatBroker: Send + Sync {
    fn mode_label(&self) -> &'static str;

    fn send(&self, request: &ChatRequest) -> Result<Vec<String>, ChatError>;
}

/// Shared handle to the configured backend; cloned into the IO task that
/// performs the blocking round trip.
#[derive(Resource)]
pub struct ActiveChatBroker {
    broker: Arc<dyn ChatBroker>,
}

impl ActiveChatBroker {
    pub fn new(broker: Arc<dyn ChatBroker>) -> Self {
        Self { broker }
    }

    pub fn handle(&self) -> Arc<dyn ChatBroker> {
        Arc::clone(&self.broker)
    }

    pub fn mode_label(&self) -> &'static str {
        self.broker.mode_label()
    }
}

/// Primary backend. Runs live against the remote API when credentials are
/// present, and fabricates short canned cat replies otherwise so the whole
/// loop stays exercisable offline.
pub struct HttpChatBroker {
    mode: BrokerMode,
}

enum BrokerMode {
    Live(LiveChatClient),
    Fallback,
}

impl HttpChatBroker {
    pub fn from_env() -> Self {
        match ChatCredentials::from_env() {
            Ok(credentials) => match LiveChatClient::new(credentials) {
                Ok(client) => Self {
                    mode: BrokerMode::Live(client),
                },
                Err(err) => {
                    warn!(
                        "Chat broker running in fallback mode ({}). Check HTTP client configuration.",
                        err
                    );
                    Self {
                        mode: BrokerMode::Fallback,
                    }
                }
            },
            Err(ChatCredentialsError::MissingBaseUrl) => {
                warn!("CHAT_API_URL not set; chat broker using local canned replies.");
                Self {
                    mode: BrokerMode::Fallback,
                }
            }
            Err(ChatCredentialsError::MissingToken) => {
                warn!("CHAT_API_TOKEN not set; chat broker using local canned replies.");
                Self {
                    mode: BrokerMode::Fallback,
                }
            }
            Err(ChatCredentialsError::ClientBuild(message)) => {
                warn!(
                    "Failed to construct chat HTTP client ({}). Falling back to local replies.",
                    message
                );
                Self {
                    mode: BrokerMode::Fallback,
                }
            }
        }
    }

    /// Offline replies keyed off the user-message parity, so consecutive
    /// exchanges alternate between the two canned moods.
    fn fabricate_replies(&self, request: &ChatRequest) -> Vec<String> {
        let user_messages = request
            .history
            .iter()
            .filter(|line| line.role == ChatRole::User)
            .count();

        if user_messages % 2 == 0 {
            vec!["머어어어어".to_string(), "냐아아아아!?".to_string()]
        } else {
            vec!["머냥!".to_string()]
        }
    }
}

impl ChatBroker for HttpChatBroker {
    fn mode_label(&self) -> &'static str {
        match self.mode {
            BrokerMode::Live(_) => "live",
            BrokerMode::Fallback => "fallback",
        }
    }

    fn send(&self, request: &ChatRequest) -> Result<Vec<String>, ChatError> {
        match &self.mode {
            BrokerMode::Live(client) => client.send(request),
            BrokerMode::Fallback => Ok(self.fabricate_replies(request)),
        }
    }
}

struct LiveChatClient {
    http: Client,
    credentials: ChatCredentials,
}

impl LiveChatClient {
    fn new(credentials: ChatCredentials) -> Result<Self, ChatCredentialsError> {
        let http = Client::builder()
            .timeout(credentials.timeout)
            .build()
            .map_err(|err| ChatCredentialsError::ClientBuild(err.to_string()))?;

        Ok(Self { http, credentials })
    }

    fn send(&self, request: &ChatRequest) -> Result<Vec<String>, ChatError> {
        let payload = build_request_body(request);

        let response = self
            .http
            .post(self.credentials.chat_url())
            .bearer_auth(&self.credentials.token)
            .json(&payload)
            .send()
            .map_err(|err| ChatError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::status(status.as_u16()));
        }

        let body: ChatResponseBody = response
            .json()
            .map_err(|err| ChatError::malformed_response(err.to_string()))?;

        Ok(extract_contents(body))
    }
}

fn build_request_body(request: &ChatRequest) -> ChatRequestBody {
    let messages = request
        .history
        .iter()
        .enumerate()
        .map(|(index, line)| OutboundMessage {
            chat_id: index as u64,
            role: line.role.label(),
            content: line.content.clone(),
            chat_date: line.sent_at_ms,
        })
        .collect();

    let memories = request
        .memories
        .iter()
        .map(|memory| OutboundMemory {
            content: memory.content.clone(),
            created_at: memory.created_at_ms,
        })
        .collect();

    ChatRequestBody {
        messages,
        memories,
        status: OutboundStatus {
            hunger: request.hunger,
            love: request.love,
            mood: request.mood.label(),
        },
    }
}

fn extract_contents(body: ChatResponseBody) -> Vec<String> {
    body.messages
        .into_iter()
        .map(|message| message.content.trim().to_string())
        .filter(|content| !content.is_empty())
        .collect()
}

#[derive(Debug, Serialize)]
struct ChatRequestBody {
    messages: Vec<OutboundMessage>,
    memories: Vec<OutboundMemory>,
    status: OutboundStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutboundMessage {
    chat_id: u64,
    role: &'static str,
    content: String,
    chat_date: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutboundMemory {
    content: String,
    created_at: i64,
}

#[derive(Debug, Serialize)]
struct OutboundStatus {
    hunger: i64,
    love: i64,
    mood: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    #[serde(default)]
    messages: Vec<InboundMessage>,
}

#[derive(Debug, Deserialize)]
struct InboundMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_user_messages(count: usize) -> ChatRequest {
        let history = (0..count)
            .map(|n| ChatLogLine {
                role: ChatRole::User,
                content: format!("message {n}"),
                sent_at_ms: n as i64,
            })
            .collect();
        ChatRequest {
            history,
            memories: vec![MemoryEntry {
                content: "값 싼 츄르 아이템 사용".to_string(),
                created_at_ms: 77,
            }],
            hunger: 80,
            love: 95,
            mood: PetMood::Neutral,
        }
    }

    #[test]
    fn fallback_replies_alternate_with_message_parity() {
        let broker = HttpChatBroker {
            mode: BrokerMode::Fallback,
        };

        let odd = broker
            .send(&request_with_user_messages(1))
            .expect("fallback should succeed");
        assert_eq!(odd, vec!["머냥!".to_string()]);

        let even = broker
            .send(&request_with_user_messages(2))
            .expect("fallback should succeed");
        assert_eq!(
            even,
            vec!["머어어어어".to_string(), "냐아아아아!?".to_string()]
        );
    }

    #[test]
    fn request_body_uses_backend_field_names() {
        let body = build_request_body(&request_with_user_messages(1));
        let value = serde_json::to_value(&body).expect("body should serialize");

        assert_eq!(value["messages"][0]["chatId"], 0);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["chatDate"], 0);
        assert_eq!(value["memories"][0]["createdAt"], 77);
        assert_eq!(value["status"]["hunger"], 80);
        assert_eq!(value["status"]["mood"], "neutral");
    }

    #[test]
    fn empty_or_missing_reply_lists_parse_to_nothing() {
        let body: ChatResponseBody = serde_json::from_str("{}").expect("body should parse");
        assert!(extract_contents(body).is_empty());

        let body: ChatResponseBody = serde_json::from_str(
            r#"{"messages":[
                {"chatId":3,"content":"  머냥!  ","chatDate":"2025-06-02","role":"assistant"},
                {"chatId":4,"content":"   ","chatDate":"2025-06-02","role":"assistant"}
            ]}"#,
        )
        .expect("body should parse");
        assert_eq!(extract_contents(body), vec!["머냥!".to_string()]);
    }
}
