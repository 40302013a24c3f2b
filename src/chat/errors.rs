//! Error types surfaced by the chat backend.
use std::fmt;

/// Failure categories an outbound chat request can hit. Every variant takes
/// the same recovery path: one fallback reply, no retry.
#[derive(Debug, Clone)]
pub enum ChatError {
    Transport { message: String },
    Status { code: u16 },
    MalformedResponse { message: String },
}

impl ChatError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(code: u16) -> Self {
        Self::Status { code }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { message } => write!(f, "transport failure: {}", message),
            Self::Status { code } => write!(f, "backend returned HTTP {}", code),
            Self::MalformedResponse { message } => {
                write!(f, "malformed response: {}", message)
            }
        }
    }
}

impl std::error::Error for ChatError {}
