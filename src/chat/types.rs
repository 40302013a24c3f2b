//! Core chat data model: entries, roles, ids, and the persisted log.
use std::collections::VecDeque;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Display name of the cat on the other side of the conversation.
pub const BOT_NAME: &str = "머냥이";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn label(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Monotonic id for visible chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatMessageId(u64);

impl ChatMessageId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChatMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chat-{:04}", self.0)
    }
}

/// Hands out message ids in commit order.
#[derive(Resource, Debug)]
pub struct ChatIdAllocator {
    next: u64,
}

impl Default for ChatIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl ChatIdAllocator {
    pub fn allocate(&mut self) -> ChatMessageId {
        let id = ChatMessageId::new(self.next);
        self.next += 1;
        id
    }
}

/// A committed, visible message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub role: ChatRole,
    pub content: String,
    pub sent_at_ms: i64,
}

/// One row of the visible conversation. The typing indicator is an entry of
/// its own so the renderer never has to special-case a magic message.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEntry {
    Message(ChatMessage),
    TypingIndicator,
}

impl ChatEntry {
    pub fn is_typing_indicator(&self) -> bool {
        matches!(self, ChatEntry::TypingIndicator)
    }

    pub fn as_message(&self) -> Option<&ChatMessage> {
        match self {
            ChatEntry::Message(message) => Some(message),
            ChatEntry::TypingIndicator => None,
        }
    }
}

/// Persisted form of a committed message; the sentinel never gets one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLogLine {
    pub role: ChatRole,
    pub content: String,
    pub sent_at_ms: i64,
}

impl From<&ChatMessage> for ChatLogLine {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
            sent_at_ms: message.sent_at_ms,
        }
    }
}

/// Rolling window of the most recent committed messages. This is the exact
/// context slice each outbound request carries and the slice the save file
/// keeps.
#[derive(Resource, Debug)]
pub struct ChatHistory {
    lines: VecDeque<ChatLogLine>,
    limit: usize,
}

impl ChatHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn from_lines(lines: Vec<ChatLogLine>, limit: usize) -> Self {
        let mut history = Self::new(limit);
        for line in lines {
            history.push(line);
        }
        history
    }

    pub fn push(&mut self, line: ChatLogLine) {
        while self.lines.len() >= self.limit {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> impl Iterator<Item = &ChatLogLine> {
        self.lines.iter()
    }

    pub fn to_vec(&self) -> Vec<ChatLogLine> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(role: ChatRole, content: &str) -> ChatLogLine {
        ChatLogLine {
            role,
            content: content.to_string(),
            sent_at_ms: 0,
        }
    }

    #[test]
    fn history_keeps_only_the_most_recent_lines() {
        let mut history = ChatHistory::new(20);
        for n in 0..25 {
            history.push(line(ChatRole::User, &format!("message {n}")));
        }

        assert_eq!(history.len(), 20);
        let first = history.lines().next().expect("history should be non-empty");
        assert_eq!(first.content, "message 5");
    }

    #[test]
    fn loading_an_oversized_log_trims_to_the_window() {
        let lines: Vec<_> = (0..30)
            .map(|n| line(ChatRole::Assistant, &format!("reply {n}")))
            .collect();
        let history = ChatHistory::from_lines(lines, 20);
        assert_eq!(history.len(), 20);
    }

    #[test]
    fn typing_indicator_entries_carry_no_message() {
        let entry = ChatEntry::TypingIndicator;
        assert!(entry.is_typing_indicator());
        assert!(entry.as_message().is_none());

        let ids = &mut ChatIdAllocator::default();
        let message = ChatEntry::Message(ChatMessage {
            id: ids.allocate(),
            role: ChatRole::User,
            content: "안녕!".to_string(),
            sent_at_ms: 10,
        });
        assert!(!message.is_typing_indicator());
        assert_eq!(message.as_message().expect("message entry").id.value(), 1);
    }
}
