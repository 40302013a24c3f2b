//! Visible conversation state: committed entries, the typing indicator, and
//! reply reveal pacing.
use std::collections::VecDeque;

use bevy::prelude::*;

use super::{
    config::ChatConfig,
    types::{ChatEntry, ChatIdAllocator, ChatMessage, ChatRole},
};

/// The conversation as the player sees it. While the session is awaiting or
/// revealing replies no new user messages are committed, so the typing
/// indicator is always the trailing entry whenever it exists; every path out
/// of the awaiting state removes it and lowers `bot_typing`.
#[derive(Resource, Debug, Default)]
pub struct ChatSession {
    entries: Vec<ChatEntry>,
    reveal_queue: VecDeque<String>,
    reveal_remaining: Option<f32>,
    bot_typing: bool,
}

impl ChatSession {
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn is_bot_typing(&self) -> bool {
        self.bot_typing
    }

    pub fn has_typing_indicator(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.is_typing_indicator())
    }

    pub fn push_user_message(&mut self, message: ChatMessage) {
        self.entries.push(ChatEntry::Message(message));
    }

    /// Marks the request in flight and shows the indicator.
    pub fn begin_awaiting(&mut self) {
        if self.bot_typing {
            return;
        }
        self.bot_typing = true;
        self.entries.push(ChatEntry::TypingIndicator);
    }

    /// Accepts the backend's replies for paced reveal. Zero replies is a
    /// valid outcome; the session just settles back to idle.
    pub fn queue_replies(&mut self, contents: Vec<String>, config: &ChatConfig) {
        match contents.first() {
            Some(first) => {
                self.reveal_remaining = Some(config.reveal_delay_seconds(first));
                self.reveal_queue = contents.into();
            }
            None => self.settle(),
        }
    }

    /// Failure path: the indicator disappears and exactly one fallback reply
    /// takes its place.
    pub fn fail(&mut self, fallback: ChatMessage) {
        self.remove_trailing_indicator();
        self.entries.push(ChatEntry::Message(fallback));
        self.reveal_queue.clear();
        self.reveal_remaining = None;
        self.bot_typing = false;
    }

    /// Counts down the current reveal delay; when it elapses the indicator
    /// is replaced by the real message, and a fresh indicator leads the next
    /// queued reply. Returns each message as it is committed.
    pub fn tick_reveal(
        &mut self,
        delta_seconds: f32,
        config: &ChatConfig,
        ids: &mut ChatIdAllocator,
        now_ms: i64,
    ) -> Option<ChatMessage> {
        let remaining = self.reveal_remaining? - delta_seconds;
        if remaining > 0.0 {
            self.reveal_remaining = Some(remaining);
            return None;
        }

        let Some(content) = self.reveal_queue.pop_front() else {
            self.settle();
            return None;
        };

        let message = ChatMessage {
            id: ids.allocate(),
            role: ChatRole::Assistant,
            content,
            sent_at_ms: now_ms,
        };
        self.remove_trailing_indicator();
        self.entries.push(ChatEntry::Message(message.clone()));

        match self.reveal_queue.front() {
            Some(next) => {
                self.entries.push(ChatEntry::TypingIndicator);
                self.reveal_remaining = Some(config.reveal_delay_seconds(next));
            }
            None => {
                self.reveal_remaining = None;
                self.bot_typing = false;
            }
        }

        Some(message)
    }

    fn settle(&mut self) {
        self.remove_trailing_indicator();
        self.reveal_queue.clear();
        self.reveal_remaining = None;
        self.bot_typing = false;
    }

    fn remove_trailing_indicator(&mut self) {
        if self
            .entries
            .last()
            .map(ChatEntry::is_typing_indicator)
            .unwrap_or(false)
        {
            self.entries.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_message(ids: &mut ChatIdAllocator, content: &str) -> ChatMessage {
        ChatMessage {
            id: ids.allocate(),
            role: ChatRole::User,
            content: content.to_string(),
            sent_at_ms: 0,
        }
    }

    fn contents(session: &ChatSession) -> Vec<String> {
        session
            .entries()
            .iter()
            .filter_map(|entry| entry.as_message())
            .map(|message| message.content.clone())
            .collect()
    }

    #[test]
    fn replies_reveal_in_order_with_an_indicator_between() {
        let config = ChatConfig::default();
        let mut ids = ChatIdAllocator::default();
        let mut session = ChatSession::default();

        session.push_user_message(user_message(&mut ids, "놀자!"));
        session.begin_awaiting();
        assert!(session.has_typing_indicator());

        session.queue_replies(
            vec!["머어어어어".to_string(), "냐아아아아!?".to_string()],
            &config,
        );

        let first = session
            .tick_reveal(10.0, &config, &mut ids, 100)
            .expect("first reply should reveal");
        assert_eq!(first.content, "머어어어어");
        assert!(
            session.has_typing_indicator(),
            "a fresh indicator must lead the next reply"
        );
        assert!(session.is_bot_typing());

        let second = session
            .tick_reveal(10.0, &config, &mut ids, 200)
            .expect("second reply should reveal");
        assert_eq!(second.content, "냐아아아아!?");
        assert!(!session.has_typing_indicator());
        assert!(!session.is_bot_typing());
        assert_eq!(contents(&session), vec!["놀자!", "머어어어어", "냐아아아아!?"]);
    }

    #[test]
    fn short_ticks_accumulate_towards_the_reveal_delay() {
        let config = ChatConfig::default();
        let mut ids = ChatIdAllocator::default();
        let mut session = ChatSession::default();

        session.begin_awaiting();
        // "머냥!" needs 450 ms.
        session.queue_replies(vec!["머냥!".to_string()], &config);

        assert!(session.tick_reveal(0.3, &config, &mut ids, 0).is_none());
        assert!(session.tick_reveal(0.2, &config, &mut ids, 0).is_some());
    }

    #[test]
    fn failure_swaps_the_indicator_for_one_fallback() {
        let mut ids = ChatIdAllocator::default();
        let mut session = ChatSession::default();

        session.push_user_message(user_message(&mut ids, "야옹아"));
        session.begin_awaiting();
        session.fail(ChatMessage {
            id: ids.allocate(),
            role: ChatRole::Assistant,
            content: "미안하다냥".to_string(),
            sent_at_ms: 0,
        });

        assert!(!session.has_typing_indicator());
        assert!(!session.is_bot_typing());
        assert_eq!(contents(&session), vec!["야옹아", "미안하다냥"]);
    }

    #[test]
    fn zero_replies_settle_without_residue() {
        let config = ChatConfig::default();
        let mut session = ChatSession::default();

        session.begin_awaiting();
        session.queue_replies(Vec::new(), &config);

        assert!(!session.has_typing_indicator());
        assert!(!session.is_bot_typing());
        assert!(session.entries().is_empty());
    }
}
