//! Debounced input capture: keystrokes cancel and reschedule one timer, and
//! settled text accumulates in a buffer until the next flush.
use bevy::prelude::*;

/// Composer state for the chat input line. There is exactly one debounce
/// handle; every input change cancels it before (possibly) rescheduling, so
/// rapid typing can never queue multiple expiries.
#[derive(Resource, Debug)]
pub struct ChatComposer {
    input: String,
    buffer: Vec<String>,
    debounce_remaining: Option<f32>,
    delay_seconds: f32,
    user_typing: bool,
}

impl ChatComposer {
    pub fn new(delay_seconds: f32) -> Self {
        Self {
            input: String::new(),
            buffer: Vec::new(),
            debounce_remaining: None,
            delay_seconds,
            user_typing: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    #[allow(dead_code)]
    pub fn is_user_typing(&self) -> bool {
        self.user_typing
    }

    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    #[allow(dead_code)]
    pub fn debounce_pending(&self) -> bool {
        self.debounce_remaining.is_some()
    }

    /// Records the new input text and restarts the idle countdown. Text that
    /// trims to nothing keeps the timer cancelled; there is nothing to send.
    pub fn on_input_change(&mut self, text: String) {
        self.input = text;
        self.user_typing = true;
        self.debounce_remaining = if self.input.trim().is_empty() {
            None
        } else {
            Some(self.delay_seconds)
        };
    }

    /// Explicit send: cancel any countdown and stash the input right away.
    /// Returns whether anything is now waiting to be flushed.
    pub fn on_send(&mut self) -> bool {
        self.stash_input();
        self.has_pending()
    }

    /// Advances the debounce countdown. Returns `true` when the countdown
    /// expired and moved text into the buffer this tick.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        let Some(remaining) = self.debounce_remaining else {
            return false;
        };

        let remaining = remaining - delta_seconds;
        if remaining > 0.0 {
            self.debounce_remaining = Some(remaining);
            return false;
        }

        self.stash_input()
    }

    /// Drains the buffered fragments in the order they settled.
    pub fn take_fragments(&mut self) -> Vec<String> {
        std::mem::take(&mut self.buffer)
    }

    fn stash_input(&mut self) -> bool {
        self.debounce_remaining = None;
        self.user_typing = false;

        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return false;
        }

        self.buffer.push(trimmed.to_string());
        self.input.clear();
        true
    }
}
