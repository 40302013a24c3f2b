//! User-facing notice lines surfaced by the HUD.
use bevy::prelude::{Event, Message};

/// One human-readable line shown to the player (rejected actions, purchase
/// results, and similar). Never a stack trace.
#[derive(Event, Message, Debug, Clone)]
pub struct Notice {
    text: String,
}

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
