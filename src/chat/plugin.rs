//! Plugin wiring the chat engine resources and the per-frame loop.
use std::sync::Arc;

use bevy::prelude::*;

use super::{
    broker::{ActiveChatBroker, HttpChatBroker},
    composer::ChatComposer,
    config::ChatConfig,
    session::ChatSession,
    systems::{
        advance_chat_composer, poll_chat_response, reveal_bot_replies, start_chat_flush,
        InFlightChat,
    },
    transcript::{flush_chat_transcript, ChatTranscript},
    types::{ChatHistory, ChatIdAllocator},
};

pub struct ChatPlugin;

impl Plugin for ChatPlugin {
    fn build(&self, app: &mut App) {
        let config = ChatConfig::load_or_default();
        app.insert_resource(ChatComposer::new(config.debounce_seconds))
            .insert_resource(ChatHistory::new(config.history_limit))
            .insert_resource(ChatSession::default())
            .insert_resource(ChatIdAllocator::default())
            .insert_resource(InFlightChat::default())
            .insert_resource(ActiveChatBroker::new(Arc::new(HttpChatBroker::from_env())))
            .insert_resource(ChatTranscript::default())
            .insert_resource(config)
            .add_systems(Startup, log_chat_broker_mode)
            .add_systems(
                Update,
                (
                    (
                        advance_chat_composer,
                        poll_chat_response,
                        reveal_bot_replies,
                        start_chat_flush,
                    )
                        .chain(),
                    flush_chat_transcript,
                ),
            );
    }
}

fn log_chat_broker_mode(broker: Res<ActiveChatBroker>) {
    info!("ChatPlugin initialised in {} mode", broker.mode_label());
}
