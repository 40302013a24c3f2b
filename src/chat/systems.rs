//! Systems driving the debounce, flush, poll, and reveal loop.
use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, IoTaskPool, Task};

use crate::core::clock::epoch_millis;
use crate::pet::state::{MemoryLog, PetState};

use super::{
    broker::{ActiveChatBroker, ChatOutcome, ChatRequest},
    composer::ChatComposer,
    config::ChatConfig,
    session::ChatSession,
    transcript::ChatTranscript,
    types::{ChatHistory, ChatIdAllocator, ChatLogLine, ChatMessage, ChatRole},
};

/// Reply substituted when the backend cannot be reached; never retried.
pub const FALLBACK_REPLY: &str = "지금은 대답하기 어렵다냥... 조금 있다가 다시 말 걸어 달라냥!";

/// Holds the single outbound request while the IO pool works on it.
#[derive(Resource, Default)]
pub struct InFlightChat {
    task: Option<Task<ChatOutcome>>,
}

impl InFlightChat {
    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }
}

/// Advances the idle countdown on the input line.
pub fn advance_chat_composer(time: Res<Time>, mut composer: ResMut<ChatComposer>) {
    if composer.tick(time.delta_secs()) {
        debug!("Debounce expired; input settled into the outgoing buffer");
    }
}

/// Polls the in-flight request. Success hands the replies to the session for
/// paced reveal; failure commits the fixed fallback reply instead.
pub fn poll_chat_response(
    mut in_flight: ResMut<InFlightChat>,
    mut session: ResMut<ChatSession>,
    mut history: ResMut<ChatHistory>,
    mut ids: ResMut<ChatIdAllocator>,
    mut transcript: ResMut<ChatTranscript>,
    config: Res<ChatConfig>,
    time: Res<Time>,
) {
    let Some(task) = in_flight.task.as_mut() else {
        return;
    };
    let Some(outcome) = block_on(future::poll_once(task)) else {
        return;
    };
    in_flight.task = None;

    match outcome {
        Ok(replies) => {
            debug!("Chat backend returned {} replies", replies.len());
            session.queue_replies(replies, &config);
        }
        Err(err) => {
            warn!("Chat request failed: {err}");
            transcript.record_failure(time.elapsed_secs_f64(), err.to_string());

            let fallback = ChatMessage {
                id: ids.allocate(),
                role: ChatRole::Assistant,
                content: FALLBACK_REPLY.to_string(),
                sent_at_ms: epoch_millis(),
            };
            history.push(ChatLogLine::from(&fallback));
            transcript.record_message(time.elapsed_secs_f64(), ChatRole::Assistant, FALLBACK_REPLY);
            session.fail(fallback);
        }
    }
}

/// Ticks the reveal delay and commits each reply as it surfaces.
pub fn reveal_bot_replies(
    time: Res<Time>,
    mut session: ResMut<ChatSession>,
    config: Res<ChatConfig>,
    mut ids: ResMut<ChatIdAllocator>,
    mut history: ResMut<ChatHistory>,
    mut transcript: ResMut<ChatTranscript>,
) {
    if let Some(message) =
        session.tick_reveal(time.delta_secs(), &config, &mut ids, epoch_millis())
    {
        history.push(ChatLogLine::from(&message));
        transcript.record_message(
            time.elapsed_secs_f64(),
            message.role,
            message.content.clone(),
        );
        debug!("Revealed reply {}", message.id);
    }
}

/// Commits buffered fragments as user messages and dispatches one request on
/// the IO pool. Skipped while a request is in flight or replies are still
/// revealing; the pending buffer simply waits, which is what makes deferred
/// flushes run as soon as the session settles.
pub fn start_chat_flush(
    mut composer: ResMut<ChatComposer>,
    mut session: ResMut<ChatSession>,
    mut history: ResMut<ChatHistory>,
    mut ids: ResMut<ChatIdAllocator>,
    mut in_flight: ResMut<InFlightChat>,
    mut transcript: ResMut<ChatTranscript>,
    broker: Res<ActiveChatBroker>,
    pet: Res<PetState>,
    memories: Res<MemoryLog>,
    time: Res<Time>,
) {
    if in_flight.is_busy() || session.is_bot_typing() {
        return;
    }
    if !composer.has_pending() {
        return;
    }

    let now_ms = epoch_millis();
    let fragments = composer.take_fragments();
    let fragment_count = fragments.len();
    for fragment in fragments {
        let message = ChatMessage {
            id: ids.allocate(),
            role: ChatRole::User,
            content: fragment,
            sent_at_ms: now_ms,
        };
        history.push(ChatLogLine::from(&message));
        transcript.record_message(
            time.elapsed_secs_f64(),
            ChatRole::User,
            message.content.clone(),
        );
        session.push_user_message(message);
    }
    session.begin_awaiting();

    let request = ChatRequest {
        history: history.to_vec(),
        memories: memories.entries().to_vec(),
        hunger: pet.hunger(),
        love: pet.love(),
        mood: pet.mood(),
    };
    let broker = broker.handle();
    let task = IoTaskPool::get().spawn(async move { broker.send(&request) });
    in_flight.task = Some(task);

    info!(
        "Chat flush dispatched: {} fragments, context depth {}",
        fragment_count,
        history.len()
    );
}
