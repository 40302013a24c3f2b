//! Systems driving decay triggers and item consumption.
use bevy::prelude::*;

use crate::{
    core::{clock::epoch_millis, lifecycle::ForegroundTransition, notice::Notice},
    economy::items::{ItemCatalog, ItemCategory, OwnedItems},
};

use super::{
    config::PetConfig,
    events::{RecalcReason, StatusRecalcRequested, UseItemRequested},
    state::{MemoryLog, PetState},
};

/// Repeating timer behind the fixed-interval recalculation trigger.
#[derive(Resource, Debug)]
pub struct DecayTickTimer {
    timer: Timer,
}

impl DecayTickTimer {
    pub fn new(interval_seconds: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval_seconds, TimerMode::Repeating),
        }
    }
}

/// Startup trigger: bring the gauges up to date with time spent offline.
pub fn request_initial_recalc(mut requests: MessageWriter<StatusRecalcRequested>) {
    requests.write(StatusRecalcRequested {
        reason: RecalcReason::Startup,
    });
}

/// Interval trigger while the app runs.
pub fn advance_decay_timer(
    time: Res<Time>,
    mut tick: ResMut<DecayTickTimer>,
    mut requests: MessageWriter<StatusRecalcRequested>,
) {
    if tick.timer.tick(time.delta()).just_finished() {
        requests.write(StatusRecalcRequested {
            reason: RecalcReason::IntervalTick,
        });
    }
}

/// Foreground trigger: the window came back into focus.
pub fn forward_foreground_transitions(
    mut transitions: MessageReader<ForegroundTransition>,
    mut requests: MessageWriter<StatusRecalcRequested>,
) {
    if transitions.read().count() == 0 {
        return;
    }
    requests.write(StatusRecalcRequested {
        reason: RecalcReason::Foreground,
    });
}

/// Drains all pending triggers and recalculates at most once per frame, so
/// back-to-back triggers cannot interleave or double-decay.
pub fn run_status_recalc(
    mut requests: MessageReader<StatusRecalcRequested>,
    config: Res<PetConfig>,
    mut pet: ResMut<PetState>,
) {
    let mut last_reason = None;
    for request in requests.read() {
        last_reason = Some(request.reason);
    }
    let Some(reason) = last_reason else {
        return;
    };

    let outcome = pet.recalculate(epoch_millis(), &config);
    if outcome.decayed() {
        info!(
            "Gauges decayed by {} minute(s) ({}); hunger={}, love={}",
            outcome.elapsed_minutes,
            reason.label(),
            pet.hunger(),
            pet.love()
        );
    } else {
        debug!(
            "Status recalculated ({}); no whole minute elapsed",
            reason.label()
        );
    }
}

/// Validates and applies item consumption. Rejections happen before any
/// state is touched; the success path decrements the owned count, applies
/// gauge effects, and records the memory entry the chat backend later sees.
pub fn handle_item_use(
    mut requests: MessageReader<UseItemRequested>,
    catalog: Res<ItemCatalog>,
    mut owned: ResMut<OwnedItems>,
    mut pet: ResMut<PetState>,
    mut memories: ResMut<MemoryLog>,
    mut notices: MessageWriter<Notice>,
) {
    for request in requests.read() {
        let Some(item) = catalog.get(request.item_id) else {
            warn!("Item use rejected: unknown id {}", request.item_id);
            notices.write(Notice::new("알 수 없는 아이템이다냥."));
            continue;
        };

        if item.category != ItemCategory::Food {
            notices.write(Notice::new("먹을 수 없는 아이템이다냥."));
            continue;
        }

        if !owned.consume_one(item.id) {
            notices.write(Notice::new("아이템이 없다냥! 상점에서 사 달라냥."));
            continue;
        }

        pet.apply_item_effect(item);
        memories.record_item_use(item.name, epoch_millis());
        info!(
            "Item used: {} (hunger={}, love={}, remaining={})",
            item.name,
            pet.hunger(),
            pet.love(),
            owned.count(item.id)
        );
        notices.write(Notice::new(format!(
            "{} 냠냠! 허기 +{}, 애정 +{}",
            item.name,
            item.hunger_effect.unwrap_or(0),
            item.love_effect.unwrap_or(0)
        )));
    }
}
