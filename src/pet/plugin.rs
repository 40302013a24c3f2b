//! Plugin wiring for pet state, decay triggers, and item use.
use bevy::prelude::*;

use super::{
    config::PetConfig,
    events::{StatusRecalcRequested, UseItemRequested},
    state::{MemoryLog, PetState},
    systems::{
        advance_decay_timer, forward_foreground_transitions, handle_item_use,
        request_initial_recalc, run_status_recalc, DecayTickTimer,
    },
};

pub struct PetPlugin;

impl Plugin for PetPlugin {
    fn build(&self, app: &mut App) {
        let config = PetConfig::load_or_default();
        app.insert_resource(PetState::first_run(&config))
            .insert_resource(MemoryLog::default())
            .insert_resource(DecayTickTimer::new(config.recalc_interval_seconds))
            .insert_resource(config)
            .add_message::<StatusRecalcRequested>()
            .add_message::<UseItemRequested>()
            .add_systems(Startup, request_initial_recalc)
            .add_systems(
                Update,
                (
                    advance_decay_timer,
                    forward_foreground_transitions,
                    run_status_recalc,
                    handle_item_use,
                )
                    .chain(),
            );
    }
}
