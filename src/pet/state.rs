//! Pet need gauges, wall-clock decay, and the item-use memory log.
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::economy::items::{ItemCategory, ItemDef};

use super::config::PetConfig;

pub const GAUGE_MIN: i64 = 0;
pub const GAUGE_MAX: i64 = 100;
pub const MILLIS_PER_MINUTE: i64 = 60_000;

const ITEM_USE_MEMORY_SUFFIX: &str = "아이템 사용";

/// Clamps an arbitrary integer into the valid gauge range.
pub fn clamp_gauge(value: i64) -> i64 {
    value.clamp(GAUGE_MIN, GAUGE_MAX)
}

/// Coarse pet mood forwarded to the chat backend.
///
/// Only `Neutral` is produced today; the other variants exist because the
/// wire contract already names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetMood {
    #[default]
    Neutral,
    Happy,
    Sad,
}

impl PetMood {
    pub fn label(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
        }
    }
}

/// Outcome of a decay recalculation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecayOutcome {
    pub elapsed_minutes: i64,
}

impl DecayOutcome {
    pub fn decayed(&self) -> bool {
        self.elapsed_minutes > 0
    }
}

/// The pet's need gauges plus the timestamp of the last recalculation.
///
/// Owned exclusively by the decay engine; every mutation path re-clamps the
/// gauges so the [0,100] invariant holds at all times.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PetState {
    hunger: i64,
    love: i64,
    mood: PetMood,
    last_update_ms: Option<i64>,
}

impl PetState {
    pub fn new(hunger: i64, love: i64, mood: PetMood, last_update_ms: Option<i64>) -> Self {
        Self {
            hunger: clamp_gauge(hunger),
            love: clamp_gauge(love),
            mood,
            last_update_ms,
        }
    }

    /// First-run state: full gauges, no recorded recalculation yet.
    pub fn first_run(config: &PetConfig) -> Self {
        Self::new(config.start, config.start, PetMood::default(), None)
    }

    pub fn hunger(&self) -> i64 {
        self.hunger
    }

    pub fn love(&self) -> i64 {
        self.love
    }

    pub fn mood(&self) -> PetMood {
        self.mood
    }

    pub fn last_update_ms(&self) -> Option<i64> {
        self.last_update_ms
    }

    /// Applies linear decay for the whole minutes elapsed since the last
    /// recalculation, then records `now_ms` as the new baseline.
    ///
    /// Calling twice with the same `now_ms` is idempotent: the second call
    /// sees zero elapsed minutes. A `now_ms` earlier than the stored
    /// baseline (clock skew) also decays nothing.
    pub fn recalculate(&mut self, now_ms: i64, config: &PetConfig) -> DecayOutcome {
        let elapsed_minutes = match self.last_update_ms {
            Some(last) => (now_ms - last).max(0) / MILLIS_PER_MINUTE,
            None => 0,
        };

        let loss = elapsed_minutes * config.decay_per_minute;
        if loss > 0 {
            self.hunger = clamp_gauge(self.hunger - loss);
            self.love = clamp_gauge(self.love - loss);
        }
        self.last_update_ms = Some(now_ms);

        DecayOutcome { elapsed_minutes }
    }

    /// Applies a food item's gauge effects, clamped to the valid range.
    ///
    /// Non-food items carry no effects and leave the gauges untouched;
    /// callers reject them before reaching this point.
    pub fn apply_item_effect(&mut self, item: &ItemDef) {
        if item.category != ItemCategory::Food {
            return;
        }
        self.hunger = clamp_gauge(self.hunger + item.hunger_effect.unwrap_or(0));
        self.love = clamp_gauge(self.love + item.love_effect.unwrap_or(0));
    }
}

/// One remembered moment, forwarded to the chat backend as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub content: String,
    pub created_at_ms: i64,
}

/// Append-only log of item-use moments.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct MemoryLog {
    entries: Vec<MemoryEntry>,
}

impl MemoryLog {
    pub fn from_entries(entries: Vec<MemoryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    pub fn record_item_use(&mut self, item_name: &str, now_ms: i64) {
        self.entries.push(MemoryEntry {
            content: format!("{} {}", item_name, ITEM_USE_MEMORY_SUFFIX),
            created_at_ms: now_ms,
        });
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
