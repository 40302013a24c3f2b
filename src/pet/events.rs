//! Messages driving status recalculation and item consumption.
use bevy::prelude::{Event, Message};

use crate::economy::items::ItemId;

/// Why a status recalculation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecalcReason {
    Startup,
    IntervalTick,
    Foreground,
}

impl RecalcReason {
    pub fn label(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::IntervalTick => "interval_tick",
            Self::Foreground => "foreground",
        }
    }
}

/// Asks the decay engine to bring the gauges up to date with wall-clock time.
///
/// All requests arriving in one frame collapse into a single recalculation.
#[derive(Event, Message, Debug, Clone, Copy)]
pub struct StatusRecalcRequested {
    pub reason: RecalcReason,
}

/// Asks the pet to consume one owned item.
#[derive(Event, Message, Debug, Clone, Copy)]
pub struct UseItemRequested {
    pub item_id: ItemId,
}
