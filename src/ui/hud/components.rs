// src/ui/hud/components.rs
//
// Components and resources for the status HUD.

use bevy::prelude::*;
use std::time::Duration;

/// Marker for the text block showing gauges, balance, and level.
#[derive(Component, Debug)]
pub struct StatusReadout;

/// Marker for the experience bar fill node.
#[derive(Component, Debug)]
pub struct LevelBarFill;

/// Marker for the pending-spend preview line.
#[derive(Component, Debug)]
pub struct SpendPreviewReadout;

/// Marker for the transient notice line.
#[derive(Component, Debug)]
pub struct NoticeReadout;

#[derive(Debug)]
struct ActiveNotice {
    text: String,
    lifetime: Timer,
}

/// Holds the most recent notice until its display time runs out.
///
/// A newer notice replaces the current one immediately; the board never
/// queues.
#[derive(Resource, Debug, Default)]
pub struct NoticeBoard {
    current: Option<ActiveNotice>,
}

impl NoticeBoard {
    pub fn show(&mut self, text: String, lifetime_seconds: f32) {
        self.current = Some(ActiveNotice {
            text,
            lifetime: Timer::from_seconds(lifetime_seconds, TimerMode::Once),
        });
    }

    pub fn tick(&mut self, delta: Duration) {
        if let Some(active) = &mut self.current {
            if active.lifetime.tick(delta).is_finished() {
                self.current = None;
            }
        }
    }

    pub fn text(&self) -> &str {
        self.current
            .as_ref()
            .map(|active| active.text.as_str())
            .unwrap_or("")
    }
}

/// Resource containing settings for HUD layout and timing.
#[derive(Resource, Debug)]
pub struct HudSettings {
    /// How long a notice stays on screen (seconds).
    pub notice_seconds: f32,

    /// Offset of the status panel from the top-left corner (pixels).
    pub panel_offset: f32,

    /// Padding inside the status panel (pixels).
    pub padding: f32,

    /// Width of the status panel (pixels).
    pub panel_width: f32,

    /// Height of the experience bar (pixels).
    pub level_bar_height: f32,

    /// Font size for the status readout (points).
    pub status_font_size: f32,

    /// Font size for the notice line (points).
    pub notice_font_size: f32,

    /// Step applied per arrow-key press to the pending spend amount (원).
    pub spend_step_won: i64,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            notice_seconds: 4.0,
            panel_offset: 16.0,
            padding: 10.0,
            panel_width: 280.0,
            level_bar_height: 10.0,
            status_font_size: 18.0,
            notice_font_size: 18.0,
            spend_step_won: 1_000,
        }
    }
}
