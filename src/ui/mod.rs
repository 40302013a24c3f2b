// src/ui/mod.rs
//
// UI module providing screen-space UI elements.
//
// Current features:
// - Status HUD (gauges, balance, level bar, notices, key bindings)
// - Conversation panel (bottom-left message log and input line)

pub mod chat_panel;
pub mod hud;

use bevy::prelude::*;

pub use chat_panel::ChatPanelPlugin;
pub use hud::HudPlugin;

/// Adds every screen-space UI plugin.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((HudPlugin, ChatPanelPlugin));
    }
}
