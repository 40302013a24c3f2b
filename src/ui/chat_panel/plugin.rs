// src/ui/chat_panel/plugin.rs
//
// ChatPanelPlugin coordinates the conversation panel systems and resources.

use bevy::prelude::*;

use super::components::ChatPanelSettings;
use super::systems::{capture_chat_input, spawn_chat_panel, update_chat_input, update_chat_log};

pub struct ChatPanelPlugin;

impl Plugin for ChatPanelPlugin {
    fn build(&self, app: &mut App) {
        info!("ChatPanelPlugin registered");

        app.insert_resource(ChatPanelSettings::default())
            .add_systems(Startup, spawn_chat_panel)
            .add_systems(
                Update,
                (capture_chat_input, update_chat_log, update_chat_input),
            );
    }
}
