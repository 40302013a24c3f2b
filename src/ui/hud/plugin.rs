// src/ui/hud/plugin.rs
//
// HudPlugin coordinates the status panel, notices, and HUD key bindings.

use bevy::prelude::*;

use super::components::{HudSettings, NoticeBoard};
use super::systems::{
    handle_action_keys, render_notice_text, spawn_hud, update_level_bar, update_notice_board,
    update_spend_preview, update_status_readout,
};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        info!("HudPlugin registered");

        app.insert_resource(HudSettings::default())
            .insert_resource(NoticeBoard::default())
            .add_systems(Startup, spawn_hud)
            .add_systems(
                Update,
                (
                    handle_action_keys,
                    update_status_readout,
                    update_level_bar,
                    update_spend_preview,
                    (update_notice_board, render_notice_text).chain(),
                ),
            );
    }
}
