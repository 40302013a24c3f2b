// src/ui/chat_panel/components.rs
//
// Components and resources for the conversation panel.

use bevy::prelude::*;

/// Marker for the scrolling conversation text block.
#[derive(Component, Debug)]
pub struct ChatLogReadout;

/// Marker for the input line under the conversation.
#[derive(Component, Debug)]
pub struct ChatInputReadout;

/// Resource containing settings for chat panel layout.
#[derive(Resource, Debug)]
pub struct ChatPanelSettings {
    /// How many conversation rows are rendered (older rows scroll away).
    pub visible_entries: usize,

    /// Panel width (pixels).
    pub panel_width: f32,

    /// Padding inside the panel (pixels).
    pub padding: f32,

    /// Offset from the bottom-left corner (pixels).
    pub corner_offset: f32,

    /// Font size for conversation rows (points).
    pub log_font_size: f32,

    /// Font size for the input line (points).
    pub input_font_size: f32,
}

impl Default for ChatPanelSettings {
    fn default() -> Self {
        Self {
            visible_entries: 8,
            panel_width: 420.0,
            padding: 10.0,
            corner_offset: 16.0,
            log_font_size: 16.0,
            input_font_size: 16.0,
        }
    }
}
