// src/ui/chat_panel/mod.rs
//
// Conversation panel module: typed input capture, the visible message log,
// and the composer draft line.

pub mod components;
pub mod plugin;
pub mod systems;

// Re-export the main plugin
pub use plugin::ChatPanelPlugin;
