// src/ui/hud/mod.rs
//
// HUD module showing gauges, balance, level progress, notices, and the
// keyboard action bindings.

pub mod components;
pub mod plugin;
pub mod systems;

// Re-export the main plugin
pub use plugin::HudPlugin;
