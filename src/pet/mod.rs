//! Pet status: hunger and love gauges, time-based decay, and memories.
pub mod config;
pub mod events;
pub mod plugin;
pub mod state;
pub mod systems;

pub use plugin::PetPlugin;
