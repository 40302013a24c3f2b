//! Chat engine: debounced input, one in-flight backend request, and paced
//! reply reveal behind a typing indicator.
pub mod broker;
pub mod composer;
pub mod config;
pub mod errors;
pub mod plugin;
pub mod session;
pub mod systems;
pub mod transcript;
pub mod types;

pub use plugin::ChatPlugin;
