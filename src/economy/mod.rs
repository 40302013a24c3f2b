//! Economy module: shop catalogue, wallet, spending penalties, and progress.
pub mod budget;
pub mod events;
pub mod items;
pub mod plugin;
pub mod progress;
pub mod systems;
pub mod wallet;

pub use plugin::EconomyPlugin;
