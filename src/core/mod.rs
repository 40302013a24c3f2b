//! Core module hosting the wall clock, save persistence, window-focus
//! lifecycle, and the shared notice channel.
pub mod clock;
pub mod lifecycle;
pub mod notice;
pub mod plugin;
pub mod save;

pub use plugin::CorePlugin;
