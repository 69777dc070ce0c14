//! VIDRA - Desktop media player shell library
//!
//! Re-exports all modules for use by binary targets.

pub mod app;
pub mod cli;
pub mod config;
pub mod engine;
pub mod events;
pub mod fullscreen;
pub mod input;
pub mod player;
pub mod poller;
pub mod ui;
pub mod utils;
pub mod visibility;

// Re-export commonly used types
pub use app::VidraApp;
pub use engine::{EngineError, EngineEvent, EngineEventSender, MediaEngine, MediaSource};
pub use events::{PlayerEvent, PlayerEventSender};
pub use player::{MediaIdentity, PlaybackState, Player, TimelinePosition, VolumeState};
