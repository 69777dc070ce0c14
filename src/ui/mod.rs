//! UI glue widgets.
//!
//! Every panel is a render function that takes read-only player snapshots
//! and returns a list of actions for the app layer to apply. Widgets never
//! call the engine and never mutate playback state directly.

pub mod control_bar;
pub mod info_panel;
pub mod overlay;
pub mod playlist;
pub mod status_bar;

pub use control_bar::{ControlBarAction, render_control_bar};
pub use info_panel::render_info_panel;
pub use overlay::{VideoAreaResponse, render_video_area};
pub use playlist::{PlaylistAction, render_playlist};
pub use status_bar::StatusBar;
