//! Player event stream consumed by the UI layer.
//!
//! Events are emitted when significant playback state changes occur and
//! handled by the application shell to refresh UI observers (control bar,
//! overlay, status displays). Delivery order matches transition order.

use crossbeam_channel::Sender;

use crate::player::MediaIdentity;

/// Events published by the playback controller
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// New media was loaded and confirmed playing (identity may be partial)
    MediaChanged(MediaIdentity),

    /// Timeline position advanced (poller sample or explicit reset)
    PositionChanged { position_ms: i64, duration_ms: i64 },

    /// Media duration became known or changed
    DurationChanged(i64),

    /// Playing/not-playing flipped (pause, stop and error all report false)
    StateChanged { playing: bool },

    /// Effective volume level changed (not emitted while muted)
    VolumeChanged(u8),

    /// An engine command or callback reported a failure
    ErrorOccurred(String),

    /// Media ran to its end (distinct from user-initiated stop, so a
    /// playlist collaborator can advance)
    PlaybackFinished,
}

/// Event sender wrapper for the playback controller.
///
/// The controller holds this sender and emits events as transitions are
/// applied on the UI thread.
#[derive(Clone, Debug)]
pub struct PlayerEventSender {
    sender: Option<Sender<PlayerEvent>>,
}

impl PlayerEventSender {
    /// Create event sender (connected to channel)
    pub fn new(sender: Sender<PlayerEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Create dummy sender (for tests or when events not needed)
    pub fn dummy() -> Self {
        Self { sender: None }
    }

    /// Emit event (silent if no receiver)
    pub fn emit(&self, event: PlayerEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event); // Ignore send errors (receiver might be dropped)
        }
    }
}

impl Default for PlayerEventSender {
    fn default() -> Self {
        Self::dummy()
    }
}
