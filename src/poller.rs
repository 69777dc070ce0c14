//! Periodic position sampler.
//!
//! **Why**: The engine's own time callbacks are too chatty and arrive on the
//! wrong thread; the UI instead samples position/duration at a fixed cadence
//! while playing: `tick()` is called every frame and decides from elapsed
//! wall time whether a sample is due.
//!
//! The poller only gates timing. Reading the engine and emitting
//! `PositionChanged` stays in the playback controller so this type never
//! touches volume or media identity.

use std::time::{Duration, Instant};

/// Default sampling interval
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug)]
pub struct PositionPoller {
    interval: Duration,
    last_sample: Option<Instant>,
}

impl PositionPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_sample: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true when a sample is due.
    ///
    /// While not playing the phase is reset, so polling restarts cleanly
    /// (first tick after resume samples immediately).
    pub fn tick(&mut self, now: Instant, playing: bool) -> bool {
        if !playing {
            self.last_sample = None;
            return false;
        }

        match self.last_sample {
            None => {
                self.last_sample = Some(now);
                true
            }
            Some(last) if now.duration_since(last) >= self.interval => {
                self.last_sample = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}

impl Default for PositionPoller {
    fn default() -> Self {
        Self::new(POLL_INTERVAL)
    }
}
