//! Idle-hide state machine for transient UI surfaces.
//!
//! One instance per surface (control bar in fullscreen, video overlay).
//! Activity re-arms a soft timeout; expiry hides the surface unless the
//! pointer is currently over it, in which case the timer re-arms instead —
//! controls the user is hovering never blink away under the cursor.
//!
//! Timing is plain `Instant` comparison driven from the UI loop; latest
//! activity always wins, nothing accumulates.

use std::time::{Duration, Instant};

use eframe::egui::Pos2;

/// Default idle timeout before a surface hides
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Minimum pointer displacement that counts as activity, in points.
/// Filters out sub-pixel jitter re-triggering the overlay.
pub const POINTER_ACTIVITY_THRESHOLD: f32 = 3.0;

#[derive(Debug)]
pub struct VisibilityController {
    visible: bool,
    armed: bool,
    idle_timeout: Duration,
    last_activity: Option<Instant>,
    last_pointer: Option<Pos2>,
}

impl VisibilityController {
    /// Create a controller; disarmed surfaces are pinned visible
    pub fn new(idle_timeout: Duration, armed: bool) -> Self {
        Self {
            visible: true,
            armed,
            idle_timeout,
            last_activity: None,
            last_pointer: None,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn armed(&self) -> bool {
        self.armed
    }

    /// Arm or disarm the idle timer. Disarming pins the surface visible
    /// (windowed-mode control bar); arming restarts the countdown.
    pub fn set_armed(&mut self, armed: bool, now: Instant) {
        self.armed = armed;
        if armed {
            self.visible = true;
            self.last_activity = Some(now);
        } else {
            self.visible = true;
            self.last_activity = None;
        }
    }

    /// Record activity: cancel any pending hide, show, re-arm the timer
    pub fn notify_activity(&mut self, now: Instant) {
        self.visible = true;
        if self.armed {
            self.last_activity = Some(now);
        }
    }

    /// Pointer movement as activity source, with a displacement threshold.
    /// Returns true when the movement counted as activity.
    pub fn notify_pointer(&mut self, pos: Pos2, now: Instant) -> bool {
        let moved_enough = match self.last_pointer {
            Some(prev) => {
                let delta = pos - prev;
                delta.x.abs() + delta.y.abs() > POINTER_ACTIVITY_THRESHOLD
            }
            None => true,
        };
        self.last_pointer = Some(pos);

        if moved_enough {
            self.notify_activity(now);
        }
        moved_enough
    }

    /// Immediate show, bypassing the timer (mode transitions)
    pub fn force_show(&mut self, now: Instant) {
        self.visible = true;
        if self.armed {
            self.last_activity = Some(now);
        }
    }

    /// Immediate hide, bypassing the timer (mode transitions)
    pub fn force_hide(&mut self) {
        self.visible = false;
        self.last_activity = None;
    }

    /// Advance the idle timer. `pointer_over` is whether the pointer is
    /// currently inside the surface; at expiry it re-arms instead of hiding.
    pub fn tick(&mut self, now: Instant, pointer_over: bool) {
        if !self.armed || !self.visible {
            return;
        }

        let Some(last) = self.last_activity else {
            self.last_activity = Some(now);
            return;
        };

        if now.duration_since(last) >= self.idle_timeout {
            if pointer_over {
                self.last_activity = Some(now);
            } else {
                self.visible = false;
                self.last_activity = None;
            }
        }
    }
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new(IDLE_TIMEOUT, true)
    }
}
