//! Fullscreen mode coordination and aspect-ratio geometry.
//!
//! Entering fullscreen hides window chrome, switches the control bar to the
//! armed idle-hide policy and schedules a geometry recompute that is consumed
//! one UI tick later, after the platform has committed the new window bounds.
//! Leaving reverses all of it. Both directions are idempotent.
//!
//! The actual window calls (`ViewportCommand::Fullscreen` / `Decorations`)
//! live in the app layer; this type owns only the mode state machine.

use std::time::Instant;

use eframe::egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::visibility::VisibilityController;

/// Video surface aspect ratio. Defaults to 16:9 until real metadata arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Ratio from media resolution; ignores degenerate dimensions
    pub fn from_resolution(width: u32, height: u32) -> Option<Self> {
        if width > 0 && height > 0 {
            Some(Self { width, height })
        } else {
            None
        }
    }

    pub fn as_f32(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self {
            width: 16,
            height: 9,
        }
    }
}

/// Largest centered rectangle inside `parent` preserving `ratio`.
///
/// Width-constrained first; if the resulting height exceeds the available
/// height, recompute height-constrained instead. Derived fresh from parent
/// bounds on every call, never stored as absolute pixels.
pub fn fit_rect(parent: Rect, ratio: AspectRatio) -> Rect {
    let ratio = ratio.as_f32();
    let mut width = parent.width();
    let mut height = width / ratio;

    if height > parent.height() {
        height = parent.height();
        width = height * ratio;
    }

    let x = parent.left() + (parent.width() - width) / 2.0;
    let y = parent.top() + (parent.height() - height) / 2.0;
    Rect::from_min_size(Pos2::new(x, y), Vec2::new(width, height))
}

#[derive(Debug, Default)]
pub struct FullscreenMode {
    active: bool,
    recompute_pending: bool,
}

impl FullscreenMode {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter fullscreen: arm the control bar's idle-hide and schedule a
    /// deferred geometry recompute. No-op when already fullscreen.
    /// Returns whether the mode actually changed.
    pub fn enter(&mut self, control_bar: &mut VisibilityController, now: Instant) -> bool {
        if self.active {
            return false;
        }
        debug!("Entering fullscreen");
        self.active = true;
        control_bar.set_armed(true, now);
        control_bar.force_show(now);
        self.recompute_pending = true;
        true
    }

    /// Exit fullscreen: pin the control bar visible again. No-op when not
    /// fullscreen. Returns whether the mode actually changed.
    pub fn exit(&mut self, control_bar: &mut VisibilityController, now: Instant) -> bool {
        if !self.active {
            return false;
        }
        debug!("Exiting fullscreen");
        self.active = false;
        control_bar.set_armed(false, now);
        self.recompute_pending = true;
        true
    }

    pub fn toggle(&mut self, control_bar: &mut VisibilityController, now: Instant) -> bool {
        if self.active {
            self.exit(control_bar, now)
        } else {
            self.enter(control_bar, now)
        }
    }

    /// Ask for a geometry recompute on the next tick (window resize)
    pub fn schedule_recompute(&mut self) {
        self.recompute_pending = true;
    }

    /// Consume the pending recompute flag; called once per UI tick so the
    /// recompute lands after the platform committed the new bounds.
    pub fn take_recompute(&mut self) -> bool {
        std::mem::take(&mut self.recompute_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: f32, h: f32) -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(w, h))
    }

    #[test]
    fn test_fit_width_constrained() {
        // 4:3 inside 1000x1000: full width, 750 tall, centered vertically
        let ratio = AspectRatio::from_resolution(4, 3).unwrap();
        let fitted = fit_rect(rect(1000.0, 1000.0), ratio);
        assert_eq!(fitted.width(), 1000.0);
        assert_eq!(fitted.height(), 750.0);
        assert_eq!(fitted.left(), 0.0);
        assert_eq!(fitted.top(), 125.0);
    }

    #[test]
    fn test_fit_height_constrained() {
        // 16:9 inside a tall narrow parent: height capped, centered horizontally
        let fitted = fit_rect(rect(400.0, 100.0), AspectRatio::default());
        assert!((fitted.height() - 100.0).abs() < 0.01);
        let expected_width = 100.0 * 16.0 / 9.0;
        assert!((fitted.width() - expected_width).abs() < 0.01);
        assert!((fitted.left() - (400.0 - expected_width) / 2.0).abs() < 0.01);
        assert_eq!(fitted.top(), 0.0);
    }

    #[test]
    fn test_fit_respects_parent_offset() {
        let parent = Rect::from_min_size(Pos2::new(50.0, 20.0), Vec2::new(200.0, 200.0));
        let fitted = fit_rect(parent, AspectRatio { width: 1, height: 1 });
        assert_eq!(fitted.left(), 50.0);
        assert_eq!(fitted.top(), 20.0);
        assert_eq!(fitted.width(), 200.0);
    }

    #[test]
    fn test_degenerate_resolution_rejected() {
        assert!(AspectRatio::from_resolution(0, 9).is_none());
        assert!(AspectRatio::from_resolution(16, 0).is_none());
    }

    #[test]
    fn test_enter_is_idempotent() {
        let now = Instant::now();
        let mut mode = FullscreenMode::default();
        let mut bar = VisibilityController::default();

        assert!(mode.enter(&mut bar, now));
        assert!(mode.take_recompute());

        // Second enter: no state change, no extra recompute
        assert!(!mode.enter(&mut bar, now));
        assert!(!mode.take_recompute());
        assert!(mode.is_active());
        assert!(bar.armed());
    }

    #[test]
    fn test_exit_is_idempotent_and_pins_bar() {
        let now = Instant::now();
        let mut mode = FullscreenMode::default();
        let mut bar = VisibilityController::default();

        assert!(!mode.exit(&mut bar, now)); // not fullscreen yet

        mode.enter(&mut bar, now);
        assert!(mode.exit(&mut bar, now));
        assert!(!mode.is_active());
        assert!(!bar.armed());
        assert!(bar.visible());

        assert!(!mode.exit(&mut bar, now));
    }

    #[test]
    fn test_toggle_round_trip() {
        let now = Instant::now();
        let mut mode = FullscreenMode::default();
        let mut bar = VisibilityController::default();

        mode.toggle(&mut bar, now);
        assert!(mode.is_active());
        mode.toggle(&mut bar, now);
        assert!(!mode.is_active());
    }
}
