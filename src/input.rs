//! Keyboard input dispatcher.
//!
//! One static key table for the whole player surface, replacing the usual
//! pile of per-widget shortcut handlers with slightly different guards.
//! Suppression rules, checked in order:
//!
//! 1. a text-input widget has keyboard focus: forward everything unhandled
//! 2. any modifier is held: forward unhandled (combos belong to the host)
//! 3. otherwise map the key and consume the event
//!
//! The dispatcher is registered against the player focus scope by the app
//! layer; it never inspects widget types at runtime.

use eframe::egui::{Event, Key};

/// Seek step for arrow keys, ms
pub const SEEK_STEP_MS: i64 = 5000;

/// Volume step for arrow keys, percent points
pub const VOLUME_STEP: i32 = 5;

/// High-level action mapped from a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PlayPause,
    Stop,
    SeekBack,
    SeekForward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
    TogglePlaylist,
    ToggleInfo,
    /// Exit fullscreen (no-op outside fullscreen)
    Escape,
}

impl Action {
    /// Whether the action changes playback or volume; those also count as
    /// control-bar activity in fullscreen so the feedback is visible.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Action::PlayPause
                | Action::Stop
                | Action::SeekBack
                | Action::SeekForward
                | Action::VolumeUp
                | Action::VolumeDown
                | Action::ToggleMute
        )
    }
}

/// The single static key map for the player surface
const BINDINGS: &[(Key, Action)] = &[
    (Key::Space, Action::PlayPause),
    (Key::S, Action::Stop),
    (Key::ArrowLeft, Action::SeekBack),
    (Key::ArrowRight, Action::SeekForward),
    (Key::ArrowUp, Action::VolumeUp),
    (Key::ArrowDown, Action::VolumeDown),
    (Key::M, Action::ToggleMute),
    (Key::F, Action::ToggleFullscreen),
    (Key::F11, Action::ToggleFullscreen),
    (Key::L, Action::TogglePlaylist),
    (Key::I, Action::ToggleInfo),
    (Key::Escape, Action::Escape),
];

#[derive(Debug, Default)]
pub struct InputDispatcher;

impl InputDispatcher {
    pub fn new() -> Self {
        Self
    }

    fn lookup(key: Key) -> Option<Action> {
        BINDINGS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, action)| *action)
    }

    /// Map raw key events to actions.
    ///
    /// `wants_text_input` is the focus-scope guard supplied by the app layer
    /// (true while any text field owns the keyboard).
    pub fn dispatch(&self, events: &[Event], wants_text_input: bool) -> Vec<Action> {
        if wants_text_input {
            return Vec::new();
        }

        let mut actions = Vec::new();
        for event in events {
            let Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } = event
            else {
                continue;
            };

            // Modifier combos are reserved for the host environment
            if modifiers.any() {
                continue;
            }

            if let Some(action) = Self::lookup(*key) {
                actions.push(action);
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Modifiers;

    fn key_event(key: Key, modifiers: Modifiers) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn test_basic_mapping() {
        let dispatcher = InputDispatcher::new();
        let events = vec![
            key_event(Key::Space, Modifiers::NONE),
            key_event(Key::ArrowRight, Modifiers::NONE),
            key_event(Key::M, Modifiers::NONE),
        ];
        assert_eq!(
            dispatcher.dispatch(&events, false),
            vec![Action::PlayPause, Action::SeekForward, Action::ToggleMute]
        );
    }

    #[test]
    fn test_text_focus_suppresses_everything() {
        let dispatcher = InputDispatcher::new();
        let events = vec![key_event(Key::Space, Modifiers::NONE)];
        assert!(dispatcher.dispatch(&events, true).is_empty());
    }

    #[test]
    fn test_modifiers_forward_unhandled() {
        let dispatcher = InputDispatcher::new();
        let events = vec![
            key_event(Key::Space, Modifiers::CTRL),
            key_event(Key::F, Modifiers::ALT),
            key_event(Key::ArrowLeft, Modifiers::SHIFT),
        ];
        assert!(dispatcher.dispatch(&events, false).is_empty());
    }

    #[test]
    fn test_release_events_ignored() {
        let dispatcher = InputDispatcher::new();
        let events = vec![Event::Key {
            key: Key::Space,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: Modifiers::NONE,
        }];
        assert!(dispatcher.dispatch(&events, false).is_empty());
    }

    #[test]
    fn test_unbound_keys_pass_through() {
        let dispatcher = InputDispatcher::new();
        let events = vec![key_event(Key::Z, Modifiers::NONE)];
        assert!(dispatcher.dispatch(&events, false).is_empty());
    }

    #[test]
    fn test_fullscreen_on_f_and_f11() {
        let dispatcher = InputDispatcher::new();
        let events = vec![
            key_event(Key::F, Modifiers::NONE),
            key_event(Key::F11, Modifiers::NONE),
        ];
        assert_eq!(
            dispatcher.dispatch(&events, false),
            vec![Action::ToggleFullscreen, Action::ToggleFullscreen]
        );
    }

    #[test]
    fn test_transport_classification() {
        assert!(Action::PlayPause.is_transport());
        assert!(Action::VolumeDown.is_transport());
        assert!(!Action::ToggleFullscreen.is_transport());
        assert!(!Action::TogglePlaylist.is_transport());
        assert!(!Action::Escape.is_transport());
    }
}
