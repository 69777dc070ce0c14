//! Application shell: eframe wiring for the playback core.
//!
//! The update loop is the single execution context that owns playback
//! state. Per frame, in order: pump engine callbacks, tick the position
//! poller, drain player events into UI caches, dispatch keyboard input,
//! advance the idle-hide controllers, then render panels and apply the
//! actions they returned.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, unbounded};
use eframe::egui;
use log::{debug, info, warn};

use crate::engine::{MediaEngine, MediaSource};
use crate::events::{PlayerEvent, PlayerEventSender};
use crate::fullscreen::{AspectRatio, FullscreenMode};
use crate::input::{Action, InputDispatcher, SEEK_STEP_MS, VOLUME_STEP};
use crate::player::Player;
use crate::poller::PositionPoller;
use crate::ui;
use crate::ui::{ControlBarAction, PlaylistAction, StatusBar};
use crate::utils::media;
use crate::visibility::{IDLE_TIMEOUT, VisibilityController};

/// Cadence for repaints while idle-hide timers are pending
const HIDE_TIMER_REPAINT: Duration = Duration::from_millis(250);

/// Main application state
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct VidraApp {
    // Persisted between sessions
    volume: u8,
    muted: bool,
    show_playlist: bool,
    show_info: bool,

    #[serde(skip)]
    player: Player,
    #[serde(skip)]
    player_rx: Option<Receiver<PlayerEvent>>,
    #[serde(skip)]
    poller: PositionPoller,
    /// Control bar idle-hide; disarmed (pinned visible) outside fullscreen
    #[serde(skip)]
    control_bar_vis: VisibilityController,
    /// Video overlay idle-hide; always armed
    #[serde(skip)]
    overlay_vis: VisibilityController,
    #[serde(skip)]
    fullscreen: FullscreenMode,
    #[serde(skip)]
    input: InputDispatcher,
    #[serde(skip)]
    status_bar: StatusBar,
    #[serde(skip)]
    playlist: Vec<PathBuf>,
    #[serde(skip)]
    playlist_current: Option<usize>,
    #[serde(skip)]
    aspect: AspectRatio,
    #[serde(skip)]
    last_area: Option<egui::Rect>,
    /// Fullscreen requested before the first frame (CLI -F)
    #[serde(skip)]
    pending_fullscreen: bool,
}

impl Default for VidraApp {
    fn default() -> Self {
        let (tx, rx) = unbounded();
        Self {
            volume: crate::player::DEFAULT_VOLUME,
            muted: false,
            show_playlist: false,
            show_info: false,
            player: Player::new(PlayerEventSender::new(tx)),
            player_rx: Some(rx),
            poller: PositionPoller::default(),
            control_bar_vis: VisibilityController::new(IDLE_TIMEOUT, false),
            overlay_vis: VisibilityController::new(IDLE_TIMEOUT, true),
            fullscreen: FullscreenMode::default(),
            input: InputDispatcher::new(),
            status_bar: StatusBar::new(),
            playlist: Vec::new(),
            playlist_current: None,
            aspect: AspectRatio::default(),
            last_area: None,
            pending_fullscreen: false,
        }
    }
}

impl VidraApp {
    /// Wire the engine into the playback controller and re-apply the
    /// persisted volume/mute state to it.
    pub fn attach_engine(
        &mut self,
        engine: Box<dyn MediaEngine>,
        engine_rx: Receiver<crate::engine::EngineEvent>,
    ) {
        self.player.attach_engine(engine, engine_rx);
        self.player.set_volume(self.volume as i32);
        if self.muted {
            self.player.set_muted(true);
        }
    }

    /// Override the persisted volume (CLI --volume)
    pub fn set_startup_volume(&mut self, volume: i32) {
        self.player.set_volume(volume);
        self.volume = self.player.volume();
    }

    /// Append entries to the session playlist
    pub fn enqueue(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        for path in paths {
            if media::is_media(&path) {
                self.playlist.push(path);
            } else {
                warn!("Skipping non-media file: {}", path.display());
            }
        }
    }

    /// Load a playlist entry by index
    pub fn load_entry(&mut self, index: usize) {
        let Some(path) = self.playlist.get(index) else {
            return;
        };
        info!("Playlist: loading entry {} ({})", index, path.display());
        self.playlist_current = Some(index);
        self.player.load(MediaSource::Path(path.clone()));
    }

    /// Load a source directly (CLI positional, URLs)
    pub fn load_source(&mut self, source: MediaSource) {
        if let MediaSource::Path(path) = &source {
            self.playlist.push(path.clone());
            self.playlist_current = Some(self.playlist.len() - 1);
        } else {
            self.playlist_current = None;
        }
        self.player.load(source);
    }

    pub fn request_fullscreen(&mut self) {
        // Applied on the first update, once a context exists
        self.fullscreen.schedule_recompute();
        self.pending_fullscreen = true;
    }

    fn set_fullscreen(&mut self, ctx: &egui::Context, active: bool, now: Instant) {
        let changed = if active {
            self.fullscreen.enter(&mut self.control_bar_vis, now)
        } else {
            self.fullscreen.exit(&mut self.control_bar_vis, now)
        };
        if changed {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(active));
            ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(!active));
        }
    }

    fn drain_player_events(&mut self, ctx: &egui::Context, now: Instant) {
        let Some(rx) = self.player_rx.as_ref() else {
            return;
        };
        let events: Vec<PlayerEvent> = rx.try_iter().collect();
        for event in events {
            match event {
                PlayerEvent::MediaChanged(media) => {
                    if let Some((w, h)) = media.resolution
                        && let Some(ratio) = AspectRatio::from_resolution(w, h)
                    {
                        self.aspect = ratio;
                        self.fullscreen.schedule_recompute();
                    }
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                        "{} - Vidra",
                        media.title
                    )));
                    self.status_bar.set_message(format!("Playing {}", media.title), now);
                    self.overlay_vis.force_show(now);
                }
                PlayerEvent::ErrorOccurred(message) => {
                    self.status_bar.set_error(message, now);
                }
                PlayerEvent::PlaybackFinished => {
                    self.advance_playlist();
                }
                // Panels read the player snapshot directly each frame
                PlayerEvent::PositionChanged { .. }
                | PlayerEvent::DurationChanged(_)
                | PlayerEvent::StateChanged { .. } => {}
                PlayerEvent::VolumeChanged(level) => {
                    self.volume = level;
                }
            }
        }
    }

    /// Auto-advance after natural end of media (never after user stop)
    fn advance_playlist(&mut self) {
        let Some(current) = self.playlist_current else {
            return;
        };
        let next = current + 1;
        if next < self.playlist.len() {
            self.load_entry(next);
        } else {
            debug!("Playlist exhausted");
        }
    }

    fn apply_action(&mut self, ctx: &egui::Context, action: Action, now: Instant) {
        match action {
            Action::PlayPause => self.player.play_pause(),
            Action::Stop => self.player.stop(),
            Action::SeekBack => self.player.seek_relative(-SEEK_STEP_MS),
            Action::SeekForward => self.player.seek_relative(SEEK_STEP_MS),
            Action::VolumeUp => self.player.adjust_volume(VOLUME_STEP),
            Action::VolumeDown => self.player.adjust_volume(-VOLUME_STEP),
            Action::ToggleMute => {
                self.player.toggle_mute();
                self.muted = self.player.is_muted();
            }
            Action::ToggleFullscreen => {
                let target = !self.fullscreen.is_active();
                self.set_fullscreen(ctx, target, now);
            }
            Action::TogglePlaylist => self.show_playlist = !self.show_playlist,
            Action::ToggleInfo => self.show_info = !self.show_info,
            Action::Escape => {
                if self.fullscreen.is_active() {
                    self.set_fullscreen(ctx, false, now);
                }
            }
        }

        // Transport feedback must be visible in fullscreen
        if action.is_transport() && self.fullscreen.is_active() {
            self.control_bar_vis.notify_activity(now);
        }
    }

    fn apply_control_bar_action(
        &mut self,
        ctx: &egui::Context,
        action: ControlBarAction,
        now: Instant,
    ) {
        match action {
            ControlBarAction::PlayPause => self.player.play_pause(),
            ControlBarAction::Stop => self.player.stop(),
            ControlBarAction::Seek(ms) => self.player.seek(ms),
            ControlBarAction::SetVolume(v) => self.player.set_volume(v),
            ControlBarAction::ToggleMute => {
                self.player.toggle_mute();
                self.muted = self.player.is_muted();
            }
            ControlBarAction::ToggleFullscreen => {
                let target = !self.fullscreen.is_active();
                self.set_fullscreen(ctx, target, now);
            }
            ControlBarAction::OpenFiles(paths) => {
                let first = self.playlist.len();
                self.enqueue(paths);
                if first < self.playlist.len() {
                    self.load_entry(first);
                }
            }
        }
    }

    fn apply_playlist_action(&mut self, action: PlaylistAction) {
        match action {
            PlaylistAction::Load(idx) => self.load_entry(idx),
            PlaylistAction::Remove(idx) => {
                if idx < self.playlist.len() {
                    self.playlist.remove(idx);
                    match self.playlist_current {
                        Some(cur) if cur == idx => self.playlist_current = None,
                        Some(cur) if cur > idx => self.playlist_current = Some(cur - 1),
                        _ => {}
                    }
                }
            }
            PlaylistAction::Clear => {
                self.playlist.clear();
                self.playlist_current = None;
            }
            PlaylistAction::Add(paths) => self.enqueue(paths),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if dropped.is_empty() {
            return;
        }

        let first = self.playlist.len();
        self.enqueue(dropped);
        // First drop into an idle player starts playback right away
        if self.playlist_current.is_none() && first < self.playlist.len() {
            self.load_entry(first);
        }
    }
}

impl eframe::App for VidraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if std::mem::take(&mut self.pending_fullscreen) {
            self.set_fullscreen(ctx, true, now);
        }

        // 1. Marshaling pump: engine callbacks onto this thread
        self.player.pump();

        // 2. Position sampling, gated on the playing state
        if self.poller.tick(now, self.player.is_playing()) {
            self.player.sample_position();
        }

        // 3. Player events into UI caches
        self.drain_player_events(ctx, now);

        // 4. Keyboard input
        let raw_events = ctx.input(|i| i.events.clone());
        let actions = self
            .input
            .dispatch(&raw_events, ctx.wants_keyboard_input());
        for action in actions {
            self.apply_action(ctx, action, now);
        }

        self.handle_dropped_files(ctx);

        // Window geometry changed: recompute letterbox next frame
        let area = ctx.screen_rect();
        if self.last_area != Some(area) {
            self.last_area = Some(area);
            self.fullscreen.schedule_recompute();
        }
        if self.fullscreen.take_recompute() {
            ctx.request_repaint();
        }

        // 5. Panels (side and bottom panels claim space before the video area)
        if self.show_playlist && !self.fullscreen.is_active() {
            for action in ui::render_playlist(ctx, &self.playlist, self.playlist_current) {
                self.apply_playlist_action(action);
            }
        }

        if !self.fullscreen.is_active() {
            self.status_bar.render(ctx, &self.player, now);
        }

        let mut bar_hovered = false;
        if self.control_bar_vis.visible() {
            let (bar_actions, hovered) =
                ui::render_control_bar(ctx, &self.player, self.fullscreen.is_active());
            bar_hovered = hovered;
            for action in bar_actions {
                self.apply_control_bar_action(ctx, action, now);
            }
        }

        let video = ui::render_video_area(
            ctx,
            &self.player,
            self.aspect,
            self.overlay_vis.visible() && self.player.media_info().is_some(),
        );
        if let Some(pos) = video.pointer_pos {
            // Movement over the video wakes both transient surfaces
            if self.overlay_vis.notify_pointer(pos, now) {
                self.control_bar_vis.notify_activity(now);
            }
        }
        if video.double_clicked {
            let target = !self.fullscreen.is_active();
            self.set_fullscreen(ctx, target, now);
        }

        if self.show_info {
            self.show_info = ui::render_info_panel(ctx, self.player.media_info());
        }

        // 6. Idle-hide timers
        self.control_bar_vis.tick(now, bar_hovered);
        self.overlay_vis.tick(now, false);

        // Keep frames coming for the poller and hide timers without input
        if self.player.is_playing() {
            ctx.request_repaint_after(self.poller.interval());
        } else if self.control_bar_vis.armed() || self.overlay_vis.visible() {
            ctx.request_repaint_after(HIDE_TIMER_REPAINT);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.volume = self.player.volume();
        self.muted = self.player.is_muted();
        if let Ok(json) = serde_json::to_string(self) {
            storage.set_string(eframe::APP_KEY, json);
            debug!(
                "App state saved: volume={}, muted={}",
                self.volume, self.muted
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_playlist(names: &[&str]) -> VidraApp {
        let mut app = VidraApp::default();
        app.enqueue(names.iter().map(PathBuf::from));
        app
    }

    #[test]
    fn test_enqueue_filters_non_media() {
        let app = app_with_playlist(&["/tmp/a.mp4", "/tmp/notes.txt", "/tmp/b.mkv"]);
        assert_eq!(app.playlist.len(), 2);
    }

    #[test]
    fn test_finished_advances_to_next_entry() {
        let mut app = app_with_playlist(&["/tmp/a.mp4", "/tmp/b.mp4"]);
        app.load_entry(0);
        assert_eq!(app.playlist_current, Some(0));

        app.advance_playlist();
        assert_eq!(app.playlist_current, Some(1));

        // Last entry: nothing after it
        app.advance_playlist();
        assert_eq!(app.playlist_current, Some(1));
    }

    #[test]
    fn test_remove_adjusts_current_index() {
        let mut app = app_with_playlist(&["/tmp/a.mp4", "/tmp/b.mp4", "/tmp/c.mp4"]);
        app.load_entry(2);

        app.apply_playlist_action(PlaylistAction::Remove(0));
        assert_eq!(app.playlist.len(), 2);
        assert_eq!(app.playlist_current, Some(1));

        // Removing the current entry clears the cursor
        app.apply_playlist_action(PlaylistAction::Remove(1));
        assert_eq!(app.playlist_current, None);
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut app = app_with_playlist(&["/tmp/a.mp4"]);
        app.load_entry(0);
        app.apply_playlist_action(PlaylistAction::Clear);
        assert!(app.playlist.is_empty());
        assert_eq!(app.playlist_current, None);
    }
}
