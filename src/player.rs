//! Playback controller: the authoritative owner of playback state.
//!
//! **Why**: Three independent timelines touch playback — user input, the
//! position poller, and callbacks fired from the engine's own thread. This
//! controller is the single place they meet: commands go out through the
//! engine adapter, callbacks come back through a channel and are applied in
//! [`Player::pump`] on the UI thread, and everything downstream observes the
//! resulting [`PlayerEvent`] stream.
//!
//! **Used by**: app shell (commands + pump), UI widgets (read-only snapshots)
//!
//! # State machine
//!
//! Idle -(load)-> Loading -(engine Playing)-> Playing <-> Paused;
//! any -(stop)-> Stopped; Playing -(EndReached)-> Stopped + PlaybackFinished;
//! any -(EncounteredError)-> Error, terminal until the next load.
//!
//! play/pause never flip state optimistically; the engine's confirmation
//! callback does, so a rejected command cannot desynchronize the UI.

use crossbeam_channel::Receiver;
use log::{debug, info, warn};

use crate::engine::{EngineEvent, MediaEngine, MediaSource};
use crate::events::{PlayerEvent, PlayerEventSender};

/// Default volume applied before any user adjustment
pub const DEFAULT_VOLUME: u8 = 75;

/// Authoritative lifecycle stage for the current media
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Playing,
    Paused,
    Stopped,
    Error,
}

/// Identity and metadata of the currently loaded media.
///
/// Created on confirmed load, replaced wholesale by the next load, kept
/// across stop (stop only resets position). `None` fields are undetermined,
/// never guessed.
#[derive(Debug, Clone)]
pub struct MediaIdentity {
    pub source: MediaSource,
    pub title: String,
    pub duration_ms: i64,
    pub container: Option<String>,
    pub video_codec: Option<String>,
    pub resolution: Option<(u32, u32)>,
    pub frame_rate: Option<f32>,
    pub audio: Option<String>,
    pub file_size: Option<u64>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Volume level, mute flag and the level unmute restores.
///
/// Invariants: `pre_mute_level` is written only on the unmuted->muted edge
/// (and by volume changes made while muted, which retarget the restore);
/// the engine receives 0 for as long as `muted` holds.
#[derive(Debug, Clone, Copy)]
pub struct VolumeState {
    pub level: u8,
    pub muted: bool,
    pub pre_mute_level: u8,
}

impl Default for VolumeState {
    fn default() -> Self {
        Self {
            level: DEFAULT_VOLUME,
            muted: false,
            pre_mute_level: DEFAULT_VOLUME,
        }
    }
}

/// Current position within the media. Both fields are 0 when nothing is
/// loaded or the duration is not yet known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelinePosition {
    pub position_ms: i64,
    pub duration_ms: i64,
}

pub struct Player {
    engine: Option<Box<dyn MediaEngine>>,
    engine_rx: Option<Receiver<EngineEvent>>,
    events: PlayerEventSender,
    state: PlaybackState,
    volume: VolumeState,
    media: Option<MediaIdentity>,
    timeline: TimelinePosition,
    /// Source handed to the engine, pending the Playing confirmation
    loading_source: Option<MediaSource>,
}

impl Player {
    pub fn new(events: PlayerEventSender) -> Self {
        Self {
            engine: None,
            engine_rx: None,
            events,
            state: PlaybackState::Idle,
            volume: VolumeState::default(),
            media: None,
            timeline: TimelinePosition::default(),
            loading_source: None,
        }
    }

    /// Attach the engine handle and its callback channel.
    ///
    /// The player is the exclusive owner of both; no other component calls
    /// the engine directly.
    pub fn attach_engine(
        &mut self,
        mut engine: Box<dyn MediaEngine>,
        engine_rx: Receiver<EngineEvent>,
    ) {
        let effective = if self.volume.muted { 0 } else { self.volume.level };
        if let Err(e) = engine.set_volume(effective) {
            warn!("Failed to apply initial volume: {}", e);
        }
        self.engine = Some(engine);
        self.engine_rx = Some(engine_rx);
        info!("Media engine attached (volume {})", effective);
    }

    // ===== Snapshots (never block on the engine) =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn timeline(&self) -> TimelinePosition {
        self.timeline
    }

    pub fn volume(&self) -> u8 {
        self.volume.level
    }

    pub fn is_muted(&self) -> bool {
        self.volume.muted
    }

    pub fn media_info(&self) -> Option<&MediaIdentity> {
        self.media.as_ref()
    }

    pub fn has_media(&self) -> bool {
        self.engine.as_ref().map(|e| e.has_media()).unwrap_or(false)
    }

    // ===== Commands =====

    /// Load a source and start playback.
    ///
    /// Stops whatever is playing, opens the source and issues play. The
    /// Playing transition (and the MediaChanged event) waits for the
    /// engine's confirmation callback.
    pub fn load(&mut self, source: MediaSource) {
        if self.engine.is_none() {
            warn!("load: no engine attached");
            return;
        }

        info!("Loading media: {}", source);

        // Tear down current playback first; position resets like a stop
        if let Some(engine) = self.engine.as_mut() {
            let _ = engine.stop();
        }
        self.reset_timeline();
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        if let Err(e) = engine.open(&source) {
            warn!("Open failed: {}", e);
            // Keep prior Error only when earlier media existed; a failed
            // first load leaves the machine Idle and usable.
            self.state = if self.media.is_some() {
                PlaybackState::Error
            } else {
                PlaybackState::Idle
            };
            self.loading_source = None;
            self.events
                .emit(PlayerEvent::ErrorOccurred(format!("Failed to load media: {}", e)));
            return;
        }

        // Re-assert volume on the fresh handle
        let effective = if self.volume.muted { 0 } else { self.volume.level };
        let _ = engine.set_volume(effective);

        self.state = PlaybackState::Loading;
        self.loading_source = Some(source);

        if let Err(e) = engine.play() {
            warn!("Play after open failed: {}", e);
            self.state = if self.media.is_some() {
                PlaybackState::Error
            } else {
                PlaybackState::Idle
            };
            self.loading_source = None;
            self.events
                .emit(PlayerEvent::ErrorOccurred(format!("Failed to start playback: {}", e)));
        }
    }

    /// Start or resume playback. State flips on the engine's confirmation.
    pub fn play(&mut self) {
        if self.state == PlaybackState::Error || self.state == PlaybackState::Loading {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if !engine.has_media() {
            return;
        }
        if let Err(e) = engine.play() {
            self.events
                .emit(PlayerEvent::ErrorOccurred(format!("Failed to start playback: {}", e)));
        }
    }

    /// Pause playback. State flips on the engine's confirmation.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Error {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if !engine.has_media() {
            return;
        }
        if let Err(e) = engine.pause() {
            self.events
                .emit(PlayerEvent::ErrorOccurred(format!("Failed to pause: {}", e)));
        }
    }

    pub fn play_pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Stop playback and reset the timeline to (0, 0).
    ///
    /// Unlike play/pause this transitions synchronously; the engine's later
    /// Stopped callback is absorbed without a duplicate StateChanged.
    pub fn stop(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if !engine.has_media() {
            return;
        }

        let was_playing = self.state == PlaybackState::Playing;
        if let Err(e) = engine.stop() {
            warn!("Stop failed: {}", e);
        }

        self.reset_timeline();
        self.events.emit(PlayerEvent::PositionChanged {
            position_ms: 0,
            duration_ms: 0,
        });

        if self.state != PlaybackState::Error {
            self.state = PlaybackState::Stopped;
        }
        if was_playing {
            self.events.emit(PlayerEvent::StateChanged { playing: false });
        }
        debug!("Playback stopped");
    }

    /// Absolute seek, clamped to [0, duration]. No-op until the duration is
    /// known (nothing sensible to clamp against).
    pub fn seek(&mut self, position_ms: i64) {
        if self.state == PlaybackState::Error {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if !engine.has_media() {
            return;
        }

        let duration = engine.duration_ms();
        if duration <= 0 {
            return;
        }

        let target = position_ms.clamp(0, duration);
        if let Err(e) = engine.seek(target) {
            warn!("Seek to {} failed: {}", target, e);
        }
    }

    /// Relative seek against the engine's live position (cached state may
    /// be up to one poll interval stale).
    pub fn seek_relative(&mut self, delta_ms: i64) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        if !engine.has_media() {
            return;
        }
        let current = engine.position_ms();
        if current < 0 {
            return;
        }
        self.seek(current.saturating_add(delta_ms));
    }

    /// Set volume, clamped to [0, 100].
    ///
    /// While muted the engine keeps receiving 0; the change only retargets
    /// the level a later unmute restores, and no VolumeChanged is advertised.
    pub fn set_volume(&mut self, level: i32) {
        let level = level.clamp(0, 100) as u8;

        if self.volume.muted {
            self.volume.pre_mute_level = level;
            return;
        }

        self.volume.level = level;
        if let Some(engine) = self.engine.as_mut()
            && let Err(e) = engine.set_volume(level)
        {
            warn!("Failed to set volume: {}", e);
        }
        self.events.emit(PlayerEvent::VolumeChanged(level));
    }

    /// Adjust volume by a signed step (keyboard volume keys)
    pub fn adjust_volume(&mut self, delta: i32) {
        self.set_volume(self.volume.level as i32 + delta);
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.volume.muted);
    }

    /// Mute drives the engine to 0 without advertising a level change (the
    /// advertised volume is unchanged); unmute restores the recorded level
    /// and advertises it.
    pub fn set_muted(&mut self, muted: bool) {
        if muted && !self.volume.muted {
            self.volume.pre_mute_level = self.volume.level;
            self.volume.muted = true;
            if let Some(engine) = self.engine.as_mut() {
                let _ = engine.set_volume(0);
            }
            debug!("Muted (restore level {})", self.volume.pre_mute_level);
        } else if !muted && self.volume.muted {
            self.volume.level = self.volume.pre_mute_level;
            self.volume.muted = false;
            if let Some(engine) = self.engine.as_mut() {
                let _ = engine.set_volume(self.volume.level);
            }
            self.events
                .emit(PlayerEvent::VolumeChanged(self.volume.level));
            debug!("Unmuted at level {}", self.volume.level);
        }
    }

    // ===== Polling =====

    /// Sample position/duration from the engine and forward the delta.
    ///
    /// Called by the shell at the poller's cadence while playing. Negative
    /// positions and unknown durations are suppressed, never forwarded as
    /// bogus values.
    pub fn sample_position(&mut self) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        if !engine.has_media() {
            return;
        }

        let position = engine.position_ms();
        let duration = engine.duration_ms();
        if position < 0 || duration <= 0 {
            return;
        }

        let position = position.clamp(0, duration);
        self.timeline = TimelinePosition {
            position_ms: position,
            duration_ms: duration,
        };
        self.events.emit(PlayerEvent::PositionChanged {
            position_ms: position,
            duration_ms: duration,
        });
    }

    // ===== Callback pump (the marshaling boundary) =====

    /// Drain engine callbacks and apply them on the calling (UI) thread.
    ///
    /// This is the only place engine callbacks mutate player state; channel
    /// FIFO order preserves the order transitions occurred in the engine.
    pub fn pump(&mut self) {
        let Some(rx) = self.engine_rx.as_ref() else {
            return;
        };
        let pending: Vec<EngineEvent> = rx.try_iter().collect();
        for event in pending {
            self.apply_engine_event(event);
        }
    }

    fn apply_engine_event(&mut self, event: EngineEvent) {
        match event {
            // Position flow is driven by the poller; the engine's own time
            // callbacks are accepted and dropped, as the original does.
            EngineEvent::TimeChanged(_) | EngineEvent::PositionChanged(_) => {}

            EngineEvent::LengthChanged(duration_ms) => {
                if duration_ms > 0 {
                    self.timeline.duration_ms = duration_ms;
                    self.timeline.position_ms =
                        self.timeline.position_ms.clamp(0, duration_ms);
                    if let Some(media) = self.media.as_mut() {
                        media.duration_ms = duration_ms;
                    }
                    self.events.emit(PlayerEvent::DurationChanged(duration_ms));
                }
            }

            EngineEvent::Playing => {
                if self.state == PlaybackState::Error {
                    return; // terminal until a fresh load
                }
                let was_playing = self.state == PlaybackState::Playing;

                if self.state == PlaybackState::Loading {
                    self.publish_media_identity();
                }

                self.state = PlaybackState::Playing;
                if !was_playing {
                    self.events.emit(PlayerEvent::StateChanged { playing: true });
                }
            }

            EngineEvent::Paused => {
                if self.state == PlaybackState::Playing {
                    self.state = PlaybackState::Paused;
                    self.events.emit(PlayerEvent::StateChanged { playing: false });
                }
            }

            EngineEvent::Stopped => match self.state {
                PlaybackState::Playing => {
                    self.state = PlaybackState::Stopped;
                    self.events.emit(PlayerEvent::StateChanged { playing: false });
                }
                PlaybackState::Paused | PlaybackState::Loading => {
                    self.state = PlaybackState::Stopped;
                }
                // User stop already transitioned; Error stays terminal
                PlaybackState::Idle | PlaybackState::Stopped | PlaybackState::Error => {}
            },

            EngineEvent::EndReached => {
                if matches!(self.state, PlaybackState::Playing | PlaybackState::Paused) {
                    info!("Playback finished");
                    let was_playing = self.state == PlaybackState::Playing;
                    self.state = PlaybackState::Stopped;
                    if was_playing {
                        self.events.emit(PlayerEvent::StateChanged { playing: false });
                    }
                    self.events.emit(PlayerEvent::PlaybackFinished);
                }
            }

            EngineEvent::EncounteredError(message) => {
                warn!("Engine error: {}", message);
                let was_playing = self.state == PlaybackState::Playing;
                self.state = PlaybackState::Error;
                if was_playing {
                    self.events.emit(PlayerEvent::StateChanged { playing: false });
                }
                self.events.emit(PlayerEvent::ErrorOccurred(message));
            }
        }
    }

    /// Build the MediaIdentity for a confirmed load and emit MediaChanged
    /// exactly once. Unknown metadata stays undetermined.
    fn publish_media_identity(&mut self) {
        let Some(source) = self.loading_source.take() else {
            return;
        };
        let Some(engine) = self.engine.as_ref() else {
            return;
        };

        let meta = engine.metadata();
        let duration = engine.duration_ms().max(0);
        let identity = MediaIdentity {
            title: meta.title.unwrap_or_else(|| source.display_name()),
            source,
            duration_ms: duration,
            container: meta.container,
            video_codec: meta.video_codec,
            resolution: meta.resolution,
            frame_rate: meta.frame_rate,
            audio: meta.audio,
            file_size: meta.file_size,
            artist: meta.artist,
            album: meta.album,
        };

        info!("Media changed: {}", identity.title);
        self.media = Some(identity.clone());
        self.events.emit(PlayerEvent::MediaChanged(identity));

        if duration > 0 {
            self.timeline.duration_ms = duration;
            self.events.emit(PlayerEvent::DurationChanged(duration));
        }
    }

    fn reset_timeline(&mut self) {
        self.timeline = TimelinePosition::default();
    }
}
