//! Engine adapter: the command/callback contract with the external
//! decode/render engine.
//!
//! **Why**: The shell never decodes or presents media itself. Everything
//! pixel- and sample-related lives behind [`MediaEngine`], a small
//! synchronous command surface plus an asynchronous callback channel.
//!
//! **Used by**: player (exclusive owner of the engine handle), app (backend
//! selection at startup)
//!
//! # Threading
//!
//! Engine implementations run their own internal threads and post
//! [`EngineEvent`]s through an [`EngineEventSender`] whenever they feel like
//! it. Nothing on the receiving side is touched here: the playback
//! controller drains the channel on the UI thread (`Player::pump`), which is
//! the single place engine callbacks are allowed to mutate shared state.

use std::path::PathBuf;

use crossbeam_channel::Sender;
use thiserror::Error;

pub mod null;

#[cfg(test)]
pub mod fake;

/// Errors surfaced by engine commands.
///
/// These never cross the UI boundary as panics; the playback controller
/// folds them into a single `ErrorOccurred` event.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to open media: {0}")]
    Open(String),

    #[error("engine rejected command: {0}")]
    Command(String),

    #[error("no media loaded")]
    NoMedia,
}

/// Locator for a playable source: local file or network URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Path(PathBuf),
    Url(String),
}

impl MediaSource {
    /// Classify a user-supplied string: anything with a URL scheme is
    /// treated as remote, everything else as a local path.
    pub fn parse(input: &str) -> Self {
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://")
            || lower.starts_with("https://")
            || lower.starts_with("rtsp://")
            || lower.starts_with("file://")
        {
            MediaSource::Url(input.to_string())
        } else {
            MediaSource::Path(PathBuf::from(input))
        }
    }

    /// Short human-readable name (file stem or full URL)
    pub fn display_name(&self) -> String {
        match self {
            MediaSource::Path(p) => p
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .unwrap_or_else(|| p.display().to_string()),
            MediaSource::Url(u) => u.clone(),
        }
    }
}

impl std::fmt::Display for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaSource::Path(p) => write!(f, "{}", p.display()),
            MediaSource::Url(u) => write!(f, "{}", u),
        }
    }
}

/// Track-level metadata reported by the engine after a source is opened.
///
/// Fields the engine has not determined yet are `None`; the controller
/// forwards them as undetermined instead of guessing.
#[derive(Debug, Clone, Default)]
pub struct MediaMetadata {
    pub title: Option<String>,
    pub container: Option<String>,
    pub video_codec: Option<String>,
    pub resolution: Option<(u32, u32)>,
    pub frame_rate: Option<f32>,
    pub audio: Option<String>,
    pub file_size: Option<u64>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Asynchronous callbacks delivered by the engine on its own thread(s).
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Playback clock advanced (informational; position polling drives the UI)
    TimeChanged(i64),
    /// Fractional position advanced (informational, same as above)
    PositionChanged(f32),
    /// Media duration became known or changed (ms)
    LengthChanged(i64),
    /// Playback actually started or resumed
    Playing,
    /// Playback paused
    Paused,
    /// Playback stopped
    Stopped,
    /// Media played to its end
    EndReached,
    /// Hard decode/stream failure; playback cannot continue
    EncounteredError(String),
}

/// Callback sender handed to an engine at construction.
///
/// Safe to fire from any thread; the UI side drains the paired receiver.
#[derive(Clone, Debug)]
pub struct EngineEventSender {
    sender: Option<Sender<EngineEvent>>,
}

impl EngineEventSender {
    pub fn new(sender: Sender<EngineEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// No-op sender for engines constructed before wiring (or in tests)
    pub fn dummy() -> Self {
        Self { sender: None }
    }

    pub fn emit(&self, event: EngineEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event);
        }
    }
}

/// Native drawable handle the engine renders into.
///
/// The variant is selected at build time by the hosting platform layer;
/// there is no runtime probing of widget capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSurface {
    #[cfg(target_os = "windows")]
    Win32(isize),
    #[cfg(target_os = "macos")]
    CoreAnimation(usize),
    #[cfg(all(unix, not(target_os = "macos")))]
    XWindow(u64),
    /// Offscreen/no-op surface (null engine, headless tests)
    Detached,
}

/// Synchronous command interface to the external media engine.
///
/// All commands are fire-and-forget from the controller's point of view:
/// completion is observed later via [`EngineEvent`], not via return value.
/// `open` is the one call allowed to block briefly.
pub trait MediaEngine: Send {
    /// Open a source and begin preparing it for playback
    fn open(&mut self, source: &MediaSource) -> Result<(), EngineError>;

    /// Start or resume playback of the opened source
    fn play(&mut self) -> Result<(), EngineError>;

    /// Pause playback, keeping position
    fn pause(&mut self) -> Result<(), EngineError>;

    /// Stop playback and release the playback position
    fn stop(&mut self) -> Result<(), EngineError>;

    /// Absolute seek in milliseconds
    fn seek(&mut self, position_ms: i64) -> Result<(), EngineError>;

    /// Set audio volume, 0-100
    fn set_volume(&mut self, volume: u8) -> Result<(), EngineError>;

    /// Current playback position in ms; negative when unknown
    fn position_ms(&self) -> i64;

    /// Media duration in ms; non-positive when unknown
    fn duration_ms(&self) -> i64;

    /// Whether a source is currently opened
    fn has_media(&self) -> bool;

    /// Metadata snapshot for the opened source
    fn metadata(&self) -> MediaMetadata;

    /// Attach the drawable surface the engine renders into.
    /// Supplied once at setup and revalidated on resize.
    fn attach_surface(&mut self, surface: VideoSurface) -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_source_parse() {
        assert_eq!(
            MediaSource::parse("https://example.com/a.mp4"),
            MediaSource::Url("https://example.com/a.mp4".to_string())
        );
        assert_eq!(
            MediaSource::parse("/tmp/movie.mkv"),
            MediaSource::Path(PathBuf::from("/tmp/movie.mkv"))
        );
        // Windows drive letters are not URL schemes
        assert_eq!(
            MediaSource::parse("C:\\clips\\a.mp4"),
            MediaSource::Path(PathBuf::from("C:\\clips\\a.mp4"))
        );
    }

    #[test]
    fn test_display_name() {
        let src = MediaSource::parse("/media/films/big_buck_bunny.mp4");
        assert_eq!(src.display_name(), "big_buck_bunny.mp4");

        let url = MediaSource::parse("http://host/stream");
        assert_eq!(url.display_name(), "http://host/stream");
    }

    #[test]
    fn test_dummy_sender_is_silent() {
        let sender = EngineEventSender::dummy();
        sender.emit(EngineEvent::Playing); // must not panic
    }
}
