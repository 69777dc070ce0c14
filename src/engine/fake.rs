//! Scripted engine for unit tests.
//!
//! Records every command and answers position/duration queries from a
//! shared, externally mutable script so tests can drive the controller
//! through arbitrary engine behavior without threads.

use std::sync::{Arc, Mutex};

use super::{EngineError, MediaEngine, MediaMetadata, MediaSource, VideoSurface};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(String),
    Play,
    Pause,
    Stop,
    Seek(i64),
    SetVolume(u8),
    AttachSurface,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub commands: Vec<Command>,
    pub position_ms: i64,
    pub duration_ms: i64,
    pub has_media: bool,
    pub metadata: MediaMetadata,
    pub fail_open: bool,
    pub fail_play: bool,
}

impl FakeState {
    /// Volumes the engine actually received, in order
    pub fn volumes_applied(&self) -> Vec<u8> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::SetVolume(v) => Some(*v),
                _ => None,
            })
            .collect()
    }
}

pub struct FakeEngine {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeEngine {
    pub fn new() -> (Self, Arc<Mutex<FakeState>>) {
        let state = Arc::new(Mutex::new(FakeState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl MediaEngine for FakeEngine {
    fn open(&mut self, source: &MediaSource) -> Result<(), EngineError> {
        let mut s = self.state.lock().unwrap();
        s.commands.push(Command::Open(source.to_string()));
        if s.fail_open {
            return Err(EngineError::Open("scripted open failure".into()));
        }
        s.has_media = true;
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        let mut s = self.state.lock().unwrap();
        s.commands.push(Command::Play);
        if s.fail_play {
            return Err(EngineError::Command("scripted play failure".into()));
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.state.lock().unwrap().commands.push(Command::Pause);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.state.lock().unwrap().commands.push(Command::Stop);
        Ok(())
    }

    fn seek(&mut self, position_ms: i64) -> Result<(), EngineError> {
        let mut s = self.state.lock().unwrap();
        s.commands.push(Command::Seek(position_ms));
        s.position_ms = position_ms;
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), EngineError> {
        self.state
            .lock()
            .unwrap()
            .commands
            .push(Command::SetVolume(volume));
        Ok(())
    }

    fn position_ms(&self) -> i64 {
        self.state.lock().unwrap().position_ms
    }

    fn duration_ms(&self) -> i64 {
        self.state.lock().unwrap().duration_ms
    }

    fn has_media(&self) -> bool {
        self.state.lock().unwrap().has_media
    }

    fn metadata(&self) -> MediaMetadata {
        self.state.lock().unwrap().metadata.clone()
    }

    fn attach_surface(&mut self, _surface: VideoSurface) -> Result<(), EngineError> {
        self.state
            .lock()
            .unwrap()
            .commands
            .push(Command::AttachSurface);
        Ok(())
    }
}
