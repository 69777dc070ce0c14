//! Clock-driven stand-in engine.
//!
//! **Why**: The shell must stay runnable (and testable end to end) without a
//! native decode backend linked in. `NullEngine` honors the full
//! [`MediaEngine`](super::MediaEngine) contract by simulating a playback
//! clock: position advances with wall time, and end-of-stream is reported by
//! a background timer thread through the same callback channel a real
//! backend would use, so the marshaling boundary is exercised for real.
//!
//! No frames are decoded and no audio is produced.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbeam_channel::{Sender, after, bounded, select};
use log::{debug, info};

use super::{
    EngineError, EngineEvent, EngineEventSender, MediaEngine, MediaMetadata, MediaSource,
    VideoSurface,
};

/// Simulated playback clock, shared with the end-of-stream timer thread.
#[derive(Debug, Clone, Copy)]
enum Clock {
    Stopped,
    Playing { started: Instant, base_ms: i64 },
    Paused { at_ms: i64 },
}

impl Clock {
    fn position_ms(&self, duration_ms: i64) -> i64 {
        let raw = match *self {
            Clock::Stopped => 0,
            Clock::Paused { at_ms } => at_ms,
            Clock::Playing { started, base_ms } => {
                base_ms + started.elapsed().as_millis() as i64
            }
        };
        raw.clamp(0, duration_ms.max(0))
    }
}

/// Cancellation handle for the pending end-of-stream timer
struct EndTimer {
    cancel: Sender<()>,
}

impl EndTimer {
    fn cancel(self) {
        let _ = self.cancel.send(());
    }
}

pub struct NullEngine {
    events: EngineEventSender,
    media: Option<(MediaSource, MediaMetadata)>,
    clock: Arc<Mutex<Clock>>,
    duration_ms: i64,
    volume: u8,
    end_timer: Option<EndTimer>,
}

impl NullEngine {
    /// Create a null engine whose simulated media all runs `duration_ms` long
    pub fn new(events: EngineEventSender, duration_ms: i64) -> Self {
        info!("NullEngine: simulating {} ms media", duration_ms);
        Self {
            events,
            media: None,
            clock: Arc::new(Mutex::new(Clock::Stopped)),
            duration_ms: duration_ms.max(1),
            volume: 0,
            end_timer: None,
        }
    }

    fn clock(&self) -> Clock {
        *self.clock.lock().expect("clock lock")
    }

    fn set_clock(&self, clock: Clock) {
        *self.clock.lock().expect("clock lock") = clock;
    }

    fn cancel_end_timer(&mut self) {
        if let Some(timer) = self.end_timer.take() {
            timer.cancel();
        }
    }

    /// Arm the end-of-stream timer for the remaining simulated runtime.
    ///
    /// The thread either gets cancelled (pause/stop/seek/new play) or fires
    /// EndReached through the callback channel and parks the shared clock.
    fn arm_end_timer(&mut self, from_ms: i64) {
        self.cancel_end_timer();

        let remaining = Duration::from_millis((self.duration_ms - from_ms).max(0) as u64);
        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let events = self.events.clone();
        let clock = Arc::clone(&self.clock);

        std::thread::Builder::new()
            .name("null-engine-eos".to_string())
            .spawn(move || {
                select! {
                    recv(cancel_rx) -> _ => {}
                    recv(after(remaining)) -> _ => {
                        *clock.lock().expect("clock lock") = Clock::Stopped;
                        events.emit(EngineEvent::EndReached);
                    }
                }
            })
            .expect("spawn eos timer");

        self.end_timer = Some(EndTimer { cancel: cancel_tx });
    }

    fn metadata_for(source: &MediaSource) -> MediaMetadata {
        let container = match source {
            MediaSource::Path(p) => p
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_uppercase()),
            MediaSource::Url(_) => None,
        };
        let file_size = match source {
            MediaSource::Path(p) => std::fs::metadata(Path::new(p)).ok().map(|m| m.len()),
            MediaSource::Url(_) => None,
        };

        // Resolution/codec/audio stay undetermined: nothing is decoded here
        MediaMetadata {
            title: Some(source.display_name()),
            container,
            file_size,
            ..Default::default()
        }
    }
}

impl MediaEngine for NullEngine {
    fn open(&mut self, source: &MediaSource) -> Result<(), EngineError> {
        if let MediaSource::Path(p) = source
            && !p.exists()
        {
            return Err(EngineError::Open(format!(
                "no such file: {}",
                p.display()
            )));
        }

        self.cancel_end_timer();
        self.set_clock(Clock::Stopped);
        let meta = Self::metadata_for(source);
        debug!("NullEngine: opened {}", source);
        self.media = Some((source.clone(), meta));
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        if self.media.is_none() {
            return Err(EngineError::NoMedia);
        }

        let base_ms = match self.clock() {
            Clock::Paused { at_ms } => at_ms,
            Clock::Stopped => 0,
            Clock::Playing { .. } => return Ok(()), // already running
        };

        self.set_clock(Clock::Playing {
            started: Instant::now(),
            base_ms,
        });
        self.arm_end_timer(base_ms);

        // A real backend reports these from its decode thread; the channel
        // marshals both the same way.
        self.events.emit(EngineEvent::LengthChanged(self.duration_ms));
        self.events.emit(EngineEvent::Playing);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        if self.media.is_none() {
            return Err(EngineError::NoMedia);
        }
        if let Clock::Playing { .. } = self.clock() {
            let at_ms = self.clock().position_ms(self.duration_ms);
            self.cancel_end_timer();
            self.set_clock(Clock::Paused { at_ms });
            self.events.emit(EngineEvent::Paused);
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.cancel_end_timer();
        self.set_clock(Clock::Stopped);
        self.events.emit(EngineEvent::Stopped);
        Ok(())
    }

    fn seek(&mut self, position_ms: i64) -> Result<(), EngineError> {
        if self.media.is_none() {
            return Err(EngineError::NoMedia);
        }
        let target = position_ms.clamp(0, self.duration_ms);
        match self.clock() {
            Clock::Playing { .. } => {
                self.set_clock(Clock::Playing {
                    started: Instant::now(),
                    base_ms: target,
                });
                self.arm_end_timer(target);
            }
            Clock::Paused { .. } => self.set_clock(Clock::Paused { at_ms: target }),
            Clock::Stopped => self.set_clock(Clock::Paused { at_ms: target }),
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), EngineError> {
        self.volume = volume.min(100);
        Ok(())
    }

    fn position_ms(&self) -> i64 {
        if self.media.is_none() {
            return -1;
        }
        self.clock().position_ms(self.duration_ms)
    }

    fn duration_ms(&self) -> i64 {
        if self.media.is_none() { 0 } else { self.duration_ms }
    }

    fn has_media(&self) -> bool {
        self.media.is_some()
    }

    fn metadata(&self) -> MediaMetadata {
        self.media
            .as_ref()
            .map(|(_, m)| m.clone())
            .unwrap_or_default()
    }

    fn attach_surface(&mut self, surface: VideoSurface) -> Result<(), EngineError> {
        debug!("NullEngine: surface attached: {:?}", surface);
        Ok(())
    }
}

impl Drop for NullEngine {
    fn drop(&mut self) {
        self.cancel_end_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn engine_with_channel(
        duration_ms: i64,
    ) -> (NullEngine, crossbeam_channel::Receiver<EngineEvent>) {
        let (tx, rx) = unbounded();
        (NullEngine::new(EngineEventSender::new(tx), duration_ms), rx)
    }

    #[test]
    fn test_play_without_media_is_rejected() {
        let (mut engine, _rx) = engine_with_channel(1000);
        assert!(matches!(engine.play(), Err(EngineError::NoMedia)));
    }

    #[test]
    fn test_open_missing_file_fails() {
        let (mut engine, _rx) = engine_with_channel(1000);
        let source = MediaSource::Path("/definitely/not/here.mp4".into());
        assert!(engine.open(&source).is_err());
        assert!(!engine.has_media());
    }

    #[test]
    fn test_play_emits_length_then_playing() {
        let (mut engine, rx) = engine_with_channel(5000);
        engine
            .open(&MediaSource::Url("rtsp://cam/stream".into()))
            .unwrap();
        engine.play().unwrap();

        assert!(matches!(rx.try_recv(), Ok(EngineEvent::LengthChanged(5000))));
        assert!(matches!(rx.try_recv(), Ok(EngineEvent::Playing)));
    }

    #[test]
    fn test_end_reached_fires_for_short_media() {
        let (mut engine, rx) = engine_with_channel(30);
        engine
            .open(&MediaSource::Url("rtsp://cam/stream".into()))
            .unwrap();
        engine.play().unwrap();

        // LengthChanged + Playing arrive synchronously; EndReached from the
        // timer thread within the simulated runtime (generous deadline).
        let deadline = Duration::from_secs(2);
        let mut saw_end = false;
        while let Ok(ev) = rx.recv_timeout(deadline) {
            if matches!(ev, EngineEvent::EndReached) {
                saw_end = true;
                break;
            }
        }
        assert!(saw_end);
        assert_eq!(engine.position_ms(), 0); // clock parked at Stopped
    }

    #[test]
    fn test_pause_freezes_position_and_cancels_eos() {
        let (mut engine, rx) = engine_with_channel(40);
        engine
            .open(&MediaSource::Url("rtsp://cam/stream".into()))
            .unwrap();
        engine.play().unwrap();
        engine.pause().unwrap();
        let frozen = engine.position_ms();

        std::thread::sleep(Duration::from_millis(120));
        assert_eq!(engine.position_ms(), frozen);

        // No EndReached after the media length has long passed
        let events: Vec<_> = rx.try_iter().collect();
        assert!(!events.iter().any(|e| matches!(e, EngineEvent::EndReached)));
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let (mut engine, _rx) = engine_with_channel(1000);
        engine
            .open(&MediaSource::Url("rtsp://cam/stream".into()))
            .unwrap();
        engine.seek(99_999).unwrap();
        assert_eq!(engine.position_ms(), 1000);
        engine.seek(-50).unwrap();
        assert_eq!(engine.position_ms(), 0);
    }
}
