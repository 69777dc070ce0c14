//! Bottom status line: playback state, transient messages, volume.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::player::{PlaybackState, Player};
use crate::utils::format_time;

/// How long a transient message stays up
const MESSAGE_TTL: Duration = Duration::from_secs(4);

#[derive(Default)]
pub struct StatusBar {
    message: Option<(String, Instant)>,
    error: bool,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a transient informational message
    pub fn set_message(&mut self, text: impl Into<String>, now: Instant) {
        self.message = Some((text.into(), now));
        self.error = false;
    }

    /// Show a transient error message (red)
    pub fn set_error(&mut self, text: impl Into<String>, now: Instant) {
        self.message = Some((text.into(), now));
        self.error = true;
    }

    fn current_message(&mut self, now: Instant) -> Option<(&str, bool)> {
        if let Some((_, since)) = &self.message
            && now.duration_since(*since) >= MESSAGE_TTL
        {
            self.message = None;
        }
        self.message
            .as_ref()
            .map(|(text, _)| (text.as_str(), self.error))
    }

    pub fn render(&mut self, ctx: &egui::Context, player: &Player, now: Instant) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let state_text = match player.state() {
                    PlaybackState::Idle => "Idle",
                    PlaybackState::Loading => "Loading…",
                    PlaybackState::Playing => "Playing",
                    PlaybackState::Paused => "Paused",
                    PlaybackState::Stopped => "Stopped",
                    PlaybackState::Error => "Error",
                };
                ui.monospace(state_text);

                ui.separator();

                let timeline = player.timeline();
                ui.monospace(format!(
                    "{} / {}",
                    format_time(timeline.position_ms),
                    format_time(timeline.duration_ms)
                ));

                if let Some((text, is_error)) = self.current_message(now) {
                    ui.separator();
                    let color = if is_error {
                        egui::Color32::LIGHT_RED
                    } else {
                        ui.visuals().text_color()
                    };
                    ui.colored_label(color, text);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if player.is_muted() {
                        ui.monospace("muted");
                    } else {
                        ui.monospace(format!("vol {}%", player.volume()));
                    }
                });
            });
        });
    }
}
