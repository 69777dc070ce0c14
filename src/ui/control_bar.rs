//! Bottom transport bar: play/pause/stop, timeline slider, volume.
//!
//! Pure view over player snapshots; user interaction comes back as
//! [`ControlBarAction`]s. In fullscreen the bar is only shown while its
//! visibility controller says so, and hovering it counts as activity
//! (handled by the caller through the returned response).

use eframe::egui;

use crate::player::{PlaybackState, Player};
use crate::utils::{format_time, media};

/// What the user did on the control bar this frame
#[derive(Debug, Clone, PartialEq)]
pub enum ControlBarAction {
    PlayPause,
    Stop,
    /// Absolute seek from the timeline slider, ms
    Seek(i64),
    SetVolume(i32),
    ToggleMute,
    ToggleFullscreen,
    /// Files picked through the open dialog
    OpenFiles(Vec<std::path::PathBuf>),
}

/// Render the control bar. Returns the actions plus whether the pointer is
/// over the bar (feeds the idle-hide controller in fullscreen).
pub fn render_control_bar(
    ctx: &egui::Context,
    player: &Player,
    fullscreen: bool,
) -> (Vec<ControlBarAction>, bool) {
    let mut actions = Vec::new();

    let timeline = player.timeline();
    let state = player.state();
    let has_media = player.media_info().is_some();

    let panel = egui::TopBottomPanel::bottom("control_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("📂").on_hover_text("Open media").clicked() {
                let picked = rfd::FileDialog::new()
                    .add_filter("Media Files", media::ALL_EXTS)
                    .set_title("Open Media")
                    .pick_files();
                if let Some(paths) = picked {
                    actions.push(ControlBarAction::OpenFiles(paths));
                }
            }

            ui.separator();

            let play_label = if state == PlaybackState::Playing {
                "⏸"
            } else {
                "▶"
            };
            if ui
                .add_enabled(has_media, egui::Button::new(play_label))
                .clicked()
            {
                actions.push(ControlBarAction::PlayPause);
            }
            if ui.add_enabled(has_media, egui::Button::new("⏹")).clicked() {
                actions.push(ControlBarAction::Stop);
            }

            ui.separator();

            // Timeline slider; dragging emits absolute seeks
            ui.monospace(format_time(timeline.position_ms));
            let mut position = timeline.position_ms as f64;
            let max = (timeline.duration_ms as f64).max(1.0);
            ui.spacing_mut().slider_width = (ui.available_width() - 220.0).max(60.0);
            let slider = ui.add_enabled(
                timeline.duration_ms > 0,
                egui::Slider::new(&mut position, 0.0..=max)
                    .show_value(false)
                    .trailing_fill(true),
            );
            if slider.changed() {
                actions.push(ControlBarAction::Seek(position as i64));
            }
            ui.monospace(format_time(timeline.duration_ms));

            ui.separator();

            let mute_label = if player.is_muted() { "🔇" } else { "🔊" };
            if ui.button(mute_label).on_hover_text("Mute").clicked() {
                actions.push(ControlBarAction::ToggleMute);
            }
            let mut volume = player.volume() as i32;
            ui.spacing_mut().slider_width = 80.0;
            if ui
                .add(egui::Slider::new(&mut volume, 0..=100).show_value(false))
                .changed()
            {
                actions.push(ControlBarAction::SetVolume(volume));
            }

            ui.separator();

            let fs_label = if fullscreen { "🗗" } else { "⛶" };
            if ui.button(fs_label).on_hover_text("Fullscreen (F)").clicked() {
                actions.push(ControlBarAction::ToggleFullscreen);
            }
        });
    });

    let hovered = panel.response.hovered() || panel.response.contains_pointer();
    (actions, hovered)
}
