//! Video area: letterboxed surface placeholder plus the transient overlay.
//!
//! The engine presents into the fitted rectangle out-of-band; here we only
//! paint the letterbox, reserve the rect and draw the overlay (title and
//! position) while its visibility controller keeps it up. Pointer movement
//! and double-clicks are reported back to the app layer.

use eframe::egui;

use crate::fullscreen::{AspectRatio, fit_rect};
use crate::player::{PlaybackState, Player};
use crate::utils::format_time;

/// Pointer interaction with the video area this frame
#[derive(Debug)]
pub struct VideoAreaResponse {
    pub pointer_pos: Option<egui::Pos2>,
    pub double_clicked: bool,
    /// Fitted surface rect, recomputed from the panel bounds
    pub surface_rect: egui::Rect,
}

impl Default for VideoAreaResponse {
    fn default() -> Self {
        Self {
            pointer_pos: None,
            double_clicked: false,
            surface_rect: egui::Rect::ZERO,
        }
    }
}

/// Render the central video area into the remaining space.
pub fn render_video_area(
    ctx: &egui::Context,
    player: &Player,
    ratio: AspectRatio,
    overlay_visible: bool,
) -> VideoAreaResponse {
    let mut out = VideoAreaResponse::default();

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
        .show(ctx, |ui| {
            let area = ui.available_rect_before_wrap();
            let surface = fit_rect(area, ratio);
            out.surface_rect = surface;

            let response = ui.allocate_rect(area, egui::Sense::click());
            out.double_clicked = response.double_clicked();
            out.pointer_pos = response.hover_pos();

            let painter = ui.painter();
            painter.rect_filled(surface, 0.0, egui::Color32::from_gray(12));

            match player.state() {
                PlaybackState::Idle => {
                    painter.text(
                        surface.center(),
                        egui::Align2::CENTER_CENTER,
                        "Drop a media file here or press 📂",
                        egui::FontId::proportional(16.0),
                        egui::Color32::GRAY,
                    );
                }
                PlaybackState::Error => {
                    painter.text(
                        surface.center(),
                        egui::Align2::CENTER_CENTER,
                        "Playback error",
                        egui::FontId::proportional(16.0),
                        egui::Color32::LIGHT_RED,
                    );
                }
                _ => {}
            }

            if overlay_visible {
                render_overlay(painter, surface, player);
            }
        });

    out
}

/// Title and position strip along the top edge of the surface
fn render_overlay(painter: &egui::Painter, surface: egui::Rect, player: &Player) {
    let Some(media) = player.media_info() else {
        return;
    };

    let strip = egui::Rect::from_min_size(
        surface.min,
        egui::Vec2::new(surface.width(), 28.0),
    );
    painter.rect_filled(strip, 0.0, egui::Color32::from_black_alpha(160));

    painter.text(
        strip.left_center() + egui::Vec2::new(8.0, 0.0),
        egui::Align2::LEFT_CENTER,
        &media.title,
        egui::FontId::proportional(14.0),
        egui::Color32::WHITE,
    );

    let timeline = player.timeline();
    let time_text = format!(
        "{} / {}",
        format_time(timeline.position_ms),
        format_time(timeline.duration_ms)
    );
    painter.text(
        strip.right_center() - egui::Vec2::new(8.0, 0.0),
        egui::Align2::RIGHT_CENTER,
        time_text,
        egui::FontId::monospace(13.0),
        egui::Color32::WHITE,
    );
}
