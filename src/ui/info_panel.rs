//! Media info window: identity and metadata of the loaded media.

use eframe::egui;

use crate::player::MediaIdentity;
use crate::utils::{format_size, format_time};

/// Render the info window. Returns false when the user closed it.
pub fn render_info_panel(ctx: &egui::Context, media: Option<&MediaIdentity>) -> bool {
    let mut open = true;

    egui::Window::new("Media Info")
        .open(&mut open)
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            let Some(media) = media else {
                ui.label("No media loaded");
                return;
            };

            egui::Grid::new("media_info_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    row(ui, "Title", Some(media.title.clone()));
                    row(ui, "Source", Some(media.source.to_string()));
                    row(
                        ui,
                        "Duration",
                        (media.duration_ms > 0).then(|| format_time(media.duration_ms)),
                    );
                    row(ui, "Container", media.container.clone());
                    row(ui, "Video", media.video_codec.clone());
                    row(
                        ui,
                        "Resolution",
                        media.resolution.map(|(w, h)| format!("{}×{}", w, h)),
                    );
                    row(
                        ui,
                        "Frame rate",
                        media.frame_rate.map(|f| format!("{:.3} fps", f)),
                    );
                    row(ui, "Audio", media.audio.clone());
                    row(ui, "File size", media.file_size.map(format_size));
                    row(ui, "Artist", media.artist.clone());
                    row(ui, "Album", media.album.clone());
                });
        });

    open
}

/// One grid row; undetermined values render as an em-height dash
fn row(ui: &mut egui::Ui, label: &str, value: Option<String>) {
    ui.label(label);
    match value {
        Some(v) => ui.monospace(v),
        None => ui.monospace("–"),
    };
    ui.end_row();
}
