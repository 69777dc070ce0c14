//! Session playlist panel.
//!
//! Holds the paths queued this session (CLI, drag-and-drop, open dialog).
//! Nothing here is persisted; the panel renders the queue and reports
//! selections back as actions.

use std::path::PathBuf;

use eframe::egui;

use crate::utils::media;

/// What the user did in the playlist panel this frame
#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistAction {
    /// Double-clicked entry: load it
    Load(usize),
    Remove(usize),
    Clear,
    Add(Vec<PathBuf>),
}

/// Render the playlist side panel.
///
/// `current` is the index of the entry that is loaded right now, if any.
pub fn render_playlist(
    ctx: &egui::Context,
    entries: &[PathBuf],
    current: Option<usize>,
) -> Vec<PlaylistAction> {
    let mut actions = Vec::new();

    egui::SidePanel::right("playlist")
        .default_width(240.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Playlist");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear").clicked() {
                        actions.push(PlaylistAction::Clear);
                    }
                    if ui.button("Add…").clicked() {
                        let picked = rfd::FileDialog::new()
                            .add_filter("Media Files", media::ALL_EXTS)
                            .set_title("Add to Playlist")
                            .pick_files();
                        if let Some(paths) = picked {
                            actions.push(PlaylistAction::Add(paths));
                        }
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    if entries.is_empty() {
                        ui.weak("Empty - drop files here or Add…");
                        return;
                    }

                    for (idx, path) in entries.iter().enumerate() {
                        let name = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("<invalid>");
                        let selected = current == Some(idx);

                        ui.horizontal(|ui| {
                            let label = ui.selectable_label(selected, name);
                            if label.double_clicked() {
                                actions.push(PlaylistAction::Load(idx));
                            }
                            label.on_hover_text(path.display().to_string());

                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("✖").clicked() {
                                        actions.push(PlaylistAction::Remove(idx));
                                    }
                                },
                            );
                        });
                    }
                });
        });

    actions
}
