//! Searchable list of registry files

use eframe::egui;

use crate::app::CmsApp;

/// File list panel
pub struct FileListPanel;

impl FileListPanel {
    /// Show the file list panel
    pub fn show(ui: &mut egui::Ui, app: &mut CmsApp) {
        ui.vertical(|ui| {
            ui.heading("Data files");
            ui.add_space(4.0);

            ui.add(
                egui::TextEdit::singleline(&mut app.search)
                    .hint_text("Filter files...")
                    .desired_width(f32::INFINITY),
            );

            ui.separator();

            // Collect first so clicking can borrow the app mutably
            let entries: Vec<String> = app
                .session
                .registry()
                .list(app.search.trim())
                .into_iter()
                .map(str::to_string)
                .collect();

            let mut clicked = None;
            egui::ScrollArea::vertical()
                .id_salt("file_list_scroll")
                .show(ui, |ui| {
                    if entries.is_empty() {
                        ui.label("No matching files");
                    }
                    for path in &entries {
                        let is_active = app.session.selection() == Some(path.as_str());
                        if ui
                            .selectable_label(is_active, path.as_str())
                            .on_hover_text(path.as_str())
                            .clicked()
                        {
                            clicked = Some(path.clone());
                        }
                    }
                });

            if let Some(path) = clicked {
                app.open_file(&path);
            }
        });
    }
}
