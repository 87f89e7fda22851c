//! JSON editor panel with the action toolbar

use eframe::egui;

use crate::app::CmsApp;

/// Editor panel
pub struct EditorPanel;

impl EditorPanel {
    /// Show the file header and action toolbar
    pub fn show_header(ui: &mut egui::Ui, app: &mut CmsApp) {
        ui.horizontal(|ui| {
            match app.session.file_name() {
                Some(name) => {
                    let title = if app.session.buffer.modified {
                        format!("{}*", name)
                    } else {
                        name.to_string()
                    };
                    ui.heading(title);
                }
                None => {
                    ui.heading("No file selected");
                }
            }
            if let Some(path) = app.session.data_path() {
                ui.label(
                    egui::RichText::new(path)
                        .monospace()
                        .color(egui::Color32::from_rgb(128, 128, 128)),
                );
            }
        });

        ui.horizontal(|ui| {
            if ui.button("Format").on_hover_text("Ctrl+Shift+F").clicked() {
                app.format_buffer();
            }
            if ui.button("Preview").on_hover_text("Ctrl+Enter").clicked() {
                app.preview_buffer();
            }
            ui.separator();
            if ui.button("Download").on_hover_text("Ctrl+S").clicked() {
                app.download_current();
            }
            if ui.button("Download all").clicked() {
                app.download_all();
            }
        });
    }

    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut CmsApp) {
        egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .show(ui, |ui| {
                if app.session.selection().is_none() {
                    Self::show_welcome(ui);
                    return;
                }

                let font = egui::FontId::monospace(app.config.font_size);
                let response = egui::TextEdit::multiline(&mut app.session.buffer.content)
                    .font(font)
                    .code_editor()
                    .desired_width(f32::INFINITY)
                    .desired_rows(30)
                    .show(ui);

                if response.response.changed() {
                    app.session.buffer.modified = true;
                }
            });
    }

    /// Show welcome screen when no file is selected
    fn show_welcome(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.heading("Site JSON CMS");
            ui.add_space(20.0);

            ui.label("Select a data file on the left to edit it.");
            ui.add_space(10.0);

            ui.label("Keyboard shortcuts:");
            ui.label("  Ctrl+S - Download current file");
            ui.label("  Ctrl+Shift+F - Format JSON");
            ui.label("  Ctrl+Enter - Refresh preview");
            ui.label("  Ctrl+B - Toggle sidebar");
        });
    }
}
