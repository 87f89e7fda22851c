//! Main application state and UI coordination

use eframe::egui;

use crate::core::config::{AppConfig, SiteConfig, ViewMode};
use crate::core::export::ExportArtifact;
use crate::core::fetch::HttpTransport;
use crate::core::preview::resolve_link;
use crate::core::session::{EditorSession, SessionError};
use crate::ui::{
    editor::EditorPanel,
    file_list::FileListPanel,
    notice,
    preview::{PreviewAction, PreviewPanel},
};

/// Main application state
pub struct CmsApp {
    /// Selection, buffer and preview
    pub session: EditorSession,
    /// Persisted UI preferences
    pub config: AppConfig,
    /// File list filter text
    pub search: String,
    /// Blocking notice waiting to be dismissed
    pub notice: Option<String>,
}

impl CmsApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>, site: SiteConfig) -> Self {
        let config = AppConfig::load().unwrap_or_default();
        tracing::info!("Serving data from {}", site.data_root());

        let mut app = Self {
            session: EditorSession::new(site, Box::new(HttpTransport::new())),
            config,
            search: String::new(),
            notice: None,
        };

        // Open the first file like a click on it
        if let Some(first) = app.session.registry().first().map(str::to_string) {
            app.open_file(&first);
        }
        app
    }

    /// Select a registry file
    pub fn open_file(&mut self, path: &str) {
        if let Err(e) = self.session.select(path) {
            self.report(e);
        }
    }

    /// Pretty-print the editor buffer
    pub fn format_buffer(&mut self) {
        if let Err(e) = self.session.reformat() {
            self.report(e);
        }
    }

    /// Re-render the preview from the editor buffer
    pub fn preview_buffer(&mut self) {
        if let Err(e) = self.session.preview_buffer() {
            self.report(e);
        }
    }

    /// Save the current buffer as a file
    pub fn download_current(&mut self) {
        match self.session.export_current() {
            Ok(artifact) => self.save_artifact(&artifact),
            Err(e) => self.report(e),
        }
    }

    /// Save a bundle of every data file
    pub fn download_all(&mut self) {
        let artifact = self.session.export_all();
        self.save_artifact(&artifact);
    }

    /// Ask where to save `artifact` and write it
    fn save_artifact(&mut self, artifact: &ExportArtifact) {
        tracing::info!("Offering {} ({})", artifact.file_name, artifact.mime);
        let mut dialog = rfd::FileDialog::new()
            .set_file_name(&artifact.file_name)
            .add_filter("JSON", &["json"]);
        if let Some(ref dir) = self.config.last_export_dir {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.save_file() else {
            return;
        };

        if let Err(e) = artifact.save_as(&path) {
            tracing::error!("Failed to save download: {:#}", e);
            self.notice = Some(format!("{:#}", e));
            return;
        }

        self.config.last_export_dir = path.parent().map(|p| p.to_path_buf());
        let _ = self.config.save();
    }

    fn open_link(&mut self, href: &str) {
        let Some(url) = resolve_link(&self.session.config().site_root, href) else {
            self.notice = Some(format!("Cannot open link: {}", href));
            return;
        };
        if let Err(e) = open::that(&url) {
            tracing::error!("Failed to open {}: {}", url, e);
            self.notice = Some(format!("Cannot open link: {}", url));
        }
    }

    fn report(&mut self, error: SessionError) {
        tracing::debug!("Action failed: {}", error);
        self.notice = Some(error.to_string());
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        self.config.view_mode = mode;
        let _ = self.config.save();
    }

    fn toggle_sidebar(&mut self) {
        self.config.sidebar_visible = !self.config.sidebar_visible;
        let _ = self.config.save();
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Download").clicked() {
                        self.download_current();
                        ui.close();
                    }
                    if ui.button("Download all").clicked() {
                        self.download_all();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Toggle Sidebar").clicked() {
                        self.toggle_sidebar();
                        ui.close();
                    }
                    ui.separator();
                    let modes = [
                        (ViewMode::Editor, "Editor Only"),
                        (ViewMode::Preview, "Preview Only"),
                        (ViewMode::Split, "Split View"),
                    ];
                    for (mode, label) in modes {
                        if ui.selectable_label(self.config.view_mode == mode, label).clicked() {
                            self.set_view_mode(mode);
                            ui.close();
                        }
                    }
                });
            });
        });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (download, format, preview, sidebar) = ctx.input(|i| {
            let ctrl = i.modifiers.ctrl;
            (
                ctrl && i.key_pressed(egui::Key::S),
                ctrl && i.modifiers.shift && i.key_pressed(egui::Key::F),
                ctrl && i.key_pressed(egui::Key::Enter),
                ctrl && i.key_pressed(egui::Key::B),
            )
        });

        if download {
            self.download_current();
        }
        if format {
            self.format_buffer();
        }
        if preview {
            self.preview_buffer();
        }
        if sidebar {
            self.toggle_sidebar();
        }
    }
}

impl eframe::App for CmsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Shortcuts are ignored while a notice blocks the window
        if self.notice.is_none() {
            self.handle_shortcuts(ctx);
        }

        self.render_menu_bar(ctx);

        if self.config.sidebar_visible {
            let panel = egui::SidePanel::left("sidebar")
                .resizable(true)
                .default_width(self.config.sidebar_width)
                .min_width(150.0)
                .show(ctx, |ui| {
                    FileListPanel::show(ui, self);
                });
            self.config.sidebar_width = panel.response.rect.width();
        }

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            EditorPanel::show_header(ui, self);
            ui.separator();

            match self.config.view_mode {
                ViewMode::Editor => {
                    EditorPanel::show(ui, self);
                }
                ViewMode::Preview => {
                    action = PreviewPanel::show(ui, self.session.preview());
                }
                ViewMode::Split => {
                    let available_width = ui.available_width();
                    ui.horizontal_top(|ui| {
                        ui.set_min_width(available_width);

                        ui.vertical(|ui| {
                            ui.set_width(available_width / 2.0 - 4.0);
                            EditorPanel::show(ui, self);
                        });

                        ui.separator();

                        ui.vertical(|ui| {
                            ui.set_width(available_width / 2.0 - 4.0);
                            action = PreviewPanel::show(ui, self.session.preview());
                        });
                    });
                }
            }
        });

        if let Some(PreviewAction::OpenUrl(href)) = action {
            self.open_link(&href);
        }

        notice::show(ctx, &mut self.notice);
    }
}
