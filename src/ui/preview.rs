//! Preview panel drawing the preview tree

use eframe::egui::{self, Color32, FontId, RichText, Ui};

use crate::core::preview::{BookCard, BookLink, PreviewNode};

/// Action triggered from the preview
#[derive(Debug, Clone)]
pub enum PreviewAction {
    /// Open a catalog link
    OpenUrl(String),
}

/// Preview panel
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the preview panel
    pub fn show(ui: &mut Ui, node: &PreviewNode) -> Option<PreviewAction> {
        let mut action = None;
        egui::ScrollArea::vertical()
            .id_salt("preview_scroll")
            .show(ui, |ui| {
                action = render_node(ui, node);
            });
        action
    }
}

/// Render a preview node
pub fn render_node(ui: &mut Ui, node: &PreviewNode) -> Option<PreviewAction> {
    match node {
        PreviewNode::Placeholder(text) => {
            ui.label(text.as_str());
            None
        }
        PreviewNode::Warning(text) => {
            ui.label(RichText::new(text).color(Color32::from_rgb(217, 119, 6)));
            None
        }
        PreviewNode::List(items) => {
            render_list(ui, items);
            None
        }
        PreviewNode::Catalog { heading, cards } => render_catalog(ui, heading, cards),
        PreviewNode::Block(text) => {
            render_block(ui, text);
            None
        }
    }
}

fn render_list(ui: &mut Ui, items: &[String]) {
    for item in items {
        ui.horizontal_wrapped(|ui| {
            ui.add_space(16.0);
            ui.label(RichText::new("\u{2022}").color(Color32::from_rgb(150, 150, 150)));
            ui.label(RichText::new(item).font(FontId::monospace(13.0)));
        });
    }
}

fn render_catalog(ui: &mut Ui, heading: &str, cards: &[BookCard]) -> Option<PreviewAction> {
    let mut action = None;

    ui.label(RichText::new(heading).font(FontId::proportional(20.0)).strong());
    ui.add_space(6.0);

    for card in cards {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new(&card.title).strong());
            if let Some(tag) = &card.tag {
                ui.label(RichText::new(tag).color(Color32::from_rgb(107, 114, 128)));
            }
        });
        if let Some(description) = &card.description {
            ui.label(description.as_str());
        }
        match &card.link {
            BookLink::Url(url) => {
                let response = ui.link("Open");
                if response.clicked() {
                    action = Some(PreviewAction::OpenUrl(url.clone()));
                }
                response.on_hover_text(url.as_str());
            }
            BookLink::Dead => {
                ui.add_enabled(false, egui::Link::new("Open"));
            }
        }
        ui.add_space(4.0);
        ui.separator();
    }

    action
}

fn render_block(ui: &mut Ui, text: &str) {
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgb(40, 40, 40))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                RichText::new(text)
                    .font(FontId::monospace(13.0))
                    .color(Color32::from_rgb(200, 200, 200)),
            );
        });
}
