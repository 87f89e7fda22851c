//! Site JSON CMS - desktop editor for a static site's JSON data files
//!
//! Lists a fixed set of data files served by the site, and lets the operator
//! edit, preview and download them.

mod app;
mod core;
mod ui;

use app::CmsApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::config::SiteConfig;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Site JSON CMS...");

    // Optional site root override, e.g. `site-json-cms http://localhost:8080/`
    let site = match std::env::args().nth(1) {
        Some(root) => SiteConfig::default().with_site_root(&root),
        None => SiteConfig::default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Site JSON CMS"),
        ..Default::default()
    };

    eframe::run_native(
        "Site JSON CMS",
        native_options,
        Box::new(move |cc| Ok(Box::new(CmsApp::new(cc, site)))),
    )
}
