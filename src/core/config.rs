//! Site and application configuration

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Data files the editor is allowed to manage, in display order
pub const DEFAULT_FILES: &[&str] = &[
    "site/nav.json",
    "site/footer.json",
    "site/site.json",
    "assets/images.json",
    "pages/index.json",
    "pages/about.json",
    "pages/classes.json",
    "pages/team.json",
    "pages/contact.json",
    "pages/books.json",
];

/// Where the site is served from and which files it exposes.
///
/// Compiled in; only `site_root` may be overridden from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Base URL of the served site, always ending in `/`
    pub site_root: String,
    /// Directory under the site root holding the data files
    pub data_dir: String,
    /// Registry entries, relative to the data directory
    pub files: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_root: "http://localhost:8000/".to_string(),
            data_dir: "data/".to_string(),
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl SiteConfig {
    /// Replace the site root, normalising the trailing slash
    pub fn with_site_root(mut self, root: &str) -> Self {
        let root = root.trim();
        self.site_root = if root.ends_with('/') {
            root.to_string()
        } else {
            format!("{}/", root)
        };
        self
    }

    /// Prefix every registry path is appended to
    pub fn data_root(&self) -> String {
        format!("{}{}", self.site_root, self.data_dir)
    }
}

/// Layout of the central area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    Editor,
    Preview,
    #[default]
    Split,
}

/// Persisted UI preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Editor/preview layout
    pub view_mode: ViewMode,
    /// Whether the file list is visible
    pub sidebar_visible: bool,
    /// Sidebar width
    pub sidebar_width: f32,
    /// Editor font size in pixels
    pub font_size: f32,
    /// Directory the last download was saved to
    pub last_export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Split,
            sidebar_visible: true,
            sidebar_width: 250.0,
            font_size: 14.0,
            last_export_dir: None,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "site-json-cms", "SiteJsonCms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_json(&content)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
