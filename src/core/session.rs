//! Editor session: selection, buffer and preview for one run of the editor

use thiserror::Error;

use super::config::SiteConfig;
use super::document::EditorBuffer;
use super::export::{self, ExportArtifact};
use super::fetch::{DataSource, Transport};
use super::preview::{self, PreviewNode};
use super::registry::{base_name, Registry};

/// Failures surfaced to the operator as a blocking notice
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid JSON")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Select a file first")]
    NoSelection,
    #[error("Unknown file: {0}")]
    UnknownFile(String),
}

/// All state behind the editor window
pub struct EditorSession {
    config: SiteConfig,
    registry: Registry,
    source: DataSource,
    selection: Option<String>,
    /// Text being edited
    pub buffer: EditorBuffer,
    preview: PreviewNode,
}

impl EditorSession {
    pub fn new(config: SiteConfig, transport: Box<dyn Transport>) -> Self {
        let registry = Registry::new(config.files.iter().cloned());
        let source = DataSource::new(config.data_root(), transport);
        Self {
            config,
            registry,
            source,
            selection: None,
            buffer: EditorBuffer::new(),
            preview: PreviewNode::default(),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn preview(&self) -> &PreviewNode {
        &self.preview
    }

    /// Base name of the selected file
    pub fn file_name(&self) -> Option<&str> {
        self.selection().map(base_name)
    }

    /// Full data path of the selected file
    pub fn data_path(&self) -> Option<String> {
        self.selection()
            .map(|path| format!("{}{}", self.source.data_root(), path))
    }

    /// Make `path` the active file, loading it through the cache
    pub fn select(&mut self, path: &str) -> Result<(), SessionError> {
        if !self.registry.contains(path) {
            return Err(SessionError::UnknownFile(path.to_string()));
        }

        tracing::info!("Opening {}", path);
        self.selection = Some(path.to_string());
        let result = self.source.load(path);
        self.buffer.load(&result);
        self.preview = preview::render_load(&result, self.selection());
        Ok(())
    }

    /// Pretty-print the buffer in place
    pub fn reformat(&mut self) -> Result<(), SessionError> {
        self.buffer.reformat()?;
        Ok(())
    }

    /// Re-render the preview from the buffer
    pub fn preview_buffer(&mut self) -> Result<(), SessionError> {
        let value = self.buffer.current_parsed()?;
        self.preview = preview::render(&value, self.selection());
        Ok(())
    }

    /// Artifact for the selected file built from the buffer
    pub fn export_current(&self) -> Result<ExportArtifact, SessionError> {
        let selection = self.selection().ok_or(SessionError::NoSelection)?;
        let value = self.buffer.current_parsed()?;
        Ok(export::single_file(selection, &value))
    }

    /// Bundle of every registry file, freshly fetched in registry order
    pub fn export_all(&mut self) -> ExportArtifact {
        tracing::info!("Bundling {} files", self.registry.entries().len());
        export::bundle(&self.registry, &mut self.source)
    }
}
