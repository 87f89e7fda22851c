//! Editor buffer holding the pretty-printed JSON of the selected file

use serde_json::Value;

use super::fetch::LoadResult;

/// Buffer contents shown when a file could not be fetched
pub const LOAD_ERROR_DOCUMENT: &str = "{\n  \"error\": \"Unable to load file. The site must be served over HTTP, not opened as local files. Run a local HTTP server to use the CMS.\"\n}";

/// Pretty-print with the stable two-space layout
pub fn pretty(value: &Value) -> String {
    // Serializing a `Value` cannot fail
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Single-line form used for list items
pub fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Mutable text buffer; may hold invalid JSON while being edited
#[derive(Debug, Clone, Default)]
pub struct EditorBuffer {
    /// Buffer text
    pub content: String,
    /// Whether the text changed since the file was loaded
    pub modified: bool,
}

impl EditorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer with a freshly loaded file
    pub fn load(&mut self, result: &LoadResult) {
        self.content = match result {
            LoadResult::Loaded(value) => pretty(value),
            LoadResult::Failed => LOAD_ERROR_DOCUMENT.to_string(),
        };
        self.modified = false;
    }

    /// Parse the buffer as it currently stands
    pub fn current_parsed(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.content)
    }

    /// Re-indent the buffer; on a parse error the text is left untouched
    pub fn reformat(&mut self) -> Result<(), serde_json::Error> {
        let value = self.current_parsed()?;
        let formatted = pretty(&value);
        if formatted != self.content {
            self.content = formatted;
        }
        Ok(())
    }

    /// Update content and mark as modified
    pub fn set_content(&mut self, content: String) {
        if self.content != content {
            self.content = content;
            self.modified = true;
        }
    }
}
