//! Download artifacts: the current file or a bundle of every registry file

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use super::document::pretty;
use super::fetch::{DataSource, LoadResult};
use super::registry::{base_name, Registry};

pub const JSON_MIME: &str = "application/json";
pub const BUNDLE_FILE_NAME: &str = "site-json-bundle.json";

/// A file ready to be saved by the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name
    pub file_name: String,
    pub mime: &'static str,
    /// Pretty-printed JSON
    pub contents: String,
}

impl ExportArtifact {
    fn json(file_name: impl Into<String>, value: &Value) -> Self {
        Self {
            file_name: file_name.into(),
            mime: JSON_MIME,
            contents: pretty(value),
        }
    }

    /// Write the artifact to an explicit path
    pub fn save_as(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.contents)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        tracing::info!("Saved {} to {}", self.file_name, path.display());
        Ok(())
    }
}

/// Artifact for the selected file, named after its base name
pub fn single_file(selection: &str, value: &Value) -> ExportArtifact {
    ExportArtifact::json(base_name(selection), value)
}

/// Freshly fetch every registry file, one after another, into one bundle.
///
/// Failed reads appear as `null` so the key set always equals the registry.
pub fn bundle(registry: &Registry, source: &mut DataSource) -> ExportArtifact {
    let mut entries = Map::new();
    for path in registry.entries() {
        let result = source.fetch(path);
        if result == LoadResult::Failed {
            tracing::warn!("Bundling {} as null", path);
        }
        entries.insert(path.clone(), result.to_bundle_value());
    }
    ExportArtifact::json(BUNDLE_FILE_NAME, &Value::Object(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_FILES;
    use crate::core::fetch::tests::FakeTransport;
    use serde_json::json;

    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("site-json-cms-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_single_file_artifact() {
        let artifact = single_file("pages/books.json", &json!({"books": []}));
        assert_eq!(artifact.file_name, "books.json");
        assert_eq!(artifact.mime, "application/json");
        assert_eq!(artifact.contents, "{\n  \"books\": []\n}");
    }

    #[test]
    fn test_bundle_keys_match_registry_despite_failures() {
        let fake = FakeTransport::with(&[
            ("site/nav.json", json!([{"label": "Home"}])),
            ("pages/books.json", json!({"books": []})),
        ]);
        let registry = Registry::new(DEFAULT_FILES.iter().copied());
        let mut source = DataSource::new("mem://data/", Box::new(fake.clone()));

        let artifact = bundle(&registry, &mut source);
        assert_eq!(artifact.file_name, BUNDLE_FILE_NAME);

        let parsed: Value = serde_json::from_str(&artifact.contents).unwrap();
        let obj = parsed.as_object().unwrap();
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, DEFAULT_FILES.to_vec());
        assert_eq!(obj["site/nav.json"], json!([{"label": "Home"}]));
        assert_eq!(obj["pages/team.json"], Value::Null);
        assert_eq!(fake.request_count(), DEFAULT_FILES.len());
    }

    #[test]
    fn test_bundle_always_refetches() {
        let fake = FakeTransport::with(&[("a.json", json!(1))]);
        let registry = Registry::new(["a.json"]);
        let mut source = DataSource::new("mem://data/", Box::new(fake.clone()));

        source.load("a.json");
        bundle(&registry, &mut source);
        bundle(&registry, &mut source);
        assert_eq!(fake.request_count(), 3);
    }

    #[test]
    fn test_save_as_missing_dir_fails() {
        let artifact = single_file("site/nav.json", &json!({}));
        let path = temp_dir("missing").join("no-such-dir").join("nav.json");
        let err = artifact.save_as(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to write file"));
    }

    #[test]
    fn test_save_as_writes_contents() {
        let dir = temp_dir("save");
        let artifact = single_file("site/nav.json", &json!({"x": 1}));
        let path = dir.join(&artifact.file_name);
        artifact.save_as(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), artifact.contents);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
