//! Fixed registry of manageable data files

/// Ordered, immutable list of relative file paths
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<String>,
}

impl Registry {
    /// Build a registry, dropping duplicates but keeping first-seen order
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.into();
            if !unique.contains(&entry) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    /// All entries in registry order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries containing `filter` (case-sensitive), in registry order
    pub fn list(&self, filter: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.contains(filter))
            .map(String::as_str)
            .collect()
    }

    /// Whether `path` is a registry entry
    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| entry == path)
    }

    /// First entry, opened when the editor starts
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }
}

/// Last path segment of a registry entry
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_FILES;

    fn registry() -> Registry {
        Registry::new(DEFAULT_FILES.iter().copied())
    }

    #[test]
    fn test_empty_filter_lists_everything() {
        let registry = registry();
        assert_eq!(registry.list(""), DEFAULT_FILES.to_vec());
    }

    #[test]
    fn test_filter_keeps_registry_order() {
        let registry = registry();
        assert_eq!(
            registry.list("pages/"),
            vec![
                "pages/index.json",
                "pages/about.json",
                "pages/classes.json",
                "pages/team.json",
                "pages/contact.json",
                "pages/books.json",
            ]
        );
    }

    #[test]
    fn test_filter_matches_substrings_exactly() {
        let registry = registry();
        for filter in ["site", "json", "o", "s/b", "nav.json", "", "zzz"] {
            let expected: Vec<&str> = DEFAULT_FILES
                .iter()
                .copied()
                .filter(|f| f.contains(filter))
                .collect();
            assert_eq!(registry.list(filter), expected, "filter {:?}", filter);
        }
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let registry = registry();
        assert!(registry.list("Pages").is_empty());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let registry = Registry::new(["a.json", "b.json", "a.json"]);
        assert_eq!(registry.entries(), &["a.json".to_string(), "b.json".to_string()]);
    }

    #[test]
    fn test_first_entry() {
        assert_eq!(registry().first(), Some("site/nav.json"));
        assert_eq!(Registry::default().first(), None);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("pages/books.json"), "books.json");
        assert_eq!(base_name("top.json"), "top.json");
    }
}
