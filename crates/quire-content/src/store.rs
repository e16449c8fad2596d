//! Immutable content store.
//!
//! The store is a build-time-produced mapping from virtual file path to
//! [`Document`], populated once and never mutated afterwards. Documents are
//! held in a `BTreeMap`, so every traversal runs in lexical path order.
//! That ordering is the deterministic tie-break policy for resolution and
//! navigation: given duplicate numeric prefixes, the first lexically-sorted
//! stored path wins. It is a documented contract, not an iteration accident.

use std::collections::BTreeMap;

use crate::document::Document;

/// Default virtual root under which documents are addressed.
pub const DEFAULT_MOUNT: &str = "/content";

/// Read-only mapping from virtual file path to document.
#[derive(Debug)]
pub struct ContentStore {
    mount: String,
    documents: BTreeMap<String, Document>,
}

impl ContentStore {
    /// Build a store from `(virtual path, raw text)` pairs under the default
    /// mount. Duplicate paths keep the last entry.
    #[must_use]
    pub fn from_entries<P, T>(entries: impl IntoIterator<Item = (P, T)>) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        Self::with_mount(DEFAULT_MOUNT, entries)
    }

    /// Build a store with an explicit mount prefix.
    #[must_use]
    pub fn with_mount<P, T>(mount: &str, entries: impl IntoIterator<Item = (P, T)>) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        let documents = entries
            .into_iter()
            .map(|(path, text)| {
                let path = path.into();
                let doc = Document::new(path.clone(), text.into());
                (path, doc)
            })
            .collect();
        Self {
            mount: mount.trim_end_matches('/').to_owned(),
            documents,
        }
    }

    /// Virtual root prefix, e.g. `/content`.
    #[must_use]
    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// Look up a document by its exact virtual path.
    #[must_use]
    pub fn get(&self, virtual_path: &str) -> Option<&Document> {
        self.documents.get(virtual_path)
    }

    /// Iterate documents in lexical path order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when the store holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_entries_and_get() {
        let store = ContentStore::from_entries([("/content/1.start/1.index.md", "# Start")]);

        assert_eq!(store.len(), 1);
        let doc = store.get("/content/1.start/1.index.md").unwrap();
        assert_eq!(doc.raw_text(), "# Start");
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = ContentStore::from_entries::<&str, &str>([]);

        assert!(store.get("/content/missing.md").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_iter_is_lexical_by_path() {
        let store = ContentStore::from_entries([
            ("/content/2.b.md", "b"),
            ("/content/1.a.md", "a"),
            ("/content/10.c.md", "c"),
        ]);

        let paths: Vec<_> = store.iter().map(Document::virtual_path).collect();

        // Lexical, not numeric: "10." sorts between "1." and "2.".
        assert_eq!(
            paths,
            vec!["/content/1.a.md", "/content/10.c.md", "/content/2.b.md"]
        );
    }

    #[test]
    fn test_duplicate_paths_keep_last_entry() {
        let store =
            ContentStore::from_entries([("/content/a.md", "first"), ("/content/a.md", "second")]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("/content/a.md").unwrap().raw_text(), "second");
    }

    #[test]
    fn test_custom_mount_trims_trailing_slash() {
        let store = ContentStore::with_mount("/docs/", [("/docs/a.md", "a")]);

        assert_eq!(store.mount(), "/docs");
    }
}
