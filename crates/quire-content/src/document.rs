//! Document model.
//!
//! A [`Document`] pairs a canonical stored path with raw file text. Front
//! matter is parsed lazily on first access and cached for the lifetime of
//! the document, which itself lives as long as the store snapshot.

use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::frontmatter::{self, FrontMatter};

/// A single content document addressed by its canonical stored path.
#[derive(Debug)]
pub struct Document {
    virtual_path: String,
    raw_text: String,
    parsed: OnceLock<FrontMatter>,
}

impl Document {
    /// Create a document from its stored address and full file text.
    #[must_use]
    pub fn new(virtual_path: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            virtual_path: virtual_path.into(),
            raw_text: raw_text.into(),
            parsed: OnceLock::new(),
        }
    }

    /// Canonical stored address, e.g. `/content/5.database/3.migrations.md`.
    #[must_use]
    pub fn virtual_path(&self) -> &str {
        &self.virtual_path
    }

    /// Full file contents, front matter included.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    fn parsed(&self) -> &FrontMatter {
        self.parsed
            .get_or_init(|| frontmatter::parse(&self.raw_text))
    }

    /// Decoded front-matter metadata (empty map when none is present).
    #[must_use]
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.parsed().metadata
    }

    /// Document text with the front-matter block stripped.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.raw_text[self.parsed().body_start..]
    }

    /// Title from front matter, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.metadata().get("title").and_then(Value::as_str)
    }

    /// Description from front matter, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.metadata().get("description").and_then(Value::as_str)
    }

    /// Navigation icon hint: `navigation.icon`, falling back to `icon`.
    #[must_use]
    pub fn nav_icon(&self) -> Option<&str> {
        self.nav_hint("icon")
    }

    /// Navigation badge hint: `navigation.badge`, falling back to `badge`.
    #[must_use]
    pub fn nav_badge(&self) -> Option<&str> {
        self.nav_hint("badge")
    }

    /// True when front matter opts the document out of navigation
    /// (`navigation: false`). Such documents stay resolvable by route.
    #[must_use]
    pub fn nav_hidden(&self) -> bool {
        self.metadata().get("navigation") == Some(&Value::Bool(false))
    }

    fn nav_hint(&self, key: &str) -> Option<&str> {
        let nested = self
            .metadata()
            .get("navigation")
            .and_then(Value::as_object)
            .and_then(|nav| nav.get(key))
            .and_then(Value::as_str);
        nested.or_else(|| self.metadata().get(key).and_then(Value::as_str))
    }
}
