//! Content model for the Quire documentation engine.
//!
//! This crate provides:
//! - [`Document`]: raw text plus lazily-parsed front matter
//! - [`ContentStore`]: immutable map from virtual path to document
//! - [`frontmatter`]: the restricted front-matter block decoder
//! - [`segment`]: ordering-prefix utilities shared by resolution and
//!   navigation
//! - [`load_dir`] / [`StoreLoader`]: eager startup loading with atomic
//!   snapshot swaps for hot reload
//!
//! # Example
//!
//! ```
//! use quire_content::ContentStore;
//!
//! let store = ContentStore::from_entries([
//!     ("/content/1.start/1.index.md", "---\ntitle: Introduction\n---\n# Start"),
//!     ("/content/1.start/2.setup.md", "# Setup"),
//! ]);
//!
//! let doc = store.get("/content/1.start/1.index.md").unwrap();
//! assert_eq!(doc.title(), Some("Introduction"));
//! ```

pub mod frontmatter;
pub mod segment;

mod document;
mod loader;
mod store;

pub use document::Document;
pub use frontmatter::FrontMatter;
pub use loader::{LoadError, StoreLoader, load_dir};
pub use segment::OrderedName;
pub use store::{ContentStore, DEFAULT_MOUNT};
