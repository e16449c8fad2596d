//! Route resolution and navigation synthesis for the Quire documentation
//! engine.
//!
//! This crate provides:
//! - [`Resolver`]: maps external route paths onto stored documents
//! - [`NavBuilder`]: synthesizes the ordered [`NavItem`] sidebar tree
//!
//! Both operate read-only over a [`ContentStore`](quire_content::ContentStore)
//! snapshot and share the ordering-prefix semantics of
//! [`quire_content::segment`].
//!
//! # Example
//!
//! ```
//! use quire_content::ContentStore;
//! use quire_nav::{NavBuilder, Resolver};
//!
//! let store = ContentStore::from_entries([
//!     ("/content/1.start/1.index.md", "---\ntitle: Introduction\n---\n"),
//!     ("/content/1.start/2.setup.md", "# Setup"),
//! ]);
//!
//! let doc = Resolver::new(&store).resolve("/start/setup").unwrap();
//! assert_eq!(doc.virtual_path(), "/content/1.start/2.setup.md");
//!
//! let nav = NavBuilder::new(&store).build();
//! assert_eq!(nav[0].title, "Introduction");
//! ```

mod resolve;
mod tree;

pub use resolve::Resolver;
pub use tree::{NavBuilder, NavItem};
