//! Route path resolution.
//!
//! Maps external route paths (`/database/migrations`) onto stored documents
//! (`/content/5.database/3.migrations.md`), accounting for numeric ordering
//! prefixes and directory index documents. "Not found" is `None`, never an
//! error; the caller turns it into a not-found state.

use quire_content::segment::document_segments;
use quire_content::{ContentStore, Document};

/// Resolves route paths against a content store snapshot.
pub struct Resolver<'a> {
    store: &'a ContentStore,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a store snapshot.
    #[must_use]
    pub fn new(store: &'a ContentStore) -> Self {
        Self { store }
    }

    /// Resolve a route path to its stored document.
    ///
    /// The empty path (or `/`) maps to the content root's own index
    /// document. For an N-segment route, a stored path matches when its
    /// prefix-stripped, extension-stripped segments equal the requested
    /// segments plus a trailing `index` (directory-index form), or exactly
    /// the requested segments (flat-file form). The directory index takes
    /// precedence when both exist: directories model sections, flat files
    /// model standalone pages.
    ///
    /// Candidates are examined in lexical stored-path order, so resolution
    /// is deterministic even with duplicate numeric prefixes.
    #[must_use]
    pub fn resolve(&self, route_path: &str) -> Option<&'a Document> {
        let wanted: Vec<&str> = route_path
            .split('/')
            .filter(|seg| !seg.is_empty())
            .collect();

        let mut flat_match: Option<&Document> = None;
        for doc in self.store.iter() {
            let Some(segments) = document_segments(doc.virtual_path(), self.store.mount()) else {
                continue;
            };
            let cleans: Vec<&str> = segments.iter().map(|s| s.clean.as_str()).collect();

            // Directory-index form: first lexical match wins outright.
            if cleans.len() == wanted.len() + 1
                && cleans.last().copied() == Some("index")
                && cleans[..wanted.len()] == wanted[..]
            {
                return Some(doc);
            }

            // Flat-file form: remember the first, keep scanning for an index.
            if flat_match.is_none() && !wanted.is_empty() && cleans == wanted {
                flat_match = Some(doc);
            }
        }

        flat_match
    }

    /// Compute the public route for a stored document.
    ///
    /// Ordering prefixes and the `.md` extension are stripped; a trailing
    /// `index` segment collapses into its directory. Returns `None` for
    /// documents outside the store's mount.
    ///
    /// For every document `d` in the store, `resolve(public_route(d))`
    /// returns `d` (absent flat/index shadowing at the same route).
    #[must_use]
    pub fn public_route(&self, doc: &Document) -> Option<String> {
        let segments = document_segments(doc.virtual_path(), self.store.mount())?;
        let mut cleans: Vec<&str> = segments.iter().map(|s| s.clean.as_str()).collect();
        if cleans.last().copied() == Some("index") {
            cleans.pop();
        }
        Some(format!("/{}", cleans.join("/")))
    }
}
