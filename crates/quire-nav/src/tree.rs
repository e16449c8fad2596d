//! Navigation tree synthesis.
//!
//! Walks a content store, groups documents by directory, strips ordering
//! prefixes, attaches titles/icons/badges from front matter, and emits an
//! ordered tree for a documentation sidebar. Directory sections are
//! reconstructed transiently on every build; the build itself is read-only
//! and side-effect free over the store snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

use quire_content::segment::{humanize, sort_key, split_ordering_prefix, strip_md_extension};
use quire_content::{ContentStore, Document};

/// A node of the public navigation tree.
///
/// `path` is the public route: ordering prefixes never leak into it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Public route string.
    pub path: String,
    /// Icon hint from front matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Badge hint from front matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Ordered child items (empty for leaf pages).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Transient per-build grouping of documents by raw directory name.
///
/// Raw (prefixed) names are the keys so sibling ordering can fall back to
/// lexical raw-name comparison on prefix collisions.
#[derive(Default)]
struct DirSection<'a> {
    dirs: BTreeMap<String, DirSection<'a>>,
    files: BTreeMap<String, &'a Document>,
}

enum Child<'a, 'b> {
    File(&'b str, &'a Document),
    Dir(&'b str, &'b DirSection<'a>),
}

impl Child<'_, '_> {
    fn raw_name(&self) -> &str {
        match self {
            Child::File(raw, _) | Child::Dir(raw, _) => raw,
        }
    }
}

/// Builds navigation trees from a content store snapshot.
pub struct NavBuilder<'a> {
    store: &'a ContentStore,
}

impl<'a> NavBuilder<'a> {
    /// Create a builder over a store snapshot.
    #[must_use]
    pub fn new(store: &'a ContentStore) -> Self {
        Self { store }
    }

    /// Build the ordered navigation tree.
    ///
    /// Only top-level directories carrying a numeric ordering prefix become
    /// sections; unprefixed top-level directories and loose root files are
    /// not navigation entries. At every level siblings are ordered by
    /// numeric prefix ascending with raw-name lexical tie-break, and a
    /// directory's index document contributes metadata to the section item
    /// rather than a child row.
    #[must_use]
    pub fn build(&self) -> Vec<NavItem> {
        let root = self.group_by_directory();

        let mut names: Vec<&String> = root
            .dirs
            .keys()
            .filter(|raw| split_ordering_prefix(raw).order.is_some())
            .collect();
        names.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        warn_on_duplicate_orders("/", names.iter().map(|raw| raw.as_str()));

        names
            .into_iter()
            .filter_map(|raw| self.build_section(raw, &root.dirs[raw], ""))
            .collect()
    }

    /// Group stored documents into a transient directory tree keyed by raw
    /// path segments.
    fn group_by_directory(&self) -> DirSection<'a> {
        let mut root = DirSection::default();

        for doc in self.store.iter() {
            let Some(parts) = relative_parts(doc.virtual_path(), self.store.mount()) else {
                continue;
            };
            let Some((file_name, dir_names)) = parts.split_last() else {
                continue;
            };

            let mut node = &mut root;
            for dir in dir_names {
                node = node.dirs.entry((*dir).to_owned()).or_default();
            }
            node.files.insert((*file_name).to_owned(), doc);
        }

        root
    }

    fn build_section(
        &self,
        raw_name: &str,
        section: &DirSection<'a>,
        parent_path: &str,
    ) -> Option<NavItem> {
        let name = split_ordering_prefix(raw_name);
        let path = format!("{parent_path}/{}", name.clean);

        let index_doc = section
            .files
            .iter()
            .filter(|(raw, _)| split_ordering_prefix(strip_md_extension(raw)).clean == "index")
            .min_by(|a, b| sort_key(a.0).cmp(&sort_key(b.0)))
            .map(|(_, doc)| *doc);

        if index_doc.is_some_and(Document::nav_hidden) {
            return None;
        }

        let children = self.build_children(section, &path, index_doc);

        // A directory with an index still appears childless; one with
        // nothing at all is dropped silently.
        if children.is_empty() && index_doc.is_none() {
            return None;
        }

        let (title, icon, badge) = match index_doc {
            Some(doc) => (
                doc.title()
                    .map_or_else(|| humanize(&name.clean), ToOwned::to_owned),
                doc.nav_icon().map(ToOwned::to_owned),
                doc.nav_badge().map(ToOwned::to_owned),
            ),
            None => (humanize(&name.clean), None, None),
        };

        Some(NavItem {
            title,
            path,
            icon,
            badge,
            children,
        })
    }

    fn build_children(
        &self,
        section: &DirSection<'a>,
        path: &str,
        index_doc: Option<&'a Document>,
    ) -> Vec<NavItem> {
        let mut entries: Vec<Child<'a, '_>> = Vec::new();
        for (raw, doc) in &section.files {
            if index_doc.is_some_and(|index| std::ptr::eq(index, *doc)) {
                continue;
            }
            entries.push(Child::File(raw.as_str(), *doc));
        }
        for (raw, child) in &section.dirs {
            entries.push(Child::Dir(raw.as_str(), child));
        }
        entries.sort_by(|a, b| sort_key(a.raw_name()).cmp(&sort_key(b.raw_name())));
        warn_on_duplicate_orders(path, entries.iter().map(Child::raw_name));

        entries
            .into_iter()
            .filter_map(|child| match child {
                Child::File(raw, doc) => Self::build_leaf(raw, doc, path),
                Child::Dir(raw, node) => self.build_section(raw, node, path),
            })
            .collect()
    }

    fn build_leaf(raw_file: &str, doc: &Document, parent_path: &str) -> Option<NavItem> {
        if doc.nav_hidden() {
            return None;
        }
        let name = split_ordering_prefix(strip_md_extension(raw_file));
        Some(NavItem {
            title: doc
                .title()
                .map_or_else(|| humanize(&name.clean), ToOwned::to_owned),
            path: format!("{parent_path}/{}", name.clean),
            icon: doc.nav_icon().map(ToOwned::to_owned),
            badge: doc.nav_badge().map(ToOwned::to_owned),
            children: Vec::new(),
        })
    }
}

/// Log a developer warning for sibling entries sharing a numeric prefix.
/// The lexical raw-name tie-break keeps the output deterministic.
fn warn_on_duplicate_orders<'n>(parent_path: &str, sorted_names: impl Iterator<Item = &'n str>) {
    let mut previous: Option<(u64, &str)> = None;
    for raw in sorted_names {
        let order = split_ordering_prefix(raw).order;
        if let (Some(order), Some((prev_order, prev_raw))) = (order, previous) {
            if order == prev_order {
                tracing::warn!(
                    parent = %parent_path,
                    order,
                    first = %prev_raw,
                    second = %raw,
                    "Sibling entries share an ordering prefix"
                );
            }
        }
        previous = order.map(|o| (o, raw));
    }
}

/// Raw path segments of a virtual path relative to the mount.
fn relative_parts<'p>(virtual_path: &'p str, mount: &str) -> Option<Vec<&'p str>> {
    let rel = virtual_path.strip_prefix(mount)?;
    if !rel.is_empty() && !rel.starts_with('/') {
        return None;
    }
    let parts: Vec<&str> = rel.split('/').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() { None } else { Some(parts) }
}
