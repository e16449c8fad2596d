//! Ordering-prefix handling for file and directory names.
//!
//! Content entries are named `<digits>.<name>` where the numeric prefix
//! controls sibling sort order and never appears in public routes. Both the
//! path resolver and the navigation builder go through
//! [`split_ordering_prefix`], so the two components cannot disagree on
//! ordering or name semantics.

/// Sort position for entries without a numeric prefix (effectively last).
pub const ORDER_LAST: u64 = u64::MAX;

/// A path segment split into its ordering prefix and cleaned name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedName {
    /// Numeric ordering prefix, if the segment carries one.
    pub order: Option<u64>,
    /// Segment name with the prefix stripped.
    pub clean: String,
}

impl OrderedName {
    /// Effective sort order ([`ORDER_LAST`] when no prefix is present).
    #[must_use]
    pub fn order_or_last(&self) -> u64 {
        self.order.unwrap_or(ORDER_LAST)
    }
}

/// Split a path segment into ordering prefix and clean name.
///
/// The prefix pattern is one or more ASCII digits followed by a literal `.`:
/// `"5.database"` yields order 5 and clean name `"database"`. Segments
/// without a prefix come back unchanged with no order. A bare numeric name
/// (`"2025"`) or an empty remainder (`"3."`) is not treated as prefixed.
#[must_use]
pub fn split_ordering_prefix(segment: &str) -> OrderedName {
    if let Some((digits, rest)) = segment.split_once('.') {
        if !digits.is_empty() && !rest.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(order) = digits.parse::<u64>() {
                return OrderedName {
                    order: Some(order),
                    clean: rest.to_owned(),
                };
            }
        }
    }
    OrderedName {
        order: None,
        clean: segment.to_owned(),
    }
}

/// Strip a trailing `.md` extension, if present.
#[must_use]
pub fn strip_md_extension(name: &str) -> &str {
    name.strip_suffix(".md").unwrap_or(name)
}

/// Sibling sort key: numeric prefix ascending, raw name as lexical tie-break.
#[must_use]
pub fn sort_key(raw_name: &str) -> (u64, &str) {
    (split_ordering_prefix(raw_name).order_or_last(), raw_name)
}

/// Synthesize a display title from a clean segment name.
///
/// Replaces `-` and `_` with spaces and capitalizes each word's first
/// letter: `"getting-started"` becomes `"Getting Started"`.
#[must_use]
pub fn humanize(clean_name: &str) -> String {
    clean_name
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a virtual path into ordered segments, relative to a mount prefix.
///
/// The final segment is stripped of its `.md` extension before the prefix
/// split. Returns `None` when the path does not live under `mount`.
///
/// `"/content/5.database/3.migrations.md"` (mount `"/content"`) yields
/// `[{5, "database"}, {3, "migrations"}]`.
#[must_use]
pub fn document_segments(virtual_path: &str, mount: &str) -> Option<Vec<OrderedName>> {
    let rel = virtual_path.strip_prefix(mount)?;
    if !rel.is_empty() && !rel.starts_with('/') {
        return None;
    }
    let parts: Vec<&str> = rel.split('/').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return None;
    }
    let last = parts.len() - 1;
    Some(
        parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let name = if i == last {
                    strip_md_extension(part)
                } else {
                    part
                };
                split_ordering_prefix(name)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_with_prefix() {
        let name = split_ordering_prefix("5.database");

        assert_eq!(name.order, Some(5));
        assert_eq!(name.clean, "database");
    }

    #[test]
    fn test_split_multi_digit_prefix() {
        let name = split_ordering_prefix("12.extensions");

        assert_eq!(name.order, Some(12));
        assert_eq!(name.clean, "extensions");
    }

    #[test]
    fn test_split_without_prefix() {
        let name = split_ordering_prefix("database");

        assert_eq!(name.order, None);
        assert_eq!(name.clean, "database");
        assert_eq!(name.order_or_last(), ORDER_LAST);
    }

    #[test]
    fn test_split_bare_number_not_prefixed() {
        let name = split_ordering_prefix("2025");

        assert_eq!(name.order, None);
        assert_eq!(name.clean, "2025");
    }

    #[test]
    fn test_split_empty_remainder_not_prefixed() {
        let name = split_ordering_prefix("3.");

        assert_eq!(name.order, None);
        assert_eq!(name.clean, "3.");
    }

    #[test]
    fn test_split_non_numeric_prefix_not_prefixed() {
        let name = split_ordering_prefix("v2.guide");

        assert_eq!(name.order, None);
        assert_eq!(name.clean, "v2.guide");
    }

    #[test]
    fn test_split_dotted_remainder_keeps_rest() {
        let name = split_ordering_prefix("2.1-release-notes");

        assert_eq!(name.order, Some(2));
        assert_eq!(name.clean, "1-release-notes");
    }

    #[test]
    fn test_strip_md_extension() {
        assert_eq!(strip_md_extension("guide.md"), "guide");
        assert_eq!(strip_md_extension("guide"), "guide");
        assert_eq!(strip_md_extension("1.index.md"), "1.index");
    }

    #[test]
    fn test_sort_key_orders_by_prefix_then_name() {
        let mut names = vec!["3.charlie", "1.bravo", "2.tutorials", "2.guides", "alpha"];
        names.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

        assert_eq!(
            names,
            vec!["1.bravo", "2.guides", "2.tutorials", "3.charlie", "alpha"]
        );
    }

    #[test]
    fn test_humanize_replaces_separators() {
        assert_eq!(humanize("getting-started"), "Getting Started");
        assert_eq!(humanize("api_reference"), "Api Reference");
        assert_eq!(humanize("setup"), "Setup");
    }

    #[test]
    fn test_humanize_collapses_empty_words() {
        assert_eq!(humanize("a--b"), "A B");
    }

    #[test]
    fn test_document_segments_nested() {
        let segs = document_segments("/content/5.database/3.migrations.md", "/content").unwrap();

        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].order, Some(5));
        assert_eq!(segs[0].clean, "database");
        assert_eq!(segs[1].order, Some(3));
        assert_eq!(segs[1].clean, "migrations");
    }

    #[test]
    fn test_document_segments_strips_extension_only_on_file() {
        let segs = document_segments("/content/1.start/2.setup.md", "/content").unwrap();

        assert_eq!(segs[0].clean, "start");
        assert_eq!(segs[1].clean, "setup");
    }

    #[test]
    fn test_document_segments_outside_mount_is_none() {
        assert!(document_segments("/other/guide.md", "/content").is_none());
        assert!(document_segments("/contentious/guide.md", "/content").is_none());
    }

    #[test]
    fn test_document_segments_mount_itself_is_none() {
        assert!(document_segments("/content", "/content").is_none());
    }
}
