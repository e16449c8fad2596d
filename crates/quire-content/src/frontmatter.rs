//! Front-matter extraction and decoding.
//!
//! Documents may begin with a metadata block delimited by `---` lines. The
//! block is decoded with a deliberately restricted line-oriented reader, not
//! a YAML parser: dotted keys expand into nested maps, indented keys nest
//! exactly one level under the most recent top-level key, and anything
//! deeper is skipped. Downstream content relies on deeper nesting being
//! ignored, so this must not be upgraded to full YAML.
//!
//! Parsing is pure and never fails: malformed blocks degrade to partial or
//! empty metadata.

use serde_json::{Map, Value};

/// Result of front-matter extraction.
///
/// `body_start` is the byte offset of the document body within the original
/// text, so callers can slice without copying.
#[derive(Clone, Debug, PartialEq)]
pub struct FrontMatter {
    /// Decoded key/value metadata (empty when no block is present).
    pub metadata: Map<String, Value>,
    /// Byte offset where the body begins in the original text.
    pub body_start: usize,
}

impl FrontMatter {
    fn absent() -> Self {
        Self {
            metadata: Map::new(),
            body_start: 0,
        }
    }
}

/// Extract and decode the front-matter block from raw document text.
///
/// A block is detected only when the very first line is exactly `---` and a
/// later line closes it the same way. An absent opening delimiter is not an
/// error: the whole text is the body. An unclosed block is treated the same
/// way, rather than swallowing the document into metadata.
#[must_use]
pub fn parse(raw: &str) -> FrontMatter {
    let mut lines = raw.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return FrontMatter::absent();
    };
    if trim_eol(first) != "---" {
        return FrontMatter::absent();
    }

    let mut offset = first.len();
    let mut block: Vec<&str> = Vec::new();
    let mut closed = false;
    for line in lines {
        offset += line.len();
        if trim_eol(line) == "---" {
            closed = true;
            break;
        }
        block.push(line);
    }
    if !closed {
        return FrontMatter::absent();
    }

    FrontMatter {
        metadata: decode_block(&block),
        body_start: offset,
    }
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Decode block lines into a metadata map.
///
/// Skips blank lines, `#` comments, and lines without a colon. Indented
/// keys attach one level under the most recent top-level key; that parent
/// slot is promoted to a map when it holds nothing meaningful, and the line
/// is skipped when the parent already holds a real scalar. Only one extra
/// level is honored: lines indented deeper than the first indented line
/// under the current parent are skipped.
fn decode_block(lines: &[&str]) -> Map<String, Value> {
    let mut metadata = Map::new();
    let mut last_top: Option<String> = None;
    let mut nest_indent: Option<usize> = None;

    for raw_line in lines {
        let line = trim_eol(raw_line);
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = coerce_scalar(value.trim());

        let indent = line.len() - line.trim_start().len();
        if indent > 0 {
            let Some(parent) = &last_top else {
                continue;
            };
            // The first indented line under a parent fixes the nesting
            // depth; anything deeper is skipped.
            let level = *nest_indent.get_or_insert(indent);
            if indent > level {
                continue;
            }
            let slot = metadata
                .entry(parent.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if placeholder(slot) {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(map) = slot {
                insert_path(map, key, value);
            }
        } else {
            insert_path(&mut metadata, key, value);
            let top = key.split('.').next().unwrap_or(key);
            last_top = Some(top.to_owned());
            nest_indent = None;
        }
    }

    metadata
}

/// A slot that can be promoted to a nested map: `null` or an empty-string
/// value, which is what a bare `key:` line decodes to.
fn placeholder(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Insert a value at a dotted key path, creating intermediate maps.
fn insert_path(map: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            map.insert(key.to_owned(), value);
        }
        Some((head, rest)) => {
            let slot = map
                .entry(head.to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(inner) = slot {
                insert_path(inner, rest, value);
            }
        }
    }
}

/// Coerce a scalar string, in precedence order: booleans, null, integer,
/// float, quoted string, literal string.
fn coerce_scalar(value: &str) -> Value {
    match value {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }
    if let Ok(n) = value.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = value.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let quoted = (bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\'');
        if quoted {
            return Value::String(value[1..value.len() - 1].to_owned());
        }
    }
    Value::String(value.to_owned())
}
