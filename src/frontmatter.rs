//! Front-matter extraction.
//!
//! A song may open with a block of `key: value` lines fenced by `---`:
//!
//! ```text
//! ---
//! title: Amazing Grace
//! key: "G"
//! ---
//! [G]Amazing [C]grace
//! ```
//!
//! The block is only recognized at the very start of the document and must be
//! closed by a line that is exactly `---`. Anything else is left in the body.

use crate::ast::Metadata;
use once_cell::sync::Lazy;
use regex::Regex;

/// Opening fence, lazily-matched content, closing fence at end of line.
/// The content group is lazily optional so `---\n---` is an empty block.
static BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A---\n(?:((?s:.*?))\n)??---(?:\n|\z)").unwrap());

static KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z0-9_-]+)\s*:\s*(.*)$").unwrap());

/// A document split into its front-matter and the rest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrontMatter {
    pub body: String,
    pub metadata: Metadata,
}

/// Collapse `\r\n` and bare `\r` into `\n`.
pub fn normalize_newlines(source: &str) -> String {
    source.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split `source` into front-matter metadata and body.
///
/// A missing or unterminated block yields the whole (normalized) input as the
/// body and empty metadata.
///
/// # Example
/// ```
/// use chordsheet::extract_front_matter;
///
/// let fm = extract_front_matter("---\ntitle: Foo\nkey: G\n---\nBody");
/// assert_eq!(fm.metadata.title(), Some("Foo"));
/// assert_eq!(fm.metadata.key(), Some("G"));
/// assert_eq!(fm.body, "Body");
/// ```
pub fn extract_front_matter(source: &str) -> FrontMatter {
    let normalized = normalize_newlines(source);

    let block = BLOCK.captures(&normalized).map(|captures| {
        let end = captures.get(0).map_or(0, |m| m.end());
        let metadata = captures
            .get(1)
            .map(|content| parse_block(content.as_str()))
            .unwrap_or_default();
        (end, metadata)
    });

    match block {
        Some((end, metadata)) => FrontMatter {
            body: normalized[end..].to_string(),
            metadata,
        },
        None => FrontMatter {
            body: normalized,
            metadata: Metadata::new(),
        },
    }
}

/// Read `key: value` pairs; lines of any other shape are skipped.
fn parse_block(block: &str) -> Metadata {
    let mut metadata = Metadata::new();
    for line in block.split('\n') {
        let Some(kv) = KEY_VALUE.captures(line) else {
            continue;
        };
        let value = strip_quotes(kv[2].trim());
        metadata.insert(&kv[1], value);
    }
    metadata
}

/// Remove one matching pair of surrounding `'` or `"`.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
