//! # Document Types
//!
//! The structures a parsed lyric sheet is made of.
//!
//! ## Type Hierarchy
//! ```text
//! ParseResult
//!   ├── Metadata (lowercase key → value: title, key, ...)
//!   ├── has_chords: bool
//!   └── Vec<LineElement>
//!         ├── Heading { level: 2..=6, content }
//!         ├── Blank
//!         ├── Plain { content }
//!         └── Chorded { segments: Vec<Segment> }
//!                       ├── PlainText { html }
//!                       └── ChordAnchor { chord, anchor }
//! ```
//!
//! ## Markup vs. raw text
//! `Heading::content`, `Plain::content` and `Segment::PlainText::html` hold
//! markup that has already been escaped and had emphasis applied. The chord
//! label and anchor character of a `ChordAnchor` are raw and must be escaped by
//! whatever renders them.
//!
//! ## Related Modules
//! - `parser` - Builds these types from source text
//! - `html` - Turns them into markup

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder anchor used when a chord has no character to sit on.
pub const NBSP: char = '\u{00A0}';

/// Song metadata: lowercase keys mapped to string values.
///
/// Backed by a sorted map so that serialized output is stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn key(&self) -> Option<&str> {
        self.get("key")
    }

    /// Set `key` to `value`, replacing any previous value. Keys are lowercased.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_lowercase(), value.into());
    }

    /// Set `key` only when it is missing or holds an empty value.
    pub fn insert_if_absent(&mut self, key: &str, value: impl Into<String>) {
        let key = key.to_lowercase();
        match self.entries.get(&key) {
            Some(existing) if !existing.is_empty() => {}
            _ => {
                self.entries.insert(key, value.into());
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (k, v) in iter {
            metadata.insert(k.as_ref(), v);
        }
        metadata
    }
}

/// A piece of a chorded line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Escaped, emphasis-applied lyric text between chords
    PlainText { html: String },
    /// A chord sitting above exactly one character (or `NBSP`)
    ChordAnchor { chord: String, anchor: char },
}

impl Segment {
    pub fn text(html: impl Into<String>) -> Self {
        Segment::PlainText { html: html.into() }
    }

    pub fn chord(chord: impl Into<String>, anchor: char) -> Self {
        Segment::ChordAnchor {
            chord: chord.into(),
            anchor,
        }
    }

    /// True for a chord anchored to the placeholder rather than a lyric character
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Segment::ChordAnchor { anchor, .. } if *anchor == NBSP)
    }
}

/// One rendered line of the song body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineElement {
    Heading { level: u8, content: String },
    /// Stanza break
    Blank,
    Plain { content: String },
    Chorded { segments: Vec<Segment> },
}

/// Output of [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseResult {
    pub metadata: Metadata,
    pub lines: Vec<LineElement>,
    /// True iff at least one line is `Chorded`
    pub has_chords: bool,
}
