//! # Parser Module
//!
//! Turns the body of a lyric sheet into an ordered list of [`LineElement`]s.
//!
//! ## Line Classification
//! Each line is classified on its own by [`classify_line`]; the first rule that
//! matches wins:
//!
//! 1. `# Title` - level-1 heading, becomes the song title (not rendered)
//! 2. `## ..` to `###### ..` - rendered heading
//! 3. `{key: value}` alone on a line - metadata directive (not rendered)
//! 4. every other `{...}` span is stripped from the line
//! 5. whitespace only - stanza break
//! 6. no `[chord]` marker - plain lyric line
//! 7. otherwise - chorded line, split by [`segment_chords`]
//!
//! ## Assembly
//! [`parse`] seeds the metadata from the front-matter block, then folds the
//! classified lines through a [`SheetBuilder`] which owns the metadata and the
//! `has_chords` flag. Directives overwrite earlier values; a level-1 heading
//! only fills in a missing title.
//!
//! ## Chord Segmentation
//! A chorded line is tokenized into text characters and `[label]` chords. Each
//! chord takes the single character that follows it as its anchor, or a
//! no-break space when the line ends or another chord follows immediately.
//! A `[` with no closing `]` after it is ordinary text.
//!
//! ## Example
//! ```rust
//! use chordsheet::{parse, LineElement, Segment, NBSP};
//!
//! let result = parse("---\ntitle: Strum\n---\n[G]Hello there[C]");
//!
//! assert_eq!(result.metadata.title(), Some("Strum"));
//! assert!(result.has_chords);
//! assert_eq!(
//!     result.lines,
//!     vec![LineElement::Chorded {
//!         segments: vec![
//!             Segment::chord("G", 'H'),
//!             Segment::text("ello there"),
//!             Segment::chord("C", NBSP),
//!         ],
//!     }]
//! );
//! ```

use crate::ast::{LineElement, Metadata, ParseResult, Segment, NBSP};
use crate::frontmatter::{extract_front_matter, FrontMatter};
use crate::inline::render_inline;
use once_cell::sync::Lazy;
use regex::Regex;

static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s+(.*)$").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(#{2,6})\s+(.*)$").unwrap());
static DIRECTIVE_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{([^}]+)\}$").unwrap());
static INLINE_DIRECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]+\}").unwrap());
static CHORD_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]+\]").unwrap());

/// How a single body line is treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Level-1 heading text (trimmed)
    Title(String),
    /// Level 2-6 heading, content already rendered
    Heading { level: u8, content: String },
    /// Directive-only line; `None` when it has no usable `key: value`
    Directive(Option<(String, String)>),
    Blank,
    /// Plain lyric line, content already rendered
    Plain(String),
    /// Chord-bearing line after inline directives were stripped
    Chorded(String),
}

/// Classify one line of the body.
pub fn classify_line(line: &str) -> LineClass {
    if let Some(caps) = TITLE.captures(line) {
        return LineClass::Title(caps[1].trim().to_string());
    }

    if let Some(caps) = HEADING.captures(line) {
        return LineClass::Heading {
            level: caps[1].len() as u8,
            content: render_inline(caps[2].trim()),
        };
    }

    if let Some(caps) = DIRECTIVE_ONLY.captures(line.trim()) {
        return LineClass::Directive(parse_directive(&caps[1]));
    }

    let stripped = INLINE_DIRECTIVE.replace_all(line, "");

    if stripped.trim().is_empty() {
        LineClass::Blank
    } else if !CHORD_MARKER.is_match(&stripped) {
        LineClass::Plain(render_inline(&stripped))
    } else {
        LineClass::Chorded(stripped.into_owned())
    }
}

/// Split directive content on its first `:`.
fn parse_directive(inner: &str) -> Option<(String, String)> {
    let (key, value) = inner.split_once(':')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key.to_lowercase(), value.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChordToken {
    Text(char),
    Chord(String),
}

fn tokenize_chords(line: &str) -> Vec<ChordToken> {
    let mut tokens = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(close) = rest[1..].find(']') {
                tokens.push(ChordToken::Chord(rest[1..1 + close].to_string()));
                rest = &rest[close + 2..];
                continue;
            }
        }
        tokens.push(ChordToken::Text(c));
        rest = &rest[c.len_utf8()..];
    }

    tokens
}

/// Split a chorded line into lyric text and anchored chords.
///
/// Text between chords is rendered with [`render_inline`]; empty text runs
/// produce no segment.
pub fn segment_chords(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut buffer = String::new();
    let mut tokens = tokenize_chords(line).into_iter().peekable();

    while let Some(token) = tokens.next() {
        match token {
            ChordToken::Text(c) => buffer.push(c),
            ChordToken::Chord(chord) => {
                flush_text(&mut buffer, &mut segments);
                let anchor = match tokens.peek() {
                    Some(ChordToken::Text(c)) if *c != '[' => {
                        let c = *c;
                        tokens.next();
                        c
                    }
                    _ => NBSP,
                };
                segments.push(Segment::chord(chord, anchor));
            }
        }
    }
    flush_text(&mut buffer, &mut segments);

    segments
}

fn flush_text(buffer: &mut String, segments: &mut Vec<Segment>) {
    if !buffer.is_empty() {
        segments.push(Segment::text(render_inline(buffer)));
        buffer.clear();
    }
}

/// Accumulator threaded through the per-line fold.
#[derive(Debug, Default)]
pub struct SheetBuilder {
    metadata: Metadata,
    lines: Vec<LineElement>,
    has_chords: bool,
}

impl SheetBuilder {
    /// Start from front-matter metadata. Empty values are not carried over.
    pub fn new(front_matter: &Metadata) -> Self {
        let metadata = front_matter
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .collect();
        Self {
            metadata,
            ..Self::default()
        }
    }

    pub fn push(mut self, class: LineClass) -> Self {
        match class {
            LineClass::Title(text) => {
                if !text.is_empty() {
                    self.metadata.insert_if_absent("title", text);
                }
            }
            LineClass::Heading { level, content } => {
                self.lines.push(LineElement::Heading { level, content });
            }
            LineClass::Directive(Some((key, value))) => self.metadata.insert(&key, value),
            LineClass::Directive(None) => {}
            LineClass::Blank => self.lines.push(LineElement::Blank),
            LineClass::Plain(content) => self.lines.push(LineElement::Plain { content }),
            LineClass::Chorded(line) => {
                self.has_chords = true;
                self.lines.push(LineElement::Chorded {
                    segments: segment_chords(&line),
                });
            }
        }
        self
    }

    pub fn finish(self) -> ParseResult {
        ParseResult {
            metadata: self.metadata,
            lines: self.lines,
            has_chords: self.has_chords,
        }
    }
}

/// Parse a complete lyric sheet.
///
/// Never fails: malformed input degrades to the closest sensible rendering.
pub fn parse(source: &str) -> ParseResult {
    let FrontMatter { body, metadata } = extract_front_matter(source);

    body.split('\n')
        .map(classify_line)
        .fold(SheetBuilder::new(&metadata), SheetBuilder::push)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chorded(result: &ParseResult, index: usize) -> &[Segment] {
        match &result.lines[index] {
            LineElement::Chorded { segments } => segments,
            other => panic!("Expected chorded line, got {:?}", other),
        }
    }

    #[test]
    fn test_chord_anchors_next_character() {
        assert_eq!(
            segment_chords("[G]Hello"),
            vec![Segment::chord("G", 'H'), Segment::text("ello")]
        );
    }

    #[test]
    fn test_trailing_chord_gets_placeholder() {
        assert_eq!(
            segment_chords("Strum[C]"),
            vec![Segment::text("Strum"), Segment::chord("C", NBSP)]
        );
    }

    #[test]
    fn test_adjacent_chords() {
        assert_eq!(
            segment_chords("[Am][F]la"),
            vec![
                Segment::chord("Am", NBSP),
                Segment::chord("F", 'l'),
                Segment::text("a"),
            ]
        );
    }

    #[test]
    fn test_chord_followed_by_literal_bracket() {
        // "[x" never closes, but the chord before it still gets the placeholder
        assert_eq!(
            segment_chords("[C][x"),
            vec![Segment::chord("C", NBSP), Segment::text("[x")]
        );
    }

    #[test]
    fn test_chord_anchors_space() {
        assert_eq!(
            segment_chords("a[D] b"),
            vec![Segment::text("a"), Segment::chord("D", ' '), Segment::text("b")]
        );
    }

    #[test]
    fn test_unmatched_bracket_is_text() {
        assert_eq!(
            segment_chords("[G]one [two"),
            vec![Segment::chord("G", 'o'), Segment::text("ne [two")]
        );
    }

    #[test]
    fn test_multibyte_anchor() {
        assert_eq!(
            segment_chords("[Em]élan"),
            vec![Segment::chord("Em", 'é'), Segment::text("lan")]
        );
    }

    #[test]
    fn test_text_between_chords_gets_emphasis() {
        assert_eq!(
            segment_chords("[G]x *soft* <y>"),
            vec![
                Segment::chord("G", 'x'),
                Segment::text(" <em>soft</em> &lt;y&gt;"),
            ]
        );
    }

    #[test]
    fn test_chord_label_kept_raw() {
        assert_eq!(segment_chords("[A<b>]z"), vec![Segment::chord("A<b>", 'z')]);
    }

    #[test]
    fn test_segment_count_matches_markers() {
        let segments = segment_chords("I [G]found my [C]thrill on [D]Blueberry [G]Hill");
        let chords = segments
            .iter()
            .filter(|s| matches!(s, Segment::ChordAnchor { .. }))
            .count();
        assert_eq!(chords, 4);
        assert!(segments
            .iter()
            .all(|s| !matches!(s, Segment::PlainText { html } if html.is_empty())));
    }

    #[test]
    fn test_classify_title() {
        assert_eq!(classify_line("  #   My Song "), LineClass::Title("My Song".into()));
    }

    #[test]
    fn test_classify_headings() {
        assert_eq!(
            classify_line("## Verse *1*"),
            LineClass::Heading { level: 2, content: "Verse <em>1</em>".into() }
        );
        assert_eq!(
            classify_line("###### Tiny"),
            LineClass::Heading { level: 6, content: "Tiny".into() }
        );
    }

    #[test]
    fn test_seven_hashes_is_plain() {
        assert_eq!(
            classify_line("####### Too deep"),
            LineClass::Plain("####### Too deep".into())
        );
    }

    #[test]
    fn test_hash_without_space_is_plain() {
        assert_eq!(classify_line("#hashtag"), LineClass::Plain("#hashtag".into()));
    }

    #[test]
    fn test_classify_directive() {
        assert_eq!(
            classify_line("  {Key: D} "),
            LineClass::Directive(Some(("key".into(), "D".into())))
        );
    }

    #[test]
    fn test_directive_splits_on_first_colon() {
        assert_eq!(
            classify_line("{time: 3:30}"),
            LineClass::Directive(Some(("time".into(), "3:30".into())))
        );
    }

    #[test]
    fn test_directive_without_value() {
        assert_eq!(classify_line("{chorus}"), LineClass::Directive(None));
        assert_eq!(classify_line("{key:}"), LineClass::Directive(None));
        assert_eq!(classify_line("{ : D}"), LineClass::Directive(None));
    }

    #[test]
    fn test_directive_with_trailing_text_is_stripped() {
        assert_eq!(
            classify_line("{key: D} and more"),
            LineClass::Plain(" and more".into())
        );
    }

    #[test]
    fn test_stripped_directive_leaves_blank() {
        assert_eq!(classify_line("{soc} {eoc}"), LineClass::Blank);
    }

    #[test]
    fn test_empty_braces_not_stripped() {
        assert_eq!(classify_line("{}"), LineClass::Plain("{}".into()));
    }

    #[test]
    fn test_empty_chord_does_not_mark_line() {
        assert_eq!(classify_line("[] nothing"), LineClass::Plain("[] nothing".into()));
    }

    #[test]
    fn test_inline_directive_removed_before_chords() {
        assert_eq!(
            classify_line("[G]La {comment: x}la"),
            LineClass::Chorded("[G]La la".into())
        );
    }

    #[test]
    fn test_heading_precedence() {
        let result = parse("# Title A\n## Title B");
        assert_eq!(result.metadata.title(), Some("Title A"));
        assert_eq!(
            result.lines[0],
            LineElement::Heading { level: 2, content: "Title B".into() }
        );
        assert_eq!(result.lines.len(), 1);
    }

    #[test]
    fn test_first_title_heading_wins() {
        let result = parse("# One\n# Two");
        assert_eq!(result.metadata.title(), Some("One"));
        assert!(result.lines.is_empty());
    }

    #[test]
    fn test_front_matter_title_beats_heading() {
        let result = parse("---\ntitle: From FM\n---\n# From Heading\nLine");
        assert_eq!(result.metadata.title(), Some("From FM"));
        assert_eq!(result.lines, vec![LineElement::Plain { content: "Line".into() }]);
    }

    #[test]
    fn test_empty_front_matter_title_filled_by_heading() {
        let result = parse("---\ntitle:\n---\n# Heading Title");
        assert_eq!(result.metadata.title(), Some("Heading Title"));
    }

    #[test]
    fn test_directive_overrides_front_matter() {
        let result = parse("---\nkey: G\n---\n{key: D}\n[D]Go");
        assert_eq!(result.metadata.key(), Some("D"));
        assert_eq!(result.lines.len(), 1);
    }

    #[test]
    fn test_later_directive_wins() {
        let result = parse("{key: D}\n{key: E}");
        assert_eq!(result.metadata.key(), Some("E"));
    }

    #[test]
    fn test_directive_can_set_title_over_heading() {
        let result = parse("# Heading\n{title: Directive}");
        assert_eq!(result.metadata.title(), Some("Directive"));
    }

    #[test]
    fn test_unknown_front_matter_keys_retained() {
        let result = parse("---\nartist: Someone\ncapo: 2\n---\n");
        assert_eq!(result.metadata.get("artist"), Some("Someone"));
        assert_eq!(result.metadata.get("capo"), Some("2"));
    }

    #[test]
    fn test_has_chords_flag() {
        assert!(!parse("plain\nlines").has_chords);
        assert!(parse("plain\n[G]chord").has_chords);
        // Chord only inside a stripped directive
        assert!(!parse("text {x [G] y}").has_chords);
    }

    #[test]
    fn test_blank_lines_preserved() {
        let result = parse("one\n\n  \ntwo");
        assert_eq!(
            result.lines,
            vec![
                LineElement::Plain { content: "one".into() },
                LineElement::Blank,
                LineElement::Blank,
                LineElement::Plain { content: "two".into() },
            ]
        );
    }

    #[test]
    fn test_trailing_newline_yields_blank() {
        let result = parse("---\ntitle: x\n---\nline\n");
        assert_eq!(result.lines.last(), Some(&LineElement::Blank));
        assert_eq!(result.lines.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let result = parse("");
        assert_eq!(result.lines, vec![LineElement::Blank]);
        assert!(result.metadata.is_empty());
        assert!(!result.has_chords);
    }

    #[test]
    fn test_mixed_document() {
        let source = "---\ntitle: Song\n---\n## Verse\n[G]Hello *world*\n\n{key: A}\nPlain line";
        let result = parse(source);

        assert_eq!(result.metadata.title(), Some("Song"));
        assert_eq!(result.metadata.key(), Some("A"));
        assert!(result.has_chords);
        assert_eq!(result.lines.len(), 4);
        assert_eq!(
            chorded(&result, 1),
            &[Segment::chord("G", 'H'), Segment::text("ello <em>world</em>")]
        );
        assert_eq!(result.lines[2], LineElement::Blank);
    }

    #[test]
    fn test_plain_document_line_order() {
        let source = "first\nsecond\n\nthird";
        let result = parse(source);
        let text: Vec<&str> = result
            .lines
            .iter()
            .map(|line| match line {
                LineElement::Plain { content } => content.as_str(),
                LineElement::Blank => "",
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(text.join("\n"), source);
        assert_eq!(parse(&text.join("\n")), result);
    }
}
