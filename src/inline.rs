//! Inline emphasis for lyric text.
//!
//! Only four forms are recognized, applied in this order and without nesting:
//! `**strong**`, `__strong__`, `*em*`, `_em_`. Text is escaped before any
//! emphasis is applied, so `<` and `>` from the source can never become tags.

use once_cell::sync::Lazy;
use regex::Regex;

static EMPHASIS: Lazy<[(Regex, &'static str); 4]> = Lazy::new(|| {
    [
        (Regex::new(r"\*\*(.+?)\*\*").unwrap(), "<strong>$1</strong>"),
        (Regex::new(r"__(.+?)__").unwrap(), "<strong>$1</strong>"),
        (Regex::new(r"\*(.+?)\*").unwrap(), "<em>$1</em>"),
        (Regex::new(r"_(.+?)_").unwrap(), "<em>$1</em>"),
    ]
});

/// Escape the five HTML-significant characters.
///
/// # Example
/// ```
/// use chordsheet::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape `s` and apply bold/italic emphasis.
///
/// # Example
/// ```
/// use chordsheet::render_inline;
///
/// assert_eq!(render_inline("<b>*hi*</b>"), "&lt;b&gt;<em>hi</em>&lt;/b&gt;");
/// ```
pub fn render_inline(s: &str) -> String {
    let mut html = escape_html(s);
    for (pattern, replacement) in EMPHASIS.iter() {
        html = pattern.replace_all(&html, *replacement).into_owned();
    }
    html
}
