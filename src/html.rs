//! HTML output for parsed songs and the song index.
//!
//! Chord visibility is never read from global state; it is passed in through
//! [`RenderOptions`]. Hidden chords are still emitted and only marked with the
//! `hide-chords` class, so a stylesheet can toggle them without re-rendering.

use crate::ast::{LineElement, ParseResult, Segment};
use crate::inline::escape_html;

/// Options for rendering a song page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_chords: bool,
    /// Target of the "Back" link; no link when `None`
    pub back_link: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_chords: true,
            back_link: None,
        }
    }
}

/// Render the body lines of a song.
pub fn render_lines(result: &ParseResult) -> String {
    let mut html = String::new();
    for line in &result.lines {
        html.push_str(&line_to_html(line));
    }
    html
}

fn line_to_html(line: &LineElement) -> String {
    match line {
        LineElement::Heading { level, content } => {
            format!("<h{level}>{content}</h{level}>")
        }
        LineElement::Blank => r#"<div class="line blank">&nbsp;</div>"#.to_string(),
        LineElement::Plain { content } => format!(r#"<div class="line">{}</div>"#, content),
        LineElement::Chorded { segments } => {
            let mut html = String::from(r#"<div class="line has-chord">"#);
            for segment in segments {
                html.push_str(&segment_to_html(segment));
            }
            html.push_str("</div>");
            html
        }
    }
}

fn segment_to_html(segment: &Segment) -> String {
    match segment {
        Segment::PlainText { html } => html.clone(),
        Segment::ChordAnchor { chord, anchor } => {
            let lyric = if segment.is_placeholder() {
                "&nbsp;".to_string()
            } else {
                escape_html(&anchor.to_string())
            };
            format!(
                r#"<span class="seg"><span class="chord">{}</span><span class="lyric">{}</span></span>"#,
                escape_html(chord),
                lyric
            )
        }
    }
}

/// Render the song view: title, key and the song body.
pub fn render_song(result: &ParseResult, options: &RenderOptions) -> String {
    let mut html = String::new();

    html.push_str(&back_controls(options.back_link.as_deref()));

    if let Some(title) = result.metadata.title() {
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
    }
    if let Some(key) = result.metadata.key() {
        html.push_str(&format!(r#"<div class="meta">Key: {}</div>"#, escape_html(key)));
        html.push('\n');
    }

    let mut classes = vec!["song"];
    if result.has_chords {
        classes.push("chorded");
    }
    if !options.show_chords {
        classes.push("hide-chords");
    }
    html.push_str(&format!(
        r#"<div class="{}" id="songContainer">{}</div>"#,
        classes.join(" "),
        render_lines(result)
    ));
    html.push('\n');

    html
}

/// Render the page shown when a song could not be loaded.
pub fn render_not_found(file: &str, back_link: Option<&str>) -> String {
    let mut html = back_controls(back_link);
    html.push_str("<h2>Not found</h2>\n");
    html.push_str(&format!(
        "<p class=\"empty\">Couldn\u{2019}t load <code>{}</code>.</p>\n",
        escape_html(file)
    ));
    html
}

/// One entry of the song index: the label and the page it links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLink {
    pub title: String,
    /// Page file name inside `songs/`
    pub page: String,
}

/// Render the song index as an ordered list of links.
pub fn render_index(links: &[IndexLink]) -> String {
    let mut html = String::from("<h2>Index</h2>\n");

    if links.is_empty() {
        html.push_str("<p class=\"empty\">No songs found.</p>\n");
        return html;
    }

    html.push_str("<ol>\n");
    for link in links {
        html.push_str(&format!(
            "  <li><a href=\"songs/{}\">{}</a></li>\n",
            urlencoding::encode(&link.page),
            escape_html(&link.title)
        ));
    }
    html.push_str("</ol>\n");

    html
}

/// Wrap rendered content in a standalone HTML document.
pub fn render_page(title: &str, content: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str("</head>\n<body>\n<main id=\"app\">\n");
    html.push_str(content);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn back_controls(back_link: Option<&str>) -> String {
    match back_link {
        Some(href) => format!(
            "<div class=\"controls\"><a class=\"back\" href=\"{}\">\u{2190} Back</a></div>\n",
            escape_html(href)
        ),
        None => String::new(),
    }
}
