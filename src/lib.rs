pub mod ast;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod html;
pub mod inline;
pub mod library;
pub mod parser;
pub mod site;

pub use ast::*;
pub use config::Config;
pub use error::*;
pub use frontmatter::{extract_front_matter, FrontMatter};
pub use html::{render_song, RenderOptions};
pub use inline::{escape_html, render_inline};
pub use library::{title_from_name, SongEntry, SongLibrary};
pub use parser::parse;

/// Parse a song and render its HTML song view.
/// This is the main entry point for the library.
pub fn render(source: &str, options: &RenderOptions) -> String {
    render_song(&parse(source), options)
}

/// Parse a song and serialize the result as pretty-printed JSON.
pub fn to_json(source: &str) -> Result<String, SheetError> {
    serde_json::to_string_pretty(&parse(source)).map_err(|e| SheetError::Serialize(e.to_string()))
}

/// Parse a song and serialize the result as YAML.
pub fn to_yaml(source: &str) -> Result<String, SheetError> {
    serde_yaml::to_string(&parse(source)).map_err(|e| SheetError::Serialize(e.to_string()))
}
