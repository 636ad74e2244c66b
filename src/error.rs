//! # Error Types
//!
//! Errors raised by the layers around the parser.
//!
//! The parser itself never fails: malformed front-matter, unmatched chord
//! brackets and directives without a value all degrade to a best-effort
//! rendering. Errors only come from reading songs, manifests and configuration
//! files, and from serializing output.
//!
//! ## Usage
//! ```rust,no_run
//! use chordsheet::{SheetError, SongLibrary};
//!
//! let library = SongLibrary::new("songs");
//! match library.load_song("amazing-grace.md") {
//!     Ok(text) => println!("{}", chordsheet::parse(&text).lines.len()),
//!     Err(SheetError::SongNotFound(file)) => eprintln!("No such song: {}", file),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    /// I/O failure while reading a song or writing output.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The requested song file does not exist in the library.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::SongNotFound("missing.md".to_string());
    /// assert_eq!(err.to_string(), "Song not found: missing.md");
    /// ```
    #[error("Song not found: {0}")]
    SongNotFound(String),

    /// The song name would escape the library directory.
    #[error("Invalid song name: {0}")]
    InvalidSongName(String),

    /// The song list manifest could not be read or parsed.
    #[error("Invalid song manifest {path}: {message}")]
    ManifestError { path: PathBuf, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {message}")]
    ConfigWrite { path: PathBuf, message: String },

    /// Output serialization (JSON/YAML) failed.
    #[error("Serialization error: {0}")]
    Serialize(String),
}
