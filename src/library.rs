//! Song library: the list of available songs and their raw text.
//!
//! Songs live as files in one directory. The list comes from a `songs.json`
//! manifest when one is configured and readable, otherwise from scanning the
//! directory for files with a song extension. Listing never fails; problems are
//! logged and the next source is tried.

use crate::error::SheetError;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions treated as songs (compared case-insensitively)
pub const SONG_EXTENSIONS: &[&str] = &["md", "cho", "chopro", "chordpro"];

static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").unwrap());

/// One song in the library, in the shape used by `songs.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongEntry {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SongEntry {
    pub fn new(file: impl Into<String>, title: Option<String>) -> Self {
        Self {
            file: file.into(),
            title,
        }
    }

    fn sort_key(&self) -> (String, String) {
        let label = match &self.title {
            Some(title) if !title.is_empty() => title,
            _ => &self.file,
        };
        (label.to_lowercase(), label.clone())
    }

    /// The explicit title, or one derived from the file name.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => title_from_name(&self.file),
        }
    }
}

/// Derive a display title from a file name.
///
/// # Example
/// ```
/// use chordsheet::title_from_name;
///
/// assert_eq!(title_from_name("amazing_grace-live.md"), "Amazing Grace Live");
/// ```
pub fn title_from_name(name: &str) -> String {
    let spaced = strip_song_extension(name).replace(|c: char| c == '-' || c == '_', " ");
    WORD_START
        .replace_all(&spaced, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

fn strip_song_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if is_song_extension(ext) => stem,
        _ => name,
    }
}

fn is_song_extension(ext: &str) -> bool {
    SONG_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext))
}

/// Read a `songs.json` manifest.
pub fn read_manifest(path: &Path) -> Result<Vec<SongEntry>, SheetError> {
    let content = fs::read_to_string(path).map_err(|e| SheetError::ManifestError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| SheetError::ManifestError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// A directory of songs with an optional manifest.
#[derive(Debug, Clone)]
pub struct SongLibrary {
    songs_dir: PathBuf,
    manifest: Option<PathBuf>,
}

impl SongLibrary {
    pub fn new(songs_dir: impl Into<PathBuf>) -> Self {
        Self {
            songs_dir: songs_dir.into(),
            manifest: None,
        }
    }

    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest = Some(manifest.into());
        self
    }

    pub fn songs_dir(&self) -> &Path {
        &self.songs_dir
    }

    /// All songs: manifest first, then a directory scan, then an empty list.
    ///
    /// Sorted case-insensitively on the explicit title, or on the file name
    /// for entries without one (not on the derived display title).
    pub fn list_songs(&self) -> Vec<SongEntry> {
        let mut songs = match &self.manifest {
            Some(path) => match read_manifest(path) {
                Ok(songs) => {
                    debug!("Loaded {} songs from {}", songs.len(), path.display());
                    songs
                }
                Err(e) => {
                    warn!("{}; scanning {} instead", e, self.songs_dir.display());
                    self.scan_or_empty()
                }
            },
            None => self.scan_or_empty(),
        };

        songs.sort_by_cached_key(|song| song.sort_key());
        songs
    }

    fn scan_or_empty(&self) -> Vec<SongEntry> {
        self.scan_directory().unwrap_or_else(|e| {
            warn!("Failed to scan song directory: {}", e);
            Vec::new()
        })
    }

    /// List song files directly inside the songs directory.
    pub fn scan_directory(&self) -> Result<Vec<SongEntry>, SheetError> {
        let mut songs = Vec::new();

        for entry in WalkDir::new(&self.songs_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| SheetError::Io {
                path: self.songs_dir.clone(),
                source: io::Error::from(e),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_song = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, is_song_extension);
            if !is_song {
                continue;
            }
            let file = entry.file_name().to_string_lossy().into_owned();
            let title = Some(title_from_name(&file));
            songs.push(SongEntry { file, title });
        }

        debug!("Found {} songs in {}", songs.len(), self.songs_dir.display());
        Ok(songs)
    }

    /// Read the raw text of one song.
    pub fn load_song(&self, file: &str) -> Result<String, SheetError> {
        if file.is_empty() || file == "." || file == ".." || file.contains(['/', '\\']) {
            return Err(SheetError::InvalidSongName(file.to_string()));
        }

        let path = self.songs_dir.join(file);
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!("Loaded song {} ({} bytes)", path.display(), text.len());
                Ok(text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(SheetError::SongNotFound(file.to_string()))
            }
            Err(source) => Err(SheetError::Io { path, source }),
        }
    }
}
