//! Configuration file and the persisted "show chords" preference.
//!
//! ```toml
//! songs_path = "songs"
//! songs_list = "songs.json"
//! show_chords = true
//! ```

use crate::error::SheetError;
use crate::html::RenderOptions;
use crate::library::SongLibrary;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "chordsheet.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the song files
    pub songs_path: PathBuf,
    /// Optional `songs.json` manifest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs_list: Option<PathBuf>,
    /// Persisted chord display preference
    pub show_chords: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            songs_path: PathBuf::from("songs"),
            songs_list: None,
            show_chords: false,
        }
    }
}

impl Config {
    /// Load the config; `Ok(None)` when the file does not exist.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, SheetError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(config_path).map_err(|source| SheetError::ConfigRead {
            path: config_path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| SheetError::ConfigParse {
            path: config_path.to_path_buf(),
            source,
        })?;

        debug!("Loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    /// Load the config, falling back to defaults when the file is missing.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, SheetError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> Result<(), SheetError> {
        let config_path = config_path.as_ref();
        let write_error = |message: String| SheetError::ConfigWrite {
            path: config_path.to_path_buf(),
            message,
        };

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        fs::write(config_path, content).map_err(|e| write_error(e.to_string()))?;

        debug!("Saved config to {}", config_path.display());
        Ok(())
    }

    pub fn library(&self) -> SongLibrary {
        let library = SongLibrary::new(&self.songs_path);
        match &self.songs_list {
            Some(manifest) => library.with_manifest(manifest),
            None => library,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_chords: self.show_chords,
            ..RenderOptions::default()
        }
    }
}
