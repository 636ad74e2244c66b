//! Static site generation: an index page plus one page per library song.
//!
//! Pages are named after the song file's stem (`amazing-grace.md` becomes
//! `songs/amazing-grace.html`). When two songs share a stem, both use their
//! full file name instead (`amazing.md.html`, `amazing.cho.html`), so no page
//! overwrites another.

use crate::error::SheetError;
use crate::html::{render_index, render_not_found, render_page, render_song, IndexLink, RenderOptions};
use crate::library::{SongEntry, SongLibrary};
use crate::parser::parse;
use log::{error, info};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory inside the output holding song pages
pub const SONGS_DIR: &str = "songs";

/// One generated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePage {
    /// Path relative to the output directory
    pub path: PathBuf,
    pub html: String,
}

fn file_stem(file: &str) -> &str {
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    }
}

/// Page file names for `songs`, in the same order and all distinct.
pub fn song_page_names(songs: &[SongEntry]) -> Vec<String> {
    let mut stem_counts: HashMap<&str, usize> = HashMap::new();
    for song in songs {
        *stem_counts.entry(file_stem(&song.file)).or_default() += 1;
    }

    let mut used = HashSet::new();
    songs
        .iter()
        .map(|song| {
            let stem = file_stem(&song.file);
            let base = if stem_counts[stem] > 1 { song.file.as_str() } else { stem };

            let mut name = format!("{}.html", base);
            let mut n = 2;
            while !used.insert(name.clone()) {
                name = format!("{}-{}.html", base, n);
                n += 1;
            }
            name
        })
        .collect()
}

/// Render the index and every song of `library`.
///
/// The index comes first. A song that cannot be loaded gets the not-found
/// page and an error log line; the build carries on.
pub fn build_site(library: &SongLibrary, options: &RenderOptions) -> Vec<SitePage> {
    let songs = library.list_songs();
    let page_names = song_page_names(&songs);
    let options = RenderOptions {
        back_link: Some("../index.html".to_string()),
        ..options.clone()
    };

    let links: Vec<IndexLink> = songs
        .iter()
        .zip(&page_names)
        .map(|(song, page)| IndexLink {
            title: song.display_title(),
            page: page.clone(),
        })
        .collect();

    let mut pages = vec![SitePage {
        path: PathBuf::from("index.html"),
        html: render_page("Songs", &render_index(&links)),
    }];

    for (song, page) in songs.iter().zip(page_names) {
        let content = match library.load_song(&song.file) {
            Ok(source) => render_song(&parse(&source), &options),
            Err(e) => {
                error!("Failed to load song {}: {}", song.file, e);
                render_not_found(&song.file, options.back_link.as_deref())
            }
        };
        pages.push(SitePage {
            path: Path::new(SONGS_DIR).join(page),
            html: render_page(&song.display_title(), &content),
        });
    }

    info!(
        "Rendered {} songs from {}",
        songs.len(),
        library.songs_dir().display()
    );
    pages
}

/// Write `pages` under `out_dir`, creating directories as needed.
pub fn write_site(pages: &[SitePage], out_dir: &Path) -> Result<(), SheetError> {
    for page in pages {
        let path = out_dir.join(&page.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SheetError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &page.html).map_err(|source| SheetError::Io { path, source })?;
    }
    Ok(())
}
