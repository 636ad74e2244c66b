use chordsheet::config::DEFAULT_CONFIG_FILE;
use chordsheet::html::render_page;
use chordsheet::site::{build_site, write_site};
use chordsheet::{Config, SheetError};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "chordsheet", version, about = "Render chord-annotated song lyric sheets")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the parsed structure of a song
    Parse {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Render a song to an HTML page
    Render {
        file: PathBuf,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Show chords regardless of the saved preference
        #[arg(long, conflicts_with = "no_chords")]
        chords: bool,
        /// Hide chords regardless of the saved preference
        #[arg(long)]
        no_chords: bool,
    },
    /// List the songs in the library
    List,
    /// Render the index and every song of the library into a directory
    Build { out_dir: PathBuf },
    /// Save the chord display preference
    Chords { state: Toggle },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SheetError> {
    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Command::Parse { file, format } => {
            let source = read_file(&file)?;
            let output = match format {
                Format::Json => chordsheet::to_json(&source)?,
                Format::Yaml => chordsheet::to_yaml(&source)?,
            };
            println!("{}", output);
        }
        Command::Render {
            file,
            output,
            chords,
            no_chords,
        } => {
            let source = read_file(&file)?;
            let mut options = config.render_options();
            if chords {
                options.show_chords = true;
            } else if no_chords {
                options.show_chords = false;
            }

            let result = chordsheet::parse(&source);
            let title = result
                .metadata
                .title()
                .map(str::to_string)
                .unwrap_or_else(|| file_title(&file));
            let page = render_page(&title, &chordsheet::render_song(&result, &options));

            match output {
                Some(path) => {
                    write_file(&path, &page)?;
                    eprintln!("Wrote {}", path.display());
                }
                None => print!("{}", page),
            }
        }
        Command::List => {
            for song in config.library().list_songs() {
                println!("{}\t{}", song.display_title(), song.file);
            }
        }
        Command::Build { out_dir } => {
            let pages = build_site(&config.library(), &config.render_options());
            write_site(&pages, &out_dir)?;
            info!("Wrote {} pages into {}", pages.len(), out_dir.display());
            eprintln!("Wrote {} songs to {}", pages.len() - 1, out_dir.display());
        }
        Command::Chords { state } => {
            let mut config = config;
            config.show_chords = matches!(state, Toggle::On);
            config.save_to_path(&cli.config)?;
            println!(
                "Chords {}",
                if config.show_chords { "on" } else { "off" }
            );
        }
    }

    Ok(())
}

fn file_title(path: &Path) -> String {
    path.file_name()
        .map(|name| chordsheet::title_from_name(&name.to_string_lossy()))
        .unwrap_or_default()
}

fn read_file(path: &Path) -> Result<String, SheetError> {
    fs::read_to_string(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), SheetError> {
    fs::write(path, content).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })
}
