//! Small inspection CLI for a library database file.
//!
//! Opens (or creates) the database, runs the schema bootstrap, and dumps the
//! requested entities as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mixtape_store::{ArtistStore, MusicLibrary, PlaylistStore, TrackStore};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite library database file.
    pub library_db: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all artists.
    Artists,
    /// List all tracks with their embedded artist.
    Tracks,
    /// List playlists, or the tracks of one playlist.
    Playlists {
        /// Show the tracks of this playlist instead.
        #[clap(long)]
        id: Option<i64>,
    },
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let library = MusicLibrary::open(&cli_args.library_db)
        .with_context(|| format!("Failed to open library at {:?}", cli_args.library_db))?;

    let output = match cli_args.command {
        Command::Artists => serde_json::to_string_pretty(&library.artists().list()?)?,
        Command::Tracks => serde_json::to_string_pretty(&library.tracks().list()?)?,
        Command::Playlists { id: Some(id) } => {
            serde_json::to_string_pretty(&library.playlists().list_tracks(id)?)?
        }
        Command::Playlists { id: None } => {
            serde_json::to_string_pretty(&library.playlists().list()?)?
        }
    };
    println!("{}", output);

    Ok(())
}
