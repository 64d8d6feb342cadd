//! Top-level handle over the library database.
//!
//! Opens the gateway, turns on foreign-key enforcement, creates the schema,
//! and hands out the entity stores. Everything below goes through the one
//! gateway; nothing else holds the connection.

use std::path::Path;
use std::sync::Arc;

use crate::error::StoreResult;
use crate::gateway::{GatewayConfig, SqliteGateway};
use crate::library_store::{SqliteArtistStore, SqlitePlaylistStore, SqliteTrackStore};
use crate::schema;

pub struct MusicLibrary {
    artists: SqliteArtistStore,
    tracks: SqliteTrackStore,
    playlists: SqlitePlaylistStore,
}

impl MusicLibrary {
    /// Open (creating if missing) the library database at `path` with
    /// default gateway behavior.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::open_with_config(path, GatewayConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(path: P, config: GatewayConfig) -> StoreResult<Self> {
        Self::bootstrap(SqliteGateway::open(path, config)?)
    }

    /// Open a private in-memory library (used by tests and previews).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::bootstrap(SqliteGateway::open_in_memory(GatewayConfig::default())?)
    }

    /// Wire the stores over an already-opened gateway, enabling foreign
    /// keys and creating the schema first. A failure here is fatal: without
    /// the tables, every later operation is invalid.
    pub fn bootstrap(gateway: SqliteGateway) -> StoreResult<Self> {
        let gateway = Arc::new(gateway);
        gateway.enable_foreign_keys()?;
        schema::create_tables(&gateway)?;
        Ok(MusicLibrary {
            artists: SqliteArtistStore::new(gateway.clone()),
            tracks: SqliteTrackStore::new(gateway.clone()),
            playlists: SqlitePlaylistStore::new(gateway),
        })
    }

    pub fn artists(&self) -> &SqliteArtistStore {
        &self.artists
    }

    pub fn tracks(&self) -> &SqliteTrackStore {
        &self.tracks
    }

    pub fn playlists(&self) -> &SqlitePlaylistStore {
        &self.playlists
    }
}
