//! Table declarations for the music library database.
//!
//! Column names are camelCase to match the records the mobile app passes
//! across the bridge.

use super::declaration::TableDeclaration;

pub const ARTISTS_TABLE: TableDeclaration = TableDeclaration {
    name: "artists",
    version: 1,
    create: &[
        "CREATE TABLE IF NOT EXISTS artists (",
        "id TEXT PRIMARY KEY NOT NULL UNIQUE,",
        "name TEXT NOT NULL,",
        "coverUrl TEXT NOT NULL)",
    ],
    migrations: &[],
};

pub const MUSICS_TABLE: TableDeclaration = TableDeclaration {
    name: "musics",
    version: 1,
    create: &[
        "CREATE TABLE IF NOT EXISTS musics (",
        "id TEXT PRIMARY KEY NOT NULL UNIQUE,",
        "name TEXT NOT NULL,",
        "coverUrl TEXT NOT NULL,",
        "youtubeId TEXT NOT NULL,",
        "fileUri TEXT,",
        "artistId TEXT NOT NULL,",
        "FOREIGN KEY(artistId) REFERENCES artists(id) ON DELETE CASCADE ON UPDATE CASCADE)",
    ],
    migrations: &[],
};

pub const PLAYLISTS_TABLE: TableDeclaration = TableDeclaration {
    name: "playlists",
    version: 1,
    create: &[
        "CREATE TABLE IF NOT EXISTS playlists (",
        "id INTEGER PRIMARY KEY AUTOINCREMENT,",
        "name TEXT NOT NULL)",
    ],
    migrations: &[],
};

pub const PLAYLISTS_MUSICS_TABLE: TableDeclaration = TableDeclaration {
    name: "playlists_musics",
    version: 1,
    create: &[
        "CREATE TABLE IF NOT EXISTS playlists_musics (",
        "playlistId INTEGER NOT NULL,",
        "musicId TEXT NOT NULL,",
        "FOREIGN KEY(playlistId) REFERENCES playlists(id) ON DELETE CASCADE ON UPDATE CASCADE,",
        "FOREIGN KEY(musicId) REFERENCES musics(id) ON DELETE CASCADE ON UPDATE CASCADE)",
    ],
    migrations: &[],
};

/// Bookkeeping table for the applied schema version of each library table.
pub(crate) const SCHEMA_VERSIONS_TABLE: TableDeclaration = TableDeclaration {
    name: "schema_versions",
    version: 1,
    create: &[
        "CREATE TABLE IF NOT EXISTS schema_versions (",
        "tableName TEXT PRIMARY KEY NOT NULL,",
        "version INTEGER NOT NULL)",
    ],
    migrations: &[],
};

/// All library tables in creation order. The order is load-bearing: musics
/// declares a foreign key to artists, and playlists_musics declares foreign
/// keys to both playlists and musics, so each table must come after every
/// table it references.
pub const LIBRARY_TABLES: &[&TableDeclaration] = &[
    &ARTISTS_TABLE,
    &MUSICS_TABLE,
    &PLAYLISTS_TABLE,
    &PLAYLISTS_MUSICS_TABLE,
];
