//! Embedded persistence layer for the Mixtape music-library app.
//!
//! All SQL runs through a single query gateway over one SQLite connection;
//! per-entity stores build typed CRUD on top of it, and bootstrap creates
//! the schema (with per-table versioning) before any store is used.

pub mod error;
pub mod gateway;
pub mod library_store;
pub mod refresh;
pub mod schema;

mod library;

// Re-export commonly used types for convenience
pub use error::{StoreError, StoreResult};
pub use gateway::{GatewayConfig, Query, SqliteGateway};
pub use library::MusicLibrary;
pub use library_store::{
    Artist, ArtistStore, Playlist, PlaylistStore, SqliteArtistStore, SqlitePlaylistStore,
    SqliteTrackStore, Track, TrackArtist, TrackStore,
};
pub use refresh::RefreshSignal;
