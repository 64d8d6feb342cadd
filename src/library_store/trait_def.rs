//! Store trait definitions for the library entities.
//!
//! One store per entity, typed CRUD over the query gateway. A gateway error
//! always surfaces as `Err`; `Ok(None)` / an empty vector is reserved for
//! genuinely absent rows.

use super::models::{Artist, Playlist, Track};
use crate::error::StoreResult;

pub trait ArtistStore: Send + Sync {
    fn get(&self, id: &str) -> StoreResult<Option<Artist>>;
    fn insert(&self, id: &str, name: &str, cover_url: &str) -> StoreResult<()>;
    fn list(&self) -> StoreResult<Vec<Artist>>;
    fn delete(&self, id: &str) -> StoreResult<()>;
}

pub trait TrackStore: Send + Sync {
    fn get(&self, id: &str) -> StoreResult<Option<Track>>;
    fn get_by_youtube_id(&self, youtube_id: &str) -> StoreResult<Option<Track>>;
    fn get_by_artist_id(&self, artist_id: &str) -> StoreResult<Vec<Track>>;
    fn list(&self) -> StoreResult<Vec<Track>>;
    /// Inserts a new track. `fileUri` starts unset; the download subsystem
    /// fills it in later via [`TrackStore::set_file_uri`].
    fn insert(
        &self,
        id: &str,
        name: &str,
        cover_url: &str,
        youtube_id: &str,
        artist_id: &str,
    ) -> StoreResult<()>;
    fn set_file_uri(&self, id: &str, file_uri: Option<&str>) -> StoreResult<()>;
    fn delete(&self, id: &str) -> StoreResult<()>;
}

pub trait PlaylistStore: Send + Sync {
    /// Creates a playlist and returns its engine-assigned id.
    fn create(&self, name: &str) -> StoreResult<i64>;
    fn list(&self) -> StoreResult<Vec<Playlist>>;
    fn delete(&self, id: i64) -> StoreResult<()>;
    fn add_track(&self, playlist_id: i64, track_id: &str) -> StoreResult<()>;
    fn remove_track(&self, playlist_id: i64, track_id: &str) -> StoreResult<()>;
    fn list_tracks(&self, playlist_id: i64) -> StoreResult<Vec<Track>>;
}
