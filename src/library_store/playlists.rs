//! SQLite-backed playlist store, including the playlist/track association
//! table.

use std::sync::Arc;

use super::models::{Playlist, Track};
use super::tracks::compose_track;
use super::trait_def::PlaylistStore;
use crate::error::{StoreError, StoreResult};
use crate::gateway::{Query, SqlRow, SqliteGateway};
use crate::sql_args;

#[derive(Clone)]
pub struct SqlitePlaylistStore {
    gateway: Arc<SqliteGateway>,
}

impl SqlitePlaylistStore {
    pub fn new(gateway: Arc<SqliteGateway>) -> Self {
        SqlitePlaylistStore { gateway }
    }
}

fn parse_playlist_row(row: &SqlRow) -> StoreResult<Playlist> {
    Ok(Playlist {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

impl PlaylistStore for SqlitePlaylistStore {
    fn create(&self, name: &str) -> StoreResult<i64> {
        let result = self.gateway.exec(&Query::with_args(
            &["INSERT INTO playlists (name) VALUES (?)"],
            sql_args![name.to_string()],
        ))?;
        result.last_insert_id.ok_or(StoreError::MissingResult)
    }

    fn list(&self) -> StoreResult<Vec<Playlist>> {
        let result = self.gateway.exec(&Query::new(&["SELECT * FROM playlists"]))?;
        result.rows.iter().map(parse_playlist_row).collect()
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.gateway.exec(&Query::with_args(
            &["DELETE FROM playlists WHERE id = ?"],
            sql_args![id],
        ))?;
        Ok(())
    }

    fn add_track(&self, playlist_id: i64, track_id: &str) -> StoreResult<()> {
        self.gateway.exec(&Query::with_args(
            &[
                "INSERT INTO playlists_musics (playlistId, musicId)",
                "VALUES (?,?)",
            ],
            sql_args![playlist_id, track_id.to_string()],
        ))?;
        Ok(())
    }

    fn remove_track(&self, playlist_id: i64, track_id: &str) -> StoreResult<()> {
        self.gateway.exec(&Query::with_args(
            &[
                "DELETE FROM playlists_musics",
                "WHERE playlistId = ? AND musicId = ?",
            ],
            sql_args![playlist_id, track_id.to_string()],
        ))?;
        Ok(())
    }

    fn list_tracks(&self, playlist_id: i64) -> StoreResult<Vec<Track>> {
        // Same join and composition as the track store's own reads, reached
        // through the association table.
        let result = self.gateway.exec(&Query::with_args(
            &[
                "SELECT musics.*,",
                "artists.name AS artistName,",
                "artists.coverUrl AS artistCoverUrl",
                "FROM playlists_musics",
                "INNER JOIN musics ON playlists_musics.musicId = musics.id",
                "LEFT JOIN artists ON musics.artistId = artists.id",
                "WHERE playlists_musics.playlistId = ?",
            ],
            sql_args![playlist_id],
        ))?;
        result.rows.iter().map(compose_track).collect()
    }
}
