//! SQLite-backed track store.
//!
//! Every read path runs the same LEFT JOIN against artists and the same
//! composition step, so a schema or alias change is a one-place edit.

use std::sync::Arc;

use super::models::{Track, TrackArtist};
use super::trait_def::TrackStore;
use crate::error::StoreResult;
use crate::gateway::{Query, SqlRow, SqliteGateway};
use crate::sql_args;

/// Shared SELECT head: track columns plus the artist's name and cover,
/// aliased to avoid colliding with the track's own columns.
pub(super) const TRACK_JOIN_SELECT: &[&str] = &[
    "SELECT musics.*,",
    "artists.name AS artistName,",
    "artists.coverUrl AS artistCoverUrl",
    "FROM musics LEFT JOIN artists",
    "ON musics.artistId = artists.id",
];

/// Restructures one denormalized joined row into a [`Track`] with its
/// artist embedded. Runs on every row of every read path; when the artist
/// row is gone the aliased columns are NULL and surface as `None`.
pub(super) fn compose_track(row: &SqlRow) -> StoreResult<Track> {
    Ok(Track {
        id: row.get("id")?,
        name: row.get("name")?,
        cover_url: row.get("coverUrl")?,
        youtube_id: row.get("youtubeId")?,
        file_uri: row.get("fileUri")?,
        artist: TrackArtist {
            id: row.get("artistId")?,
            name: row.get("artistName")?,
            cover_url: row.get("artistCoverUrl")?,
        },
    })
}

#[derive(Clone)]
pub struct SqliteTrackStore {
    gateway: Arc<SqliteGateway>,
}

impl SqliteTrackStore {
    pub fn new(gateway: Arc<SqliteGateway>) -> Self {
        SqliteTrackStore { gateway }
    }

    fn get_one(&self, where_clause: &str, arg: &str) -> StoreResult<Option<Track>> {
        let sql: Vec<&str> = TRACK_JOIN_SELECT
            .iter()
            .copied()
            .chain(std::iter::once(where_clause))
            .collect();
        let result = self
            .gateway
            .exec(&Query::with_args(&sql, sql_args![arg.to_string()]))?;
        match result.rows.first() {
            Some(row) => Ok(Some(compose_track(row)?)),
            None => Ok(None),
        }
    }
}

impl TrackStore for SqliteTrackStore {
    fn get(&self, id: &str) -> StoreResult<Option<Track>> {
        self.get_one("WHERE musics.id = ?", id)
    }

    fn get_by_youtube_id(&self, youtube_id: &str) -> StoreResult<Option<Track>> {
        self.get_one("WHERE musics.youtubeId = ?", youtube_id)
    }

    fn get_by_artist_id(&self, artist_id: &str) -> StoreResult<Vec<Track>> {
        let sql: Vec<&str> = TRACK_JOIN_SELECT
            .iter()
            .copied()
            .chain(std::iter::once("WHERE musics.artistId = ?"))
            .collect();
        let result = self
            .gateway
            .exec(&Query::with_args(&sql, sql_args![artist_id.to_string()]))?;
        result.rows.iter().map(compose_track).collect()
    }

    fn list(&self) -> StoreResult<Vec<Track>> {
        let result = self.gateway.exec(&Query::new(TRACK_JOIN_SELECT))?;
        result.rows.iter().map(compose_track).collect()
    }

    fn insert(
        &self,
        id: &str,
        name: &str,
        cover_url: &str,
        youtube_id: &str,
        artist_id: &str,
    ) -> StoreResult<()> {
        self.gateway.exec(&Query::with_args(
            &[
                "INSERT INTO musics (id, name, coverUrl, youtubeId, artistId)",
                "VALUES (?,?,?,?,?)",
            ],
            sql_args![
                id.to_string(),
                name.to_string(),
                cover_url.to_string(),
                youtube_id.to_string(),
                artist_id.to_string()
            ],
        ))?;
        Ok(())
    }

    fn set_file_uri(&self, id: &str, file_uri: Option<&str>) -> StoreResult<()> {
        self.gateway.exec(&Query::with_args(
            &["UPDATE musics SET fileUri = ?", "WHERE id = ?"],
            sql_args![
                file_uri.map(|uri| uri.to_string()),
                id.to_string()
            ],
        ))?;
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.gateway.exec(&Query::with_args(
            &["DELETE FROM musics", "WHERE musics.id = ?"],
            sql_args![id.to_string()],
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayConfig;
    use crate::library_store::{ArtistStore, SqliteArtistStore};
    use crate::schema;

    fn create_test_stores(foreign_keys: bool) -> (SqliteArtistStore, SqliteTrackStore) {
        let gateway = Arc::new(SqliteGateway::open_in_memory(GatewayConfig::default()).unwrap());
        if foreign_keys {
            gateway.enable_foreign_keys().unwrap();
        }
        schema::create_tables(&gateway).unwrap();
        (
            SqliteArtistStore::new(gateway.clone()),
            SqliteTrackStore::new(gateway),
        )
    }

    fn seed(artists: &SqliteArtistStore, tracks: &SqliteTrackStore) {
        artists.insert("a1", "Band", "u1").unwrap();
        tracks.insert("m1", "Song", "u2", "yt1", "a1").unwrap();
    }

    #[test]
    fn every_read_path_embeds_the_same_artist() {
        let (artists, tracks) = create_test_stores(true);
        seed(&artists, &tracks);

        let expected_artist = TrackArtist {
            id: "a1".to_string(),
            name: Some("Band".to_string()),
            cover_url: Some("u1".to_string()),
        };

        assert_eq!(tracks.get("m1").unwrap().unwrap().artist, expected_artist);
        assert_eq!(
            tracks.get_by_youtube_id("yt1").unwrap().unwrap().artist,
            expected_artist
        );
        assert_eq!(tracks.get_by_artist_id("a1").unwrap()[0].artist, expected_artist);
        assert_eq!(tracks.list().unwrap()[0].artist, expected_artist);
    }

    #[test]
    fn get_missing_track_is_none_not_error() {
        let (_, tracks) = create_test_stores(true);
        assert!(tracks.get("nope").unwrap().is_none());
        assert!(tracks.get_by_youtube_id("nope").unwrap().is_none());
        assert!(tracks.get_by_artist_id("nope").unwrap().is_empty());
    }

    #[test]
    fn insert_with_unknown_artist_violates_foreign_key() {
        let (_, tracks) = create_test_stores(true);
        let result = tracks.insert("m1", "Song", "u2", "yt1", "ghost");
        assert!(result.unwrap_err().is_constraint_violation());
    }

    #[test]
    fn deleting_the_artist_cascades_to_tracks() {
        let (artists, tracks) = create_test_stores(true);
        seed(&artists, &tracks);

        artists.delete("a1").unwrap();
        assert!(tracks.get("m1").unwrap().is_none());
    }

    #[test]
    fn file_uri_starts_unset_and_is_updated_separately() {
        let (artists, tracks) = create_test_stores(true);
        seed(&artists, &tracks);

        assert_eq!(tracks.get("m1").unwrap().unwrap().file_uri, None);

        tracks.set_file_uri("m1", Some("file:///music/m1.mp3")).unwrap();
        assert_eq!(
            tracks.get("m1").unwrap().unwrap().file_uri,
            Some("file:///music/m1.mp3".to_string())
        );

        tracks.set_file_uri("m1", None).unwrap();
        assert_eq!(tracks.get("m1").unwrap().unwrap().file_uri, None);
    }

    #[test]
    fn composition_survives_a_missing_artist_row() {
        // With enforcement off, a track can reference an artist that never
        // existed; the joined columns come back NULL and the composed
        // record carries an empty artist instead of failing.
        let (_, tracks) = create_test_stores(false);
        tracks.insert("m1", "Song", "u2", "yt1", "ghost").unwrap();

        let track = tracks.get("m1").unwrap().unwrap();
        assert_eq!(track.artist.id, "ghost");
        assert_eq!(track.artist.name, None);
        assert_eq!(track.artist.cover_url, None);
    }
}
