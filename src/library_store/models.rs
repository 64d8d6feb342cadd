//! Domain records for the music library.
//!
//! JSON shapes are camelCase to match the records the mobile app works with.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub cover_url: String,
}

/// The artist sub-record embedded in a [`Track`].
///
/// A track always carries its `artistId`, but name and cover come from a
/// LEFT JOIN and are absent when the referenced artist row no longer exists
/// (e.g. a leftover written while foreign keys were off).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackArtist {
    pub id: String,
    pub name: Option<String>,
    pub cover_url: Option<String>,
}

/// A track with its artist embedded. This is a derived read-model, never
/// persisted as such: every read recomposes it from the joined row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    pub cover_url: String,
    pub youtube_id: String,
    /// Set once the download subsystem has stored a local copy.
    pub file_uri: Option<String>,
    pub artist: TrackArtist,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: i64,
    pub name: String,
}
