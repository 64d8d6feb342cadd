mod artists;
mod models;
mod playlists;
mod tracks;
mod trait_def;

pub use artists::SqliteArtistStore;
pub use models::{Artist, Playlist, Track, TrackArtist};
pub use playlists::SqlitePlaylistStore;
pub use tracks::SqliteTrackStore;
pub use trait_def::{ArtistStore, PlaylistStore, TrackStore};
