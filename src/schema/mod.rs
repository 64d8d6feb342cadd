mod bootstrap;
mod declaration;
mod tables;

pub use bootstrap::create_tables;
pub use declaration::{Migration, TableDeclaration};
pub use tables::{
    ARTISTS_TABLE, LIBRARY_TABLES, MUSICS_TABLE, PLAYLISTS_MUSICS_TABLE, PLAYLISTS_TABLE,
};
