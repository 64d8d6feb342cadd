//! SQLite-backed artist store.

use std::sync::Arc;

use super::models::Artist;
use super::trait_def::ArtistStore;
use crate::error::StoreResult;
use crate::gateway::{Query, SqlRow, SqliteGateway};
use crate::sql_args;

#[derive(Clone)]
pub struct SqliteArtistStore {
    gateway: Arc<SqliteGateway>,
}

impl SqliteArtistStore {
    pub fn new(gateway: Arc<SqliteGateway>) -> Self {
        SqliteArtistStore { gateway }
    }
}

fn parse_artist_row(row: &SqlRow) -> StoreResult<Artist> {
    Ok(Artist {
        id: row.get("id")?,
        name: row.get("name")?,
        cover_url: row.get("coverUrl")?,
    })
}

impl ArtistStore for SqliteArtistStore {
    fn get(&self, id: &str) -> StoreResult<Option<Artist>> {
        let result = self.gateway.exec(&Query::with_args(
            &["SELECT * FROM artists", "WHERE id = ?"],
            sql_args![id.to_string()],
        ))?;
        match result.rows.first() {
            Some(row) => Ok(Some(parse_artist_row(row)?)),
            None => Ok(None),
        }
    }

    fn insert(&self, id: &str, name: &str, cover_url: &str) -> StoreResult<()> {
        self.gateway.exec(&Query::with_args(
            &["INSERT INTO artists (id, name, coverUrl)", "VALUES (?,?,?)"],
            sql_args![id.to_string(), name.to_string(), cover_url.to_string()],
        ))?;
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<Artist>> {
        let result = self.gateway.exec(&Query::new(&["SELECT * FROM artists"]))?;
        result.rows.iter().map(parse_artist_row).collect()
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.gateway.exec(&Query::with_args(
            &["DELETE FROM artists WHERE id = ?"],
            sql_args![id.to_string()],
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayConfig;
    use crate::schema;

    fn create_test_store() -> SqliteArtistStore {
        let gateway = Arc::new(SqliteGateway::open_in_memory(GatewayConfig::default()).unwrap());
        gateway.enable_foreign_keys().unwrap();
        schema::create_tables(&gateway).unwrap();
        SqliteArtistStore::new(gateway)
    }

    #[test]
    fn insert_then_get_round_trips() {
        let store = create_test_store();
        store.insert("a1", "Band", "https://img/a1.png").unwrap();

        let artist = store.get("a1").unwrap().unwrap();
        assert_eq!(artist.name, "Band");
        assert_eq!(artist.cover_url, "https://img/a1.png");
    }

    #[test]
    fn get_missing_artist_is_none_not_error() {
        let store = create_test_store();
        assert!(store.get("nope").unwrap().is_none());
    }

    #[test]
    fn duplicate_id_is_a_constraint_violation() {
        let store = create_test_store();
        store.insert("a1", "Band", "u1").unwrap();

        let result = store.insert("a1", "Other", "u2");
        assert!(result.unwrap_err().is_constraint_violation());
    }

    #[test]
    fn list_and_delete() {
        let store = create_test_store();
        store.insert("a1", "Band", "u1").unwrap();
        store.insert("a2", "Solo", "u2").unwrap();
        assert_eq!(store.list().unwrap().len(), 2);

        store.delete("a1").unwrap();
        let remaining = store.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "a2");
    }
}
