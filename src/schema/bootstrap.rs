//! Schema creation and migration at startup.
//!
//! Every library table records its applied version in the `schema_versions`
//! table. On bootstrap the persisted version is compared against the
//! declared one and migrations are applied in order. Any failure here is
//! fatal to startup: a missing table invalidates every later operation, so
//! errors propagate instead of being swallowed.

use tracing::info;

use super::declaration::TableDeclaration;
use super::tables::{LIBRARY_TABLES, SCHEMA_VERSIONS_TABLE};
use crate::error::{StoreError, StoreResult};
use crate::gateway::{Query, SqliteGateway};
use crate::sql_args;

/// Create or migrate every library table, in dependency order.
///
/// Safe to run on every startup: creation DDL is idempotent and tables
/// already at their declared version are left untouched.
pub fn create_tables(gateway: &SqliteGateway) -> StoreResult<()> {
    gateway.exec(&SCHEMA_VERSIONS_TABLE.create_query())?;
    for table in LIBRARY_TABLES {
        ensure_table(gateway, table)?;
    }
    Ok(())
}

pub(crate) fn ensure_table(gateway: &SqliteGateway, table: &TableDeclaration) -> StoreResult<()> {
    match persisted_version(gateway, table.name)? {
        None => {
            // Fresh database: create at the declared version directly.
            gateway.exec_batch(&[
                table.create_query(),
                Query::with_args(
                    &[
                        "INSERT INTO schema_versions (tableName, version)",
                        "VALUES (?, ?)",
                    ],
                    sql_args![table.name.to_string(), i64::from(table.version)],
                ),
            ])?;
            info!("Created table {} at version {}", table.name, table.version);
        }
        Some(found) if found > table.version => {
            return Err(StoreError::SchemaTooNew {
                table: table.name.to_string(),
                found,
                supported: table.version,
            });
        }
        Some(found) if found == table.version => {
            // Re-run the idempotent creation DDL; a no-op when the table
            // is present.
            gateway.exec(&table.create_query())?;
        }
        Some(found) => {
            apply_migrations(gateway, table, found)?;
        }
    }
    Ok(())
}

fn apply_migrations(
    gateway: &SqliteGateway,
    table: &TableDeclaration,
    from_version: u32,
) -> StoreResult<()> {
    let mut queries: Vec<Query> = Vec::new();
    for migration in table
        .migrations
        .iter()
        .filter(|migration| migration.to_version > from_version)
    {
        for step in migration.steps {
            queries.push(Query::new(step));
        }
    }
    queries.push(Query::with_args(
        &["UPDATE schema_versions SET version = ?", "WHERE tableName = ?"],
        sql_args![i64::from(table.version), table.name.to_string()],
    ));
    gateway.exec_batch(&queries)?;
    info!(
        "Migrated table {} from version {} to {}",
        table.name, from_version, table.version
    );
    Ok(())
}

fn persisted_version(gateway: &SqliteGateway, table_name: &str) -> StoreResult<Option<u32>> {
    let result = gateway.exec(&Query::with_args(
        &["SELECT version FROM schema_versions", "WHERE tableName = ?"],
        sql_args![table_name.to_string()],
    ))?;
    match result.rows.first() {
        Some(row) => Ok(Some(row.get("version")?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayConfig;
    use crate::schema::Migration;

    fn test_gateway() -> SqliteGateway {
        let gateway = SqliteGateway::open_in_memory(GatewayConfig::default()).unwrap();
        gateway.enable_foreign_keys().unwrap();
        gateway
    }

    fn table_columns(gateway: &SqliteGateway, table: &str) -> Vec<String> {
        let result = gateway
            .exec(&Query::new(&[&format!("PRAGMA table_info({})", table)]))
            .unwrap();
        result
            .rows
            .iter()
            .map(|row| row.get::<String>("name").unwrap())
            .collect()
    }

    #[test]
    fn creates_all_library_tables() {
        let gateway = test_gateway();
        create_tables(&gateway).unwrap();

        for table in LIBRARY_TABLES {
            assert!(
                !table_columns(&gateway, table.name).is_empty(),
                "table {} was not created",
                table.name
            );
        }
        assert_eq!(
            table_columns(&gateway, "musics"),
            vec!["id", "name", "coverUrl", "youtubeId", "fileUri", "artistId"]
        );
    }

    #[test]
    fn bootstrap_is_idempotent() {
        let gateway = test_gateway();
        create_tables(&gateway).unwrap();

        gateway
            .exec(&Query::with_args(
                &["INSERT INTO artists (id, name, coverUrl)", "VALUES (?,?,?)"],
                sql_args!["a1".to_string(), "Band".to_string(), "u1".to_string()],
            ))
            .unwrap();

        create_tables(&gateway).unwrap();

        let result = gateway
            .exec(&Query::new(&["SELECT COUNT(*) AS n FROM artists"]))
            .unwrap();
        assert_eq!(result.rows[0].get::<i64>("n").unwrap(), 1);
    }

    const NOTES_V1: TableDeclaration = TableDeclaration {
        name: "notes",
        version: 1,
        create: &[
            "CREATE TABLE IF NOT EXISTS notes (",
            "id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "body TEXT NOT NULL)",
        ],
        migrations: &[],
    };

    const NOTES_V2: TableDeclaration = TableDeclaration {
        name: "notes",
        version: 2,
        create: &[
            "CREATE TABLE IF NOT EXISTS notes (",
            "id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "body TEXT NOT NULL,",
            "pinned INTEGER NOT NULL DEFAULT 0)",
        ],
        migrations: &[Migration {
            to_version: 2,
            steps: &[&["ALTER TABLE notes ADD COLUMN pinned INTEGER NOT NULL DEFAULT 0"]],
        }],
    };

    #[test]
    fn migrations_carry_an_older_table_forward() {
        let gateway = test_gateway();
        gateway.exec(&SCHEMA_VERSIONS_TABLE.create_query()).unwrap();

        ensure_table(&gateway, &NOTES_V1).unwrap();
        gateway
            .exec(&Query::with_args(
                &["INSERT INTO notes (body) VALUES (?)"],
                sql_args!["keep me".to_string()],
            ))
            .unwrap();

        ensure_table(&gateway, &NOTES_V2).unwrap();

        assert_eq!(table_columns(&gateway, "notes"), vec!["id", "body", "pinned"]);
        assert_eq!(persisted_version(&gateway, "notes").unwrap(), Some(2));

        // Existing rows survive the upgrade.
        let result = gateway
            .exec(&Query::new(&["SELECT body, pinned FROM notes"]))
            .unwrap();
        assert_eq!(result.rows[0].get::<String>("body").unwrap(), "keep me");
        assert_eq!(result.rows[0].get::<i64>("pinned").unwrap(), 0);
    }

    #[test]
    fn newer_database_than_build_is_rejected() {
        let gateway = test_gateway();
        gateway.exec(&SCHEMA_VERSIONS_TABLE.create_query()).unwrap();

        ensure_table(&gateway, &NOTES_V2).unwrap();

        let result = ensure_table(&gateway, &NOTES_V1);
        assert!(matches!(
            result,
            Err(StoreError::SchemaTooNew {
                found: 2,
                supported: 1,
                ..
            })
        ));
    }
}
