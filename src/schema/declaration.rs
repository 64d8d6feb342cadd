//! Static schema metadata, one declaration per persisted table.

use crate::gateway::Query;

/// Schema descriptor for one table: the declared version, the idempotent
/// creation DDL, and the ordered migrations that carry an older database
/// forward to that version.
pub struct TableDeclaration {
    pub name: &'static str,
    pub version: u32,
    /// DDL fragments, executed as one `CREATE TABLE IF NOT EXISTS`
    /// statement. Must be safe to re-run on every startup.
    pub create: &'static [&'static str],
    pub migrations: &'static [Migration],
}

/// One upgrade step sequence. `steps` are statements executed in order when
/// the persisted version is below `to_version`.
pub struct Migration {
    pub to_version: u32,
    pub steps: &'static [&'static [&'static str]],
}

impl TableDeclaration {
    pub fn create_query(&self) -> Query {
        Query::new(self.create)
    }
}
