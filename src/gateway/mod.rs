mod query;
mod sqlite_gateway;

pub use query::{Query, SqlRow, StatementResult};
pub use sqlite_gateway::{AfterExecHook, GatewayConfig, SqliteGateway};
