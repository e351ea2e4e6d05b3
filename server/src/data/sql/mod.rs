//! SQL abstraction layer for multi-database support
//!
//! Queries are assembled once as backend-neutral [`SelectQuery`] values with
//! `?` markers, then rendered through a [`SqlDialect`] for SQLite or
//! PostgreSQL.

mod dialect;
mod postgres_dialect;
mod query;
mod sqlite_dialect;

pub use dialect::SqlDialect;
pub use postgres_dialect::PostgresDialect;
pub use query::{Join, Predicate, SelectQuery, SqlArg};
pub use sqlite_dialect::SqliteDialect;
