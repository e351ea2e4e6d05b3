//! SQLite error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_failed_error_display() {
        let err = SqliteError::MigrationFailed {
            version: 2,
            name: "future_schema".to_string(),
            error: "database is newer than this build".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Migration 2 (future_schema) failed: database is newer than this build"
        );
    }

    #[test]
    fn test_database_error_from() {
        let err: SqliteError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, SqliteError::Database(_)));
    }
}
