//! User repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{UserRow, UserTuple};

/// Create a user with an already-hashed password
///
/// A taken username yields [`SqliteError::Conflict`].
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: &str,
) -> Result<UserRow, SqliteError> {
    let result = sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO "user" (username, password, role) VALUES (?, ?, ?) RETURNING id"#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await;

    let id = match result {
        Ok(id) => id,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(SqliteError::Conflict(format!(
                "username '{}' already exists",
                username
            )));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(UserRow {
        id,
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        role: role.to_string(),
    })
}

/// Look up a user by exact username
pub async fn get_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserRow>, SqliteError> {
    let row: Option<UserTuple> =
        sqlx::query_as(r#"SELECT id, username, password, role FROM "user" WHERE username = ?"#)
            .bind(username)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(UserRow::from))
}
