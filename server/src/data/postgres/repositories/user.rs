//! User repository for PostgreSQL operations

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::{UserRow, UserTuple};

pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    role: &str,
) -> Result<UserRow, PostgresError> {
    let result = sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO "user" (username, password, role) VALUES ($1, $2, $3) RETURNING id"#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await;

    let id = match result {
        Ok(id) => id,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(PostgresError::Conflict(format!(
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

pub async fn get_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserRow>, PostgresError> {
    let row: Option<UserTuple> =
        sqlx::query_as(r#"SELECT id, username, password, role FROM "user" WHERE username = $1"#)
            .bind(username)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(UserRow::from))
}
