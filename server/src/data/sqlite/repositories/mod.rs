//! SQLite repositories
//!
//! Row types (UserRow, WodRow, etc.) live in `crate::data::types`.

pub mod activity;
pub mod user;
pub mod wod;

pub use activity::{create_activity, list_activities};
pub use user::{create_user, get_by_username};
pub use wod::{create_wod, get_wod, list_wods};

use sqlx::Sqlite;
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;

use crate::data::sql::SqlArg;

/// Bind composed query arguments in order
fn bind_args<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    args: Vec<SqlArg>,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlArg::Int(value) => query.bind(value),
            SqlArg::Text(value) => query.bind(value),
        };
    }
    query
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    use crate::data::types::{NewActivity, NewWod};

    pub async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    pub async fn insert_user(pool: &SqlitePool, username: &str) -> i64 {
        super::create_user(pool, username, "$argon2id$test", "user")
            .await
            .unwrap()
            .id
    }

    pub fn new_wod(wod_type: &str, exercise: Option<&str>) -> NewWod {
        NewWod {
            source: Some("CrossFit".to_string()),
            creation_t: 1_672_531_200,
            exercise: exercise.map(str::to_string),
            picture: None,
            wod_type: wod_type.to_string(),
        }
    }

    pub fn new_activity(date: i64, time_taken: i64) -> NewActivity {
        NewActivity {
            date,
            time_taken,
            ..Default::default()
        }
    }
}
