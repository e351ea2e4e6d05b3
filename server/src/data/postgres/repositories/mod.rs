//! PostgreSQL repositories
//!
//! Row types (UserRow, WodRow, etc.) live in `crate::data::types`.

pub mod activity;
pub mod user;
pub mod wod;

pub use activity::{create_activity, list_activities};
pub use user::{create_user, get_by_username};
pub use wod::{create_wod, get_wod, list_wods};

use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;

use crate::data::sql::SqlArg;

/// Bind composed query arguments in placeholder order
fn bind_args<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    args: Vec<SqlArg>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for arg in args {
        query = match arg {
            SqlArg::Int(value) => query.bind(value),
            SqlArg::Text(value) => query.bind(value),
        };
    }
    query
}
