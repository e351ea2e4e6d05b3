//! Activity repository for PostgreSQL operations

use sqlx::{PgConnection, PgPool};

use super::bind_args;
use crate::data::postgres::PostgresError;
use crate::data::predicates::list_activities_query;
use crate::data::sql::{SqlDialect, PostgresDialect};
use crate::data::types::{ActivityWithWod, ActivityWithWodTuple, NewActivity};
use crate::domain::filters::ActivityFilter;

pub(crate) async fn insert_activity(
    conn: &mut PgConnection,
    wod_id: i64,
    activity: &NewActivity,
    user_id: i64,
) -> Result<i64, PostgresError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO activity (user_id, wod_id, date, time_taken, meps, exertion, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(wod_id)
    .bind(activity.date)
    .bind(activity.time_taken)
    .bind(activity.meps)
    .bind(activity.exertion)
    .bind(activity.notes.as_deref())
    .fetch_one(&mut *conn)
    .await?;

    Ok(id)
}

pub async fn create_activity(
    pool: &PgPool,
    wod_id: i64,
    activity: &NewActivity,
    user_id: i64,
) -> Result<i64, PostgresError> {
    let mut conn = pool.acquire().await?;
    insert_activity(&mut conn, wod_id, activity, user_id).await
}

pub async fn list_activities(
    pool: &PgPool,
    filter: &ActivityFilter,
    user_id: i64,
) -> Result<Vec<ActivityWithWod>, PostgresError> {
    let (sql, args) = list_activities_query(filter, user_id).to_sql(&PostgresDialect);
    tracing::trace!(dialect = PostgresDialect.name(), %sql, user_id, "Listing activities");
    let rows: Vec<ActivityWithWodTuple> = bind_args(sqlx::query_as(&sql), args)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(ActivityWithWod::from).collect())
}
