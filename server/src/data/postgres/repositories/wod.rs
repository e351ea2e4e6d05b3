//! WOD repository for PostgreSQL operations

use sqlx::PgPool;

use super::activity::insert_activity;
use super::bind_args;
use crate::data::postgres::PostgresError;
use crate::data::predicates::{list_wods_query, wod_activities_query, wod_by_id_query};
use crate::data::sql::{SqlDialect, PostgresDialect};
use crate::data::types::{
    ActivityRow, ActivityTuple, NewActivity, NewWod, WodStatsRow, WodStatsTuple,
    WodWithActivities,
};
use crate::domain::filters::WodFilter;

pub async fn get_wod(
    pool: &PgPool,
    wod_id: i64,
    user_id: i64,
) -> Result<Option<WodWithActivities>, PostgresError> {
    let (sql, args) = wod_by_id_query(wod_id, user_id).to_sql(&PostgresDialect);
    let row: Option<WodStatsTuple> = bind_args(sqlx::query_as(&sql), args)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let (sql, args) = wod_activities_query(wod_id, user_id).to_sql(&PostgresDialect);
    let activities: Vec<ActivityTuple> = bind_args(sqlx::query_as(&sql), args)
        .fetch_all(pool)
        .await?;

    Ok(Some(WodWithActivities {
        stats: WodStatsRow::from(row),
        activities: activities.into_iter().map(ActivityRow::from).collect(),
    }))
}

pub async fn list_wods(
    pool: &PgPool,
    filter: &WodFilter,
    user_id: i64,
) -> Result<Vec<WodStatsRow>, PostgresError> {
    let (sql, args) = list_wods_query(filter, user_id).to_sql(&PostgresDialect);
    tracing::trace!(dialect = PostgresDialect.name(), %sql, user_id, "Listing WODs");
    let rows: Vec<WodStatsTuple> = bind_args(sqlx::query_as(&sql), args)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(WodStatsRow::from).collect())
}

pub async fn create_wod(
    pool: &PgPool,
    wod: &NewWod,
    activity: Option<&NewActivity>,
    user_id: i64,
) -> Result<i64, PostgresError> {
    let mut tx = pool.begin().await?;

    let wod_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO wod (source, creation_t, wod, picture, type, created_by)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(wod.source.as_deref())
    .bind(wod.creation_t)
    .bind(wod.exercise.as_deref())
    .bind(wod.picture.as_deref())
    .bind(&wod.wod_type)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(activity) = activity {
        insert_activity(&mut tx, wod_id, activity, user_id).await?;
    }

    tx.commit().await?;
    Ok(wod_id)
}
