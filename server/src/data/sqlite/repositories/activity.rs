//! Activity repository for SQLite operations

use sqlx::{SqliteConnection, SqlitePool};

use super::bind_args;
use crate::data::predicates::list_activities_query;
use crate::data::sql::{SqlDialect, SqliteDialect};
use crate::data::sqlite::SqliteError;
use crate::data::types::{ActivityWithWod, ActivityWithWodTuple, NewActivity};
use crate::domain::filters::ActivityFilter;

/// Insert an activity on an open connection or transaction
pub(crate) async fn insert_activity(
    conn: &mut SqliteConnection,
    wod_id: i64,
    activity: &NewActivity,
    user_id: i64,
) -> Result<i64, SqliteError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO activity (user_id, wod_id, date, time_taken, meps, exertion, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?)
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

/// Record an activity for `user_id` on an existing WOD
pub async fn create_activity(
    pool: &SqlitePool,
    wod_id: i64,
    activity: &NewActivity,
    user_id: i64,
) -> Result<i64, SqliteError> {
    let mut conn = pool.acquire().await?;
    insert_activity(&mut conn, wod_id, activity, user_id).await
}

/// List the user's activities matching the filter (max 10)
pub async fn list_activities(
    pool: &SqlitePool,
    filter: &ActivityFilter,
    user_id: i64,
) -> Result<Vec<ActivityWithWod>, SqliteError> {
    let (sql, args) = list_activities_query(filter, user_id).to_sql(&SqliteDialect);
    tracing::trace!(dialect = SqliteDialect.name(), %sql, user_id, "Listing activities");
    let rows: Vec<ActivityWithWodTuple> = bind_args(sqlx::query_as(&sql), args)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(ActivityWithWod::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::test_support::{
        insert_user, new_activity, new_wod, setup_test_pool,
    };
    use crate::data::sqlite::repositories::wod::create_wod;
    use crate::domain::filters::{RawQueryParams, bind};

    fn filter(pairs: &[(&str, &str)]) -> ActivityFilter {
        bind(&RawQueryParams::from_pairs(pairs.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_with_embedded_wod() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "annie").await;
        let wod_id = create_wod(&pool, &new_wod("Girls", Some("Fran")), None, user)
            .await
            .unwrap();

        let activity = NewActivity {
            date: 1_672_531_200,
            time_taken: 245,
            meps: Some(12),
            exertion: Some(9),
            notes: Some("unbroken thrusters".to_string()),
        };
        let id = create_activity(&pool, wod_id, &activity, user).await.unwrap();

        let listed = list_activities(&pool, &ActivityFilter::default(), user)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].activity.id, id);
        assert_eq!(listed[0].activity.wod_id, wod_id);
        assert_eq!(listed[0].activity.meps, Some(12));
        assert_eq!(listed[0].activity.notes.as_deref(), Some("unbroken thrusters"));
        assert_eq!(listed[0].wod.id, wod_id);
        assert_eq!(listed[0].wod.exercise.as_deref(), Some("Fran"));
    }

    #[tokio::test]
    async fn test_list_only_returns_callers_activities() {
        let pool = setup_test_pool().await;
        let alice = insert_user(&pool, "alice").await;
        let bob = insert_user(&pool, "bob").await;
        let wod_id = create_wod(&pool, &new_wod("Hero", Some("Murph")), None, alice)
            .await
            .unwrap();

        create_activity(&pool, wod_id, &new_activity(100, 3600), alice)
            .await
            .unwrap();
        create_activity(&pool, wod_id, &new_activity(200, 3500), bob)
            .await
            .unwrap();

        let bobs = list_activities(&pool, &ActivityFilter::default(), bob)
            .await
            .unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].activity.time_taken, 3500);
    }

    #[tokio::test]
    async fn test_filter_by_wod_id_and_dates() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "cindy").await;
        let first = create_wod(&pool, &new_wod("Girls", Some("Cindy")), None, user)
            .await
            .unwrap();
        let second = create_wod(&pool, &new_wod("Girls", Some("Grace")), None, user)
            .await
            .unwrap();

        create_activity(&pool, first, &new_activity(1_672_531_200, 1200), user)
            .await
            .unwrap();
        create_activity(&pool, first, &new_activity(1_675_209_600, 1100), user)
            .await
            .unwrap();
        create_activity(&pool, second, &new_activity(1_672_531_200, 180), user)
            .await
            .unwrap();

        let first_id = first.to_string();
        let by_wod = list_activities(&pool, &filter(&[("wodID", first_id.as_str())]), user)
            .await
            .unwrap();
        assert_eq!(by_wod.len(), 2);
        assert!(by_wod.iter().all(|a| a.activity.wod_id == first));

        let january = list_activities(
            &pool,
            &filter(&[
                ("startDate", "2023-01-01T00:00:00Z"),
                ("endDate", "2023-01-31T23:59:59Z"),
            ]),
            user,
        )
        .await
        .unwrap();
        assert_eq!(january.len(), 2);
        assert!(january.iter().all(|a| a.activity.date == 1_672_531_200));

        let none = list_activities(&pool, &filter(&[("wodID", "9999")]), user)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_capped_at_ten() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "karen").await;
        let wod_id = create_wod(&pool, &new_wod("Girls", Some("Karen")), None, user)
            .await
            .unwrap();
        for day in 0..12 {
            create_activity(&pool, wod_id, &new_activity(day, 600), user)
                .await
                .unwrap();
        }

        let listed = list_activities(&pool, &ActivityFilter::default(), user)
            .await
            .unwrap();
        assert_eq!(listed.len(), 10);
    }

    #[tokio::test]
    async fn test_unknown_wod_is_rejected() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "diane").await;
        let err = create_activity(&pool, 404, &new_activity(1, 1), user)
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::Database(_)));
    }
}
