//! WOD repository for SQLite operations

use sqlx::SqlitePool;

use super::activity::insert_activity;
use super::bind_args;
use crate::data::predicates::{list_wods_query, wod_activities_query, wod_by_id_query};
use crate::data::sql::{SqlDialect, SqliteDialect};
use crate::data::sqlite::SqliteError;
use crate::data::types::{
    ActivityRow, ActivityTuple, NewActivity, NewWod, WodStatsRow, WodStatsTuple,
    WodWithActivities,
};
use crate::domain::filters::WodFilter;

/// Get a WOD visible to the user together with the user's activities on it
pub async fn get_wod(
    pool: &SqlitePool,
    wod_id: i64,
    user_id: i64,
) -> Result<Option<WodWithActivities>, SqliteError> {
    let (sql, args) = wod_by_id_query(wod_id, user_id).to_sql(&SqliteDialect);
    let row: Option<WodStatsTuple> = bind_args(sqlx::query_as(&sql), args)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let (sql, args) = wod_activities_query(wod_id, user_id).to_sql(&SqliteDialect);
    let activities: Vec<ActivityTuple> = bind_args(sqlx::query_as(&sql), args)
        .fetch_all(pool)
        .await?;

    Ok(Some(WodWithActivities {
        stats: WodStatsRow::from(row),
        activities: activities.into_iter().map(ActivityRow::from).collect(),
    }))
}

/// List WODs visible to the user matching the filter (max 10)
pub async fn list_wods(
    pool: &SqlitePool,
    filter: &WodFilter,
    user_id: i64,
) -> Result<Vec<WodStatsRow>, SqliteError> {
    let (sql, args) = list_wods_query(filter, user_id).to_sql(&SqliteDialect);
    tracing::trace!(dialect = SqliteDialect.name(), %sql, user_id, "Listing WODs");
    let rows: Vec<WodStatsTuple> = bind_args(sqlx::query_as(&sql), args)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(WodStatsRow::from).collect())
}

/// Insert a WOD and, when given, a first activity in one transaction
pub async fn create_wod(
    pool: &SqlitePool,
    wod: &NewWod,
    activity: Option<&NewActivity>,
    user_id: i64,
) -> Result<i64, SqliteError> {
    let mut tx = pool.begin().await?;

    let wod_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO wod (source, creation_t, wod, picture, type, created_by)
        VALUES (?, ?, ?, ?, ?, ?)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::activity::create_activity;
    use crate::data::sqlite::repositories::test_support::{
        insert_user, new_activity, new_wod, setup_test_pool,
    };
    use crate::domain::filters::{RawQueryParams, bind};

    fn filter(pairs: &[(&str, &str)]) -> WodFilter {
        bind(&RawQueryParams::from_pairs(pairs.iter().copied())).unwrap()
    }

    async fn wod_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM wod")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_with_activity_then_fetch() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "fran").await;

        let wod_id = create_wod(
            &pool,
            &new_wod("Girls", Some("21-15-9 thrusters and pull-ups")),
            Some(&new_activity(1_672_531_200, 300)),
            user,
        )
        .await
        .unwrap();

        let detail = get_wod(&pool, wod_id, user).await.unwrap().unwrap();
        assert_eq!(detail.stats.wod.id, wod_id);
        assert_eq!(detail.stats.wod.wod_type, "Girls");
        assert_eq!(detail.stats.attempts, 1);
        assert_eq!(detail.stats.best_time, Some(300));
        assert_eq!(detail.activities.len(), 1);
        assert_eq!(detail.activities[0].time_taken, 300);
    }

    #[tokio::test]
    async fn test_best_time_is_minimum() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "grace").await;
        let wod_id = create_wod(&pool, &new_wod("Girls", Some("Grace")), None, user)
            .await
            .unwrap();
        for time in [240, 180, 200] {
            create_activity(&pool, wod_id, &new_activity(1, time), user)
                .await
                .unwrap();
        }

        let detail = get_wod(&pool, wod_id, user).await.unwrap().unwrap();
        assert_eq!(detail.stats.attempts, 3);
        assert_eq!(detail.stats.best_time, Some(180));
    }

    #[tokio::test]
    async fn test_created_wod_without_activity_is_visible_to_creator() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "helen").await;
        let wod_id = create_wod(&pool, &new_wod("Girls", Some("Helen")), None, user)
            .await
            .unwrap();

        let detail = get_wod(&pool, wod_id, user).await.unwrap().unwrap();
        assert_eq!(detail.stats.attempts, 0);
        assert_eq!(detail.stats.best_time, None);
        assert!(detail.activities.is_empty());
    }

    #[tokio::test]
    async fn test_ownership_scoping() {
        let pool = setup_test_pool().await;
        let alice = insert_user(&pool, "alice").await;
        let bob = insert_user(&pool, "bob").await;

        let wod_id = create_wod(
            &pool,
            &new_wod("Hero", Some("Murph")),
            Some(&new_activity(1, 3600)),
            alice,
        )
        .await
        .unwrap();

        assert!(get_wod(&pool, wod_id, bob).await.unwrap().is_none());
        assert!(
            list_wods(&pool, &WodFilter::default(), bob)
                .await
                .unwrap()
                .is_empty()
        );

        create_activity(&pool, wod_id, &new_activity(2, 3000), bob)
            .await
            .unwrap();

        let bob_view = get_wod(&pool, wod_id, bob).await.unwrap().unwrap();
        assert_eq!(bob_view.stats.attempts, 1);
        assert_eq!(bob_view.stats.best_time, Some(3000));
        assert_eq!(bob_view.activities.len(), 1);
        assert_eq!(bob_view.activities[0].time_taken, 3000);

        let alice_view = get_wod(&pool, wod_id, alice).await.unwrap().unwrap();
        assert_eq!(alice_view.stats.attempts, 1);
        assert_eq!(alice_view.stats.best_time, Some(3600));
    }

    #[tokio::test]
    async fn test_missing_wod() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "isabel").await;
        assert!(get_wod(&pool, 42, user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exercise_filter_requires_every_entry() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "jackie").await;
        create_wod(&pool, &new_wod("WOD", Some("Row 500m, 20 Burpees")), None, user)
            .await
            .unwrap();
        create_wod(&pool, &new_wod("WOD", Some("Row 1000m")), None, user)
            .await
            .unwrap();

        let both = list_wods(&pool, &filter(&[("exercise", "row,BURPEE")]), user)
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].wod.exercise.as_deref(), Some("Row 500m, 20 Burpees"));

        let row_only = list_wods(&pool, &filter(&[("exercise", "row")]), user)
            .await
            .unwrap();
        assert_eq!(row_only.len(), 2);
    }

    #[tokio::test]
    async fn test_exercise_filter_treats_wildcards_literally() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "kelly").await;
        create_wod(&pool, &new_wod("WOD", Some("5 rounds")), None, user)
            .await
            .unwrap();

        let matched = list_wods(&pool, &filter(&[("exercise", "5_rounds")]), user)
            .await
            .unwrap();
        assert!(matched.is_empty());
    }

    #[tokio::test]
    async fn test_picture_tri_state() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "linda").await;
        let mut with_picture = new_wod("Girls", Some("Linda"));
        with_picture.picture = Some("https://img.example/linda.png".to_string());
        create_wod(&pool, &with_picture, None, user).await.unwrap();
        create_wod(&pool, &new_wod("Girls", Some("Lynne")), None, user)
            .await
            .unwrap();

        let with = list_wods(&pool, &filter(&[("picture", "true")]), user)
            .await
            .unwrap();
        let without = list_wods(&pool, &filter(&[("picture", "false")]), user)
            .await
            .unwrap();
        let any = list_wods(&pool, &filter(&[]), user).await.unwrap();

        assert_eq!(with.len(), 1);
        assert!(with[0].wod.picture.is_some());
        assert_eq!(without.len(), 1);
        assert!(without[0].wod.picture.is_none());
        assert_eq!(any.len(), 2);
    }

    #[tokio::test]
    async fn test_tried_filter() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "mary").await;
        create_wod(
            &pool,
            &new_wod("Girls", Some("Mary")),
            Some(&new_activity(1, 1200)),
            user,
        )
        .await
        .unwrap();
        create_wod(&pool, &new_wod("Girls", Some("Nancy")), None, user)
            .await
            .unwrap();

        let tried = list_wods(&pool, &filter(&[("tried", "true")]), user)
            .await
            .unwrap();
        let untried = list_wods(&pool, &filter(&[("tried", "false")]), user)
            .await
            .unwrap();

        assert_eq!(tried.len(), 1);
        assert_eq!(tried[0].wod.exercise.as_deref(), Some("Mary"));
        assert_eq!(untried.len(), 1);
        assert_eq!(untried[0].wod.exercise.as_deref(), Some("Nancy"));
    }

    #[tokio::test]
    async fn test_source_and_type_match_substrings_ignoring_case() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "mary").await;
        create_wod(&pool, &new_wod("Girls", Some("Fran")), None, user)
            .await
            .unwrap();
        let mut games = new_wod("Hero", Some("Murph"));
        games.source = Some("Games 2023".to_string());
        create_wod(&pool, &games, None, user).await.unwrap();

        let girls = list_wods(&pool, &filter(&[("type", "girl")]), user)
            .await
            .unwrap();
        assert_eq!(girls.len(), 1);
        assert_eq!(girls[0].wod.wod_type, "Girls");

        let crossfit = list_wods(&pool, &filter(&[("source", "crossfit")]), user)
            .await
            .unwrap();
        assert_eq!(crossfit.len(), 1);
        assert_eq!(crossfit[0].wod.source.as_deref(), Some("CrossFit"));

        let both = list_wods(&pool, &filter(&[("source", "GAMES"), ("type", "er")]), user)
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].wod.exercise.as_deref(), Some("Murph"));
    }

    #[tokio::test]
    async fn test_filters_are_conjunctive_and_monotonic() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "nicole").await;
        let mut older = new_wod("Hero", Some("DT"));
        older.creation_t = 1_600_000_000;
        create_wod(&pool, &older, None, user).await.unwrap();
        create_wod(&pool, &new_wod("Hero", Some("JT")), None, user)
            .await
            .unwrap();
        create_wod(&pool, &new_wod("Girls", Some("Eva")), None, user)
            .await
            .unwrap();

        let heroes = list_wods(&pool, &filter(&[("type", "Hero")]), user)
            .await
            .unwrap();
        let recent_heroes = list_wods(
            &pool,
            &filter(&[("type", "Hero"), ("startDate", "2023-01-01T00:00:00Z")]),
            user,
        )
        .await
        .unwrap();

        assert_eq!(heroes.len(), 2);
        assert_eq!(recent_heroes.len(), 1);
        assert_eq!(recent_heroes[0].wod.exercise.as_deref(), Some("JT"));
        assert!(
            recent_heroes
                .iter()
                .all(|r| heroes.iter().any(|h| h.wod.id == r.wod.id))
        );
    }

    #[tokio::test]
    async fn test_list_is_capped_at_ten() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "olga").await;
        for _ in 0..12 {
            create_wod(&pool, &new_wod("WOD", None), None, user)
                .await
                .unwrap();
        }

        let listed = list_wods(&pool, &WodFilter::default(), user)
            .await
            .unwrap();
        assert_eq!(listed.len(), 10);
    }

    #[tokio::test]
    async fn test_failed_activity_rolls_back_wod() {
        let pool = setup_test_pool().await;
        let user = insert_user(&pool, "pam").await;

        let result = create_wod(
            &pool,
            &new_wod("Girls", Some("Fran")),
            Some(&new_activity(1, 0)),
            user,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(wod_count(&pool).await, 0);
    }
}
