//! Repository traits for database backends
//!
//! Both transactional backends (SQLite, PostgreSQL) implement
//! [`TransactionalRepository`]. Every WOD and activity read is scoped to the
//! requesting user.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::{
    ActivityWithWod, NewActivity, NewWod, UserRow, WodStatsRow, WodWithActivities,
};
use crate::domain::filters::{ActivityFilter, WodFilter};

/// Repository trait for transactional operations (users, WODs, activities)
#[async_trait]
pub trait TransactionalRepository: Send + Sync {
    // ==================== User Operations ====================

    /// Create a user; `password_hash` must already be hashed
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<UserRow, DataError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, DataError>;

    // ==================== WOD Operations ====================

    /// Get a WOD visible to `user_id`, with that user's activities on it
    async fn get_wod(
        &self,
        wod_id: i64,
        user_id: i64,
    ) -> Result<Option<WodWithActivities>, DataError>;

    /// List up to 10 WODs visible to `user_id` that match the filter
    async fn list_wods(
        &self,
        filter: &WodFilter,
        user_id: i64,
    ) -> Result<Vec<WodStatsRow>, DataError>;

    /// Insert a WOD and optionally a first activity on it, atomically
    ///
    /// Returns the new WOD id.
    async fn create_wod(
        &self,
        wod: &NewWod,
        activity: Option<&NewActivity>,
        user_id: i64,
    ) -> Result<i64, DataError>;

    // ==================== Activity Operations ====================

    /// List up to 10 of the user's activities that match the filter
    async fn list_activities(
        &self,
        filter: &ActivityFilter,
        user_id: i64,
    ) -> Result<Vec<ActivityWithWod>, DataError>;

    /// Insert an activity; returns its id
    async fn create_activity(
        &self,
        wod_id: i64,
        activity: &NewActivity,
        user_id: i64,
    ) -> Result<i64, DataError>;
}
