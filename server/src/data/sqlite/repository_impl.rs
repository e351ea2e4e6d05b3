//! TransactionalRepository trait implementation for SQLite

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::traits::TransactionalRepository;
use crate::data::types::{
    ActivityWithWod, NewActivity, NewWod, UserRow, WodStatsRow, WodWithActivities,
};
use crate::domain::filters::{ActivityFilter, WodFilter};

use super::SqliteService;
use super::repositories::{activity, user, wod};

#[async_trait]
impl TransactionalRepository for Arc<SqliteService> {
    // ==================== User Operations ====================

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<UserRow, DataError> {
        user::create_user(self.pool(), username, password_hash, role)
            .await
            .map_err(Into::into)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, DataError> {
        user::get_by_username(self.pool(), username)
            .await
            .map_err(Into::into)
    }

    // ==================== WOD Operations ====================

    async fn get_wod(
        &self,
        wod_id: i64,
        user_id: i64,
    ) -> Result<Option<WodWithActivities>, DataError> {
        wod::get_wod(self.pool(), wod_id, user_id)
            .await
            .map_err(Into::into)
    }

    async fn list_wods(
        &self,
        filter: &WodFilter,
        user_id: i64,
    ) -> Result<Vec<WodStatsRow>, DataError> {
        wod::list_wods(self.pool(), filter, user_id)
            .await
            .map_err(Into::into)
    }

    async fn create_wod(
        &self,
        new_wod: &NewWod,
        activity: Option<&NewActivity>,
        user_id: i64,
    ) -> Result<i64, DataError> {
        wod::create_wod(self.pool(), new_wod, activity, user_id)
            .await
            .map_err(Into::into)
    }

    // ==================== Activity Operations ====================

    async fn list_activities(
        &self,
        filter: &ActivityFilter,
        user_id: i64,
    ) -> Result<Vec<ActivityWithWod>, DataError> {
        activity::list_activities(self.pool(), filter, user_id)
            .await
            .map_err(Into::into)
    }

    async fn create_activity(
        &self,
        wod_id: i64,
        new_activity: &NewActivity,
        user_id: i64,
    ) -> Result<i64, DataError> {
        activity::create_activity(self.pool(), wod_id, new_activity, user_id)
            .await
            .map_err(Into::into)
    }
}
