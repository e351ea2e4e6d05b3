//! Activity queries

use super::wod::{ACTIVITY_COLUMNS, WOD_COLUMNS};
use super::{Transform, compose, date_bounds};
use crate::data::sql::{Predicate, SelectQuery};
use crate::domain::filters::ActivityFilter;

/// Transforms for `GET /Activities`, in application order
pub const ACTIVITY_TRANSFORMS: &[Transform<ActivityFilter>] = &[wod_id, activity_date];

fn wod_id(filter: &ActivityFilter) -> Option<Predicate> {
    (!filter.wod_id.is_empty())
        .then(|| Predicate::text_eq("activity.wod_id", filter.wod_id.as_str()))
}

fn activity_date(filter: &ActivityFilter) -> Option<Predicate> {
    date_bounds("activity.date", &filter.date)
}

/// The caller's activities, each joined with its WOD
pub fn list_activities_query(filter: &ActivityFilter, user_id: i64) -> SelectQuery {
    let base = SelectQuery::from("activity")
        .columns(ACTIVITY_COLUMNS)
        .columns(WOD_COLUMNS)
        .join("wod", Predicate::expr("wod.id = activity.wod_id", Vec::new()))
        .filter(Predicate::eq("activity.user_id", user_id))
        .order_by("activity.id");
    compose(base, filter, ACTIVITY_TRANSFORMS)
}
