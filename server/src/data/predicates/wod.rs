//! WOD queries

use super::{Transform, compose, date_bounds};
use crate::data::sql::{Predicate, SelectQuery, SqlArg};
use crate::domain::filters::WodFilter;

pub(crate) const WOD_COLUMNS: &[&str] = &[
    "wod.id",
    "wod.source",
    "wod.creation_t",
    "wod.wod",
    "wod.picture",
    "wod.type",
];

pub(crate) const ACTIVITY_COLUMNS: &[&str] = &[
    "activity.id",
    "activity.wod_id",
    "activity.date",
    "activity.time_taken",
    "activity.meps",
    "activity.exertion",
    "activity.notes",
];

/// Transforms for `GET /WODs`, in application order
pub const WOD_TRANSFORMS: &[Transform<WodFilter>] =
    &[source, creation_date, exercise, picture, wod_type, tried];

fn source(filter: &WodFilter) -> Option<Predicate> {
    (!filter.source.is_empty()).then(|| Predicate::contains_ci("wod.source", &filter.source))
}

fn creation_date(filter: &WodFilter) -> Option<Predicate> {
    date_bounds("wod.creation_t", &filter.date)
}

fn exercise(filter: &WodFilter) -> Option<Predicate> {
    Predicate::all(
        filter
            .exercise
            .iter()
            .map(|entry| Predicate::contains_ci("wod.wod", entry))
            .collect(),
    )
}

fn picture(filter: &WodFilter) -> Option<Predicate> {
    filter
        .picture
        .map(|present| Predicate::presence("wod.picture", present))
}

fn wod_type(filter: &WodFilter) -> Option<Predicate> {
    (!filter.wod_type.is_empty()).then(|| Predicate::contains_ci("wod.type", &filter.wod_type))
}

fn tried(filter: &WodFilter) -> Option<Predicate> {
    filter
        .tried
        .map(|attempted| Predicate::presence("activity.id", attempted))
}

/// WODs with the caller's attempt count and best time
///
/// Only the caller's activities are joined. A WOD is visible when the caller
/// created it or has at least one activity on it.
fn wod_stats(user_id: i64) -> SelectQuery {
    SelectQuery::from("wod")
        .columns(WOD_COLUMNS)
        .columns(&["COUNT(activity.id)", "MIN(activity.time_taken)"])
        .left_join(
            "activity",
            Predicate::expr(
                "activity.wod_id = wod.id AND activity.user_id = ?",
                vec![SqlArg::Int(user_id)],
            ),
        )
        .filter(Predicate::expr(
            "(wod.created_by = ? OR activity.id IS NOT NULL)",
            vec![SqlArg::Int(user_id)],
        ))
        .group_by("wod.id")
}

pub fn list_wods_query(filter: &WodFilter, user_id: i64) -> SelectQuery {
    compose(wod_stats(user_id).order_by("wod.id"), filter, WOD_TRANSFORMS)
}

pub fn wod_by_id_query(wod_id: i64, user_id: i64) -> SelectQuery {
    wod_stats(user_id).filter(Predicate::eq("wod.id", wod_id))
}

pub fn wod_activities_query(wod_id: i64, user_id: i64) -> SelectQuery {
    SelectQuery::from("activity")
        .columns(ACTIVITY_COLUMNS)
        .filter(Predicate::eq("activity.wod_id", wod_id))
        .filter(Predicate::eq("activity.user_id", user_id))
        .order_by("activity.id")
}
