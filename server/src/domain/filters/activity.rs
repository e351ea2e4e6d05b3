//! Activity list filter

use super::binder::bind;
use super::range::DateRange;
use super::schema::{FieldKind, FilterField, FilterSpec};

/// Filter for `GET /Activities`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    /// Exact WOD identifier match
    pub wod_id: String,
    /// Bounds on the activity date
    pub date: DateRange,
}

impl FilterSpec for ActivityFilter {
    fn fields() -> &'static [FilterField<Self>] {
        const FIELDS: &[FilterField<ActivityFilter>] = &[
            FilterField::named("wod_id", "wodID", FieldKind::Str(|f, v| f.wod_id = v)),
            FilterField::new(
                "date",
                FieldKind::Nested(|f, params| {
                    f.date = bind(params)?;
                    Ok(())
                }),
            ),
        ];
        FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::RawQueryParams;

    #[test]
    fn test_activity_filter() {
        let params = RawQueryParams::from_pairs([
            ("wodID", "42"),
            ("endDate", "2023-01-01T00:00:00Z"),
        ]);
        let filter: ActivityFilter = bind(&params).unwrap();
        assert_eq!(filter.wod_id, "42");
        assert_eq!(filter.date.end_secs(), Some(1_672_531_200));
    }

    #[test]
    fn test_activity_filter_empty_wod_id_skipped() {
        let params = RawQueryParams::from_pairs([("wodID", "")]);
        let filter: ActivityFilter = bind(&params).unwrap();
        assert_eq!(filter, ActivityFilter::default());
    }
}
