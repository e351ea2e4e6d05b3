//! Date range shared by WOD and activity filters

use chrono::{DateTime, Utc};

use super::schema::{FieldKind, FilterField, FilterSpec};

/// Inclusive date bounds, each independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Lower bound as Unix seconds
    pub fn start_secs(&self) -> Option<i64> {
        self.start_date.map(|d| d.timestamp())
    }

    /// Upper bound as Unix seconds
    pub fn end_secs(&self) -> Option<i64> {
        self.end_date.map(|d| d.timestamp())
    }
}

impl FilterSpec for DateRange {
    fn fields() -> &'static [FilterField<Self>] {
        const FIELDS: &[FilterField<DateRange>] = &[
            FilterField::new(
                "start_date",
                FieldKind::DateTime(|f, v| f.start_date = Some(v)),
            ),
            FilterField::new("end_date", FieldKind::DateTime(|f, v| f.end_date = Some(v))),
        ];
        FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::{RawQueryParams, bind};

    #[test]
    fn test_date_range_param_names() {
        let params = RawQueryParams::from_pairs([
            ("startDate", "2023-01-01T00:00:00Z"),
            ("endDate", "2023-01-31T23:59:59Z"),
        ]);
        let range: DateRange = bind(&params).unwrap();
        assert_eq!(range.start_secs(), Some(1_672_531_200));
        assert_eq!(range.end_secs(), Some(1_675_209_599));
    }

    #[test]
    fn test_date_range_bounds_independent() {
        let params = RawQueryParams::from_pairs([("endDate", "2023-01-01T00:00:00Z")]);
        let range: DateRange = bind(&params).unwrap();
        assert_eq!(range.start_secs(), None);
        assert_eq!(range.end_secs(), Some(1_672_531_200));
    }
}
