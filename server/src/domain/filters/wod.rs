//! WOD list filter

use super::binder::bind;
use super::range::DateRange;
use super::schema::{FieldKind, FilterField, FilterSpec};

/// Filter for `GET /WODs`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WodFilter {
    /// Substring of the source (case-insensitive)
    pub source: String,
    /// Bounds on the WOD creation time
    pub date: DateRange,
    /// Every entry must appear in the exercise text (case-insensitive)
    pub exercise: Vec<String>,
    /// `Some(true)` requires a picture, `Some(false)` requires none
    pub picture: Option<bool>,
    /// Substring of the type (`WOD`, `Girls`, `Hero`, ...), case-insensitive
    pub wod_type: String,
    /// `Some(true)` keeps WODs the caller has attempted, `Some(false)` the rest
    pub tried: Option<bool>,
}

impl FilterSpec for WodFilter {
    fn fields() -> &'static [FilterField<Self>] {
        const FIELDS: &[FilterField<WodFilter>] = &[
            FilterField::new("source", FieldKind::Str(|f, v| f.source = v)),
            FilterField::new(
                "date",
                FieldKind::Nested(|f, params| {
                    f.date = bind(params)?;
                    Ok(())
                }),
            ),
            FilterField::new("exercise", FieldKind::StrList(|f, v| f.exercise = v)),
            FilterField::new("picture", FieldKind::OptBool(|f, v| f.picture = v)),
            FilterField::named("wod_type", "type", FieldKind::Str(|f, v| f.wod_type = v)),
            FilterField::new("tried", FieldKind::OptBool(|f, v| f.tried = v)),
        ];
        FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::{BindError, RawQueryParams};

    #[test]
    fn test_wod_filter_full() {
        let params = RawQueryParams::from_pairs([
            ("source", "CrossFit"),
            ("startDate", "2023-01-01T00:00:00Z"),
            ("exercise", "thruster,pull-up"),
            ("picture", "false"),
            ("type", "Girls"),
            ("tried", "true"),
        ]);
        let filter: WodFilter = bind(&params).unwrap();
        assert_eq!(filter.source, "CrossFit");
        assert_eq!(filter.date.start_secs(), Some(1_672_531_200));
        assert_eq!(filter.date.end_secs(), None);
        assert_eq!(filter.exercise, vec!["thruster", "pull-up"]);
        assert_eq!(filter.picture, Some(false));
        assert_eq!(filter.wod_type, "Girls");
        assert_eq!(filter.tried, Some(true));
    }

    #[test]
    fn test_wod_filter_type_param_not_camel_cased() {
        let params = RawQueryParams::from_pairs([("wodType", "Hero")]);
        let filter: WodFilter = bind(&params).unwrap();
        assert!(filter.wod_type.is_empty());
    }

    #[test]
    fn test_wod_filter_nested_error_surfaces() {
        let params = RawQueryParams::from_pairs([("startDate", "2023-13-40T00:00:00Z")]);
        let err = bind::<WodFilter>(&params).unwrap_err();
        assert_eq!(
            err,
            BindError::InvalidParameterValue {
                name: "startDate".to_string(),
                value: "2023-13-40T00:00:00Z".to_string(),
            }
        );
    }

    #[test]
    fn test_wod_filter_picture_unset_distinct_from_false() {
        let unset: WodFilter = bind(&RawQueryParams::default()).unwrap();
        let no_picture: WodFilter =
            bind(&RawQueryParams::from_pairs([("picture", "0")])).unwrap();
        assert_eq!(unset.picture, None);
        assert_eq!(no_picture.picture, Some(false));
    }
}
