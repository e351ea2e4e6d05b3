//! Request filter binding
//!
//! Each list endpoint declares a typed filter struct plus a static field table
//! ([`FilterSpec`]). [`bind`] walks that table against the raw query map,
//! coercing values by semantic type and failing on the first bad parameter.
//!
//! ## Usage
//!
//! ```
//! use wodland_server::domain::filters::{RawQueryParams, WodFilter, bind};
//!
//! let params = RawQueryParams::from_pairs([("exercise", "row,burpee"), ("picture", "true")]);
//! let filter: WodFilter = bind(&params).unwrap();
//! assert_eq!(filter.exercise, vec!["row", "burpee"]);
//! assert_eq!(filter.picture, Some(true));
//! ```

mod activity;
mod binder;
mod error;
mod range;
mod schema;
mod wod;

pub use activity::ActivityFilter;
pub use binder::bind;
pub use error::BindError;
pub use range::DateRange;
pub use schema::{FieldKind, FilterField, FilterSpec, RawQueryParams};
pub use wod::WodFilter;
