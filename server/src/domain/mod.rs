//! Domain logic for workout tracking
//!
//! - `filters` - Typed request filters and the query-parameter binder

pub mod filters;

pub use filters::{ActivityFilter, BindError, DateRange, RawQueryParams, WodFilter, bind};
