//! Declarative filter tables

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::error::BindError;
use crate::utils::string::lower_camel_case;

/// Decoded query-string map for one request
#[derive(Debug, Clone, Default)]
pub struct RawQueryParams(HashMap<String, String>);

impl RawQueryParams {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self(params)
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for RawQueryParams {
    fn from(params: HashMap<String, String>) -> Self {
        Self(params)
    }
}

/// Semantic type of a filter field, carrying the setter for its parsed value
pub enum FieldKind<F> {
    Str(fn(&mut F, String)),
    Int64(fn(&mut F, i64)),
    IntList(fn(&mut F, Vec<i32>)),
    Int64List(fn(&mut F, Vec<i64>)),
    StrList(fn(&mut F, Vec<String>)),
    Bool(fn(&mut F, bool)),
    OptBool(fn(&mut F, Option<bool>)),
    OptInt(fn(&mut F, Option<i32>)),
    OptInt64(fn(&mut F, Option<i64>)),
    DateTime(fn(&mut F, DateTime<Utc>)),
    /// Nested filter; binds against the same params with its own names
    Nested(fn(&mut F, &RawQueryParams) -> Result<(), BindError>),
    /// A field type the binder has no coercion for
    Unsupported(&'static str),
}

impl<F> FieldKind<F> {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int64(_) => "i64",
            Self::IntList(_) => "list<i32>",
            Self::Int64List(_) => "list<i64>",
            Self::StrList(_) => "list<string>",
            Self::Bool(_) => "bool",
            Self::OptBool(_) => "optional<bool>",
            Self::OptInt(_) => "optional<i32>",
            Self::OptInt64(_) => "optional<i64>",
            Self::DateTime(_) => "datetime",
            Self::Nested(_) => "nested",
            Self::Unsupported(name) => name,
        }
    }
}

/// One entry in a filter table
pub struct FilterField<F> {
    /// Field identifier (snake_case)
    pub ident: &'static str,
    /// Explicit public parameter name; defaults to lowerCamelCase of `ident`
    pub param: Option<&'static str>,
    pub kind: FieldKind<F>,
}

impl<F> FilterField<F> {
    pub const fn new(ident: &'static str, kind: FieldKind<F>) -> Self {
        Self {
            ident,
            param: None,
            kind,
        }
    }

    pub const fn named(ident: &'static str, param: &'static str, kind: FieldKind<F>) -> Self {
        Self {
            ident,
            param: Some(param),
            kind,
        }
    }

    /// Public query-parameter name for this field
    pub fn param_name(&self) -> String {
        match self.param {
            Some(name) => name.to_string(),
            None => lower_camel_case(self.ident),
        }
    }
}

/// A filter type bindable from query parameters
///
/// `Default` supplies the zero value every field keeps when its parameter is
/// absent.
pub trait FilterSpec: Default + 'static {
    fn fields() -> &'static [FilterField<Self>];
}
