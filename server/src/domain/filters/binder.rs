//! Query-parameter binder

use std::borrow::Cow;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::error::BindError;
use super::schema::{FieldKind, FilterField, FilterSpec, RawQueryParams};
use crate::utils::string::split_csv;
use crate::utils::time::parse_rfc3339_strict;

/// Bind query parameters into a typed filter
///
/// Fields are visited in table order. Absent parameters leave the field at its
/// zero value and unknown parameters are ignored. The first failure aborts
/// binding.
pub fn bind<F: FilterSpec>(params: &RawQueryParams) -> Result<F, BindError> {
    let mut filter = F::default();
    for field in F::fields() {
        bind_field(&mut filter, field, params)?;
    }
    Ok(filter)
}

fn bind_field<F>(
    filter: &mut F,
    field: &FilterField<F>,
    params: &RawQueryParams,
) -> Result<(), BindError> {
    let name = field.param_name();

    match (&field.kind, params.get(&name)) {
        (FieldKind::Nested(bind_nested), _) => bind_nested(filter, params)?,
        (FieldKind::Unsupported(type_name), _) => {
            let type_name = *type_name;
            tracing::error!(
                field = field.ident,
                type_name,
                "Filter table declares an unsupported field type"
            );
            return Err(BindError::UnsupportedFilterType {
                type_name,
                field_name: field.ident,
            });
        }
        (_, None) => {}
        (FieldKind::Str(set), Some(raw)) => {
            if !raw.is_empty() {
                set(filter, raw.to_string());
            }
        }
        (FieldKind::Int64(set), Some(raw)) => set(filter, parse_number(&name, raw)?),
        (FieldKind::OptInt(set), Some(raw)) => set(filter, Some(parse_number(&name, raw)?)),
        (FieldKind::OptInt64(set), Some(raw)) => set(filter, Some(parse_number(&name, raw)?)),
        (FieldKind::IntList(set), Some(raw)) => set_list(filter, *set, parse_number_list(&name, raw)?),
        (FieldKind::Int64List(set), Some(raw)) => {
            set_list(filter, *set, parse_number_list(&name, raw)?)
        }
        (FieldKind::StrList(set), Some(raw)) => set_list(filter, *set, parse_string_list(&name, raw)?),
        (FieldKind::Bool(set), Some(raw)) => set(filter, parse_bool(&name, raw)?),
        (FieldKind::OptBool(set), Some(raw)) => set(filter, Some(parse_bool(&name, raw)?)),
        (FieldKind::DateTime(set), Some(raw)) => set(filter, parse_datetime(&name, raw)?),
    }

    Ok(())
}

fn set_list<F, T>(filter: &mut F, set: fn(&mut F, Vec<T>), values: Vec<T>) {
    if !values.is_empty() {
        set(filter, values);
    }
}

fn parse_number<T: FromStr>(name: &str, raw: &str) -> Result<T, BindError> {
    raw.parse().map_err(|_| BindError::invalid(name, raw))
}

fn parse_number_list<T: FromStr>(name: &str, raw: &str) -> Result<Vec<T>, BindError> {
    split_csv(raw)
        .map(|token| token.parse().map_err(|_| BindError::invalid(name, token)))
        .collect()
}

fn parse_string_list(name: &str, raw: &str) -> Result<Vec<String>, BindError> {
    split_csv(raw)
        .map(|token| query_unescape(token).ok_or_else(|| BindError::invalid(name, token)))
        .collect()
}

/// Decode a form-encoded token: `+` is a space and every `%` must start a
/// two-digit hex escape.
fn query_unescape(token: &str) -> Option<String> {
    let bytes = token.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let is_hex = |offset: usize| bytes.get(i + offset).is_some_and(u8::is_ascii_hexdigit);
            if !(is_hex(1) && is_hex(2)) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = token.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(Cow::into_owned)
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, BindError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(BindError::invalid(name, raw)),
    }
}

fn parse_datetime(name: &str, raw: &str) -> Result<DateTime<Utc>, BindError> {
    parse_rfc3339_strict(raw).ok_or_else(|| BindError::invalid(name, raw))
}
