//! Positions and named locations, and their map representation.
//!
//! Both [`position::Position`] and [`location::Location`] can be read from two map shapes:
//! a flat one where coordinates sit next to the other fields, and a nested one where the
//! coordinates live under a single key. A map carrying both shapes is rejected before any
//! field is read.

pub mod location;
pub mod position;
pub mod primitive;

use crate::errors::{FormatError, FormatResult};
use itertools::Itertools;
use primitive::value_type_name;
use serde_json::{Map, Value};

pub(crate) const X_KEY: &str = "x";
pub(crate) const Y_KEY: &str = "y";
pub(crate) const Z_KEY: &str = "z";
pub(crate) const DIMENSION_KEYS: [&str; 2] = ["dimension", "dim"];

/// Fail with [`FormatError::AmbiguousShape`] if `nested` and any of `flat` are both present.
pub(crate) fn ensure_single_shape(
    map: &Map<String, Value>,
    flat: &[&str],
    nested: &'static str,
) -> FormatResult<bool> {
    let present = flat.iter().filter(|key| map.contains_key(**key)).join(", ");
    let is_nested = map.contains_key(nested);

    if is_nested && !present.is_empty() {
        return Err(FormatError::AmbiguousShape {
            flat: present,
            nested,
        });
    }

    Ok(is_nested)
}

/// Look up the first non-null value among `aliases`, else the first present one.
pub(crate) fn aliased<'a>(map: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    let mut present = aliases.iter().filter_map(|key| map.get(*key));
    let first = present.next()?;

    if first.is_null() {
        present.find(|value| !value.is_null()).or(Some(first))
    } else {
        Some(first)
    }
}

fn wrong_type(field: &str, expected: &'static str, value: &Value) -> FormatError {
    FormatError::WrongType {
        field: field.to_owned(),
        expected,
        found: value_type_name(value),
    }
}

pub(crate) fn required<'a>(
    map: &'a Map<String, Value>,
    aliases: &[&str],
) -> FormatResult<&'a Value> {
    aliased(map, aliases).ok_or_else(|| FormatError::MissingField(aliases[0].to_owned()))
}

pub(crate) fn as_number(field: &str, value: &Value) -> FormatResult<f64> {
    value.as_f64().ok_or_else(|| wrong_type(field, "a number", value))
}

pub(crate) fn as_string(field: &str, value: &Value) -> FormatResult<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| wrong_type(field, "a string", value))
}

pub(crate) fn as_optional_string(field: &str, value: Option<&Value>) -> FormatResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_string(field, value).map(Some),
    }
}

pub(crate) fn as_map<'a>(field: &str, value: &'a Value) -> FormatResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| wrong_type(field, "a map", value))
}
