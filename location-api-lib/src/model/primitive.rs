use crate::errors::{ShapeError, ShapeResult};
use derive_more::Display;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A value allowed inside a location's `other` fields.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Primitive {
    #[display("null")]
    Null,
    Bool(bool),
    Int(i64),
    #[display("{_0:?}")]
    Float(f64),
    #[display("{_0:?}")]
    Str(String),
}

/// Extra metadata of a location. Values are always primitives.
pub type OtherFields = BTreeMap<String, Primitive>;

/// Name of the JSON type of `value`, as reported in shape and format errors.
#[must_use]
pub const fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

impl Primitive {
    /// Convert an untyped value stored under `key`, rejecting nested containers.
    pub fn from_value(key: &str, value: &Value) -> ShapeResult<Self> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => Ok(n
                .as_i64()
                .map(Self::Int)
                .unwrap_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)))),
            Value::String(s) => Ok(Self::Str(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(ShapeError {
                key: key.to_owned(),
                observed_type: value_type_name(value),
            }),
        }
    }
}

impl From<Primitive> for Value {
    fn from(value: Primitive) -> Self {
        match value {
            Primitive::Null => Self::Null,
            Primitive::Bool(b) => Self::Bool(b),
            Primitive::Int(i) => Self::from(i),
            Primitive::Float(f) => Self::from(f),
            Primitive::Str(s) => Self::String(s),
        }
    }
}

macro_rules! primitive_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

primitive_from! {
    bool => Bool,
    i32 => Int,
    i64 => Int,
    f64 => Float,
    String => Str,
    &str => Str,
}

/// Validate every entry of an untyped map, failing on the first nested value.
pub fn other_fields_from_map(map: &Map<String, Value>) -> ShapeResult<OtherFields> {
    map.iter()
        .map(|(key, value)| Primitive::from_value(key, value).map(|p| (key.clone(), p)))
        .collect()
}

#[must_use]
pub fn other_fields_to_map(other: &OtherFields) -> Map<String, Value> {
    other
        .iter()
        .map(|(key, value)| (key.clone(), value.clone().into()))
        .collect()
}
