use std::num::ParseFloatError;
use thiserror::Error;

/// A value inside a location's `other` fields is not a primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for key '{key}' (type {observed_type}): nested structures are not allowed")]
pub struct ShapeError {
    pub key: String,
    pub observed_type: &'static str,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Ambiguous shape: flat keys ({flat}) and nested key '{nested}' are both present")]
    AmbiguousShape { flat: String, nested: &'static str },
    #[error("Missing required field '{0}'")]
    MissingField(String),
    #[error("Field '{field}' should be {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Expected a map, found {0}")]
    NotAMap(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Could not locate 3D point in reply: {text}")]
    PointNotFound { text: String },
    #[error("Could not convert matched values {groups:?}")]
    InvalidNumbers {
        groups: Vec<String>,
        #[source]
        source: ParseFloatError,
    },
}

pub type ShapeResult<T> = std::result::Result<T, ShapeError>;
pub type FormatResult<T> = std::result::Result<T, FormatError>;
pub type LocationResult<T> = std::result::Result<T, LocationError>;
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;
