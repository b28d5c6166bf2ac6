use super::{
    aliased, as_map, as_optional_string, as_string, ensure_single_shape,
    position::Position,
    primitive::{other_fields_from_map, other_fields_to_map, value_type_name, OtherFields},
    required, DIMENSION_KEYS, X_KEY, Y_KEY, Z_KEY,
};
use crate::errors::{FormatError, LocationResult, ShapeResult};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use tracing::trace;

/// A named position with an optional description and flat metadata.
///
/// Keys of `other` are not checked against the reserved field names, so an `other`
/// entry called `name` is stored as-is next to the real name.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    position: Position,
    name: String,
    description: Option<String>,
    other: Option<OtherFields>,
}

impl Location {
    const POSITION_KEY: &'static str = "position";
    const NAME_KEY: &'static str = "name";
    const DESCRIPTION_KEYS: [&'static str; 2] = ["description", "desc"];
    const OTHER_KEY: &'static str = "other";

    const FLAT_KEYS: [&'static str; 6] = [
        X_KEY,
        Y_KEY,
        Z_KEY,
        Position::POINT_KEY,
        DIMENSION_KEYS[0],
        DIMENSION_KEYS[1],
    ];

    #[must_use]
    pub fn new(
        position: Position,
        name: impl Into<String>,
        description: Option<String>,
        other: Option<OtherFields>,
    ) -> Self {
        Self {
            position,
            name: name.into(),
            description,
            other,
        }
    }

    /// Build a location from untyped metadata.
    ///
    /// Every value of `other` must be a primitive, otherwise nothing is built and the
    /// offending key is reported.
    pub fn build(
        position: Position,
        name: impl Into<String>,
        description: Option<String>,
        other: Option<&Map<String, Value>>,
    ) -> ShapeResult<Self> {
        let other = other.map(other_fields_from_map).transpose()?;

        Ok(Self::new(position, name, description, other))
    }

    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn other(&self) -> Option<&OtherFields> {
        self.other.as_ref()
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.position.x()
    }

    #[must_use]
    pub const fn y(&self) -> f64 {
        self.position.y()
    }

    #[must_use]
    pub const fn z(&self) -> f64 {
        self.position.z()
    }

    #[must_use]
    pub fn dimension(&self) -> &str {
        self.position.dimension()
    }

    /// Map representation: `{x, y, z, dimension, name, description, other}`.
    ///
    /// Absent `description` and `other` are written as `null`.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.position.to_map();

        map.insert(Self::NAME_KEY.to_owned(), self.name.clone().into());
        map.insert(
            Self::DESCRIPTION_KEYS[0].to_owned(),
            self.description.clone().map_or(Value::Null, Value::String),
        );
        map.insert(
            Self::OTHER_KEY.to_owned(),
            self.other
                .as_ref()
                .map_or(Value::Null, |other| Value::Object(other_fields_to_map(other))),
        );

        map
    }

    /// Read a location from a flat map or one with a nested `position`.
    ///
    /// `desc` is accepted as an alias of `description`, `dim` of `dimension`.
    pub fn from_map(map: &Map<String, Value>) -> LocationResult<Self> {
        let position = if ensure_single_shape(map, &Self::FLAT_KEYS, Self::POSITION_KEY)? {
            trace!("Reading location with nested position");
            Position::from_map(as_map(Self::POSITION_KEY, &map[Self::POSITION_KEY])?)?
        } else {
            Position::from_map(map)?
        };

        let name = as_string(Self::NAME_KEY, required(map, &[Self::NAME_KEY])?)?;
        let description = as_optional_string(
            Self::DESCRIPTION_KEYS[0],
            aliased(map, &Self::DESCRIPTION_KEYS),
        )?;

        let other = match map.get(Self::OTHER_KEY) {
            None | Some(Value::Null) => None,
            Some(value) => Some(as_map(Self::OTHER_KEY, value)?),
        };

        Ok(Self::build(position, name, description, other)?)
    }

    pub fn from_value(value: &Value) -> LocationResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| FormatError::NotAMap(value_type_name(value)))?;

        Self::from_map(map)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Location(position={}, name={}", self.position, self.name)?;

        match &self.description {
            Some(description) => write!(f, ", description={description}")?,
            None => write!(f, ", description=None")?,
        }

        match &self.other {
            Some(other) => {
                let entries = other
                    .iter()
                    .map(|(key, value)| format!("{key:?}: {value}"))
                    .collect::<Vec<_>>();

                write!(f, ", other={{{}}})", entries.join(", "))
            }
            None => write!(f, ", other=None)"),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::deserialize(deserializer)?;
        Self::from_map(&map).map_err(de::Error::custom)
    }
}
