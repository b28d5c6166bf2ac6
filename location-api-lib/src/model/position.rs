use super::{
    as_map, as_number, as_string, ensure_single_shape, required, DIMENSION_KEYS, X_KEY, Y_KEY,
    Z_KEY,
};
use crate::{
    errors::{FormatError, FormatResult},
    geometry::Point3D,
    model::primitive::value_type_name,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// A point in a specific dimension, e.g. `overworld` or `the_nether`.
///
/// The dimension is kept as an opaque identifier and is not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    point: Point3D,
    dimension: String,
}

impl Position {
    pub(crate) const POINT_KEY: &'static str = "point";
    pub(crate) const COORDINATE_KEYS: [&'static str; 3] = [X_KEY, Y_KEY, Z_KEY];

    #[must_use]
    pub fn new(point: Point3D, dimension: impl Into<String>) -> Self {
        Self {
            point,
            dimension: dimension.into(),
        }
    }

    #[must_use]
    pub const fn point(&self) -> &Point3D {
        &self.point
    }

    #[must_use]
    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.point.x
    }

    #[must_use]
    pub const fn y(&self) -> f64 {
        self.point.y
    }

    #[must_use]
    pub const fn z(&self) -> f64 {
        self.point.z
    }

    /// Flat map representation: `{x, y, z, dimension}`.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();

        map.insert(X_KEY.to_owned(), self.x().into());
        map.insert(Y_KEY.to_owned(), self.y().into());
        map.insert(Z_KEY.to_owned(), self.z().into());
        map.insert(DIMENSION_KEYS[0].to_owned(), self.dimension.clone().into());

        map
    }

    /// Read a position from either `{x, y, z, dimension}` or `{point: {x, y, z}, dimension}`.
    ///
    /// `dim` is accepted as an alias of `dimension`.
    pub fn from_map(map: &Map<String, Value>) -> FormatResult<Self> {
        let point = if ensure_single_shape(map, &Self::COORDINATE_KEYS, Self::POINT_KEY)? {
            let nested = as_map(Self::POINT_KEY, &map[Self::POINT_KEY])?;
            read_point(nested, Some(Self::POINT_KEY))?
        } else {
            read_point(map, None)?
        };

        let dimension = as_string(DIMENSION_KEYS[0], required(map, &DIMENSION_KEYS)?)?;

        Ok(Self::new(point, dimension))
    }

    pub fn from_value(value: &Value) -> FormatResult<Self> {
        value
            .as_object()
            .ok_or_else(|| FormatError::NotAMap(value_type_name(value)))
            .and_then(Self::from_map)
    }
}

fn read_point(map: &Map<String, Value>, prefix: Option<&str>) -> FormatResult<Point3D> {
    let coordinate = |key: &str| {
        let field = prefix.map_or_else(|| key.to_owned(), |prefix| format!("{prefix}.{key}"));
        let value = map.get(key).ok_or_else(|| FormatError::MissingField(field.clone()))?;

        as_number(&field, value)
    };

    Ok(Point3D::new(
        coordinate(X_KEY)?,
        coordinate(Y_KEY)?,
        coordinate(Z_KEY)?,
    ))
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Position(point={}, dimension={})",
            self.point, self.dimension
        )
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::deserialize(deserializer)?;
        Self::from_map(&map).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::Position;
    use crate::{errors::FormatError, geometry::Point3D};
    use serde_json::{json, Map, Value};

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    fn overworld() -> Position {
        Position::new(Point3D::new(12.3422, 64.0, 786.4633), "minecraft:overworld")
    }

    #[test]
    fn accessors_delegate_to_point() {
        let position = Position::new(Point3D::new(1.5, 2.5, 3.5), "minecraft:overworld");

        assert_eq!(position.x(), 1.5);
        assert_eq!(position.y(), 2.5);
        assert_eq!(position.z(), 3.5);
        assert_eq!(position.dimension(), "minecraft:overworld");
    }

    #[test]
    fn display_lists_every_field() {
        let text = Position::new(Point3D::new(1.0, 2.0, 3.0), "minecraft:overworld").to_string();

        assert!(text.contains("point=[1.0, 2.0, 3.0]"), "{text}");
        assert!(text.contains("dimension=minecraft:overworld"), "{text}");
    }

    #[test]
    fn to_map_is_flat() {
        assert_eq!(
            Value::Object(overworld().to_map()),
            json!({"x": 12.3422, "y": 64.0, "z": 786.4633, "dimension": "minecraft:overworld"})
        );
    }

    #[test]
    fn from_map_reads_both_shapes() {
        let flat = map(json!({"x": 12.3422, "y": 64, "z": 786.4633, "dimension": "minecraft:overworld"}));
        let nested = map(json!({
            "point": {"x": 12.3422, "y": 64, "z": 786.4633},
            "dim": "minecraft:overworld"
        }));

        assert_eq!(Position::from_map(&flat).unwrap(), overworld());
        assert_eq!(Position::from_map(&nested).unwrap(), overworld());
        assert_eq!(Position::from_map(&overworld().to_map()).unwrap(), overworld());
    }

    #[test]
    fn both_shapes_are_ambiguous() {
        let both = map(json!({
            "x": 1.0,
            "point": {"x": 1.0, "y": 2.0, "z": 3.0},
            "dimension": "minecraft:overworld"
        }));

        assert_eq!(
            Position::from_map(&both),
            Err(FormatError::AmbiguousShape {
                flat: "x".to_owned(),
                nested: "point"
            })
        );
    }

    #[test]
    fn shape_is_checked_before_fields() {
        // Neither the dimension nor the nested point is valid, the shape error still wins.
        let both = map(json!({"y": "high", "point": 3, "dimension": 7}));

        assert!(matches!(
            Position::from_map(&both),
            Err(FormatError::AmbiguousShape { .. })
        ));
    }

    #[test]
    fn missing_and_mistyped_fields() {
        assert_eq!(
            Position::from_map(&map(json!({"x": 1, "y": 2, "dimension": "minecraft:the_end"}))),
            Err(FormatError::MissingField("z".to_owned()))
        );
        assert_eq!(
            Position::from_map(&map(json!({"point": {"x": 1, "y": 2}, "dimension": "a:b"}))),
            Err(FormatError::MissingField("point.z".to_owned()))
        );
        assert_eq!(
            Position::from_map(&map(json!({"x": 1, "y": 2, "z": 3}))),
            Err(FormatError::MissingField("dimension".to_owned()))
        );
        assert_eq!(
            Position::from_map(&map(json!({"x": 1, "y": 2, "z": 3, "dimension": 0}))),
            Err(FormatError::WrongType {
                field: "dimension".to_owned(),
                expected: "a string",
                found: "number"
            })
        );
        assert_eq!(
            Position::from_map(&map(json!({"x": "1", "y": 2, "z": 3, "dimension": "a:b"}))),
            Err(FormatError::WrongType {
                field: "x".to_owned(),
                expected: "a number",
                found: "string"
            })
        );
        assert_eq!(
            Position::from_value(&json!([1, 2, 3])),
            Err(FormatError::NotAMap("array"))
        );
    }

    #[test]
    fn serde_goes_through_the_map_contract() {
        let text = serde_json::to_string(&overworld()).unwrap();
        let parsed: Position = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed, overworld());
        assert!(serde_json::from_str::<Position>(r#"{"x": 1, "y": 2, "z": 3}"#).is_err());
    }
}
