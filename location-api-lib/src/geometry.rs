use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A point on the horizontal (x/z) plane.
///
/// Both point types implement this, so horizontal distances can be measured
/// between any combination of them.
pub trait HorizontalPoint {
    fn x(&self) -> f64;
    fn z(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub z: f64,
}

/// Euclidean distance between two 3D points.
#[must_use]
pub fn distance(a: &Point3D, b: &Point3D) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2) + (a.z - b.z).powi(2)).sqrt()
}

/// Distance between two points on the x/z plane. The y of any 3D operand is ignored.
#[must_use]
pub fn distance2d(a: &impl HorizontalPoint, b: &impl HorizontalPoint) -> f64 {
    (a.x() - b.x()).hypot(a.z() - b.z())
}

/// Absolute vertical difference between two 3D points.
#[must_use]
pub fn height(a: &Point3D, b: &Point3D) -> f64 {
    (a.y - b.y).abs()
}

impl Point3D {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn distance_to(&self, point: &Self) -> f64 {
        distance(self, point)
    }

    #[must_use]
    pub fn distance2d_to(&self, point: &impl HorizontalPoint) -> f64 {
        distance2d(self, point)
    }

    #[must_use]
    pub fn height_to(&self, point: &Self) -> f64 {
        height(self, point)
    }

    #[must_use]
    pub const fn from_point2d(point: &Point2D, y: f64) -> Self {
        Self::new(point.x, y, point.z)
    }

    #[must_use]
    pub const fn to_point2d(&self) -> Point2D {
        Point2D::new(self.x, self.z)
    }
}

impl Point2D {
    #[must_use]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    #[must_use]
    pub fn distance_to(&self, point: &Self) -> f64 {
        distance2d(self, point)
    }

    #[must_use]
    pub fn distance2d_to(&self, point: &impl HorizontalPoint) -> f64 {
        distance2d(self, point)
    }

    #[must_use]
    pub const fn from_point3d(point: &Point3D) -> Self {
        Self::new(point.x, point.z)
    }

    #[must_use]
    pub const fn to_point3d(&self, y: f64) -> Point3D {
        Point3D::new(self.x, y, self.z)
    }
}

impl HorizontalPoint for Point3D {
    fn x(&self) -> f64 {
        self.x
    }

    fn z(&self) -> f64 {
        self.z
    }
}

impl HorizontalPoint for Point2D {
    fn x(&self) -> f64 {
        self.x
    }

    fn z(&self) -> f64 {
        self.z
    }
}

impl From<Point3D> for Point2D {
    fn from(value: Point3D) -> Self {
        Self::from_point3d(&value)
    }
}

impl Display for Point3D {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}, {:?}, {:?}]", self.x, self.y, self.z)
    }
}

impl Display for Point2D {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}, {:?}]", self.x, self.z)
    }
}

#[cfg(test)]
mod test {
    use super::{distance, distance2d, height, Point2D, Point3D};
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn display_matches_bracketed_form() {
        assert_eq!(Point3D::new(1.0, 2.0, 3.0).to_string(), "[1.0, 2.0, 3.0]");
        assert_eq!(Point2D::new(1.0, 2.0).to_string(), "[1.0, 2.0]");
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point3D::new(0.0, 0.0, 0.0);
        let b = Point3D::new(3.0, 4.0, 0.0);

        assert_close(a.distance_to(&b), 5.0);
        assert_close(distance(&b, &a), 5.0);
    }

    #[test]
    fn distance2d_ignores_height() {
        assert_close(
            distance2d(&Point3D::new(0.0, 0.0, 0.0), &Point3D::new(3.0, 999.0, 4.0)),
            5.0,
        );
        assert_close(
            Point3D::new(0.0, 10.0, 0.0).distance2d_to(&Point3D::new(3.0, 20.0, 4.0)),
            5.0,
        );
    }

    #[test]
    fn distance2d_mixes_point_types() {
        let point3d = Point3D::new(0.0, 10.0, 0.0);
        let point2d = Point2D::new(3.0, 4.0);

        assert_close(point3d.distance2d_to(&point2d), 5.0);
        assert_close(point2d.distance2d_to(&point3d), 5.0);
        assert_close(Point2D::new(0.0, 0.0).distance_to(&point2d), 5.0);
    }

    #[test]
    fn height_is_absolute_vertical_difference() {
        let a = Point3D::new(0.0, 10.0, 0.0);
        let b = Point3D::new(5.0, 25.0, 5.0);

        assert_close(height(&a, &b), 15.0);
        assert_close(b.height_to(&a), 15.0);
    }

    #[test]
    fn conversions_drop_and_restore_height() {
        let point3d = Point3D::new(1.0, 2.0, 3.0);
        let point2d = point3d.to_point2d();

        assert_eq!(point2d, Point2D::new(1.0, 3.0));
        assert_eq!(Point2D::from_point3d(&point3d), point2d);
        assert_eq!(Point2D::from(point3d), point2d);

        assert_eq!(point2d.to_point3d(7.0), Point3D::new(1.0, 7.0, 3.0));
        assert_eq!(
            Point3D::from_point2d(&Point2D::new(1.0, 2.0), 3.0),
            Point3D::new(1.0, 3.0, 2.0)
        );
    }

    fn coordinate() -> impl Strategy<Value = f64> {
        -1.0e6..1.0e6
    }

    proptest! {
        #[test]
        fn metrics_are_symmetric(
            x1 in coordinate(), y1 in coordinate(), z1 in coordinate(),
            x2 in coordinate(), y2 in coordinate(), z2 in coordinate(),
        ) {
            let a = Point3D::new(x1, y1, z1);
            let b = Point3D::new(x2, y2, z2);

            prop_assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < EPSILON);
            prop_assert!((a.distance2d_to(&b) - b.distance2d_to(&a)).abs() < EPSILON);
            prop_assert!((a.height_to(&b) - b.height_to(&a)).abs() < EPSILON);
            prop_assert!(a.distance_to(&b) >= 0.0);
        }
    }
}
