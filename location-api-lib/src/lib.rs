#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]

pub mod errors;
pub mod geometry;
pub mod model;
pub mod reply;

pub use geometry::{Point2D, Point3D};
pub use model::{location::Location, position::Position, primitive::Primitive};

/// The version string of the location api.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
