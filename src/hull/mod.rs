//! Concave hull (alpha shape) computation.
//!
//! The entry points are [`alpha_shape`] and [`alpha_shape_polygons`]; see
//! the crate-level documentation for the pipeline overview.

mod alpha;

pub use alpha::{DEFAULT_ALPHA, alpha_shape, alpha_shape_polygons};
