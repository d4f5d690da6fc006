//! Geometric value types: points, edges and triangles.

mod edge;
mod point2;

pub use edge::{Edge, EdgeKey, Triangle};
pub use point2::{Point2, PointKey};
