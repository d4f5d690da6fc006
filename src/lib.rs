//! concavum - Concave hull (alpha shape) computation for planar point sets.
//!
//! Given scattered 2D coordinates, this crate returns one or more polygons,
//! ordered by descending area, that outline the outer and inner boundaries of
//! the point cloud — tighter than a convex hull. The intended consumers are
//! mapping and visualization layers that need the "true" footprint of a set
//! of located entities (stations, sensors, sightings).
//!
//! # Pipeline
//!
//! 1. Delaunay triangulation of the input points
//! 2. Statistical filtering of triangles by side length (Tukey fence)
//! 3. Boundary-edge extraction from the surviving triangles
//! 4. Polygon stitching via shortest paths on the boundary graph
//!
//! # Example
//!
//! ```
//! use concavum::{alpha_shape, Point2};
//!
//! // Unit square with a center point
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(0.5, 0.5),
//! ];
//!
//! let polygons = alpha_shape(&points).unwrap();
//!
//! // A dense convex cloud yields a single boundary polygon
//! assert_eq!(polygons.len(), 1);
//! assert!((polygons[0].area() - 1.0).abs() < 1e-12);
//! ```

pub mod distance;
pub mod error;
pub mod graph;
pub mod hull;
pub mod polygon;
pub mod primitives;
pub mod triangulation;

pub use distance::{euclidean_distance, haversine_distance};
pub use error::HullError;
pub use graph::{EdgeInsert, EdgeRemoval, Graph, PathError};
pub use hull::{DEFAULT_ALPHA, alpha_shape, alpha_shape_polygons};
pub use polygon::Polygon;
pub use primitives::{Edge, Point2, PointKey, Triangle};
pub use triangulation::delaunay_triangles;
