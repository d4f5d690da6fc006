//! Adapter over the external Delaunay triangulator.
//!
//! The triangulation itself is delegated to the `delaunator` crate; this
//! module only converts between point representations, deduplicates input
//! through canonical keys, and regroups the flat index output into
//! [`Triangle`] values over the caller's points.

use std::collections::HashSet;

use delaunator::{Point as DelaunatorPoint, triangulate};

use crate::primitives::{Point2, Triangle};

/// Computes the Delaunay triangulation of a point set.
///
/// Input points are deduplicated by canonical key before triangulating, so
/// repeated or jittered coordinates cannot confuse the triangulator. Fewer
/// than 3 distinct points, or fully collinear input, yields an empty vector
/// rather than an error. Returned triangles keep the triangulator's
/// consistent winding, which the boundary-extraction stage relies on; no
/// ordering among triangles is guaranteed.
///
/// # Example
///
/// ```
/// use concavum::{delaunay_triangles, Point2};
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(0.5, 0.5),
/// ];
///
/// // Square with a center point splits into 4 triangles
/// let triangles = delaunay_triangles(&points);
/// assert_eq!(triangles.len(), 4);
/// ```
pub fn delaunay_triangles(points: &[Point2<f64>]) -> Vec<Triangle> {
    let mut seen = HashSet::new();
    let distinct: Vec<Point2<f64>> = points
        .iter()
        .copied()
        .filter(|point| seen.insert(point.key()))
        .collect();

    if distinct.len() < 3 {
        return Vec::new();
    }

    let sites: Vec<DelaunatorPoint> = distinct
        .iter()
        .map(|point| DelaunatorPoint {
            x: point.x,
            y: point.y,
        })
        .collect();

    triangulate(&sites)
        .triangles
        .chunks(3)
        .map(|tri| Triangle::new(distinct[tri[0]], distinct[tri[1]], distinct[tri[2]]))
        .collect()
}
