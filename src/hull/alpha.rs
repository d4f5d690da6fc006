//! The alpha-shape pipeline: fence, boundary extraction, stitching, ranking.

use std::collections::{BTreeSet, HashMap};

use log::{debug, warn};

use crate::distance::euclidean_distance;
use crate::error::HullError;
use crate::graph::Graph;
use crate::polygon::Polygon;
use crate::primitives::{Edge, EdgeKey, Point2, Triangle};
use crate::triangulation::delaunay_triangles;

/// Default Tukey-fence multiplier, the classical outlier threshold.
pub const DEFAULT_ALPHA: f64 = 1.5;

/// Computes the concave hull of a point set with the default parameters:
/// `alpha = 1.5` and Euclidean distance.
///
/// Equivalent to `alpha_shape_polygons(points, DEFAULT_ALPHA,
/// euclidean_distance)`; see [`alpha_shape_polygons`] for the full contract.
///
/// # Example
///
/// ```
/// use concavum::{alpha_shape, Point2};
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(0.5, 0.5),
/// ];
///
/// let polygons = alpha_shape(&points).unwrap();
/// assert_eq!(polygons.len(), 1);
/// ```
pub fn alpha_shape(points: &[Point2<f64>]) -> Result<Vec<Polygon<f64>>, HullError> {
    alpha_shape_polygons(points, DEFAULT_ALPHA, euclidean_distance)
}

/// Computes the concave hull (alpha shape) of a point set.
///
/// Returns the boundary polygons of the point cloud, sorted in descending
/// order by area. A connected cloud yields a single polygon; clouds with
/// holes or disjoint clusters yield one polygon per boundary loop. Each
/// polygon is an explicitly closed ring (its first vertex repeated at the
/// end).
///
/// `alpha` scales the Tukey fence used to reject long triangulation edges:
/// larger values admit more triangles and tend toward the convex hull,
/// smaller values produce tighter, more concave boundaries and potentially
/// several disjoint shapes. `distance` is used for every length in the
/// pipeline — fence thresholds and stitching weights alike — so pass
/// [`crate::haversine_distance`] when the coordinates are (lon, lat)
/// degrees.
///
/// # Errors
///
/// Fails with [`HullError::NotEnoughPoints`] for fewer than 3 input points,
/// and with [`HullError::UndefinedFence`] when the triangulation is too
/// degenerate (e.g. collinear input) to compute quartiles. Finding zero
/// polygons is not an error.
///
/// # Example
///
/// ```
/// use concavum::{alpha_shape_polygons, euclidean_distance, Point2};
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(0.5, 0.5),
/// ];
///
/// let polygons = alpha_shape_polygons(&points, 1.5, euclidean_distance).unwrap();
/// assert_eq!(polygons.len(), 1);
/// assert!((polygons[0].area() - 1.0).abs() < 1e-12);
/// ```
pub fn alpha_shape_polygons<D>(
    points: &[Point2<f64>],
    alpha: f64,
    distance: D,
) -> Result<Vec<Polygon<f64>>, HullError>
where
    D: Fn(Point2<f64>, Point2<f64>) -> f64,
{
    if points.len() < 3 {
        return Err(HullError::NotEnoughPoints {
            count: points.len(),
        });
    }

    let triangles = delaunay_triangles(points);
    let admissible = alpha_triangles(&triangles, alpha, &distance)?;
    let boundary = boundary_edges(&admissible);
    Ok(stitch_polygons(&boundary, &distance))
}

/// Filters the triangulation down to alpha-admissible triangles.
///
/// All side lengths of all triangles are pooled into one sample; a triangle
/// survives iff each of its sides lies strictly inside the Tukey fence
/// `(q25 - alpha*IQR, q75 + alpha*IQR)` built from that sample.
fn alpha_triangles<D>(
    triangles: &[Triangle],
    alpha: f64,
    distance: &D,
) -> Result<Vec<Triangle>, HullError>
where
    D: Fn(Point2<f64>, Point2<f64>) -> f64,
{
    let mut lengths = Vec::with_capacity(triangles.len() * 3);
    let mut measured = Vec::with_capacity(triangles.len());
    for &triangle in triangles {
        let [a, b, c] = triangle.vertices();
        let sides = [distance(a, b), distance(b, c), distance(c, a)];
        lengths.extend_from_slice(&sides);
        measured.push((triangle, sides));
    }

    if lengths.len() < 2 {
        return Err(HullError::UndefinedFence {
            samples: lengths.len(),
        });
    }
    lengths.sort_by(f64::total_cmp);

    let q25 = quantile_method7(&lengths, 0.25);
    let q75 = quantile_method7(&lengths, 0.75);
    let iqr = q75 - q25;
    let lower = q25 - alpha * iqr;
    let upper = q75 + alpha * iqr;

    Ok(measured
        .into_iter()
        .filter(|(_, sides)| sides.iter().all(|&len| lower < len && len < upper))
        .map(|(triangle, _)| triangle)
        .collect())
}

/// Quantile of a sorted sample by linear interpolation between order
/// statistics (interpolation method 7): `h = (n - 1) * p`, interpolate
/// between `x[floor(h)]` and `x[ceil(h)]`.
///
/// Expects a non-empty, ascending-sorted slice.
fn quantile_method7(sorted: &[f64], probability: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * probability;
    let low = h.floor() as usize;
    let high = h.ceil() as usize;
    sorted[low] + (h - low as f64) * (sorted[high] - sorted[low])
}

/// Extracts the boundary edges of the admissible region.
///
/// Interior edges are shared by exactly two triangles and, with consistent
/// winding, appear once in each direction; such pairs cancel. A directed
/// edge seen twice in the *same* direction means the triangulation is not a
/// proper manifold; it is logged and skipped rather than repaired. Edges
/// left standing after all triangles are processed belonged to exactly one
/// admissible triangle and therefore lie on the outer or inner perimeter.
fn boundary_edges(triangles: &[Triangle]) -> Vec<Edge> {
    let mut seen: HashMap<EdgeKey, Edge> = HashMap::new();
    for &triangle in triangles {
        for edge in triangle.sides() {
            if seen.remove(&edge.reversed().key()).is_some() {
                // Cancelled: this edge is interior to the admissible region.
                continue;
            }
            if seen.contains_key(&edge.key()) {
                warn!(
                    "directed edge ({}, {}) -> ({}, {}) appeared twice; \
                     skipping non-manifold edge",
                    edge.source.x, edge.source.y, edge.target.x, edge.target.y
                );
                continue;
            }
            seen.insert(edge.key(), edge);
        }
    }
    seen.into_values().collect()
}

/// Stitches boundary edges into closed polygons.
///
/// Builds a graph from the boundary edges, then consumes it loop by loop:
/// pop a pivot node, remove one of its incident edges, and recover the rest
/// of that loop as the shortest path between the removed edge's endpoints.
/// For a simple cycle that path is the only path, so the loop is rebuilt
/// exactly; disjoint loops are consumed one after another because their
/// node sets never overlap.
fn stitch_polygons<D>(boundary: &[Edge], distance: &D) -> Vec<Polygon<f64>>
where
    D: Fn(Point2<f64>, Point2<f64>) -> f64,
{
    let mut graph = Graph::from_edges(boundary, distance);
    let mut frontier: BTreeSet<_> = graph.node_keys().collect();
    let mut polygons: Vec<Polygon<f64>> = Vec::new();

    while let Some(pivot_key) = frontier.pop_first() {
        let Some(pivot) = graph.point(pivot_key) else {
            continue;
        };
        // A pivot whose edges were all consumed by earlier loops is spent.
        let Some(neighbor) = graph.neighbor(pivot) else {
            continue;
        };

        let _ = graph.remove_edge(pivot, neighbor);
        match graph.shortest_path(pivot, neighbor) {
            Ok(mut ring) => {
                for vertex in &ring {
                    frontier.remove(&vertex.key());
                }
                // Close the loop back to the pivot.
                ring.push(pivot);
                polygons.push(Polygon::new(ring));
            }
            Err(reason) => {
                // The removed edge was a bridge with no alternate route;
                // possible under degenerate input. This pivot yields no
                // polygon, the rest of the frontier still can.
                debug!(
                    "pivot ({}, {}) yielded no polygon: {}",
                    pivot.x, pivot.y, reason
                );
            }
        }
    }

    polygons.sort_by(|a, b| b.area().total_cmp(&a.area()));
    polygons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::haversine_distance;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    fn random_cloud(n: usize, seed: u64) -> Vec<Point2<f64>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Point2::new(rng.random_range(0.0..4.0), rng.random_range(0.0..4.0)))
            .collect()
    }

    /// Two 4x4 unit grids separated by a wide gap.
    fn two_clusters() -> Vec<Point2<f64>> {
        let mut points = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                points.push(Point2::new(i as f64, j as f64));
                points.push(Point2::new(i as f64 + 50.0, j as f64));
            }
        }
        points
    }

    #[test]
    fn test_quantile_method7() {
        let sample = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile_method7(&sample, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile_method7(&sample, 0.75) - 3.25).abs() < 1e-12);
        assert_eq!(quantile_method7(&sample, 0.0), 1.0);
        assert_eq!(quantile_method7(&sample, 1.0), 4.0);

        let odd = [10.0, 20.0, 30.0];
        assert_eq!(quantile_method7(&odd, 0.5), 20.0);
        assert!((quantile_method7(&odd, 0.25) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_edges_single_triangle() {
        let triangle = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        assert_eq!(boundary_edges(&[triangle]).len(), 3);
    }

    #[test]
    fn test_boundary_edges_shared_edge_cancels() {
        // Two CCW triangles tiling the unit square; the diagonal appears
        // once in each direction and must cancel.
        let lower = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        let upper = Triangle::new(
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        );
        let boundary = boundary_edges(&[lower, upper]);
        assert_eq!(boundary.len(), 4);

        let diagonal = Edge::new(Point2::new(1.0, 0.0), Point2::new(0.0, 1.0));
        assert!(boundary.iter().all(|e| e.key() != diagonal.key()));
        assert!(boundary.iter().all(|e| e.key() != diagonal.reversed().key()));
    }

    #[test]
    fn test_boundary_edges_same_direction_duplicate_skipped() {
        // A CW triangle glued onto a CCW one repeats (0,0)->(1,0) in the
        // same direction; the duplicate is skipped, not cancelled.
        let ccw = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        let cw = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, -1.0),
        );
        assert_eq!(boundary_edges(&[ccw, cw]).len(), 5);
    }

    #[test]
    fn test_alpha_triangles_reject_long_sides() {
        let points = two_clusters();
        let triangles = delaunay_triangles(&points);
        let admissible = alpha_triangles(&triangles, DEFAULT_ALPHA, &euclidean_distance).unwrap();

        assert!(!admissible.is_empty());
        assert!(admissible.len() < triangles.len());
        for triangle in &admissible {
            let [a, b, c] = triangle.vertices();
            for d in [
                euclidean_distance(a, b),
                euclidean_distance(b, c),
                euclidean_distance(c, a),
            ] {
                assert!(d < 2.0, "gap-spanning side {d} survived the fence");
            }
        }
    }

    #[test]
    fn test_not_enough_points() {
        let points = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert_eq!(
            alpha_shape(&points),
            Err(HullError::NotEnoughPoints { count: 2 })
        );
    }

    #[test]
    fn test_collinear_input_fails_fence() {
        let points: Vec<_> = (0..10).map(|i| Point2::new(i as f64, 0.0)).collect();
        assert_eq!(
            alpha_shape(&points),
            Err(HullError::UndefinedFence { samples: 0 })
        );
    }

    #[test]
    fn test_square_with_center() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.5, 0.5),
        ];
        let polygons = alpha_shape(&points).unwrap();
        assert_eq!(polygons.len(), 1);
        assert!((polygons[0].area() - 1.0).abs() < 1e-12);

        // Explicitly closed ring: 4 corners plus the repeated pivot
        let ring = &polygons[0].vertices;
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_two_clusters_give_two_polygons() {
        let polygons = alpha_shape(&two_clusters()).unwrap();
        assert_eq!(polygons.len(), 2);
        // Each cluster's boundary is a 3x3 square
        assert!((polygons[0].area() - 9.0).abs() < 1e-9);
        assert!((polygons[1].area() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_alpha_tends_toward_convex_hull() {
        // With a huge fence every triangle is admitted and the two clusters
        // merge into a single outline.
        let polygons = alpha_shape_polygons(&two_clusters(), 500.0, euclidean_distance).unwrap();
        assert_eq!(polygons.len(), 1);
        assert!(polygons[0].area() > 9.0 * 2.0);
    }

    #[test]
    fn test_polygons_sorted_by_descending_area() {
        let points = random_cloud(5000, 42);
        let polygons = alpha_shape(&points).unwrap();
        for pair in polygons.windows(2) {
            assert!(pair[0].area() >= pair[1].area());
        }
    }

    #[test]
    fn test_dense_square_cloud() {
        let points = random_cloud(5000, 42);
        let polygons = alpha_shape(&points).unwrap();
        assert!(!polygons.is_empty());

        let largest = polygons[0].area();
        assert!((largest - 16.0).abs() < 0.5, "largest area {largest}");
    }

    #[test]
    fn test_annulus_yields_outer_and_inner_boundary() {
        let center = Point2::new(2.0, 2.0);
        let points: Vec<_> = random_cloud(5000, 42)
            .into_iter()
            .filter(|&p| {
                let r = euclidean_distance(p, center);
                r > 1.0 && r < 2.0_f64.sqrt()
            })
            .collect();

        let polygons = alpha_shape(&points).unwrap();
        assert!(polygons.len() >= 2, "got {} polygons", polygons.len());

        let outer = polygons[0].area();
        let inner = polygons[1].area();
        assert!(outer > PI && outer < 2.0 * PI, "outer area {outer}");
        assert!(inner > PI && inner < outer, "inner area {inner}");
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let points = random_cloud(2000, 7);
        let first = alpha_shape(&points).unwrap();
        let second = alpha_shape(&points).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert!((a.area() - b.area()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_haversine_metric_strategy() {
        // A small lon/lat patch; the injected metric drives both the fence
        // and the stitching weights.
        let points = vec![
            Point2::new(0.00, 0.00),
            Point2::new(0.01, 0.00),
            Point2::new(0.01, 0.01),
            Point2::new(0.00, 0.01),
            Point2::new(0.005, 0.005),
        ];
        let polygons = alpha_shape_polygons(&points, DEFAULT_ALPHA, haversine_distance).unwrap();
        assert_eq!(polygons.len(), 1);
    }
}
