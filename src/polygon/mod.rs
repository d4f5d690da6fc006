//! Polygon type and shoelace area.

use crate::primitives::Point2;
use num_traits::Float;

/// A polygon represented as an ordered sequence of vertices.
///
/// The vertex list is treated cyclically: the last vertex connects back to
/// the first. Polygons produced by the hull pipeline carry an explicit
/// closing vertex (the stitching pivot repeated at the end); the duplicate
/// contributes nothing to the cyclic area sum, so both open and explicitly
/// closed vertex lists measure the same.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    /// The vertices of the polygon, in traversal order.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a new polygon from vertices.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the signed area: positive for counter-clockwise winding,
    /// negative for clockwise.
    pub fn signed_area(&self) -> F {
        polygon_signed_area(&self.vertices)
    }

    /// Returns the absolute area.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }
}

/// Computes the signed area of a polygon using the shoelace formula.
///
/// The vertex list is treated cyclically, including the wrap-around term
/// connecting the last vertex back to the first. Returns zero for fewer than
/// 3 vertices.
///
/// # Example
///
/// ```
/// use concavum::polygon::polygon_signed_area;
/// use concavum::Point2;
///
/// let square = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(1.0, 0.0),
/// ];
///
/// // Clockwise winding: area is -1
/// assert_eq!(polygon_signed_area(&square), -1.0);
/// ```
pub fn polygon_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }

    let n = vertices.len();
    let mut sum = F::zero();
    for i in 0..n {
        let j = (i + 1) % n;
        sum = sum + vertices[i].x * vertices[j].y;
        sum = sum - vertices[j].x * vertices[i].y;
    }

    sum / F::from(2.0).unwrap()
}
