//! Directed edges and triangles over [`Point2`] vertices.

use super::{Point2, PointKey};

/// A directed edge between two points.
///
/// The edge is undirected in meaning, but the `(source, target)` order fixed
/// at construction is significant for boundary extraction: interior edges of
/// a consistently wound triangulation appear once in each direction and
/// cancel, while boundary edges survive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: Point2<f64>,
    pub target: Point2<f64>,
}

impl Edge {
    /// Creates a new directed edge.
    #[inline]
    pub fn new(source: Point2<f64>, target: Point2<f64>) -> Self {
        Self { source, target }
    }

    /// Returns the edge with source and target swapped.
    #[inline]
    pub fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }

    /// Returns the canonical key of this edge: the canonical keys of both
    /// endpoints in `(source, target)` order. An edge and its reverse have
    /// distinct keys.
    #[inline]
    pub fn key(self) -> EdgeKey {
        EdgeKey {
            source: self.source.key(),
            target: self.target.key(),
        }
    }
}

/// Canonical identity of an [`Edge`], directional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    source: PointKey,
    target: PointKey,
}

/// A triangle produced by Delaunay triangulation.
///
/// Vertices are kept in the winding order the triangulator emitted; boundary
/// extraction relies on that order being consistent across all triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point2<f64>,
    pub b: Point2<f64>,
    pub c: Point2<f64>,
}

impl Triangle {
    /// Creates a new triangle from its vertices.
    #[inline]
    pub fn new(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Self {
        Self { a, b, c }
    }

    /// Returns the three vertices in order.
    #[inline]
    pub fn vertices(self) -> [Point2<f64>; 3] {
        [self.a, self.b, self.c]
    }

    /// Returns the three directed sides `a→b`, `b→c`, `c→a`.
    #[inline]
    pub fn sides(self) -> [Edge; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }
}
