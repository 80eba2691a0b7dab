//! Convex polygons
//!
//! Cells are stored as vertex lists. Area, centroid and containment assume a
//! convex polygon in either winding.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{cross_product, Rect, Segment};

/// A closed convex polygon
///
/// Vertices are stored in a consistent winding order (either direction); the
/// last vertex connects back to the first.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<DVec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<DVec2>) -> Self {
        Self { vertices }
    }

    /// The four corners of `rect`, counterclockwise from `rect.min`
    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.corners().to_vec())
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    #[inline]
    pub fn into_vertices(self) -> Vec<DVec2> {
        self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edge `i`, running from vertex `i` to vertex `i + 1` (wrapping)
    ///
    /// Returns `None` for a polygon with no vertices.
    pub fn edge(&self, i: usize) -> Option<Segment> {
        let n = self.vertices.len();
        if n == 0 {
            return None;
        }
        Some(Segment::new(self.vertices[i % n], self.vertices[(i + 1) % n]))
    }

    /// All edges in vertex order
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.vertices.len()).filter_map(move |i| self.edge(i))
    }

    /// Shoelace area, positive for counterclockwise winding
    pub fn signed_area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        self.edges()
            .map(|e| cross_product(e.start, e.end))
            .sum::<f64>()
            * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area centroid; falls back to the vertex average for degenerate polygons
    pub fn centroid(&self) -> DVec2 {
        let n = self.vertices.len();
        if n == 0 {
            return DVec2::ZERO;
        }

        let mut weighted = DVec2::ZERO;
        let mut area = 0.0;
        for e in self.edges() {
            let cross = cross_product(e.start, e.end);
            area += cross;
            weighted += (e.start + e.end) * cross;
        }

        if area.abs() < 1e-12 {
            return self.vertices.iter().copied().sum::<DVec2>() / n as f64;
        }
        weighted / (3.0 * area)
    }

    /// True if every turn goes the same way (collinear runs are allowed)
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut sign = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let c = self.vertices[(i + 2) % n];
            let turn = cross_product(b - a, c - b);
            if turn.abs() < 1e-12 {
                continue;
            }
            if sign == 0.0 {
                sign = turn.signum();
            } else if turn.signum() != sign {
                return false;
            }
        }
        sign != 0.0
    }

    /// Strict interior test; points on an edge are outside
    pub fn contains(&self, p: DVec2) -> bool {
        let orientation = self.signed_area().signum();
        if orientation == 0.0 {
            return false;
        }
        self.edges()
            .all(|e| cross_product(e.delta(), p - e.start) * orientation > 0.0)
    }
}

impl From<Vec<DVec2>> for Polygon {
    fn from(vertices: Vec<DVec2>) -> Self {
        Self::new(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Polygon {
        Polygon::from_rect(&Rect::unit())
    }

    #[test]
    fn test_from_rect_is_counterclockwise() {
        let poly = square();
        assert_eq!(poly.len(), 4);
        assert_relative_eq!(poly.signed_area(), 1.0);
        assert!(poly.is_convex());
    }

    #[test]
    fn test_edge_wraps_and_handles_empty() {
        let poly = square();
        let last = poly.edge(3).unwrap();
        assert_eq!(last.start, DVec2::new(0.0, 1.0));
        assert_eq!(last.end, DVec2::ZERO);
        assert_eq!(poly.edge(5), poly.edge(1));

        let empty = Polygon::default();
        assert_eq!(empty.edge(0), None);
        assert_eq!(empty.edges().count(), 0);
    }

    #[test]
    fn test_centroid() {
        let c = square().centroid();
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);

        let tri = Polygon::new(vec![DVec2::ZERO, DVec2::new(3.0, 0.0), DVec2::new(0.0, 3.0)]);
        let c = tri.centroid();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.0);
    }

    #[test]
    fn test_clockwise_winding() {
        let mut vertices = square().into_vertices();
        vertices.reverse();
        let poly = Polygon::new(vertices);

        assert_relative_eq!(poly.signed_area(), -1.0);
        assert_relative_eq!(poly.area(), 1.0);
        assert!(poly.is_convex());
        assert!(poly.contains(DVec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_contains_is_strict() {
        let poly = square();
        assert!(poly.contains(DVec2::new(0.1, 0.9)));
        assert!(!poly.contains(DVec2::new(0.0, 0.5)));
        assert!(!poly.contains(DVec2::new(1.5, 0.5)));
    }

    #[test]
    fn test_is_convex_rejects_dent() {
        let dented = Polygon::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.5, 0.2),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]);
        assert!(!dented.is_convex());
    }

    #[test]
    fn test_edges_wrap() {
        let poly = square();
        let last = poly.edges().last().unwrap();
        assert_eq!(last.start, DVec2::new(0.0, 1.0));
        assert_eq!(last.end, DVec2::ZERO);
    }
}
