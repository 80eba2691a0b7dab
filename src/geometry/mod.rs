//! Planar geometry primitives
//!
//! Value types for points, segments, lines and rectangles, the intersection
//! math built on them, convex polygons, and the half-plane clipper.

mod clip;
mod math;
mod polygon;

pub use clip::{cut_shape, cut_shape_with, Intercept};
pub use math::{
    bisector_line, compare_segment_length, cross_product, interpolate_segment,
    perpendicular_bisector, segment_and_line_intersection, segment_intersection,
    segments_intersect,
};
pub use polygon::Polygon;

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A site or polygon vertex in the plane
pub type Point = DVec2;

/// An ordered pair of points
///
/// Direction matters for the parametric intersection formulas
/// (`t = 0` at `start`, `t = 1` at `end`) but not for clipping.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    #[inline]
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`
    #[inline]
    pub fn delta(&self) -> DVec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.delta().length_squared()
    }

    /// Same segment traversed the other way
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// True if both segments have the same endpoints, in either order
    pub fn same_endpoints(&self, other: &Segment) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

/// An infinite line through `point` along `direction`
///
/// Used for perpendicular bisectors. `direction` need not be normalized.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub point: DVec2,
    pub direction: DVec2,
}

impl Line {
    #[inline]
    pub fn new(point: DVec2, direction: DVec2) -> Self {
        Self { point, direction }
    }

    /// Which side of the line `p` lies on
    ///
    /// Positive when `p` is counterclockwise from `direction`, negative when
    /// clockwise, zero when on the line.
    #[inline]
    pub fn side_of(&self, p: DVec2) -> f64 {
        cross_product(self.direction, p - self.point)
    }
}

/// Axis-aligned bounding rectangle
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// The unit square `[0, 1] x [0, 1]`
    pub fn unit() -> Self {
        Self::new(DVec2::ZERO, DVec2::ONE)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Rail a point onto the rectangle, coordinate by coordinate
    #[inline]
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        p.clamp(self.min, self.max)
    }

    /// Corners in counterclockwise order, starting at `min`
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_unit() {
        let rect = Rect::default();
        assert_eq!(rect.width(), 1.0);
        assert_eq!(rect.height(), 1.0);
        assert!(rect.contains(DVec2::new(1.0, 0.0)));
        assert!(!rect.contains(DVec2::new(1.0001, 0.5)));
    }

    #[test]
    fn test_rect_clamp_rails_to_boundary() {
        let rect = Rect::unit();
        assert_eq!(rect.clamp(DVec2::new(-0.3, 1.7)), DVec2::new(0.0, 1.0));
        assert_eq!(rect.clamp(DVec2::new(0.25, 0.75)), DVec2::new(0.25, 0.75));
    }

    #[test]
    fn test_line_side_of() {
        let line = Line::new(DVec2::new(0.5, 0.0), DVec2::new(0.0, 1.0));
        assert!(line.side_of(DVec2::new(0.0, 0.5)) > 0.0);
        assert!(line.side_of(DVec2::new(1.0, 0.5)) < 0.0);
        assert_eq!(line.side_of(DVec2::new(0.5, 0.9)), 0.0);
    }

    #[test]
    fn test_segment_same_endpoints() {
        let a = Segment::new(DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0));
        assert!(a.same_endpoints(&a.reversed()));
        assert!(!a.same_endpoints(&Segment::new(DVec2::ZERO, DVec2::X)));
    }
}
