//! Segment and line intersection math
//!
//! Every routine that can meet parallel lines returns `Option`; `None` is the
//! "no solution" case and callers decide what it means for them.

use std::cmp::Ordering;

use glam::DVec2;

use super::{Line, Rect, Segment};
use crate::error::{Result, VoronoiError};

/// Slack allowed when checking that bisector endpoints landed on the rectangle
const BOUNDS_TOLERANCE: f64 = 1e-9;

/// z-component of the 3D cross product of two planar vectors
///
/// Positive when `v2` is counterclockwise from `v1`.
#[inline]
pub fn cross_product(v1: DVec2, v2: DVec2) -> f64 {
    v1.perp_dot(v2)
}

/// Solve for where two segments' supporting lines cross
///
/// Returns `(ta, tb)` such that `a.start + ta * a.delta() == b.start + tb * b.delta()`.
/// Both parameters inside `[0, 1]` means the crossing lies on both segments.
/// Returns `None` when the segments are parallel or collinear.
///
/// ```
/// use glam::DVec2;
/// use rust_voronoi_plane::geometry::{segment_intersection, Segment};
///
/// let a = Segment::new(DVec2::new(1.0, 1.0), DVec2::new(2.0, 2.0));
/// let b = Segment::new(DVec2::new(2.0, 1.0), DVec2::new(1.0, 2.0));
/// assert_eq!(segment_intersection(&a, &b), Some((0.5, 0.5)));
/// ```
pub fn segment_intersection(a: &Segment, b: &Segment) -> Option<(f64, f64)> {
    let ad = a.delta();
    let bd = b.delta();

    let det = ad.x * bd.y - ad.y * bd.x;
    if det == 0.0 {
        return None;
    }

    let w = b.start - a.start;
    let ta = cross_product(w, bd) / det;
    let tb = cross_product(w, ad) / det;
    Some((ta, tb))
}

/// True if the two segments cross within both of their spans
///
/// Segments that share an endpoint never intersect, so chains of adjacent
/// segments are not reported against each other.
pub fn segments_intersect(a: &Segment, b: &Segment) -> bool {
    if a.start == b.start || a.start == b.end || a.end == b.start || a.end == b.end {
        return false;
    }

    match segment_intersection(a, b) {
        Some((ta, tb)) => (0.0..=1.0).contains(&ta) && (0.0..=1.0).contains(&tb),
        None => false,
    }
}

/// Parameter along `segment` where an infinite line crosses it
///
/// A result outside `[0, 1]` means the line crosses the segment's extension,
/// not the segment itself. Returns `None` when the line is parallel to the
/// segment.
pub fn segment_and_line_intersection(segment: &Segment, line: &Line) -> Option<f64> {
    let m = line.direction;

    let det = m.y * (segment.start.x - segment.end.x) - m.x * (segment.start.y - segment.end.y);
    if det == 0.0 {
        return None;
    }

    Some(cross_product(m, line.point - segment.start) / det)
}

/// Compare two segments by length
pub fn compare_segment_length(a: &Segment, b: &Segment) -> Ordering {
    a.length_squared().total_cmp(&b.length_squared())
}

/// Point at parameter `t` along a segment
#[inline]
pub fn interpolate_segment(segment: &Segment, t: f64) -> DVec2 {
    segment.start * (1.0 - t) + segment.end * t
}

/// Cut line equidistant from `p` and `q`
///
/// Passes through the midpoint, with the direction `q - p` rotated 90°
/// counterclockwise.
///
/// # Errors
///
/// Returns `CoincidentSites` if `p == q`.
pub fn bisector_line(p: DVec2, q: DVec2) -> Result<Line> {
    if p == q {
        return Err(VoronoiError::CoincidentSites { position: p });
    }
    Ok(Line::new((p + q) * 0.5, (q - p).perp()))
}

/// Endpoints of the perpendicular bisector of `(p, q)` clipped to `bounds`
///
/// Axis-aligned pairs are handled directly. Otherwise the bisector is
/// intersected with all four boundary lines of the rectangle, the intercepts
/// are ordered by x, and the middle two are the ones lying on the rectangle.
///
/// # Errors
///
/// - `CoincidentSites` if `p == q`
/// - `DegenerateIntersection` if the bisector does not cross `bounds`
pub fn perpendicular_bisector(p: DVec2, q: DVec2, bounds: &Rect) -> Result<Segment> {
    let d = q - p;
    if d == DVec2::ZERO {
        return Err(VoronoiError::CoincidentSites { position: p });
    }

    let mid = (p + q) * 0.5;
    let Rect { min, max } = *bounds;

    let segment = if d.x == 0.0 {
        Segment::new(DVec2::new(min.x, mid.y), DVec2::new(max.x, mid.y))
    } else if d.y == 0.0 {
        Segment::new(DVec2::new(mid.x, min.y), DVec2::new(mid.x, max.y))
    } else {
        // Along the bisector, (x - mid.x) / d.y == -(y - mid.y) / d.x
        let y_at = |x: f64| (x - mid.x) * -d.x / d.y + mid.y;
        let x_at = |y: f64| (y - mid.y) * d.y / -d.x + mid.x;

        let mut intercepts = [
            DVec2::new(min.x, y_at(min.x)),
            DVec2::new(max.x, y_at(max.x)),
            DVec2::new(x_at(min.y), min.y),
            DVec2::new(x_at(max.y), max.y),
        ];
        intercepts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

        Segment::new(intercepts[1], intercepts[2])
    };

    let slack = BOUNDS_TOLERANCE * bounds.width().max(bounds.height());
    let padded = Rect::new(min - DVec2::splat(slack), max + DVec2::splat(slack));
    if !padded.contains(segment.start) || !padded.contains(segment.end) {
        return Err(VoronoiError::DegenerateIntersection(format!(
            "bisector of {} and {} misses the bounding rectangle",
            p, q
        )));
    }

    Ok(segment)
}
