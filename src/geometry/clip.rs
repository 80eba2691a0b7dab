//! Half-plane clipping of convex polygons

use glam::DVec2;

use super::{cross_product, interpolate_segment, segment_and_line_intersection, Line, Polygon};
use crate::error::{Result, VoronoiError};
use crate::instrument::{Collector, NoopCollector, Operation};

/// Crossings closer than this are the same crossing seen from two edges
const MERGE_DISTANCE: f64 = 1e-12;

/// Rounding slack below `t = 0`, so a line through a vertex is not lost
/// between the edges on either side of it
const PARAM_TOLERANCE: f64 = 1e-12;

/// Where a cut line crosses a polygon edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intercept {
    /// Crossing point
    pub point: DVec2,
    /// Index of the edge it lies on (edge `i` runs from vertex `i` to `i + 1`)
    pub edge: usize,
    /// Parameter along that edge, in `[0, 1)`
    pub t: f64,
}

/// Restrict a convex polygon to the side of `line` that contains `center`
///
/// See [`cut_shape_with`].
pub fn cut_shape(polygon: &Polygon, center: DVec2, line: &Line) -> Result<Polygon> {
    cut_shape_with(polygon, center, line, &NoopCollector)
}

/// Restrict a convex polygon to the side of `line` that contains `center`,
/// reporting work to `collector`
///
/// A convex polygon is crossed by a line on exactly zero or two edges. With no
/// crossing the polygon is returned unchanged. With two, the result is the
/// first intercept, the original vertices between the two crossed edges, and
/// the second intercept, where "first" is chosen by the sign of the cross
/// product of the intercepts taken relative to `center`, corrected for the
/// polygon's winding.
///
/// Edge parameters are taken from `[0, 1)`, so a line through a vertex is
/// counted once. A line touching the polygon only at a vertex leaves it
/// unchanged.
///
/// # Errors
///
/// Returns `InvariantViolation`, carrying the polygon, the line, and every
/// intercept found, for any other crossing count.
pub fn cut_shape_with(
    polygon: &Polygon,
    center: DVec2,
    line: &Line,
    collector: &dyn Collector,
) -> Result<Polygon> {
    collector.count(Operation::CutShape);

    let mut intercepts: Vec<Intercept> = Vec::with_capacity(2);
    for (edge, segment) in polygon.edges().enumerate() {
        collector.count(Operation::SegmentAndLineIntersection);
        let Some(t) = segment_and_line_intersection(&segment, line) else {
            continue;
        };
        if !(-PARAM_TOLERANCE..1.0).contains(&t) {
            continue;
        }
        let t = t.max(0.0);

        let point = interpolate_segment(&segment, t);
        if intercepts
            .iter()
            .any(|i| i.point.distance(point) < MERGE_DISTANCE)
        {
            continue;
        }
        intercepts.push(Intercept { point, edge, t });
    }

    match intercepts.len() {
        0 => Ok(polygon.clone()),
        1 if is_vertex(polygon, &intercepts[0]) => Ok(polygon.clone()),
        2 => Ok(splice(polygon, center, intercepts[0], intercepts[1])),
        crossings => Err(VoronoiError::InvariantViolation {
            crossings,
            polygon: polygon.vertices().to_vec(),
            line: *line,
            intercepts,
        }),
    }
}

fn is_vertex(polygon: &Polygon, intercept: &Intercept) -> bool {
    let v = polygon.vertices();
    let start = v[intercept.edge];
    let end = v[(intercept.edge + 1) % v.len()];
    intercept.point.distance(start) < MERGE_DISTANCE || intercept.point.distance(end) < MERGE_DISTANCE
}

/// Keep the chain between the two intercepts that lies on `center`'s side
fn splice(polygon: &Polygon, center: DVec2, a: Intercept, b: Intercept) -> Polygon {
    let vertices = polygon.vertices();
    let n = vertices.len();

    // For counterclockwise winding, the chain from `first` onward runs
    // counterclockwise and must bend around `center`
    let orientation = match polygon.signed_area() {
        area if area < 0.0 => -1.0,
        _ => 1.0,
    };
    let (first, second) = if cross_product(a.point - center, b.point - center) * orientation > 0.0 {
        (b, a)
    } else {
        (a, b)
    };

    let between = (second.edge + n - first.edge) % n;
    let mut out: Vec<DVec2> = Vec::with_capacity(between + 2);
    push_distinct(&mut out, first.point);
    for k in 1..=between {
        push_distinct(&mut out, vertices[(first.edge + k) % n]);
    }
    push_distinct(&mut out, second.point);

    if out.len() > 1 && out[0] == out[out.len() - 1] {
        out.pop();
    }
    Polygon::new(out)
}

fn push_distinct(out: &mut Vec<DVec2>, p: DVec2) {
    if out.last() != Some(&p) {
        out.push(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::instrument::CallCounter;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon {
        Polygon::from_rect(&Rect::unit())
    }

    fn vertical_line(x: f64) -> Line {
        Line::new(DVec2::new(x, 0.5), DVec2::new(0.0, 1.0))
    }

    fn has_vertex(poly: &Polygon, v: DVec2) -> bool {
        poly.vertices().iter().any(|p| p.distance(v) < 1e-12)
    }

    #[test]
    fn test_cut_keeps_center_side() {
        let left = cut_shape(&unit_square(), DVec2::new(0.25, 0.5), &vertical_line(0.5)).unwrap();
        assert_eq!(left.len(), 4);
        assert_relative_eq!(left.area(), 0.5);
        assert!(has_vertex(&left, DVec2::new(0.0, 0.0)));
        assert!(has_vertex(&left, DVec2::new(0.5, 1.0)));
        assert!(!has_vertex(&left, DVec2::new(1.0, 0.0)));

        let right = cut_shape(&unit_square(), DVec2::new(0.75, 0.5), &vertical_line(0.5)).unwrap();
        assert_relative_eq!(right.area(), 0.5);
        assert!(has_vertex(&right, DVec2::new(1.0, 1.0)));
        assert!(!has_vertex(&right, DVec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_cut_preserves_winding() {
        let cut = cut_shape(&unit_square(), DVec2::new(0.25, 0.5), &vertical_line(0.5)).unwrap();
        assert!(cut.signed_area() > 0.0);
        assert!(cut.is_convex());
    }

    #[test]
    fn test_cut_clockwise_polygon() {
        let mut vertices = unit_square().into_vertices();
        vertices.reverse();
        let clockwise = Polygon::new(vertices);

        let cut = cut_shape(&clockwise, DVec2::new(0.2, 0.5), &vertical_line(0.4)).unwrap();
        assert_relative_eq!(cut.area(), 0.4);
        assert!(cut.signed_area() < 0.0);
        assert!(cut.contains(DVec2::new(0.2, 0.5)));
    }

    #[test]
    fn test_cut_corner_adds_vertex() {
        // Diagonal through (0.8, 0) and (1, 0.2) shaves off the bottom-right corner
        let line = Line::new(DVec2::new(0.9, 0.1), DVec2::new(1.0, 1.0));
        let cut = cut_shape(&unit_square(), DVec2::new(0.5, 0.5), &line).unwrap();

        assert_eq!(cut.len(), 5);
        assert!(has_vertex(&cut, DVec2::new(0.8, 0.0)));
        assert!(has_vertex(&cut, DVec2::new(1.0, 0.2)));
        assert!(!has_vertex(&cut, DVec2::new(1.0, 0.0)));
        assert_relative_eq!(cut.area(), 1.0 - 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_cut_keeps_corner_only() {
        let line = Line::new(DVec2::new(0.9, 0.1), DVec2::new(1.0, 1.0));
        let cut = cut_shape(&unit_square(), DVec2::new(0.95, 0.01), &line).unwrap();

        assert_eq!(cut.len(), 3);
        assert_relative_eq!(cut.area(), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_cut_through_opposite_corners() {
        let line = Line::new(DVec2::new(0.5, 0.5), DVec2::new(1.0, -1.0));
        let cut = cut_shape(&unit_square(), DVec2::new(0.2, 0.2), &line).unwrap();

        assert_eq!(cut.len(), 3);
        assert_relative_eq!(cut.area(), 0.5);
        assert!(has_vertex(&cut, DVec2::ZERO));
    }

    #[test]
    fn test_line_missing_polygon_is_noop() {
        let cut = cut_shape(&unit_square(), DVec2::new(0.5, 0.5), &vertical_line(3.0)).unwrap();
        assert_eq!(cut, unit_square());
    }

    #[test]
    fn test_line_touching_vertex_is_noop() {
        let line = Line::new(DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0));
        let cut = cut_shape(&unit_square(), DVec2::new(0.5, 0.5), &line).unwrap();
        assert_eq!(cut, unit_square());
    }

    #[test]
    fn test_line_along_edge_is_noop() {
        let line = Line::new(DVec2::new(1.0, 0.3), DVec2::new(0.0, 1.0));
        let cut = cut_shape(&unit_square(), DVec2::new(0.5, 0.5), &line).unwrap();
        assert_eq!(cut, unit_square());
    }

    #[test]
    fn test_non_convex_polygon_reports_violation() {
        // A "W" shape crossed by a horizontal line six times
        let w = Polygon::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.75, 0.2),
            DVec2::new(0.5, 1.0),
            DVec2::new(0.25, 0.2),
            DVec2::new(0.0, 1.0),
        ]);
        let line = Line::new(DVec2::new(0.5, 0.5), DVec2::new(1.0, 0.0));

        match cut_shape(&w, DVec2::new(0.5, 0.1), &line) {
            Err(VoronoiError::InvariantViolation {
                crossings,
                polygon,
                intercepts,
                ..
            }) => {
                assert_eq!(crossings, 6);
                assert_eq!(polygon.len(), 7);
                assert_eq!(intercepts.len(), 6);
            }
            other => panic!("expected invariant violation, got {:?}", other),
        }
    }

    #[test]
    fn test_cut_vertex_count_bound() {
        let mut poly = unit_square();
        let center = DVec2::new(0.45, 0.55);
        let lines = [
            Line::new(DVec2::new(0.9, 0.1), DVec2::new(1.0, 1.0)),
            Line::new(DVec2::new(0.1, 0.1), DVec2::new(1.0, -1.0)),
            Line::new(DVec2::new(0.8, 0.5), DVec2::new(0.2, 1.0)),
            Line::new(DVec2::new(0.5, 0.95), DVec2::new(1.0, 0.1)),
        ];
        for line in &lines {
            let before = poly.len();
            poly = cut_shape(&poly, center, line).unwrap();
            assert!(poly.len() <= before + 1);
            assert!(poly.is_convex());
            assert!(poly.contains(center));
        }
    }

    #[test]
    fn test_cut_counts_operations() {
        let counter = CallCounter::new();
        cut_shape_with(&unit_square(), DVec2::new(0.25, 0.5), &vertical_line(0.5), &counter).unwrap();

        assert_eq!(counter.get(Operation::CutShape), 1);
        assert_eq!(counter.get(Operation::SegmentAndLineIntersection), 4);
    }
}
