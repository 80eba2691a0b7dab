//! Greedy shortest-edge triangulation
//!
//! Every pair of points is offered as a segment, in pair order. A new segment
//! knocks out each accepted segment it crosses that is at least as long as
//! itself, and is accepted only if no crossing accepted segment is shorter.
//! Ties favor the newcomer.

use glam::DVec2;
use log::debug;
use std::cmp::Ordering;

use crate::geometry::{compare_segment_length, segments_intersect, Segment};
use crate::instrument::{Collector, NoopCollector, Operation};

/// Triangulate `points` by greedy shortest-edge insertion
///
/// The result never contains two segments that cross; segments meeting at a
/// shared endpoint do not count as crossing.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use rust_voronoi_plane::generation::greedy_triangulation;
///
/// let points = [DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)];
/// assert_eq!(greedy_triangulation(&points).len(), 3);
/// ```
pub fn greedy_triangulation(points: &[DVec2]) -> Vec<Segment> {
    greedy_triangulation_with(points, &NoopCollector)
}

/// [`greedy_triangulation`], reporting to `collector`
pub fn greedy_triangulation_with(points: &[DVec2], collector: &dyn Collector) -> Vec<Segment> {
    let mut accepted: Vec<Segment> = Vec::new();
    let mut invalidated = 0usize;

    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i + 1..] {
            invalidated += add_segment(&mut accepted, Segment::new(a, b), collector);
        }
    }

    debug!(
        "[Greedy] {} points: {} segments accepted, {} invalidated",
        points.len(),
        accepted.len(),
        invalidated
    );

    accepted
}

/// Offer one segment; returns how many accepted segments it removed
fn add_segment(accepted: &mut Vec<Segment>, candidate: Segment, collector: &dyn Collector) -> usize {
    collector.count(Operation::AddSegment);

    let mut doomed = Vec::new();
    let mut blocked = false;

    for (idx, existing) in accepted.iter().enumerate() {
        collector.count(Operation::SegmentIntersection);
        if !segments_intersect(&candidate, existing) {
            continue;
        }
        match compare_segment_length(&candidate, existing) {
            Ordering::Less | Ordering::Equal => doomed.push(idx),
            Ordering::Greater => blocked = true,
        }
    }

    // Knocked-out segments go even when the candidate itself is rejected
    for &idx in doomed.iter().rev() {
        accepted.remove(idx);
    }
    if !blocked {
        accepted.push(candidate);
    }

    doomed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::generate_sites;
    use crate::geometry::Rect;
    use crate::instrument::CallCounter;

    fn has_segment(segments: &[Segment], a: DVec2, b: DVec2) -> bool {
        segments.iter().any(|s| s.same_endpoints(&Segment::new(a, b)))
    }

    #[test]
    fn test_square_keeps_later_diagonal_on_tie() {
        let p = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ];
        let segments = greedy_triangulation(&p);

        assert_eq!(segments.len(), 5);
        assert!(has_segment(&segments, p[1], p[3]));
        assert!(!has_segment(&segments, p[0], p[2]));
    }

    #[test]
    fn test_shorter_diagonal_wins() {
        let p = [
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 0.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(0.0, 1.0),
        ];
        let segments = greedy_triangulation(&p);

        assert_eq!(segments.len(), 5);
        assert!(has_segment(&segments, p[0], p[2]));
        assert!(!has_segment(&segments, p[1], p[3]));
    }

    #[test]
    fn test_random_points_planar() {
        let points = generate_sites(25, &Rect::unit(), 17);
        let segments = greedy_triangulation(&points);

        assert!(segments.len() <= 3 * points.len() - 6);
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                assert!(!segments_intersect(a, b));
            }
        }
    }

    #[test]
    fn test_trivial_inputs() {
        assert!(greedy_triangulation(&[]).is_empty());
        assert!(greedy_triangulation(&[DVec2::ONE]).is_empty());
        assert_eq!(greedy_triangulation(&[DVec2::ZERO, DVec2::ONE]).len(), 1);
    }

    #[test]
    fn test_counts_add_segment_calls() {
        let points = generate_sites(6, &Rect::unit(), 2);
        let counter = CallCounter::new();
        greedy_triangulation_with(&points, &counter);

        assert_eq!(counter.get(Operation::AddSegment), 15);
        assert!(counter.get(Operation::SegmentIntersection) > 0);
    }
}
