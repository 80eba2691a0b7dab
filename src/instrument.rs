//! Call counting and step tracing
//!
//! Components that do measurable work accept a `&dyn Collector`. The default
//! is [`NoopCollector`]; [`CallCounter`] tallies primitive calls and
//! [`TraceRecorder`] keeps every intermediate polygon and relaxation snapshot
//! for an animation front end.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use glam::DVec2;

use crate::geometry::Polygon;

/// Instrumented operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    SegmentIntersection,
    SegmentAndLineIntersection,
    /// Bisector of a site and a candidate neighbor, as cut by the clipper
    Bisector,
    CutShape,
    Repulsion,
    AddSegment,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::SegmentIntersection,
        Operation::SegmentAndLineIntersection,
        Operation::Bisector,
        Operation::CutShape,
        Operation::Repulsion,
        Operation::AddSegment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::SegmentIntersection => "segment_intersection",
            Operation::SegmentAndLineIntersection => "segment_and_line_intersection",
            Operation::Bisector => "bisector",
            Operation::CutShape => "cut_shape",
            Operation::Repulsion => "repulsion",
            Operation::AddSegment => "add_segment",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Observer injected into construction and relaxation
///
/// Every method has a no-op default. Cell construction may run on several
/// threads, hence the `Sync` bound.
pub trait Collector: Sync {
    /// One call of `op` happened
    fn count(&self, _op: Operation) {}

    /// `site`'s polygon after clipping against `neighbor`'s bisector
    fn on_clip(&self, _site: usize, _neighbor: usize, _polygon: &Polygon) {}

    /// Site positions after relaxation pass `pass` completed
    fn on_relaxation_pass(&self, _pass: usize, _sites: &[DVec2]) {}
}

/// Collector that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCollector;

impl Collector for NoopCollector {}

/// Counts calls per [`Operation`]
#[derive(Debug, Default)]
pub struct CallCounter {
    counts: [AtomicU64; Operation::ALL.len()],
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, op: Operation) -> u64 {
        self.counts[op.slot()].load(Ordering::Relaxed)
    }

    /// Non-zero counts keyed by operation
    pub fn report(&self) -> BTreeMap<Operation, u64> {
        Operation::ALL
            .iter()
            .map(|&op| (op, self.get(op)))
            .filter(|&(_, n)| n > 0)
            .collect()
    }

    pub fn reset(&self) {
        for c in &self.counts {
            c.store(0, Ordering::Relaxed);
        }
    }
}

impl Collector for CallCounter {
    fn count(&self, op: Operation) {
        self.counts[op.slot()].fetch_add(1, Ordering::Relaxed);
    }
}

/// A single recorded clip
#[derive(Debug, Clone, PartialEq)]
pub struct ClipStep {
    pub site: usize,
    pub neighbor: usize,
    pub polygon: Polygon,
}

/// Records intermediate polygons and relaxation snapshots
///
/// With the `parallel` feature, clip steps from different sites interleave;
/// steps for any one site stay in processing order.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    clips: Mutex<Vec<ClipStep>>,
    passes: Mutex<Vec<Vec<DVec2>>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded clip step
    pub fn clip_steps(&self) -> Vec<ClipStep> {
        self.clips.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Clip steps for one site, in processing order
    pub fn clip_steps_for(&self, site: usize) -> Vec<ClipStep> {
        self.clip_steps()
            .into_iter()
            .filter(|s| s.site == site)
            .collect()
    }

    /// Site positions after each relaxation pass
    pub fn relaxation_passes(&self) -> Vec<Vec<DVec2>> {
        self.passes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Collector for TraceRecorder {
    fn on_clip(&self, site: usize, neighbor: usize, polygon: &Polygon) {
        self.clips
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ClipStep {
                site,
                neighbor,
                polygon: polygon.clone(),
            });
    }

    fn on_relaxation_pass(&self, _pass: usize, sites: &[DVec2]) {
        self.passes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sites.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_counter() {
        let counter = CallCounter::new();
        counter.count(Operation::CutShape);
        counter.count(Operation::CutShape);
        counter.count(Operation::Repulsion);

        assert_eq!(counter.get(Operation::CutShape), 2);
        assert_eq!(counter.get(Operation::AddSegment), 0);

        let report = counter.report();
        assert_eq!(report.len(), 2);
        assert_eq!(report[&Operation::Repulsion], 1);

        counter.reset();
        assert!(counter.report().is_empty());
    }

    #[test]
    fn test_trace_recorder() {
        let trace = TraceRecorder::new();
        let poly = Polygon::new(vec![DVec2::ZERO, DVec2::X, DVec2::Y]);
        trace.on_clip(0, 1, &poly);
        trace.on_clip(1, 0, &poly);
        trace.on_relaxation_pass(0, &[DVec2::ONE]);

        assert_eq!(trace.clip_steps().len(), 2);
        assert_eq!(trace.clip_steps_for(1)[0].neighbor, 0);
        assert_eq!(trace.relaxation_passes(), vec![vec![DVec2::ONE]]);
    }

    #[test]
    fn test_trace_recorder_survives_poisoned_lock() {
        let trace = TraceRecorder::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = trace.clips.lock().unwrap();
            panic!("panic while holding the trace");
        }));
        assert!(result.is_err());
        assert!(trace.clips.is_poisoned());

        trace.on_clip(2, 3, &Polygon::default());
        assert_eq!(trace.clip_steps_for(2).len(), 1);
    }

    #[test]
    fn test_noop_collector_is_silent() {
        let noop = NoopCollector;
        noop.count(Operation::CutShape);
        noop.on_clip(0, 0, &Polygon::default());
    }

    #[test]
    fn test_operation_names_unique() {
        let mut names: Vec<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Operation::ALL.len());
    }
}
