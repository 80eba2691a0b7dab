//! Error types for planar Voronoi construction

use glam::DVec2;
use thiserror::Error;

use crate::geometry::{Intercept, Line};

/// Errors that can occur while relaxing sites or building cells
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two lines were parallel where a crossing was required
    #[error("degenerate intersection: {0}")]
    DegenerateIntersection(String),

    /// A convex polygon was crossed by a cut line a number of times other than 0 or 2
    #[error(
        "convexity invariant violated: cut line through {} (direction {}) crossed a {}-vertex polygon {crossings} times",
        .line.point,
        .line.direction,
        .polygon.len()
    )]
    InvariantViolation {
        /// Number of edges the cut line crossed
        crossings: usize,
        /// Polygon being clipped, as it was before the cut
        polygon: Vec<DVec2>,
        /// The cut line
        line: Line,
        /// Every crossing that was found
        intercepts: Vec<Intercept>,
    },

    /// Two sites share the exact same position
    #[error("coincident sites at {position}")]
    CoincidentSites {
        /// The shared position
        position: DVec2,
    },

    /// Building the cell of one site failed
    #[error("failed to build cell for site {site} (neighbor {neighbor}): {source}")]
    CellConstruction {
        /// Index of the site whose cell was being built
        site: usize,
        /// Index of the neighbor being processed when the failure occurred
        neighbor: usize,
        /// Underlying failure
        #[source]
        source: Box<VoronoiError>,
    },

    /// A relaxation pass failed
    #[error("relaxation pass {pass} failed between sites {site} and {neighbor}: {source}")]
    Relaxation {
        /// Zero-based pass number
        pass: usize,
        /// Site being displaced
        site: usize,
        /// Site exerting the repulsion
        neighbor: usize,
        /// Underlying failure
        #[source]
        source: Box<VoronoiError>,
    },
}

impl VoronoiError {
    /// Innermost error, unwrapping any site/pass context
    pub fn root_cause(&self) -> &VoronoiError {
        match self {
            VoronoiError::CellConstruction { source, .. }
            | VoronoiError::Relaxation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for voronoi operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
