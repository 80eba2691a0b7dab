//! Voronoi Cell Structure
//!
//! One site paired with the convex polygon of points closer to it than to any
//! other site.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Polygon;

/// A single cell of a planar Voronoi diagram
///
/// # Design Notes
///
/// Cells are finalized once every neighbor of their site has been clipped
/// against, and are never mutated afterwards. Rebuilding a diagram from the
/// same sites and configuration yields identical cells, so persisting the sites
/// is enough to reproduce a run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Index of the owning site (0 to site_count-1)
    pub id: usize,

    /// Position of the owning site
    ///
    /// Always strictly inside `polygon` unless the polygon is degenerate.
    pub site: DVec2,

    /// Cell boundary, in the winding of the bounding rectangle (counterclockwise)
    pub polygon: Polygon,
}

impl VoronoiCell {
    /// Create a new Voronoi cell
    ///
    /// This is typically called during construction, not by user code.
    pub fn new(id: usize, site: DVec2, polygon: Polygon) -> Self {
        Self { id, site, polygon }
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        self.polygon.vertices()
    }

    /// Get the vertex count (polygon complexity)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.polygon.len()
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    /// Area centroid of the cell, which generally differs from the site
    pub fn centroid(&self) -> DVec2 {
        self.polygon.centroid()
    }

    /// Strict interior test
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        self.polygon.contains(point)
    }

    /// Euclidean distance between the sites of two cells
    #[inline]
    pub fn distance_to(&self, other: &VoronoiCell) -> f64 {
        self.site.distance(other.site)
    }
}
