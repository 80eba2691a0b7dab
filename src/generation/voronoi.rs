//! Voronoi cell construction by half-plane clipping
//!
//! Each cell starts as the bounding rectangle and is cut down by the
//! perpendicular bisector between its site and every candidate neighbor. The
//! intersection of those half-planes is the cell, so neighbor order only
//! changes the intermediate polygons, never the result.

use glam::DVec2;
use log::{debug, info};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cell::VoronoiCell;
use crate::error::{Result, VoronoiError};
use crate::geometry::{bisector_line, cut_shape_with, Polygon, Rect};
use crate::instrument::{Collector, NoopCollector, Operation};
use crate::spatial::BucketGrid;

/// Where candidate neighbors for a site come from
#[derive(Debug, Clone)]
pub enum NeighborSource {
    /// Every other site; exact
    AllPairs,
    /// Sites in the surrounding 3x3 buckets; faster but approximate
    Buckets(BucketGrid),
}

impl NeighborSource {
    /// Candidate neighbor indices for `site`, possibly including `site` itself
    pub fn candidates(&self, site: usize, site_count: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        match self {
            NeighborSource::AllPairs => Box::new(0..site_count),
            NeighborSource::Buckets(grid) => Box::new(grid.neighbors_of(site)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NeighborSource::AllPairs => "all-pairs",
            NeighborSource::Buckets(_) => "buckets",
        }
    }
}

/// Build the cell of one site
///
/// # Arguments
///
/// * `site` - Index of the site whose cell is built
/// * `sites` - All site positions
/// * `bounds` - Starting polygon for the cell
/// * `source` - Neighbor candidates
/// * `collector` - Receives call counts and every intermediate polygon
///
/// # Errors
///
/// Returns `CellConstruction` naming the site and the neighbor whose bisector
/// failed, wrapping `CoincidentSites` for duplicate positions or
/// `InvariantViolation` if a clip broke convexity.
pub fn build_cell(
    site: usize,
    sites: &[DVec2],
    bounds: &Rect,
    source: &NeighborSource,
    collector: &dyn Collector,
) -> Result<Polygon> {
    let Some(&p) = sites.get(site) else {
        return Err(VoronoiError::InvalidConfig(format!(
            "site index {} out of range for {} sites",
            site,
            sites.len()
        )));
    };

    let mut polygon = Polygon::from_rect(bounds);

    for neighbor in source.candidates(site, sites.len()) {
        if neighbor == site {
            continue;
        }
        let Some(&q) = sites.get(neighbor) else {
            continue;
        };

        collector.count(Operation::Bisector);
        let line = bisector_line(p, q).map_err(|e| cell_error(site, neighbor, e))?;
        polygon = cut_shape_with(&polygon, p, &line, collector)
            .map_err(|e| cell_error(site, neighbor, e))?;
        collector.on_clip(site, neighbor, &polygon);
    }

    Ok(polygon)
}

fn cell_error(site: usize, neighbor: usize, source: VoronoiError) -> VoronoiError {
    VoronoiError::CellConstruction {
        site,
        neighbor,
        source: Box::new(source),
    }
}

/// Generate one cell per site
///
/// This is the main entry point for cell construction. Cells only read the
/// shared site list, so with the `parallel` feature they are built
/// concurrently.
///
/// # Returns
///
/// Cells in site order; `cells[i].id == i`
pub fn generate_cells(sites: &[DVec2], bounds: &Rect, source: &NeighborSource) -> Result<Vec<VoronoiCell>> {
    generate_cells_with(sites, bounds, source, &NoopCollector)
}

/// [`generate_cells`], reporting to `collector`
pub fn generate_cells_with(
    sites: &[DVec2],
    bounds: &Rect,
    source: &NeighborSource,
    collector: &dyn Collector,
) -> Result<Vec<VoronoiCell>> {
    let start = Instant::now();
    debug!(
        "[Voronoi] Building {} cells ({} neighbors)",
        sites.len(),
        source.name()
    );

    #[cfg(feature = "parallel")]
    let polygons: Vec<Polygon> = (0..sites.len())
        .into_par_iter()
        .map(|i| build_cell(i, sites, bounds, source, collector))
        .collect::<Result<_>>()?;

    #[cfg(not(feature = "parallel"))]
    let polygons: Vec<Polygon> = (0..sites.len())
        .map(|i| build_cell(i, sites, bounds, source, collector))
        .collect::<Result<_>>()?;

    let cells: Vec<VoronoiCell> = polygons
        .into_iter()
        .zip(sites.iter())
        .enumerate()
        .map(|(id, (polygon, &site))| VoronoiCell::new(id, site, polygon))
        .collect();

    info!(
        "[Voronoi] Built {} cells ({} neighbors) in {:?}",
        cells.len(),
        source.name(),
        start.elapsed()
    );

    Ok(cells)
}
