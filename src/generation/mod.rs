//! Core Voronoi generation algorithm
//!
//! Places sites, spreads them with repulsion relaxation, and builds one
//! convex cell per site by half-plane clipping. A greedy triangulation of the
//! same sites is available as a companion structure.

mod greedy;
mod lloyd;
mod points;
mod voronoi;

pub use greedy::{greedy_triangulation, greedy_triangulation_with};
pub use lloyd::{
    inverse_square_repulsion, lloyd_relaxation, lloyd_relaxation_with, lloyd_relaxation_with_options,
    LloydOptions, DEFAULT_MAX_STEP,
};
pub use points::generate_sites;
pub use voronoi::{build_cell, generate_cells, generate_cells_with, NeighborSource};

use glam::DVec2;

use crate::cell::VoronoiCell;
use crate::config::DiagramConfig;
use crate::error::Result;
use crate::instrument::Collector;
use crate::spatial::BucketGrid;

/// Run the configured relaxation passes, if any
pub fn relax_sites(
    sites: Vec<DVec2>,
    config: &DiagramConfig,
    collector: &dyn Collector,
) -> Result<Vec<DVec2>> {
    if config.relaxation_passes == 0 {
        return Ok(sites);
    }

    let options = LloydOptions {
        passes: config.relaxation_passes,
        factor: config.relaxation_factor,
        convergence_threshold: config.relaxation_convergence,
        max_step: config.relaxation_max_step,
    };
    lloyd::lloyd_relaxation_with(sites, &config.bounds, options, collector)
}

/// Neighbor source for the final site positions
///
/// The bucket grid is built only after relaxation has finished, so it always
/// reflects the sites the cells are built from.
pub fn neighbor_source(sites: &[DVec2], config: &DiagramConfig) -> Result<NeighborSource> {
    match config.bucket_divisions {
        Some(divisions) => Ok(NeighborSource::Buckets(BucketGrid::new(
            sites,
            &config.bounds,
            divisions,
        )?)),
        None => Ok(NeighborSource::AllPairs),
    }
}

/// Generate sites from configuration, relax them, and build their cells
///
/// Returns the final sites alongside the cells.
pub fn generate_from_config(
    config: &DiagramConfig,
    collector: &dyn Collector,
) -> Result<(Vec<DVec2>, Vec<VoronoiCell>)> {
    // Step 1: Random sites
    let sites = points::generate_sites(config.site_count, &config.bounds, config.seed);

    // Step 2: Relaxation, fully finished before construction starts
    let sites = relax_sites(sites, config, collector)?;

    // Step 3: Cells
    let source = neighbor_source(&sites, config)?;
    let cells = voronoi::generate_cells_with(&sites, &config.bounds, &source, collector)?;

    Ok((sites, cells))
}
