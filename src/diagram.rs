//! VoronoiDiagram main structure

use glam::DVec2;

use crate::cell::VoronoiCell;
use crate::config::DiagramConfig;
use crate::error::{Result, VoronoiError};
use crate::generation::{self, greedy_triangulation, NeighborSource};
use crate::geometry::{Rect, Segment};
use crate::instrument::{Collector, NoopCollector};
use crate::spatial::BucketGrid;

#[cfg(feature = "spatial-index")]
use crate::spatial::SiteIndex;

/// A complete planar Voronoi diagram
///
/// Holds the final (relaxed) sites and one convex cell per site, indexed by
/// site. Everything is computed up front; queries never mutate.
///
/// # Examples
///
/// ```
/// use rust_voronoi_plane::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(42)
///     .site_count(25)
///     .build()
///     .unwrap();
///
/// let diagram = VoronoiDiagram::generate(config).unwrap();
/// println!("Generated {} cells", diagram.cell_count());
///
/// if let Some(cell) = diagram.get_cell(0) {
///     println!("Cell 0 has {} vertices", cell.vertex_count());
/// }
/// ```
#[derive(Clone)]
pub struct VoronoiDiagram {
    /// Configuration used to build this diagram
    config: DiagramConfig,

    /// Final site positions (after relaxation)
    sites: Vec<DVec2>,

    /// All cells, indexed by site
    cells: Vec<VoronoiCell>,

    /// Bucket grid the cells were built with, if bucketing was enabled
    grid: Option<BucketGrid>,

    /// Nearest-site index for point-to-cell lookups (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    site_index: SiteIndex,
}

impl VoronoiDiagram {
    /// Generate random sites from `config` and build their diagram
    ///
    /// # Arguments
    ///
    /// * `config` - Diagram configuration (seed, site count, bounds, relaxation)
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_plane::*;
    ///
    /// let config = DiagramConfigBuilder::new()
    ///     .seed(12345)
    ///     .site_count(50)
    ///     .relaxation_passes(3)
    ///     .build()
    ///     .unwrap();
    ///
    /// let diagram = VoronoiDiagram::generate(config).unwrap();
    /// assert_eq!(diagram.cell_count(), 50);
    /// ```
    pub fn generate(config: DiagramConfig) -> Result<Self> {
        Self::generate_with_collector(config, &NoopCollector)
    }

    /// [`generate`](Self::generate), reporting work to `collector`
    pub fn generate_with_collector(config: DiagramConfig, collector: &dyn Collector) -> Result<Self> {
        let sites = generation::generate_sites(config.site_count, &config.bounds, config.seed);
        Self::build(sites, config, collector)
    }

    /// Build the diagram of caller-supplied sites
    ///
    /// `config.site_count` and `config.seed` are ignored; the stored
    /// configuration records the actual site count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a site is not finite or lies outside
    /// `config.bounds`, `Relaxation` or `CellConstruction` (wrapping
    /// `CoincidentSites`) for duplicate sites.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_plane::*;
    ///
    /// let sites = vec![DVec2::new(0.25, 0.5), DVec2::new(0.75, 0.5)];
    /// let diagram = VoronoiDiagram::from_sites(sites, DiagramConfig::default()).unwrap();
    /// assert!((diagram.cells()[0].area() - 0.5).abs() < 1e-12);
    /// ```
    pub fn from_sites(sites: Vec<DVec2>, config: DiagramConfig) -> Result<Self> {
        Self::from_sites_with_collector(sites, config, &NoopCollector)
    }

    /// [`from_sites`](Self::from_sites), reporting work to `collector`
    pub fn from_sites_with_collector(
        sites: Vec<DVec2>,
        config: DiagramConfig,
        collector: &dyn Collector,
    ) -> Result<Self> {
        if let Some((i, site)) = sites
            .iter()
            .enumerate()
            .find(|(_, s)| !s.is_finite() || !config.bounds.contains(**s))
        {
            return Err(VoronoiError::InvalidConfig(format!(
                "site {} at {} lies outside bounds {} to {}",
                i, site, config.bounds.min, config.bounds.max
            )));
        }

        let config = DiagramConfig {
            site_count: sites.len(),
            ..config
        };
        Self::build(sites, config, collector)
    }

    fn build(sites: Vec<DVec2>, config: DiagramConfig, collector: &dyn Collector) -> Result<Self> {
        let sites = generation::relax_sites(sites, &config, collector)?;

        let source = generation::neighbor_source(&sites, &config)?;
        let cells = generation::generate_cells_with(&sites, &config.bounds, &source, collector)?;

        let grid = match source {
            NeighborSource::Buckets(grid) => Some(grid),
            NeighborSource::AllPairs => None,
        };

        #[cfg(feature = "spatial-index")]
        let site_index = SiteIndex::new(&sites);

        Ok(Self {
            config,
            sites,
            cells,
            grid,
            #[cfg(feature = "spatial-index")]
            site_index,
        })
    }

    /// Get the configuration used to build this diagram
    #[inline]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    #[inline]
    pub fn bounds(&self) -> &Rect {
        &self.config.bounds
    }

    /// Final site positions, in cell order
    #[inline]
    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    #[inline]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// Get a cell by ID
    ///
    /// Returns `None` if the cell ID is out of bounds.
    #[inline]
    pub fn get_cell(&self, id: usize) -> Option<&VoronoiCell> {
        self.cells.get(id)
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Sum of all cell areas
    ///
    /// Equals the bounds area when every true neighbor was considered.
    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(VoronoiCell::area).sum()
    }

    /// Bucket grid used for construction, for drawing the grid layout
    #[inline]
    pub fn bucket_grid(&self) -> Option<&BucketGrid> {
        self.grid.as_ref()
    }

    /// Greedy shortest-edge triangulation of the final sites
    pub fn triangulation(&self) -> Vec<Segment> {
        greedy_triangulation(&self.sites)
    }

    /// Find the cell containing a position (requires spatial-index feature)
    ///
    /// Uses the nearest site, which owns the exact Voronoi cell containing
    /// `position`. With bucketing enabled the built cells are approximate, so
    /// the returned cell may not be the polygon that actually contains
    /// `position`. Returns `None` outside the bounds or for an empty diagram.
    ///
    /// # Example
    ///
    /// ```
    /// # use rust_voronoi_plane::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let sites = vec![DVec2::new(0.25, 0.5), DVec2::new(0.75, 0.5)];
    /// let diagram = VoronoiDiagram::from_sites(sites, DiagramConfig::default()).unwrap();
    /// assert_eq!(diagram.find_cell_at(DVec2::new(0.9, 0.1)), Some(1));
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: DVec2) -> Option<usize> {
        if !self.config.bounds.contains(position) {
            return None;
        }
        self.site_index.find_nearest(position)
    }
}
