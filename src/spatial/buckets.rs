//! Uniform grid bucketing of sites
//!
//! Splits the bounding rectangle into `divisions x divisions` equal buckets.
//! Neighbor candidates for a site are the sites in its own bucket and the
//! eight surrounding ones. That is an approximation: a site more than one
//! bucket away can still contribute a cell edge when buckets are small
//! relative to site spacing, so bucketing trades exactness for speed.

use std::collections::HashMap;

use glam::DVec2;

use crate::error::{Result, VoronoiError};
use crate::geometry::{Rect, Segment};

/// Integer bucket coordinate `(column, row)`
pub type BucketKey = (i64, i64);

/// Own bucket first, then the eight around it
const NEIGHBORHOOD: [(i64, i64); 9] = [
    (0, 0),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Read-only mapping from bucket coordinate to the sites inside it
///
/// Rebuilt from scratch whenever the site set changes; never updated in place.
#[derive(Debug, Clone)]
pub struct BucketGrid {
    divisions: usize,
    bounds: Rect,
    buckets: HashMap<BucketKey, Vec<usize>>,
    site_buckets: Vec<BucketKey>,
}

impl BucketGrid {
    /// Bucket every site
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `divisions` is 0 or `bounds` has no area.
    pub fn new(sites: &[DVec2], bounds: &Rect, divisions: usize) -> Result<Self> {
        if divisions == 0 {
            return Err(VoronoiError::InvalidConfig(
                "bucket divisions must be > 0".to_string(),
            ));
        }
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "bucket bounds must have positive size (got {} x {})",
                bounds.width(),
                bounds.height()
            )));
        }

        let mut grid = Self {
            divisions,
            bounds: *bounds,
            buckets: HashMap::new(),
            site_buckets: Vec::with_capacity(sites.len()),
        };

        for (i, &site) in sites.iter().enumerate() {
            let key = grid.bucket_of(site);
            grid.buckets.entry(key).or_default().push(i);
            grid.site_buckets.push(key);
        }

        Ok(grid)
    }

    /// Bucket coordinate of an arbitrary position
    ///
    /// A position on the far edge of the bounds lands one past the last
    /// bucket, which still neighbors the last bucket.
    pub fn bucket_of(&self, p: DVec2) -> BucketKey {
        let rel = (p - self.bounds.min) / DVec2::new(self.bounds.width(), self.bounds.height());
        let scaled = (rel * self.divisions as f64).floor();
        (scaled.x as i64, scaled.y as i64)
    }

    #[inline]
    pub fn divisions(&self) -> usize {
        self.divisions
    }

    #[inline]
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Sites in one bucket (empty if the bucket holds none)
    pub fn bucket(&self, key: BucketKey) -> &[usize] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of buckets holding at least one site
    pub fn occupied_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Candidate neighbors of site `site`, including `site` itself
    ///
    /// Buckets outside the grid are simply absent. An out-of-range index
    /// yields nothing.
    pub fn neighbors_of(&self, site: usize) -> impl Iterator<Item = usize> + '_ {
        self.site_buckets
            .get(site)
            .into_iter()
            .flat_map(move |&(x, y)| {
                NEIGHBORHOOD
                    .iter()
                    .filter_map(move |&(dx, dy)| self.buckets.get(&(x + dx, y + dy)))
            })
            .flatten()
            .copied()
    }

    /// Interior grid lines, for drawing the bucket layout
    pub fn grid_lines(&self) -> Vec<Segment> {
        let Rect { min, max } = self.bounds;
        let n = self.divisions;
        let mut lines = Vec::with_capacity(2 * n.saturating_sub(1));
        for i in 1..n {
            let f = i as f64 / n as f64;
            let x = min.x + f * self.bounds.width();
            let y = min.y + f * self.bounds.height();
            lines.push(Segment::new(DVec2::new(x, min.y), DVec2::new(x, max.y)));
            lines.push(Segment::new(DVec2::new(min.x, y), DVec2::new(max.x, y)));
        }
        lines
    }
}
