//! Spatial lookups over the site set
//!
//! [`BucketGrid`] narrows neighbor candidates during cell construction.
//! [`SiteIndex`] (behind the `spatial-index` feature) answers "which cell is
//! this point in?" by nearest-site search, which is the Voronoi property.

mod buckets;

pub use buckets::{BucketGrid, BucketKey};

#[cfg(feature = "spatial-index")]
use glam::DVec2;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// KD-tree over site positions
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SiteIndex {
    tree: Option<ImmutableKdTree<f64, usize, 2, 32>>,
}

#[cfg(feature = "spatial-index")]
impl SiteIndex {
    /// Build the index from site positions
    ///
    /// # Example
    ///
    /// ```
    /// use glam::DVec2;
    /// use rust_voronoi_plane::spatial::SiteIndex;
    ///
    /// let sites = vec![DVec2::new(0.2, 0.2), DVec2::new(0.8, 0.8)];
    /// let index = SiteIndex::new(&sites);
    /// assert_eq!(index.find_nearest(DVec2::new(0.3, 0.1)), Some(0));
    /// ```
    pub fn new(sites: &[DVec2]) -> Self {
        if sites.is_empty() {
            return Self { tree: None };
        }

        let points: Vec<[f64; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();
        Self {
            tree: Some(ImmutableKdTree::new_from_slice(&points)),
        }
    }

    /// Index of the site closest to `position`, or `None` for an empty index
    ///
    /// Because every point of a Voronoi cell is closer to its own site than to
    /// any other, this is also the id of the cell containing `position`.
    pub fn find_nearest(&self, position: DVec2) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let result = tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
        Some(result.item)
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_site_index_basic() {
        let sites = vec![
            DVec2::new(0.1, 0.1),
            DVec2::new(0.9, 0.1),
            DVec2::new(0.9, 0.9),
            DVec2::new(0.1, 0.9),
        ];

        let index = SiteIndex::new(&sites);

        assert_eq!(index.find_nearest(DVec2::new(0.2, 0.3)), Some(0));
        assert_eq!(index.find_nearest(DVec2::new(0.6, 0.05)), Some(1));
        assert_eq!(index.find_nearest(DVec2::new(0.7, 0.8)), Some(2));
        assert_eq!(index.find_nearest(DVec2::new(0.0, 1.0)), Some(3));
    }

    #[test]
    fn test_site_index_exact_match() {
        let sites = vec![DVec2::new(0.25, 0.5), DVec2::new(0.75, 0.5)];
        let index = SiteIndex::new(&sites);

        assert_eq!(index.find_nearest(sites[0]), Some(0));
        assert_eq!(index.find_nearest(sites[1]), Some(1));
    }

    #[test]
    fn test_site_index_empty() {
        let index = SiteIndex::new(&[]);
        assert_eq!(index.find_nearest(DVec2::new(0.5, 0.5)), None);
    }
}
