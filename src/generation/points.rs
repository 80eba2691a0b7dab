//! Random site placement

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geometry::Rect;

/// Generate `count` uniformly random sites inside `bounds`
///
/// Deterministic: the same seed always yields the same sites.
///
/// # Arguments
///
/// * `count` - Number of sites to generate
/// * `bounds` - Rectangle the sites are drawn from
/// * `seed` - Random seed
///
/// # Example
///
/// ```rust
/// use rust_voronoi_plane::generation::generate_sites;
/// use rust_voronoi_plane::Rect;
///
/// let sites = generate_sites(100, &Rect::unit(), 42);
/// assert_eq!(sites.len(), 100);
/// ```
pub fn generate_sites(count: usize, bounds: &Rect, seed: u32) -> Vec<DVec2> {
    if count == 0 {
        return Vec::new();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    (0..count)
        .map(|_| {
            DVec2::new(
                rng.gen_range(bounds.min.x..bounds.max.x),
                rng.gen_range(bounds.min.y..bounds.max.y),
            )
        })
        .collect()
}
