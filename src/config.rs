//! Diagram configuration and builder
//!
//! Everything a construction run needs besides the sites themselves.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::DVec2;

use crate::error::{Result, VoronoiError};
use crate::generation::DEFAULT_MAX_STEP;
use crate::geometry::Rect;

/// Configuration for one Voronoi construction run
///
/// The same configuration with the same seed always produces the same sites
/// and therefore the same cells.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_plane::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(42)
///     .site_count(50)
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: DiagramConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Random seed used when sites are generated rather than supplied
    pub seed: u32,

    /// Number of sites to generate
    pub site_count: usize,

    /// Rectangle every cell is clipped to
    pub bounds: Rect,

    /// Bucket grid resolution; `None` compares every pair of sites
    ///
    /// Bucketing only considers sites in the surrounding 3x3 buckets, so it
    /// can miss true neighbors when buckets are small relative to the site
    /// spacing.
    pub bucket_divisions: Option<usize>,

    /// Number of repulsion relaxation passes run before construction
    ///
    /// - 0: sites are used as given (default)
    pub relaxation_passes: usize,

    /// Scale applied to the summed repulsion before moving a site
    pub relaxation_factor: f64,

    /// Stop relaxing once no site moves farther than this; 0.0 runs every pass
    pub relaxation_convergence: f64,

    /// Largest move per relaxation pass, in mean site spacings
    pub relaxation_max_step: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        DiagramConfig {
            seed: 0,
            site_count: DEFAULT_SITE_COUNT,
            bounds: Rect::unit(),
            bucket_divisions: None,
            relaxation_passes: 0,
            relaxation_factor: DEFAULT_RELAXATION_FACTOR,
            relaxation_convergence: 0.0,
            relaxation_max_step: DEFAULT_MAX_STEP,
        }
    }
}

const DEFAULT_SITE_COUNT: usize = 20;
const DEFAULT_RELAXATION_FACTOR: f64 = 1e-4;

/// Builder for creating [`DiagramConfig`] with validation
///
/// # Example
///
/// ```rust
/// use rust_voronoi_plane::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(7)
///     .site_count(200)
///     .bucket_divisions(4)
///     .unwrap()
///     .relaxation_passes(3)
///     .relaxation_factor(5e-5)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.bucket_divisions, Some(4));
/// ```
#[derive(Debug, Clone)]
pub struct DiagramConfigBuilder {
    seed: Option<u32>,
    site_count: usize,
    bounds: Rect,
    bucket_divisions: Option<usize>,
    relaxation_passes: usize,
    relaxation_factor: f64,
    relaxation_convergence: f64,
    relaxation_max_step: f64,
}

impl DiagramConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random
    /// - site_count: 20
    /// - bounds: unit square
    /// - bucket_divisions: none (all pairs)
    /// - relaxation_passes: 0
    /// - relaxation_factor: 1e-4
    /// - relaxation_convergence: 0.0
    /// - relaxation_max_step: 0.1
    pub fn new() -> Self {
        Self {
            seed: None,
            site_count: DEFAULT_SITE_COUNT,
            bounds: Rect::unit(),
            bucket_divisions: None,
            relaxation_passes: 0,
            relaxation_factor: DEFAULT_RELAXATION_FACTOR,
            relaxation_convergence: 0.0,
            relaxation_max_step: DEFAULT_MAX_STEP,
        }
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn site_count(mut self, count: usize) -> Self {
        self.site_count = count;
        self
    }

    /// Set the clipping rectangle
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `max` is strictly greater than `min` on
    /// both axes and all coordinates are finite.
    pub fn bounds(mut self, min: DVec2, max: DVec2) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || max.x <= min.x || max.y <= min.y {
            return Err(VoronoiError::InvalidConfig(format!(
                "bounds must have positive width and height (got {} to {})",
                min, max
            )));
        }
        self.bounds = Rect::new(min, max);
        Ok(self)
    }

    /// Use an `n x n` bucket grid for neighbor candidates
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `divisions` is 0
    pub fn bucket_divisions(mut self, divisions: usize) -> Result<Self> {
        if divisions == 0 {
            return Err(VoronoiError::InvalidConfig(
                "bucket divisions must be > 0".to_string(),
            ));
        }
        self.bucket_divisions = Some(divisions);
        Ok(self)
    }

    /// Compare every pair of sites (the default)
    pub fn all_pairs(mut self) -> Self {
        self.bucket_divisions = None;
        self
    }

    pub fn relaxation_passes(mut self, passes: usize) -> Self {
        self.relaxation_passes = passes;
        self
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if `factor` is negative or not finite
    pub fn relaxation_factor(mut self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "relaxation factor must be finite and >= 0 (got {})",
                factor
            )));
        }
        self.relaxation_factor = factor;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if `threshold` is negative or not finite
    pub fn relaxation_convergence(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "relaxation convergence threshold must be >= 0 (got {})",
                threshold
            )));
        }
        self.relaxation_convergence = threshold;
        Ok(self)
    }

    /// Cap each relaxation move at `fraction` of the mean site spacing
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `fraction` is > 0; infinity disables the cap
    pub fn relaxation_max_step(mut self, fraction: f64) -> Result<Self> {
        if fraction.is_nan() || fraction <= 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "relaxation max step must be > 0 (got {})",
                fraction
            )));
        }
        self.relaxation_max_step = fraction;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random one is drawn.
    pub fn build(self) -> Result<DiagramConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(DiagramConfig {
            seed,
            site_count: self.site_count,
            bounds: self.bounds,
            bucket_divisions: self.bucket_divisions,
            relaxation_passes: self.relaxation_passes,
            relaxation_factor: self.relaxation_factor,
            relaxation_convergence: self.relaxation_convergence,
            relaxation_max_step: self.relaxation_max_step,
        })
    }
}

impl Default for DiagramConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
