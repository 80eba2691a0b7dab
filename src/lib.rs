//! Planar Voronoi diagrams by incremental half-plane clipping
//!
//! Every site starts with the bounding rectangle as its cell, which is then
//! cut down by the perpendicular bisector to each neighboring site. Optional
//! grid bucketing limits the neighbors considered, and optional repulsion
//! relaxation spreads sites out before construction.
//!
//! # Quick Start
//!
//! ```rust
//! use rust_voronoi_plane::*;
//!
//! let config = DiagramConfigBuilder::new()
//!     .seed(42)
//!     .site_count(100)
//!     .relaxation_passes(3)
//!     .bucket_divisions(4).unwrap()
//!     .build().unwrap();
//!
//! let diagram = VoronoiDiagram::generate(config).unwrap();
//! for cell in diagram.cells() {
//!     println!("site {} -> {} vertices", cell.id, cell.vertex_count());
//! }
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-cell lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, geometry and cells
//! - `parallel`: Builds cells concurrently with rayon

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod instrument;
pub mod cell;
pub mod generation;
pub mod spatial;
pub mod diagram;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use config::{DiagramConfig, DiagramConfigBuilder};
pub use geometry::{Intercept, Line, Point, Polygon, Rect, Segment};
pub use instrument::{CallCounter, Collector, NoopCollector, Operation, TraceRecorder};
pub use cell::VoronoiCell;
pub use diagram::VoronoiDiagram;
pub use generation::{LloydOptions, NeighborSource};
pub use spatial::BucketGrid;

#[cfg(feature = "spatial-index")]
pub use spatial::SiteIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
