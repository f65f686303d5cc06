//! # quakemeans - API documentation
//!
//! quakemeans is a small rust library for k-means cluster analysis of
//! earthquake epicenters (or any other 2-D geospatial points).
//!
//! ## Design target
//! The crate reimplements the classic fixed-iteration k-means pipeline used
//! for plotting quake clusters on a world map: pick k starting centroids
//! from the data, then alternate nearest-centroid assignment and
//! centroid-mean recomputation for a fixed number of rounds. There is no
//! convergence detection — a run always performs exactly the requested
//! number of rounds, so two runs from the same starting centroids produce
//! the same result.
//!
//! ## Supported centroid initializations
//! The outcome of each run depends on the initialization of its clusters.
//! Random-sample initialization draws k distinct data points through the
//! random generator of the passed [`KMeansConfig`]; seed that generator for
//! repeatable runs, or pin the starting centroids entirely with
//! [`KMeans::init_precomputed`].
//!
//! ## Supported distance measures
//! - [`EuclideanDistance`] — planar Euclidean distance, the reference
//!   metric. Note that on raw longitude/latitude this splits clusters that
//!   straddle the ±180° meridian; this is a known, accepted limitation.
//! - [`LonWrapDistance`] — measures longitude the shorter way around the
//!   antimeridian, for callers that want the seam handled.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use quakemeans::*;
//!
//! // Parse a USGS catalog export (normally fetched from the FDSN event API).
//! let csv = "time,latitude,longitude\n\
//!            2024-01-01,-3.04,148.88\n\
//!            2024-01-02,-3.28,148.77\n\
//!            2024-01-03,35.61,140.09\n";
//! let points = quakes::parse_usgs_csv(csv.as_bytes()).unwrap();
//!
//! let kmean = KMeans::new(points, EuclideanDistance);
//! let result = kmean.run(2, 50, KMeans::init_random_sample, &KMeansConfig::default()).unwrap();
//!
//! for (i, cluster) in result.clusters.iter().enumerate() {
//!     println!("cluster {} ({}): {:?}", i, render::PALETTE[i], cluster);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct, generic over the
//! underlying primitive type and the [`DistanceFunction`]. It takes
//! ownership of the [`PointSet`] to analyze and stays immutable, so multiple
//! runs can share one instance. [`KMeans::run`] returns a [`KMeansState`]
//! with the final centroids and the final [`ClusterAssignment`]; the
//! [`render`] module turns that assignment into colored dots on an
//! equirectangular world map via the [`render::Canvas`] seam, and
//! [`quakes`] ingests USGS catalog CSV exports.

#[macro_use]
mod helpers;
mod api;
mod distances;
mod engine;
mod error;
mod inits;
mod points;
pub mod quakes;
pub mod render;

pub use api::{KMeans, KMeansConfig, KMeansConfigBuilder, KMeansState};
pub use distances::{DistanceFunction, EuclideanDistance, LonWrapDistance};
pub use error::{QuakeMeansError, Result};
pub use points::{CentroidList, ClusterAssignment, PointId, PointSet, Primitive};
