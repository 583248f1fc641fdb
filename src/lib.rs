//! # grid-kmeans - API documentation
//!
//! grid-kmeans is a small rust library for k-means-clustering of two-dimensional grids of scalar
//! values, such as the pixel intensities of a grayscale image.
//!
//! ## Design target
//! Every cell of a `height x width` grid is assigned to one of `k` clusters, based on the value stored
//! in that cell alone (the cell's position does not influence its cluster). The result is a set of `k`
//! floating-point centroids, and a partition mapping each cluster to the coordinates of its cells.
//!
//! The implemented variant is Lloyd's algorithm: cells are assigned to their nearest centroid (absolute
//! difference, ties go to the lowest cluster index), centroids are recalculated as the mean of their cells,
//! and this is repeated until one pass does not move any cell.
//!
//! ## Supported centroid initializations
//! The outcome of each run depends on the initialization of its centroids. For a list of implemented
//! initialization methods, see [`ClusterEngine`].
//!
//! ## Supported primitive types
//! - Grid values: all primitive integer and floating-point types (see [`Scalar`])
//! - Centroids: [`f32`], [`f64`] (see [`Primitive`])
//!
//! ## Example
//! ```rust
//! use grid_kmeans::*;
//! use rand::prelude::*;
//!
//! fn main() {
//!     let (height, width, k, max_iter) = (20, 20, 3, 100);
//!
//!     // Generate some random data
//!     let rows: Vec<Vec<u8>> = (0..height)
//!         .map(|_| (0..width).map(|_| rand::random()).collect())
//!         .collect();
//!
//!     // Calculate kmeans, drawing the initial centroids from the grid's value range
//!     let mut engine: ClusterEngine<u8, f32> = ClusterEngine::new(rows, k, height, width).unwrap();
//!     let conf = ClusterConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
//!     let centroids = engine.kmeans_lloyd(max_iter, ClusterEngine::init_random_range, &conf).unwrap();
//!
//!     println!("Centroids: {:?}", centroids);
//!     println!("Cluster-Assignments: {:?}", engine.labels());
//!     println!("Error: {}", engine.state().distsum);
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use grid_kmeans::*;
//!
//! fn main() {
//!     let rows = vec![vec![1u16, 1, 2], vec![10, 11, 10], vec![30, 31, 29]];
//!
//!     let conf = ClusterConfig::<f64>::build()
//!         .init_done(&|s| println!("Initialization completed: {:?}", s.centroids))
//!         .iteration_done(&|s, nr, swaps|
//!             println!("Iteration {} - {} cells moved | Error: {:.2}", nr, swaps, s.distsum))
//!         .build();
//!
//!     let mut engine: ClusterEngine<u16, f64> = ClusterEngine::new(rows, 3, 3, 3).unwrap();
//!     let centroids = engine.kmeans_lloyd(100, ClusterEngine::init_precomputed(vec![0.0, 15.0, 40.0]), &conf).unwrap();
//!
//!     assert_eq!(centroids, vec![4.0 / 3.0, 31.0 / 3.0, 30.0]);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`ClusterEngine`] struct. It is generic over the grid's element type
//! and the floating-point type centroids are calculated in. An engine takes over a copy of the grid and
//! the amount of clusters to search for; invalid shapes or cluster counts are rejected with a [`ClusterError`].
//!
//! [`ClusterEngine::kmeans_lloyd`] calculates the clustering and stores its result ([`ClusterState`]) in
//! the engine, where it stays available through [`ClusterEngine::centroids`] and [`ClusterEngine::clustered`]
//! until the next run, or until the grid is replaced using [`ClusterEngine::set_data`].
//!
//! The random number generator, the handling of empty clusters and the status callbacks are set through a
//! [`ClusterConfig`]. Progress is additionally reported through the [`log`] facade.

#[macro_use] mod helpers;
mod primitives;
mod error;
mod grid;
mod empty_cluster;
mod api;
mod variants;
mod inits;

pub use api::{ClusterState, ClusterConfig, ClusterConfigBuilder, ClusterEngine};
pub use empty_cluster::EmptyClusterStrategy;
pub use error::ClusterError;
pub use grid::{Coordinate, Grid};
pub use primitives::{Primitive, Scalar};
