//! Ja-be-Ja graph partitioning simulator.
//!
//! Partitions the nodes of a static graph into a fixed number of colors
//! so that few edges cross colors, using only local color swaps driven by
//! simulated annealing.
//!
//! - **Graph** ([`graph`]): colored, symmetric, immutable topology; METIS
//!   loading and initial color assignment.
//! - **Engine** ([`jabeja`]): candidate sampling, partner selection,
//!   annealing schedule and the round loop.
//! - **Metrics** ([`metrics`]): edge cut and migrations per round, and the
//!   [`Reporter`](metrics::Reporter) seam for consumers.
//! - **Reports** ([`report`]): result files in the classic tab layout.
//! - **Sweeps** ([`sweep`]): many independent runs, in parallel with the
//!   `parallel` feature.
//!
//! # Example
//!
//! ```
//! use jabeja::graph::Graph;
//! use jabeja::jabeja::{JabejaConfig, JabejaRunner};
//!
//! let graph = Graph::from_edges(
//!     (0..6).map(|i| (i, i % 2)),
//!     [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
//! ).unwrap();
//! let config = JabejaConfig::default().with_rounds(50).with_seed(1);
//! let result = JabejaRunner::run(graph, &config).unwrap();
//! assert_eq!(result.history.len(), 50);
//! ```
//!
//! # Architecture
//!
//! The engine never touches files or the terminal; it only emits `log`
//! records. Loading, argument parsing and result files live in their own
//! modules and in the `jabeja` binary.

pub mod error;
pub mod graph;
pub mod jabeja;
pub mod metrics;
pub mod report;
pub mod sweep;

pub use error::{JabejaError, Result};
