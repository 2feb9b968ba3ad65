//! Independent runs over many configurations.
//!
//! Each configuration runs on its own clone of the graph with its own
//! random stream, so results do not depend on scheduling. With the
//! `parallel` feature the runs are spread over rayon's thread pool.

use crate::error::Result;
use crate::graph::Graph;
use crate::jabeja::{JabejaConfig, JabejaResult, JabejaRunner};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs every configuration on a fresh copy of `graph`.
///
/// Results are returned in the order of `configs`.
pub fn run_sweep(graph: &Graph, configs: &[JabejaConfig]) -> Vec<Result<JabejaResult>> {
    #[cfg(feature = "parallel")]
    {
        configs
            .par_iter()
            .map(|config| JabejaRunner::run(graph.clone(), config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        configs
            .iter()
            .map(|config| JabejaRunner::run(graph.clone(), config))
            .collect()
    }
}

/// Configurations differing only in their seed.
pub fn seeded(config: &JabejaConfig, seeds: impl IntoIterator<Item = u64>) -> Vec<JabejaConfig> {
    seeds
        .into_iter()
        .map(|seed| config.clone().with_seed(seed))
        .collect()
}
