//! Initial color assignment for loaded graphs.

use super::{AdjacencyList, Color, Graph, Node};
use crate::error::{JabejaError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;

/// ChaCha stream used for coloring; runs draw from stream 0.
const COLORING_STREAM: u64 = 1;

/// How colors are assigned before the first round.
///
/// Positions are taken in ascending node id order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialColoring {
    /// Color `i mod k` for the `i`-th node.
    #[default]
    RoundRobin,

    /// A uniformly random color per node.
    Random,

    /// Contiguous blocks of roughly `n / k` nodes per color.
    Batch,
}

impl InitialColoring {
    /// Produces `n` colors in `0..partitions`.
    ///
    /// `rng` is only consumed by [`InitialColoring::Random`].
    pub fn colors<R: Rng>(&self, n: usize, partitions: Color, rng: &mut R) -> Vec<Color> {
        let k = partitions.max(1);
        match self {
            InitialColoring::RoundRobin => (0..n).map(|i| (i % k as usize) as Color).collect(),
            InitialColoring::Random => (0..n).map(|_| rng.random_range(0..k)).collect(),
            InitialColoring::Batch => (0..n)
                .map(|i| ((i as u64 * k as u64) / n as u64) as Color)
                .collect(),
        }
    }

    /// Generator for [`InitialColoring::Random`] derived from a run seed.
    ///
    /// It reads a different ChaCha stream than a run seeded with the same
    /// value, so coloring and sampling never share draws.
    pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(COLORING_STREAM);
        rng
    }

    /// Colors a loaded adjacency list and validates the resulting graph.
    pub fn apply<R: Rng>(
        &self,
        mut adjacency: AdjacencyList,
        partitions: Color,
        rng: &mut R,
    ) -> Result<Graph> {
        if partitions == 0 {
            return Err(JabejaError::InvalidConfig(
                "number of partitions must be positive".into(),
            ));
        }
        adjacency.sort_by_key(|(id, _)| *id);
        let colors = self.colors(adjacency.len(), partitions, rng);
        let nodes = adjacency
            .into_iter()
            .zip(colors)
            .map(|((id, nbrs), color)| Node::new(id, color, nbrs))
            .collect();
        Graph::new(nodes)
    }

    fn name(&self) -> &'static str {
        match self {
            InitialColoring::RoundRobin => "ROUND_ROBIN",
            InitialColoring::Random => "RANDOM",
            InitialColoring::Batch => "BATCH",
        }
    }
}

impl fmt::Display for InitialColoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InitialColoring {
    type Err = JabejaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "ROUND_ROBIN" => Ok(InitialColoring::RoundRobin),
            "RANDOM" => Ok(InitialColoring::Random),
            "BATCH" => Ok(InitialColoring::Batch),
            _ => Err(JabejaError::InvalidConfig(format!(
                "initial color policy `{s}` is not supported (RANDOM, ROUND_ROBIN, BATCH)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let colors = InitialColoring::RoundRobin.colors(7, 3, &mut rng);
        assert_eq!(colors, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_batch_blocks() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let colors = InitialColoring::Batch.colors(8, 4, &mut rng);
        assert_eq!(colors, vec![0, 0, 1, 1, 2, 2, 3, 3]);

        let uneven = InitialColoring::Batch.colors(5, 2, &mut rng);
        assert_eq!(uneven, vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_random_in_range_and_seeded() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        let ca = InitialColoring::Random.colors(100, 4, &mut a);
        let cb = InitialColoring::Random.colors(100, 4, &mut b);
        assert_eq!(ca, cb);
        assert!(ca.iter().all(|&c| c < 4));
    }

    #[test]
    fn test_seeded_rng_apart_from_run_stream() {
        let mut coloring = InitialColoring::seeded_rng(7);
        let mut run = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(coloring.get_stream(), COLORING_STREAM);
        assert_eq!(run.get_stream(), 0);
        let a: Vec<u64> = (0..4).map(|_| coloring.random()).collect();
        let b: Vec<u64> = (0..4).map(|_| run.random()).collect();
        assert_ne!(a, b);

        let mut again = InitialColoring::seeded_rng(7);
        let c: Vec<u64> = (0..4).map(|_| again.random()).collect();
        assert_eq!(a, c);
    }

    #[test]
    fn test_apply_orders_by_id() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let adjacency = vec![(2, vec![1]), (1, vec![2])];
        let graph = InitialColoring::RoundRobin.apply(adjacency, 2, &mut rng).unwrap();
        assert_eq!(graph.color(1), Some(0));
        assert_eq!(graph.color(2), Some(1));
    }

    #[test]
    fn test_apply_rejects_zero_partitions() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(InitialColoring::Batch.apply(vec![], 0, &mut rng).is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("round_robin".parse::<InitialColoring>().unwrap(), InitialColoring::RoundRobin);
        assert_eq!("Batch".parse::<InitialColoring>().unwrap(), InitialColoring::Batch);
        assert!("stripes".parse::<InitialColoring>().is_err());
        assert_eq!(InitialColoring::RoundRobin.to_string(), "ROUND_ROBIN");
    }
}
