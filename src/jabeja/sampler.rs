//! Candidate sampling for swap partners.

use crate::graph::{Graph, NodeId};
use rand::Rng;

/// Draws candidate partner sets of fixed size.
///
/// Both samples are free of duplicates, never contain the requesting
/// node, and hold exactly `min(k, available)` ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    local_size: usize,
    uniform_size: usize,
}

impl Sampler {
    pub fn new(local_size: usize, uniform_size: usize) -> Self {
        Self {
            local_size,
            uniform_size,
        }
    }

    /// Up to `local_size` distinct neighbors of `node`.
    ///
    /// When the node has no more neighbors than requested, all of them are
    /// returned in adjacency order and no randomness is consumed.
    pub fn local<R: Rng>(&self, graph: &Graph, node: NodeId, rng: &mut R) -> Vec<NodeId> {
        let neighbors = graph.neighbors(node);
        if neighbors.len() <= self.local_size {
            return neighbors.to_vec();
        }
        rejection_sample(neighbors, self.local_size, None, rng)
    }

    /// Up to `uniform_size` distinct nodes from the whole graph, excluding `node`.
    pub fn uniform<R: Rng>(&self, graph: &Graph, node: NodeId, rng: &mut R) -> Vec<NodeId> {
        let ids = graph.ids();
        let others = ids.len() - usize::from(ids.binary_search(&node).is_ok());
        if others <= self.uniform_size {
            return ids.iter().copied().filter(|&id| id != node).collect();
        }
        rejection_sample(ids, self.uniform_size, Some(node), rng)
    }
}

/// Picks uniform indices into `pool` until `count` distinct ids, other than
/// `exclude`, are collected.
///
/// Callers guarantee that `pool` holds at least `count` eligible ids.
fn rejection_sample<R: Rng>(
    pool: &[NodeId],
    count: usize,
    exclude: Option<NodeId>,
    rng: &mut R,
) -> Vec<NodeId> {
    let mut picked = Vec::with_capacity(count);
    while picked.len() < count {
        let id = pool[rng.random_range(0..pool.len())];
        if Some(id) != exclude && !picked.contains(&id) {
            picked.push(id);
        }
    }
    picked
}
