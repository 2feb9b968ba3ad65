//! Graph state: nodes, symmetric adjacency and colors.
//!
//! A [`Graph`] holds a fixed node set for the lifetime of a run. The only
//! mutable field is each node's current color, and the only mutation the
//! engine performs is [`Graph::swap_colors`], so the multiset of colors is
//! conserved across rounds.
//!
//! Nodes are stored in ascending id order. That order is the processing
//! order of every round, which makes runs reproducible.

mod coloring;
pub mod metis;

pub use coloring::InitialColoring;

use crate::error::{JabejaError, Result};
use std::collections::{BTreeMap, HashSet};

/// Node identity.
pub type NodeId = u32;

/// Partition label.
pub type Color = u32;

/// Adjacency lists as produced by a loader, before colors are assigned.
pub type AdjacencyList = Vec<(NodeId, Vec<NodeId>)>;

/// A graph vertex with its initial and current color.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    init_color: Color,
    color: Color,
    neighbors: Vec<NodeId>,
}

impl Node {
    /// Creates a node whose current color equals its initial color.
    pub fn new(id: NodeId, color: Color, neighbors: Vec<NodeId>) -> Self {
        Self {
            id,
            init_color: color,
            color,
            neighbors,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Color assigned at construction; the baseline for migration counts.
    pub fn init_color(&self) -> Color {
        self.init_color
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Whether the node currently carries a different color than it started with.
    pub fn has_migrated(&self) -> bool {
        self.color != self.init_color
    }
}

/// A static, undirected, colored graph.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    /// `adjacency[i]` holds the dense indices of `nodes[i].neighbors`.
    adjacency: Vec<Vec<usize>>,
    ids: Vec<NodeId>,
}

impl Graph {
    /// Builds a graph from fully specified nodes.
    ///
    /// Repeated entries in a neighbor list collapse into one. Duplicate ids,
    /// unknown neighbors, self loops and one-directional edges are rejected.
    pub fn new(mut nodes: Vec<Node>) -> Result<Self> {
        nodes.sort_by_key(|n| n.id);
        if let Some(w) = nodes.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(JabejaError::DuplicateNode(w[0].id));
        }

        let ids: Vec<NodeId> = nodes.iter().map(|n| n.id).collect();
        let mut adjacency = Vec::with_capacity(nodes.len());

        for node in &mut nodes {
            let mut seen = HashSet::with_capacity(node.neighbors.len());
            node.neighbors.retain(|&nb| seen.insert(nb));

            let mut indices = Vec::with_capacity(node.neighbors.len());
            for &nb in &node.neighbors {
                if nb == node.id {
                    return Err(JabejaError::SelfLoop(node.id));
                }
                let idx = ids
                    .binary_search(&nb)
                    .map_err(|_| JabejaError::UnknownNeighbor {
                        node: node.id,
                        neighbor: nb,
                    })?;
                indices.push(idx);
            }
            adjacency.push(indices);
        }

        let edges: HashSet<(usize, usize)> = adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, nbrs)| nbrs.iter().map(move |&j| (i, j)))
            .collect();
        for &(i, j) in &edges {
            if !edges.contains(&(j, i)) {
                return Err(JabejaError::AsymmetricEdge {
                    from: ids[i],
                    to: ids[j],
                });
            }
        }

        Ok(Self {
            nodes,
            adjacency,
            ids,
        })
    }

    /// Builds a graph from a coloring and an undirected edge list.
    ///
    /// Each edge is inserted in both directions; repeated edges are merged.
    ///
    /// # Examples
    ///
    /// ```
    /// use jabeja::graph::Graph;
    ///
    /// let graph = Graph::from_edges(
    ///     [(0, 0), (1, 1), (2, 0), (3, 1)],
    ///     [(0, 1), (1, 2), (2, 3), (3, 0)],
    /// ).unwrap();
    /// assert_eq!(graph.len(), 4);
    /// assert_eq!(graph.edge_count(), 4);
    /// ```
    pub fn from_edges(
        colors: impl IntoIterator<Item = (NodeId, Color)>,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Result<Self> {
        let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
        for (id, color) in colors {
            if nodes.insert(id, Node::new(id, color, Vec::new())).is_some() {
                return Err(JabejaError::DuplicateNode(id));
            }
        }
        for (a, b) in edges {
            if a == b {
                return Err(JabejaError::SelfLoop(a));
            }
            if !nodes.contains_key(&b) {
                return Err(JabejaError::UnknownNeighbor { node: a, neighbor: b });
            }
            let node_a = nodes
                .get_mut(&a)
                .ok_or(JabejaError::UnknownNeighbor { node: b, neighbor: a })?;
            node_a.neighbors.push(b);
            if let Some(node_b) = nodes.get_mut(&b) {
                node_b.neighbors.push(a);
            }
        }
        Self::new(nodes.into_values().collect())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in ascending order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    pub fn color(&self, id: NodeId) -> Option<Color> {
        self.node(id).map(Node::color)
    }

    pub fn init_color(&self, id: NodeId) -> Option<Color> {
        self.node(id).map(Node::init_color)
    }

    /// Neighbor ids of `id`; empty for an unknown id.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::neighbors).unwrap_or(&[])
    }

    /// Overwrites the current color of one node.
    ///
    /// The engine never calls this; it only swaps. Returns `false` for an
    /// unknown id.
    pub fn set_color(&mut self, id: NodeId, color: Color) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.nodes[i].color = color;
                true
            }
            None => false,
        }
    }

    /// Exchanges the current colors of `a` and `b`.
    ///
    /// Returns `false` (and changes nothing) if either id is unknown.
    pub fn swap_colors(&mut self, a: NodeId, b: NodeId) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) => {
                let ci = self.nodes[i].color;
                self.nodes[i].color = self.nodes[j].color;
                self.nodes[j].color = ci;
                true
            }
            _ => false,
        }
    }

    /// Number of neighbors of `id` whose current color is `color`.
    pub fn degree(&self, id: NodeId, color: Color) -> usize {
        self.index_of(id).map_or(0, |i| {
            self.adjacency[i]
                .iter()
                .filter(|&&j| self.nodes[j].color == color)
                .count()
        })
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Number of nodes per current color.
    pub fn color_counts(&self) -> BTreeMap<Color, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.color).or_insert(0) += 1;
        }
        counts
    }

    /// Current colors of the neighbors of `nodes()[index]`.
    pub(crate) fn neighbor_colors_at(&self, index: usize) -> impl Iterator<Item = Color> + '_ {
        self.adjacency[index].iter().map(|&j| self.nodes[j].color)
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }
}
