//! Per-round partition quality metrics.

use crate::graph::Graph;

/// Metrics of one completed round.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundMetrics {
    /// 0-based round index.
    pub round: usize,

    /// Undirected edges whose endpoints have different colors.
    pub edge_cut: usize,

    /// Swaps performed in this round.
    pub swaps: usize,

    /// Swaps of this round whose partner came from the neighbor sample.
    pub local_swaps: usize,

    /// Swaps of this round whose partner came from the uniform sample.
    pub random_swaps: usize,

    /// Swaps performed since the start of the run.
    pub total_swaps: usize,

    /// Nodes whose color differs from their initial color.
    pub migrations: usize,

    /// Temperature in effect during this round's sweep.
    pub temperature: f64,
}

/// Edge cut and migrations of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutSummary {
    /// Directed neighbor pairs with different colors; each cut edge counts twice.
    pub gray_links: usize,
    pub edge_cut: usize,
    pub migrations: usize,
}

/// Computes the cut summary of `graph` in one O(E) pass.
pub fn summarize(graph: &Graph) -> CutSummary {
    let mut gray_links = 0;
    let mut migrations = 0;

    for (i, node) in graph.nodes().iter().enumerate() {
        if node.has_migrated() {
            migrations += 1;
        }
        gray_links += graph
            .neighbor_colors_at(i)
            .filter(|&c| c != node.color())
            .count();
    }

    CutSummary {
        gray_links,
        edge_cut: gray_links / 2,
        migrations,
    }
}

/// Number of undirected edges crossing colors.
pub fn edge_cut(graph: &Graph) -> usize {
    summarize(graph).edge_cut
}

/// Number of nodes that left their initial color.
pub fn migrations(graph: &Graph) -> usize {
    graph.nodes().iter().filter(|n| n.has_migrated()).count()
}

/// Receives metrics records as a run produces them.
pub trait Reporter {
    /// Handles one record. An error stops the run.
    fn report(&mut self, metrics: &RoundMetrics) -> crate::Result<()>;
}

impl Reporter for Vec<RoundMetrics> {
    fn report(&mut self, metrics: &RoundMetrics) -> crate::Result<()> {
        self.push(*metrics);
        Ok(())
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, metrics: &RoundMetrics) -> crate::Result<()> {
        (**self).report(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_cycle_cuts_everything() {
        let graph = Graph::from_edges(
            [(0, 0), (1, 1), (2, 0), (3, 1)],
            [(0, 1), (1, 2), (2, 3), (3, 0)],
        )
        .unwrap();
        let summary = summarize(&graph);
        assert_eq!(summary.gray_links, 8);
        assert_eq!(summary.edge_cut, 4);
        assert_eq!(summary.migrations, 0);
    }

    #[test]
    fn test_monochromatic_has_no_cut() {
        let graph = Graph::from_edges((0..5).map(|i| (i, 3)), [(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        assert_eq!(edge_cut(&graph), 0);
    }

    #[test]
    fn test_migrations_after_swap() {
        let mut graph = Graph::from_edges(
            [(0, 0), (1, 1), (2, 0), (3, 1)],
            [(0, 1), (1, 2), (2, 3), (3, 0)],
        )
        .unwrap();
        graph.swap_colors(0, 1);
        assert_eq!(migrations(&graph), 2);
        assert_eq!(summarize(&graph).migrations, 2);
        // 0:B 1:A 2:A 3:B -> edges 0-1 cut, 1-2 same, 2-3 cut, 3-0 same
        assert_eq!(edge_cut(&graph), 2);
    }

    #[test]
    fn test_vec_reporter_collects() {
        let mut sink: Vec<RoundMetrics> = Vec::new();
        let record = RoundMetrics {
            round: 3,
            edge_cut: 1,
            swaps: 2,
            local_swaps: 1,
            random_swaps: 1,
            total_swaps: 9,
            migrations: 4,
            temperature: 1.5,
        };
        sink.report(&record).unwrap();
        assert_eq!(sink, vec![record]);
    }
}
