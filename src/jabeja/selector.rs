//! Benefit scoring and partner acceptance.

use super::config::AnnealingPolicy;
use crate::graph::{Graph, NodeId};
use rand::Rng;

/// Scores of a prospective swap between `p` and `q`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Benefit {
    /// `d(p, c(p))^α + d(q, c(q))^α`: same-color adjacency as things are.
    pub old: f64,
    /// `d(p, c(q))^α + d(q, c(p))^α`: same-color adjacency after the exchange.
    pub new: f64,
}

/// Chooses the best acceptable partner among a candidate set.
///
/// Candidates are scanned in order and a single running best is kept;
/// comparisons are strict, so the first of equally good candidates wins.
/// The graph is never modified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartnerSelector {
    policy: AnnealingPolicy,
    alpha: f64,
}

impl PartnerSelector {
    pub fn new(policy: AnnealingPolicy, alpha: f64) -> Self {
        Self { policy, alpha }
    }

    /// Benefit of exchanging the colors of `p` and `q`.
    pub fn benefit(&self, graph: &Graph, p: NodeId, q: NodeId) -> Option<Benefit> {
        let cp = graph.color(p)?;
        let cq = graph.color(q)?;
        let score = |node, color| (graph.degree(node, color) as f64).powf(self.alpha);
        Some(Benefit {
            old: score(p, cp) + score(q, cq),
            new: score(p, cq) + score(q, cp),
        })
    }

    /// Returns the accepted candidate with the highest benefit, if any.
    ///
    /// Probabilistic policies draw exactly one uniform value per scanned
    /// candidate, whether or not it is accepted.
    pub fn select<R: Rng>(
        &self,
        graph: &Graph,
        p: NodeId,
        candidates: &[NodeId],
        temperature: f64,
        rng: &mut R,
    ) -> Option<NodeId> {
        let mut best = None;
        let mut highest = 0.0;

        for &q in candidates {
            let Some(benefit) = self.benefit(graph, p, q) else {
                continue;
            };

            let accepted = if self.policy.is_probabilistic() {
                let draw: f64 = rng.random();
                self.acceptance_probability(benefit, temperature)
                    .filter(|&ap| benefit.new != benefit.old && ap > draw && ap > highest)
            } else {
                (benefit.new * temperature > benefit.old && benefit.new > highest)
                    .then_some(benefit.new)
            };

            if let Some(value) = accepted {
                best = Some(q);
                highest = value;
            }
        }

        best
    }

    /// Acceptance probability of the probabilistic policies (may exceed 1).
    ///
    /// `None` for the threshold policy, which accepts without a draw. For
    /// the reciprocal policy a zero `new` score rejects the candidate
    /// (probability 0), and a zero `old` score with a positive `new` one is
    /// accepted with infinite weight.
    pub fn acceptance_probability(&self, benefit: Benefit, temperature: f64) -> Option<f64> {
        let probability = match self.policy {
            AnnealingPolicy::Threshold => return None,
            AnnealingPolicy::Exponential => ((benefit.new - benefit.old) / temperature).exp(),
            AnnealingPolicy::Reciprocal => {
                if benefit.new == 0.0 {
                    0.0
                } else if benefit.old == 0.0 {
                    f64::INFINITY
                } else {
                    ((1.0 / benefit.old - 1.0 / benefit.new) / temperature).exp()
                }
            }
        };
        Some(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Path 0-1-2-3 colored A A B B plus a pendant 4 (B) on node 1.
    fn path() -> Graph {
        Graph::from_edges(
            [(0, 0), (1, 0), (2, 1), (3, 1), (4, 1)],
            [(0, 1), (1, 2), (2, 3), (1, 4)],
        )
        .unwrap()
    }

    #[test]
    fn test_benefit_scores() {
        let graph = path();
        let selector = PartnerSelector::new(AnnealingPolicy::Threshold, 1.0);
        // p = 1 (A): d(1,A) = 1, q = 4 (B): d(4,B) = 0
        // after the swap: d(1,B) = 2, d(4,A) = 1
        let b = selector.benefit(&graph, 1, 4).unwrap();
        assert_eq!(b, Benefit { old: 1.0, new: 3.0 });
        assert!(selector.benefit(&graph, 1, 99).is_none());
    }

    #[test]
    fn test_benefit_alpha() {
        let graph = path();
        let selector = PartnerSelector::new(AnnealingPolicy::Threshold, 2.0);
        let b = selector.benefit(&graph, 1, 4).unwrap();
        assert_eq!(b, Benefit { old: 1.0, new: 5.0 });
    }

    #[test]
    fn test_threshold_picks_highest_new_score() {
        let graph = path();
        let selector = PartnerSelector::new(AnnealingPolicy::Threshold, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // 1<->3: old 1+1=2, new d(1,B)=2 + d(3,A)=0 -> 2, rejected at T=1
        // 1<->4: old 1, new 3, accepted
        let partner = selector.select(&graph, 1, &[3, 4], 1.0, &mut rng);
        assert_eq!(partner, Some(4));
    }

    #[test]
    fn test_threshold_zero_temperature_rejects() {
        let graph = path();
        let selector = PartnerSelector::new(AnnealingPolicy::Threshold, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(selector.select(&graph, 1, &[2, 3, 4], 0.0, &mut rng), None);
    }

    #[test]
    fn test_threshold_high_temperature_accepts_equal() {
        let graph = path();
        let selector = PartnerSelector::new(AnnealingPolicy::Threshold, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // 1<->3 alone: new 2 * T 2 > old 2
        assert_eq!(selector.select(&graph, 1, &[3], 2.0, &mut rng), Some(3));
    }

    #[test]
    fn test_first_seen_wins_ties() {
        // Node 0 (A) between two identical B leaves.
        let graph = Graph::from_edges([(0, 0), (1, 1), (2, 1)], [(0, 1), (0, 2)]).unwrap();
        let selector = PartnerSelector::new(AnnealingPolicy::Threshold, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(selector.select(&graph, 0, &[2, 1], 2.0, &mut rng), Some(2));
        assert_eq!(selector.select(&graph, 0, &[1, 2], 2.0, &mut rng), Some(1));
    }

    #[test]
    fn test_exponential_rejects_equal_scores() {
        let graph = Graph::from_edges((0..4).map(|i| (i, 0)), [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for policy in [AnnealingPolicy::Exponential, AnnealingPolicy::Reciprocal] {
            let selector = PartnerSelector::new(policy, 2.0);
            assert_eq!(selector.select(&graph, 0, &[1, 2, 3], 1.0, &mut rng), None);
        }
    }

    #[test]
    fn test_exponential_accepts_improvement() {
        let graph = path();
        let selector = PartnerSelector::new(AnnealingPolicy::Exponential, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        // improvement -> probability exp(2) > 1 > any draw
        assert_eq!(selector.select(&graph, 1, &[4], 0.5, &mut rng), Some(4));
    }

    #[test]
    fn test_exponential_cold_rejects_worsening() {
        let graph = path();
        let selector = PartnerSelector::new(AnnealingPolicy::Exponential, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        // 2<->0: old d(2,B)=1 + d(0,A)=1 = 2; new d(2,A)=1 + d(0,B)=0 = 1
        let b = selector.benefit(&graph, 2, 0).unwrap();
        assert!(b.new < b.old);
        assert_eq!(selector.select(&graph, 2, &[0], 0.00001, &mut rng), None);
    }

    #[test]
    fn test_reciprocal_zero_guard() {
        let selector = PartnerSelector::new(AnnealingPolicy::Reciprocal, 1.0);
        let p = selector.acceptance_probability(Benefit { old: 0.0, new: 2.0 }, 1.0);
        assert_eq!(p, Some(f64::INFINITY));
        let p = selector.acceptance_probability(Benefit { old: 2.0, new: 0.0 }, 1.0);
        assert_eq!(p, Some(0.0));
        let p = selector.acceptance_probability(Benefit { old: 2.0, new: 4.0 }, 1.0).unwrap();
        assert!((p - (0.25f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_has_no_probability() {
        let selector = PartnerSelector::new(AnnealingPolicy::Threshold, 1.0);
        let b = Benefit { old: 1.0, new: 3.0 };
        assert_eq!(selector.acceptance_probability(b, 1.0), None);
    }

    #[test]
    fn test_reciprocal_select_with_zero_scores() {
        // Node 0 (A) with two B leaves, plus an isolated node 3 of color C.
        // 0<->1 and 0<->2: old 0, new 3 -> infinite probability.
        // 0<->3: old 0, new 0 -> never accepted.
        let graph =
            Graph::from_edges([(0, 0), (1, 1), (2, 1), (3, 2)], [(0, 1), (0, 2)]).unwrap();
        let selector = PartnerSelector::new(AnnealingPolicy::Reciprocal, 1.0);
        assert_eq!(selector.benefit(&graph, 0, 1), Some(Benefit { old: 0.0, new: 3.0 }));
        assert_eq!(selector.benefit(&graph, 0, 3), Some(Benefit { old: 0.0, new: 0.0 }));

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(selector.select(&graph, 0, &[3, 2, 1], 1.0, &mut rng), Some(2));
        assert_eq!(selector.select(&graph, 0, &[1, 2], 1.0, &mut rng), Some(1));
        assert_eq!(selector.select(&graph, 0, &[3], 1.0, &mut rng), None);
    }

    #[test]
    fn test_probabilistic_draw_per_candidate() {
        let graph = path();
        let selector = PartnerSelector::new(AnnealingPolicy::Exponential, 1.0);
        let mut used = ChaCha8Rng::seed_from_u64(8);
        let mut reference = ChaCha8Rng::seed_from_u64(8);
        selector.select(&graph, 1, &[0, 2, 3, 4], 1.0, &mut used);
        for _ in 0..4 {
            let _: f64 = reference.random();
        }
        assert_eq!(used.random::<u64>(), reference.random::<u64>());
    }

    #[test]
    fn test_select_does_not_mutate() {
        let graph = path();
        let before: Vec<_> = graph.ids().iter().map(|&id| graph.color(id)).collect();
        let selector = PartnerSelector::new(AnnealingPolicy::Threshold, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        selector.select(&graph, 1, &[0, 2, 3, 4], 2.0, &mut rng);
        let after: Vec<_> = graph.ids().iter().map(|&id| graph.color(id)).collect();
        assert_eq!(before, after);
    }
}
