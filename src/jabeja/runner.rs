//! Ja-be-Ja simulation loop.
//!
//! # Algorithm
//!
//! 1. For every node, in ascending id order:
//!    a. Sample candidates among its neighbors (Local, Hybrid) and pick a partner
//!    b. If none was accepted, sample the whole graph (Random, Hybrid)
//!    c. On success, exchange the two colors
//! 2. Measure edge cut and migrations
//! 3. Cool down (or reheat) the temperature
//! 4. Repeat for the configured number of rounds
//!
//! Swaps are applied immediately, so a node processed later in the same
//! round scores its candidates against the already updated colors.

use super::config::JabejaConfig;
use super::sampler::Sampler;
use super::schedule::AnnealingScheduler;
use super::selector::PartnerSelector;
use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::metrics::{self, Reporter, RoundMetrics};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Lifecycle of a [`Jabeja`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Created, no round executed yet.
    Idle,
    /// At least one round done, more to go.
    Running,
    /// The configured number of rounds has been executed.
    Completed,
}

/// Which sample produced an accepted partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapSource {
    Local,
    Uniform,
}

/// A single run, advanced one round at a time.
///
/// `Jabeja` is an iterator of [`RoundMetrics`]: each `next()` executes one
/// full round and yields its record; the iterator ends after
/// `config.rounds` rounds.
///
/// ```
/// use jabeja::graph::Graph;
/// use jabeja::jabeja::{Jabeja, JabejaConfig};
///
/// let graph = Graph::from_edges(
///     [(0, 0), (1, 1), (2, 0), (3, 1)],
///     [(0, 1), (1, 2), (2, 3), (3, 0)],
/// ).unwrap();
/// let run = Jabeja::new(graph, JabejaConfig::default().with_rounds(10)).unwrap();
/// assert_eq!(run.count(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Jabeja {
    graph: Graph,
    config: JabejaConfig,
    sampler: Sampler,
    selector: PartnerSelector,
    scheduler: AnnealingScheduler,
    rng: ChaCha8Rng,
    round: usize,
    total_swaps: usize,
}

impl Jabeja {
    /// Prepares a run; fails if the configuration is invalid.
    pub fn new(graph: Graph, config: JabejaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sampler: Sampler::new(config.local_sample_size, config.uniform_sample_size),
            selector: PartnerSelector::new(config.annealing, config.alpha),
            scheduler: AnnealingScheduler::new(&config),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            round: 0,
            total_swaps: 0,
            graph,
            config,
        })
    }

    pub fn state(&self) -> RunState {
        if self.round >= self.config.rounds {
            RunState::Completed
        } else if self.round == 0 {
            RunState::Idle
        } else {
            RunState::Running
        }
    }

    /// Rounds executed so far.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn temperature(&self) -> f64 {
        self.scheduler.temperature()
    }

    pub fn config(&self) -> &JabejaConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Executes one round, or returns `None` once the run is complete.
    pub fn step(&mut self) -> Option<RoundMetrics> {
        if self.state() == RunState::Completed {
            return None;
        }

        let temperature = self.scheduler.temperature();
        let (mut local_swaps, mut random_swaps) = (0, 0);

        for i in 0..self.graph.len() {
            let id = self.graph.ids()[i];
            match self.sample_and_swap(id, temperature) {
                Some(SwapSource::Local) => local_swaps += 1,
                Some(SwapSource::Uniform) => random_swaps += 1,
                None => {}
            }
        }
        log::info!("local swapped: {local_swaps}. random swapped: {random_swaps}");

        let swaps = local_swaps + random_swaps;
        self.total_swaps += swaps;
        let summary = metrics::summarize(&self.graph);
        self.scheduler.cool_down();

        let record = RoundMetrics {
            round: self.round,
            edge_cut: summary.edge_cut,
            swaps,
            local_swaps,
            random_swaps,
            total_swaps: self.total_swaps,
            migrations: summary.migrations,
            temperature,
        };
        log::info!(
            "round: {}, edge cut: {}, swaps: {}, migrations: {}",
            record.round,
            record.edge_cut,
            record.total_swaps,
            record.migrations
        );

        self.round += 1;
        Some(record)
    }

    /// Looks for a partner of `id` and swaps colors with it.
    fn sample_and_swap(&mut self, id: NodeId, temperature: f64) -> Option<SwapSource> {
        let policy = self.config.node_selection;
        let mut partner = None;

        if policy.samples_locally() {
            let candidates = self.sampler.local(&self.graph, id, &mut self.rng);
            partner = self
                .selector
                .select(&self.graph, id, &candidates, temperature, &mut self.rng)
                .map(|q| (q, SwapSource::Local));
        }

        if partner.is_none() && policy.samples_uniformly() {
            let candidates = self.sampler.uniform(&self.graph, id, &mut self.rng);
            partner = self
                .selector
                .select(&self.graph, id, &candidates, temperature, &mut self.rng)
                .map(|q| (q, SwapSource::Uniform));
        }

        let (q, source) = partner?;
        self.graph.swap_colors(id, q).then_some(source)
    }
}

impl Iterator for Jabeja {
    type Item = RoundMetrics;

    fn next(&mut self) -> Option<RoundMetrics> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.config.rounds.saturating_sub(self.round);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Jabeja {}

/// Outcome of a complete run.
#[derive(Debug, Clone)]
pub struct JabejaResult {
    /// The graph with its final coloring.
    pub graph: Graph,

    /// One record per round, in order.
    pub history: Vec<RoundMetrics>,

    /// Lowest edge cut reported by any round (the initial cut if no rounds ran).
    pub best_edge_cut: usize,

    /// Round that first reached `best_edge_cut`, if any round ran.
    pub best_round: Option<usize>,

    /// Swaps over the whole run.
    pub total_swaps: usize,

    /// Temperature after the last cool-down.
    pub final_temperature: f64,
}

/// Executes complete Ja-be-Ja runs.
pub struct JabejaRunner;

impl JabejaRunner {
    /// Runs all rounds and collects the history.
    pub fn run(graph: Graph, config: &JabejaConfig) -> Result<JabejaResult> {
        Self::run_with_reporter(graph, config, &mut NoopReporter)
    }

    /// Runs all rounds, handing every record to `reporter` as it is produced.
    ///
    /// A reporter error stops the run and is returned.
    pub fn run_with_reporter<Rep: Reporter + ?Sized>(
        graph: Graph,
        config: &JabejaConfig,
        reporter: &mut Rep,
    ) -> Result<JabejaResult> {
        let initial_cut = metrics::edge_cut(&graph);
        let mut run = Jabeja::new(graph, config.clone())?;
        log::info!(
            "starting {} rounds on {} nodes, {} edges, initial edge cut {}",
            config.rounds,
            run.graph().len(),
            run.graph().edge_count(),
            initial_cut
        );

        let mut history = Vec::with_capacity(config.rounds);
        let mut best_edge_cut = initial_cut;
        let mut best_round = None;

        while let Some(record) = run.step() {
            reporter.report(&record)?;
            if best_round.is_none() || record.edge_cut < best_edge_cut {
                best_edge_cut = record.edge_cut;
                best_round = Some(record.round);
            }
            history.push(record);
        }

        Ok(JabejaResult {
            total_swaps: run.total_swaps,
            final_temperature: run.temperature(),
            graph: run.into_graph(),
            history,
            best_edge_cut,
            best_round,
        })
    }
}

struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&mut self, _metrics: &RoundMetrics) -> Result<()> {
        Ok(())
    }
}
