//! Ja-be-Ja: gossip-style graph partitioning by color swaps.
//!
//! Every node repeatedly looks for a partner, among its neighbors or in a
//! uniform sample of the graph, whose color it would rather have. The two
//! exchange colors when the swap increases same-color adjacency, or when
//! the annealing policy tolerates a worse one. Colors are only ever
//! exchanged, so partition sizes never change.
//!
//! The temperature decreases once per round and, optionally, is reset
//! after a long stay at its floor.
//!
//! # References
//!
//! - Rahimian, Payberah, Girdzijauskas, Jelasity & Haridi (2013),
//!   "JA-BE-JA: A Distributed Algorithm for Balanced Graph Partitioning", SASO
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod runner;
mod sampler;
mod schedule;
mod selector;

pub use config::{
    AnnealingPolicy, JabejaConfig, NodeSelection, PROBABILISTIC_MIN_TEMPERATURE,
    THRESHOLD_MIN_TEMPERATURE,
};
pub use runner::{Jabeja, JabejaResult, JabejaRunner, RunState};
pub use sampler::Sampler;
pub use schedule::{AnnealingScheduler, ROUNDS_BEFORE_REHEAT};
pub use selector::{Benefit, PartnerSelector};
