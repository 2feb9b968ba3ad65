//! Run configuration and policy enums.

use crate::error::{JabejaError, Result};
use std::fmt;
use std::str::FromStr;

/// Temperature floor of the threshold policy.
pub const THRESHOLD_MIN_TEMPERATURE: f64 = 1.0;

/// Temperature floor of the exponential and reciprocal policies.
pub const PROBABILISTIC_MIN_TEMPERATURE: f64 = 0.00001;

/// Where a node looks for swap partners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeSelection {
    /// Sample among direct neighbors only.
    Local,

    /// Sample uniformly from the whole graph only.
    Random,

    /// Try neighbors first, fall back to a uniform sample.
    #[default]
    Hybrid,
}

impl NodeSelection {
    pub fn samples_locally(&self) -> bool {
        matches!(self, NodeSelection::Local | NodeSelection::Hybrid)
    }

    pub fn samples_uniformly(&self) -> bool {
        matches!(self, NodeSelection::Random | NodeSelection::Hybrid)
    }

    fn name(&self) -> &'static str {
        match self {
            NodeSelection::Local => "LOCAL",
            NodeSelection::Random => "RANDOM",
            NodeSelection::Hybrid => "HYBRID",
        }
    }
}

/// Acceptance criterion together with its cooling rule.
///
/// | policy        | accepts when                              | cooling   | floor   |
/// |---------------|-------------------------------------------|-----------|---------|
/// | `Threshold`   | `new * T > old`                           | `T - d`   | 1.0     |
/// | `Exponential` | `exp((new - old) / T) > r`                | `T * d`   | 0.00001 |
/// | `Reciprocal`  | `exp((1/old - 1/new) / T) > r`            | `T * d`   | 0.00001 |
///
/// # References
///
/// - Rahimian, Payberah, Girdzijauskas, Jelasity & Haridi (2013),
///   "JA-BE-JA: A Distributed Algorithm for Balanced Graph Partitioning"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnealingPolicy {
    /// Linear cooling with a multiplicative acceptance threshold.
    #[default]
    Threshold,

    /// Metropolis-style acceptance on the score difference.
    Exponential,

    /// Metropolis-style acceptance on the difference of inverse scores.
    Reciprocal,
}

impl AnnealingPolicy {
    /// The temperature the scheduler never goes below.
    pub fn min_temperature(&self) -> f64 {
        match self {
            AnnealingPolicy::Threshold => THRESHOLD_MIN_TEMPERATURE,
            AnnealingPolicy::Exponential | AnnealingPolicy::Reciprocal => {
                PROBABILISTIC_MIN_TEMPERATURE
            }
        }
    }

    /// One cooling step, without clamping.
    pub fn cool(&self, temperature: f64, delta: f64) -> f64 {
        match self {
            AnnealingPolicy::Threshold => temperature - delta,
            AnnealingPolicy::Exponential | AnnealingPolicy::Reciprocal => temperature * delta,
        }
    }

    /// Whether acceptance consumes a uniform draw per candidate.
    pub fn is_probabilistic(&self) -> bool {
        !matches!(self, AnnealingPolicy::Threshold)
    }

    fn name(&self) -> &'static str {
        match self {
            AnnealingPolicy::Threshold => "STANDARD",
            AnnealingPolicy::Exponential => "EXP",
            AnnealingPolicy::Reciprocal => "CUSTOM",
        }
    }
}

impl fmt::Display for NodeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for AnnealingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeSelection {
    type Err = JabejaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LOCAL" => Ok(NodeSelection::Local),
            "RANDOM" => Ok(NodeSelection::Random),
            "HYBRID" => Ok(NodeSelection::Hybrid),
            _ => Err(JabejaError::InvalidConfig(format!(
                "node selection policy `{s}` is not supported (RANDOM, LOCAL, HYBRID)"
            ))),
        }
    }
}

impl FromStr for AnnealingPolicy {
    type Err = JabejaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "STANDARD" | "THRESHOLD" => Ok(AnnealingPolicy::Threshold),
            "EXP" | "EXPONENTIAL" => Ok(AnnealingPolicy::Exponential),
            "CUSTOM" | "RECIPROCAL" => Ok(AnnealingPolicy::Reciprocal),
            _ => Err(JabejaError::InvalidConfig(format!(
                "annealing policy `{s}` is not supported (STANDARD, EXP, CUSTOM)"
            ))),
        }
    }
}

/// Configuration of one Ja-be-Ja run.
///
/// # Examples
///
/// ```
/// use jabeja::jabeja::{AnnealingPolicy, JabejaConfig, NodeSelection};
///
/// let config = JabejaConfig::default()
///     .with_rounds(500)
///     .with_node_selection(NodeSelection::Local)
///     .with_annealing(AnnealingPolicy::Exponential)
///     .with_temperature(1.0)
///     .with_delta(0.9)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JabejaConfig {
    /// Number of sweeps over all nodes.
    pub rounds: usize,

    /// Partner sampling strategy.
    pub node_selection: NodeSelection,

    /// Acceptance and cooling policy.
    pub annealing: AnnealingPolicy,

    /// Initial temperature; also the reheat target.
    pub temperature: f64,

    /// Cooling step: subtracted (threshold) or multiplied (exponential, reciprocal).
    pub delta: f64,

    /// Reset the temperature after [`ROUNDS_BEFORE_REHEAT`](super::ROUNDS_BEFORE_REHEAT)
    /// rounds at the floor.
    pub reheat: bool,

    /// Exponent applied to same-color degrees in the benefit score.
    pub alpha: f64,

    /// Candidates drawn from a node's neighbors.
    pub local_sample_size: usize,

    /// Candidates drawn uniformly from the graph.
    pub uniform_sample_size: usize,

    /// Seed of the run's single random stream.
    pub seed: u64,
}

impl Default for JabejaConfig {
    fn default() -> Self {
        Self {
            rounds: 1000,
            node_selection: NodeSelection::Hybrid,
            annealing: AnnealingPolicy::Threshold,
            temperature: 2.0,
            delta: 0.003,
            reheat: false,
            alpha: 2.0,
            local_sample_size: 3,
            uniform_sample_size: 6,
            seed: 0,
        }
    }
}

impl JabejaConfig {
    pub fn with_rounds(mut self, n: usize) -> Self {
        self.rounds = n;
        self
    }

    pub fn with_node_selection(mut self, policy: NodeSelection) -> Self {
        self.node_selection = policy;
        self
    }

    pub fn with_annealing(mut self, policy: AnnealingPolicy) -> Self {
        self.annealing = policy;
        self
    }

    pub fn with_temperature(mut self, t: f64) -> Self {
        self.temperature = t;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_reheat(mut self, reheat: bool) -> Self {
        self.reheat = reheat;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_local_sample_size(mut self, k: usize) -> Self {
        self.local_sample_size = k;
        self
    }

    pub fn with_uniform_sample_size(mut self, k: usize) -> Self {
        self.uniform_sample_size = k;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// Sample sizes of zero are allowed; such a run never swaps.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(invalid(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(invalid(format!(
                "temperature must be finite and non-negative, got {}",
                self.temperature
            )));
        }
        if !self.delta.is_finite() {
            return Err(invalid(format!("delta must be finite, got {}", self.delta)));
        }
        match self.annealing {
            AnnealingPolicy::Threshold => {
                if self.delta <= 0.0 {
                    return Err(invalid(format!(
                        "threshold delta must be positive, got {}",
                        self.delta
                    )));
                }
            }
            AnnealingPolicy::Exponential | AnnealingPolicy::Reciprocal => {
                if self.temperature <= 0.0 {
                    return Err(invalid(format!(
                        "{} temperature must be positive, got {}",
                        self.annealing, self.temperature
                    )));
                }
                if self.delta <= 0.0 || self.delta >= 1.0 {
                    return Err(invalid(format!(
                        "{} delta must be in (0, 1), got {}",
                        self.annealing, self.delta
                    )));
                }
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> JabejaError {
    JabejaError::InvalidConfig(message)
}
