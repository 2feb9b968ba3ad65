//! Temperature schedule with optional cyclic reheating.

use super::config::{AnnealingPolicy, JabejaConfig};

/// Rounds spent at the temperature floor before a reheat.
pub const ROUNDS_BEFORE_REHEAT: usize = 400;

/// Owns the temperature of one run.
///
/// Cooling moves `T` toward the policy floor once per round. With
/// reheating enabled, `T` jumps back to the initial temperature after
/// [`ROUNDS_BEFORE_REHEAT`] cool-downs at the floor, giving a
/// cool-then-reheat cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingScheduler {
    policy: AnnealingPolicy,
    initial: f64,
    temperature: f64,
    min_temperature: f64,
    delta: f64,
    reheat: bool,
    rounds_at_floor: usize,
}

impl AnnealingScheduler {
    pub fn new(config: &JabejaConfig) -> Self {
        Self {
            policy: config.annealing,
            initial: config.temperature,
            temperature: config.temperature,
            min_temperature: config.annealing.min_temperature(),
            delta: config.delta,
            reheat: config.reheat,
            rounds_at_floor: 0,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn min_temperature(&self) -> f64 {
        self.min_temperature
    }

    /// Consecutive cool-downs spent at the floor since the last reset.
    pub fn rounds_at_floor(&self) -> usize {
        self.rounds_at_floor
    }

    /// Advances the schedule by one round.
    pub fn cool_down(&mut self) {
        if self.temperature > self.min_temperature {
            self.temperature = self.policy.cool(self.temperature, self.delta);
            log::debug!("cooling T to {}", self.temperature);
        }
        if self.temperature < self.min_temperature {
            self.temperature = self.min_temperature;
            self.rounds_at_floor = 0;
        }
        if self.temperature == self.min_temperature && self.reheat {
            self.rounds_at_floor += 1;
            log::debug!(
                "waiting {} more rounds to reheat",
                ROUNDS_BEFORE_REHEAT - self.rounds_at_floor
            );
            if self.rounds_at_floor == ROUNDS_BEFORE_REHEAT {
                self.temperature = self.initial;
                self.rounds_at_floor = 0;
                log::debug!("reheating T to {}", self.temperature);
            }
        }
    }
}
