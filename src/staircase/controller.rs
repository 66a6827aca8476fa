//! The adaptive delta controller.

use serde::{Deserialize, Serialize};

use crate::config::StaircaseConfig;
use crate::error::Result;

/// Snapshot of the staircase that the persistence layer stores per subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaircaseState {
    /// Current offset between a base reward and its bonus twins.
    pub delta: f64,
    /// Number of bonus observations processed.
    pub trial_counter: usize,
}

/// One applied staircase update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaircaseStep {
    /// Observation number (1-based).
    pub counter: usize,
    /// Whether the bonus response was correct.
    pub correct: bool,
    /// Decay multiplier in effect for this observation.
    pub decay: f64,
    /// Change applied to delta (negative moves the twins toward the base reward).
    pub step: f64,
    /// Delta after the update.
    pub delta: f64,
}

/// Staircase over the bonus offset `delta`.
///
/// Correct bonus responses shrink `delta` by `down_step * decay`; incorrect
/// ones grow it by `up_step * decay`. `decay` stays at 1 for the first half of
/// the window, then falls linearly to 0 at the end of the window and stays
/// there. `delta` never drops below 0: a step that would overshoot is
/// truncated so the reported step still equals the change in `delta`.
#[derive(Debug, Clone)]
pub struct AdaptiveDeltaController {
    config: StaircaseConfig,
    delta: f64,
    counter: usize,
    decay: f64,
    history: Vec<StaircaseStep>,
}

impl Default for AdaptiveDeltaController {
    fn default() -> Self {
        Self::from_valid(StaircaseConfig::default())
    }
}

impl AdaptiveDeltaController {
    /// Create a controller after validating `config`.
    pub fn new(config: StaircaseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: StaircaseConfig) -> Self {
        Self {
            delta: config.initial_delta,
            counter: 0,
            decay: 1.0,
            history: Vec::with_capacity(config.max_observations.min(256)),
            config,
        }
    }

    /// Process one bonus-trial outcome and return the updated delta.
    ///
    /// # Panics
    ///
    /// Panics once `max_observations` outcomes have been processed; the
    /// staircase only exists within one bounded adaptive session.
    pub fn observe(&mut self, correct: bool) -> f64 {
        assert!(
            self.counter < self.config.max_observations,
            "staircase already processed its limit of {} observations",
            self.config.max_observations
        );

        self.counter += 1;
        let window = self.config.window as f64;
        if self.counter as f64 > window / 2.0 {
            self.decay = (2.0 * (1.0 - self.counter as f64 / window)).max(0.0);
        }

        let raw = if correct {
            -self.config.down_step * self.decay
        } else {
            self.config.up_step * self.decay
        };
        let step = if self.delta + raw < 0.0 { -self.delta } else { raw };
        self.delta += step;

        tracing::debug!(
            counter = self.counter,
            correct,
            decay = self.decay,
            step,
            delta = self.delta,
            "staircase update"
        );

        self.history.push(StaircaseStep {
            counter: self.counter,
            correct,
            decay: self.decay,
            step,
            delta: self.delta,
        });
        self.delta
    }

    /// Current delta.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Number of observations processed.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Current decay multiplier.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Observations left before the limit is reached.
    pub fn remaining(&self) -> usize {
        self.config.max_observations - self.counter
    }

    /// Whether the observation limit has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// The most recent update, if any.
    pub fn last_step(&self) -> Option<&StaircaseStep> {
        self.history.last()
    }

    /// Every update applied so far, in order.
    pub fn history(&self) -> &[StaircaseStep] {
        &self.history
    }

    /// The configuration in use.
    pub fn config(&self) -> &StaircaseConfig {
        &self.config
    }

    /// Snapshot for persistence.
    pub fn state(&self) -> StaircaseState {
        StaircaseState {
            delta: self.delta,
            trial_counter: self.counter,
        }
    }
}
