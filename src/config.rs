//! Session types and the parameters that drive sequence generation and the
//! staircase.
//!
//! Both configuration structs follow the same shape: a `Default`, named
//! presets, consuming builder methods that panic on out-of-range arguments,
//! and a `validate()` that reports inconsistencies as
//! [`Error::Configuration`](crate::Error::Configuration).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BONUS_PER_OPTION, DEFAULT_DECAY_WINDOW, DEFAULT_DOWN_STEP, DEFAULT_INITIAL_DELTA,
    DEFAULT_REL_FREQ, DEFAULT_UP_STEP, N_BASE_OPTIONS, N_FREQUENT_CONDITIONS,
};
use crate::error::{Error, Result};

/// Kind of session being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// Short familiarisation session.
    Practice,
    /// Long session for learning option rewards.
    Training,
    /// Session containing bonus trials.
    Testing,
}

impl SessionType {
    /// All session types, in the order they are offered to the experimenter.
    pub const ALL: [SessionType; 3] = [
        SessionType::Practice,
        SessionType::Training,
        SessionType::Testing,
    ];

    /// Lowercase name used in descriptors and file names.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionType::Practice => "practice",
            SessionType::Training => "training",
            SessionType::Testing => "testing",
        }
    }

    /// Whether bonus trials are injected into this session's sequence.
    pub fn has_bonus_trials(self) -> bool {
        matches!(self, SessionType::Testing)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "practice" => Ok(SessionType::Practice),
            "training" => Ok(SessionType::Training),
            "testing" => Ok(SessionType::Testing),
            other => Err(Error::config(format!(
                "unknown session type '{other}' (expected practice, training or testing)"
            ))),
        }
    }
}

/// How the weighted base multiset is randomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShufflePolicy {
    /// Expand all repeats, then shuffle the whole list once.
    ///
    /// Identical conditions may cluster across block boundaries.
    #[default]
    WholeSession,
    /// Shuffle each repeat block independently and concatenate.
    ///
    /// Every block of `block_len` trials carries the exact weight ratio.
    PerBlock,
}

/// Parameters of the condition sequence for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Declared number of standard trials in the session.
    ///
    /// Must equal `block_len() * n_repeats`.
    pub n_trials: usize,

    /// Number of times the weighted block is repeated.
    pub n_repeats: usize,

    /// How many times each frequent condition (0–5) appears per block.
    pub rel_freq: usize,

    /// Bonus trials inserted per base option. Only used when
    /// `inject_bonus` is set.
    ///
    /// Odd values split with one more plus than minus insertion.
    pub n_bonus_per_option: usize,

    /// Whether bonus injection runs.
    pub inject_bonus: bool,

    /// Randomization policy for the weighted multiset.
    pub shuffle: ShufflePolicy,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::testing()
    }
}

impl SequenceConfig {
    /// Preset for practice sessions: 30 trials, one block, no bonus trials.
    pub fn practice() -> Self {
        Self {
            n_trials: 30,
            n_repeats: 1,
            rel_freq: DEFAULT_REL_FREQ,
            n_bonus_per_option: DEFAULT_BONUS_PER_OPTION,
            inject_bonus: false,
            shuffle: ShufflePolicy::default(),
        }
    }

    /// Preset for training sessions: 210 trials, seven blocks, no bonus trials.
    pub fn training() -> Self {
        Self {
            n_trials: 210,
            n_repeats: 7,
            ..Self::practice()
        }
    }

    /// Preset for testing sessions: 90 trials, three blocks, bonus injection on.
    pub fn testing() -> Self {
        Self {
            n_trials: 90,
            n_repeats: 3,
            inject_bonus: true,
            ..Self::practice()
        }
    }

    /// Preset for the given session type.
    pub fn for_session(session_type: SessionType) -> Self {
        match session_type {
            SessionType::Practice => Self::practice(),
            SessionType::Training => Self::training(),
            SessionType::Testing => Self::testing(),
        }
    }

    /// Length of one weighted block.
    pub fn block_len(&self) -> usize {
        N_FREQUENT_CONDITIONS * self.rel_freq + (N_BASE_OPTIONS - N_FREQUENT_CONDITIONS)
    }

    /// Number of bonus trials this configuration asks for, assuming every
    /// base condition occurs often enough.
    pub fn expected_bonus_trials(&self) -> usize {
        if self.inject_bonus {
            N_BASE_OPTIONS * self.n_bonus_per_option
        } else {
            0
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the number of repeats, keeping `n_trials` consistent.
    pub fn n_repeats(mut self, repeats: usize) -> Self {
        assert!(repeats > 0, "n_repeats must be > 0");
        self.n_repeats = repeats;
        self.n_trials = self.block_len() * repeats;
        self
    }

    /// Set the relative frequency of conditions 0–5, keeping `n_trials` consistent.
    pub fn rel_freq(mut self, rel_freq: usize) -> Self {
        assert!(rel_freq > 0, "rel_freq must be > 0");
        self.rel_freq = rel_freq;
        self.n_trials = self.block_len() * self.n_repeats;
        self
    }

    /// Set the number of bonus trials per base option.
    pub fn n_bonus_per_option(mut self, n: usize) -> Self {
        self.n_bonus_per_option = n;
        self
    }

    /// Enable or disable bonus injection.
    pub fn inject_bonus(mut self, inject: bool) -> Self {
        self.inject_bonus = inject;
        self
    }

    /// Set the shuffle policy.
    pub fn shuffle(mut self, policy: ShufflePolicy) -> Self {
        self.shuffle = policy;
        self
    }

    /// Check that the configuration is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.n_repeats == 0 {
            return Err(Error::config("n_repeats must be > 0"));
        }
        if self.rel_freq == 0 {
            return Err(Error::config("rel_freq must be > 0"));
        }
        let expected = self.block_len() * self.n_repeats;
        if self.n_trials != expected {
            return Err(Error::config(format!(
                "n_trials {} does not match {} blocks of {} trials ({expected})",
                self.n_trials,
                self.n_repeats,
                self.block_len()
            )));
        }
        Ok(())
    }
}

/// Parameters of the adaptive delta staircase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaircaseConfig {
    /// Starting offset between a base reward and its bonus twins.
    pub initial_delta: f64,

    /// Magnitude of the decrease after a correct response (`a`).
    pub down_step: f64,

    /// Magnitude of the increase after an incorrect response (`b`).
    pub up_step: f64,

    /// Observations over which the step size decays; decay starts after half.
    pub window: usize,

    /// Maximum number of observations the controller accepts.
    pub max_observations: usize,
}

impl Default for StaircaseConfig {
    fn default() -> Self {
        let testing = SequenceConfig::testing();
        Self {
            initial_delta: DEFAULT_INITIAL_DELTA,
            down_step: DEFAULT_DOWN_STEP,
            up_step: DEFAULT_UP_STEP,
            window: DEFAULT_DECAY_WINDOW,
            max_observations: testing.n_trials + testing.expected_bonus_trials(),
        }
    }
}

impl StaircaseConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial delta.
    pub fn initial_delta(mut self, delta: f64) -> Self {
        assert!(
            delta.is_finite() && delta >= 0.0,
            "initial_delta must be finite and non-negative"
        );
        self.initial_delta = delta;
        self
    }

    /// Set the step magnitudes for correct (`down`) and incorrect (`up`) responses.
    pub fn steps(mut self, down: f64, up: f64) -> Self {
        assert!(
            down.is_finite() && down >= 0.0 && up.is_finite() && up >= 0.0,
            "step magnitudes must be finite and non-negative"
        );
        self.down_step = down;
        self.up_step = up;
        self
    }

    /// Set the decay window.
    pub fn window(mut self, window: usize) -> Self {
        assert!(window > 0, "window must be > 0");
        self.window = window;
        self
    }

    /// Set the observation limit.
    pub fn max_observations(mut self, max: usize) -> Self {
        assert!(max > 0, "max_observations must be > 0");
        self.max_observations = max;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_delta.is_finite() && self.initial_delta >= 0.0) {
            return Err(Error::config("initial_delta must be finite and non-negative"));
        }
        if !(self.down_step.is_finite() && self.down_step >= 0.0) {
            return Err(Error::config("down_step must be finite and non-negative"));
        }
        if !(self.up_step.is_finite() && self.up_step >= 0.0) {
            return Err(Error::config("up_step must be finite and non-negative"));
        }
        if self.window == 0 {
            return Err(Error::config("window must be > 0"));
        }
        if self.max_observations == 0 {
            return Err(Error::config("max_observations must be > 0"));
        }
        Ok(())
    }
}
