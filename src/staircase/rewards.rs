//! Mean rewards of every option, including the bonus twins that the
//! staircase re-prices, and the reward drawn when an option is chosen.
//!
//! Shape options pay out `N(mean, SHAPE_REWARD_SD)`. Bonus options show
//! their value as a number and always pay exactly that.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::constants::{
    MEAN_REWARD, MINUS_OFFSET, N_BASE_OPTIONS, N_CONDITIONS, OPTIONS_PER_SET, PLUS_OFFSET,
    SET_STAKES, SHAPE_REWARD_SD,
};
use crate::types::TrialRecord;

/// Result of one response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the chosen option has the higher mean reward.
    pub correct: bool,
    /// Reward paid out for the chosen option.
    pub reward: f64,
}

/// Mean rewards of the 12 base options.
///
/// Option set `k` holds options `3k..3k+3` with rewards
/// `[MEAN + stakes_k, MEAN, MEAN - stakes_k]`.
pub fn base_rewards() -> [f64; N_BASE_OPTIONS] {
    let mut rewards = [0.0; N_BASE_OPTIONS];
    for (set, &stakes) in SET_STAKES.iter().enumerate() {
        let first = set * OPTIONS_PER_SET;
        rewards[first] = MEAN_REWARD + stakes;
        rewards[first + 1] = MEAN_REWARD;
        rewards[first + 2] = MEAN_REWARD - stakes;
    }
    rewards
}

/// Reward table for all 36 options.
///
/// Option `i + 12` (plus twin) is worth `reward_i + delta` and option
/// `i + 24` (minus twin) `reward_i - delta`, so every twin pair is
/// separated by exactly `2 * delta`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionRewards {
    rewards: [f64; N_CONDITIONS],
    delta: f64,
}

impl OptionRewards {
    /// Build the table with bonus twins offset by `delta`.
    pub fn new(delta: f64) -> Self {
        let base = base_rewards();
        let mut rewards = [0.0; N_CONDITIONS];
        for (option, &reward) in base.iter().enumerate() {
            rewards[option] = reward;
            rewards[option + PLUS_OFFSET] = reward + delta;
            rewards[option + MINUS_OFFSET] = reward - delta;
        }
        Self { rewards, delta }
    }

    /// Offset currently applied to the twins.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Mean reward of `option`.
    ///
    /// # Panics
    ///
    /// Panics if `option` is outside `[0, 36)`.
    pub fn reward(&self, option: usize) -> f64 {
        assert!(option < N_CONDITIONS, "option {option} outside [0, {N_CONDITIONS})");
        self.rewards[option]
    }

    /// Standard deviation of the payout of `option`: [`SHAPE_REWARD_SD`]
    /// for base options, zero for bonus options.
    ///
    /// # Panics
    ///
    /// Panics if `option` is outside `[0, 36)`.
    pub fn std_reward(&self, option: usize) -> f64 {
        assert!(option < N_CONDITIONS, "option {option} outside [0, {N_CONDITIONS})");
        if option < N_BASE_OPTIONS {
            SHAPE_REWARD_SD
        } else {
            0.0
        }
    }

    /// Draw the payout of `option`.
    pub fn sample_reward<R: Rng + ?Sized>(&self, option: usize, rng: &mut R) -> f64 {
        let mean = self.reward(option);
        let sd = self.std_reward(option);
        let z: f64 = StandardNormal.sample(rng);
        mean + sd * z
    }

    /// Reward of the plus twin of base option `base`.
    pub fn plus_reward(&self, base: usize) -> f64 {
        self.reward(base + PLUS_OFFSET)
    }

    /// Reward of the minus twin of base option `base`.
    pub fn minus_reward(&self, base: usize) -> f64 {
        self.reward(base + MINUS_OFFSET)
    }

    /// Move every plus twin up and every minus twin down by `step`.
    pub fn apply_step(&mut self, step: f64) {
        for base in 0..N_BASE_OPTIONS {
            self.rewards[base + PLUS_OFFSET] += step;
            self.rewards[base + MINUS_OFFSET] -= step;
        }
        self.delta += step;
    }

    /// Re-price the twins for a stored delta.
    pub fn set_delta(&mut self, delta: f64) {
        self.apply_step(delta - self.delta);
    }

    /// Option on `trial` with the higher mean reward. Ties go to `option_a`.
    pub fn correct_option(&self, trial: &TrialRecord) -> usize {
        if self.reward(trial.option_b) > self.reward(trial.option_a) {
            trial.option_b
        } else {
            trial.option_a
        }
    }

    /// Whether choosing `chosen` on `trial` is the correct response.
    pub fn is_correct(&self, trial: &TrialRecord, chosen: usize) -> bool {
        chosen == self.correct_option(trial)
    }

    /// Score `chosen` on `trial` and draw its payout.
    ///
    /// # Panics
    ///
    /// Panics if `chosen` is not one of the two options shown on `trial`.
    pub fn outcome<R: Rng + ?Sized>(
        &self,
        trial: &TrialRecord,
        chosen: usize,
        rng: &mut R,
    ) -> Outcome {
        assert!(
            trial.options().contains(&chosen),
            "option {chosen} is not shown on trial {:?}",
            trial.options()
        );
        Outcome {
            correct: self.is_correct(trial, chosen),
            reward: self.sample_reward(chosen, rng),
        }
    }
}

impl Default for OptionRewards {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_INITIAL_DELTA)
    }
}
