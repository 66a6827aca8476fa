//! Condition sequence generation.
//!
//! Builds the ordered trial list for one session in three steps:
//!
//! 1. **Weighted base multiset**: conditions 0–5 appear `rel_freq` times per
//!    block, conditions 6–11 once; blocks are repeated and shuffled according
//!    to the [`ShufflePolicy`](crate::ShufflePolicy).
//! 2. **Bonus injection** (testing only): plus and minus bonus trials are
//!    inserted right after randomly chosen occurrences of each base condition.
//! 3. **Option assignment**: each code is mapped to its option pair with a
//!    random left/right swap.
//!
//! All randomness is drawn from the caller's RNG, so a seeded generator
//! reproduces the session exactly.

mod bonus;
mod pairs;
mod weighted;

pub use bonus::{bonus_split, inject_bonus};
pub use pairs::{assign_options, base_pair, option_pair};
pub use weighted::{base_conditions, condition_counts, weighted_block};

use rand::Rng;

use crate::config::{SequenceConfig, SessionType};
use crate::error::Result;
use crate::types::TrialRecord;

/// Condition codes of a session before and after bonus injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSequence {
    /// Shuffled standard conditions.
    pub base: Vec<usize>,
    /// Final sequence including injected bonus conditions.
    pub conditions: Vec<usize>,
}

impl ConditionSequence {
    /// Number of injected bonus trials.
    pub fn n_bonus(&self) -> usize {
        self.conditions.len() - self.base.len()
    }
}

/// Generator for a session's trial list.
#[derive(Debug, Clone)]
pub struct ConditionSequenceGenerator {
    config: SequenceConfig,
}

impl Default for ConditionSequenceGenerator {
    fn default() -> Self {
        Self::for_session(SessionType::Testing)
    }
}

impl ConditionSequenceGenerator {
    /// Create a generator after validating `config`.
    pub fn new(config: SequenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generator with the preset parameters of `session_type`.
    pub fn for_session(session_type: SessionType) -> Self {
        Self {
            config: SequenceConfig::for_session(session_type),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Draw the condition codes, keeping the pre-injection sequence.
    pub fn condition_sequence<R: Rng + ?Sized>(&self, rng: &mut R) -> ConditionSequence {
        let base = base_conditions(&self.config, rng);
        let mut conditions = base.clone();
        if self.config.inject_bonus {
            inject_bonus(&mut conditions, self.config.n_bonus_per_option, rng);
        }
        ConditionSequence { base, conditions }
    }

    /// Generate the full trial list.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<TrialRecord> {
        let sequence = self.condition_sequence(rng);
        tracing::debug!(
            n_standard = sequence.base.len(),
            n_bonus = sequence.n_bonus(),
            shuffle = ?self.config.shuffle,
            "generated condition sequence"
        );
        sequence
            .conditions
            .into_iter()
            .map(|code| assign_options(code, rng))
            .collect()
    }
}

/// Generate the trial list for a session with its preset parameters.
///
/// `session_id` does not influence the sequence beyond what the caller's RNG
/// seed already encodes; it only labels the generation in logs.
pub fn generate<R: Rng + ?Sized>(
    session_type: SessionType,
    session_id: u64,
    rng: &mut R,
) -> Vec<TrialRecord> {
    let span = tracing::debug_span!("generate", %session_type, session_id);
    let _enter = span.enter();
    ConditionSequenceGenerator::for_session(session_type).generate(rng)
}
