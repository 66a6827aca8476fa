//! Session descriptors and the per-session composition of generator,
//! staircase, reward table and delta store.

use std::fmt;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::config::{SequenceConfig, SessionType, StaircaseConfig};
use crate::error::{Error, Result};
use crate::sequence::ConditionSequenceGenerator;
use crate::staircase::{AdaptiveDeltaController, OptionRewards, Outcome};
use crate::store::DeltaStore;
use crate::types::TrialRecord;

/// RNG type driving every random decision of a session.
pub type SessionRng = Xoshiro256PlusPlus;

/// Session id reserved for the adaptive testing session.
pub const ADAPTIVE_SESSION_ID: u64 = 0;

/// What the staircase does in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionRole {
    /// Practice session; no bonus trials.
    Practice,
    /// Training session; no bonus trials.
    Training,
    /// Testing session 0: the staircase is updated after every bonus trial.
    AdaptiveTesting,
    /// Later testing session: the stored delta is applied but never updated.
    FixedTesting,
}

/// Identity of one session as entered by the experimenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionDescriptor {
    /// Subject identifier; namespaces the stored delta.
    pub subject_id: u64,
    /// Session number within the subject's schedule.
    pub session_id: u64,
    /// Kind of session.
    pub session_type: SessionType,
}

impl SessionDescriptor {
    /// Create a descriptor.
    pub fn new(subject_id: u64, session_id: u64, session_type: SessionType) -> Self {
        Self {
            subject_id,
            session_id,
            session_type,
        }
    }

    /// Parse the raw field values collected from the experimenter.
    pub fn parse(subject_id: &str, session_id: &str, session_type: &str) -> Result<Self> {
        let subject_id = parse_id("subject id", subject_id)?;
        let session_id = parse_id("session id", session_id)?;
        let session_type = session_type.parse()?;
        Ok(Self::new(subject_id, session_id, session_type))
    }

    /// Seed of the session RNG.
    ///
    /// `session_id + 10 * subject_id`, plus 1000 for testing sessions.
    pub fn seed(&self) -> u64 {
        let testing = u64::from(self.session_type == SessionType::Testing) * 1000;
        self.session_id
            .wrapping_add(self.subject_id.wrapping_mul(10))
            .wrapping_add(testing)
    }

    /// Fresh RNG for this session.
    pub fn rng(&self) -> SessionRng {
        SessionRng::seed_from_u64(self.seed())
    }

    /// Role of this session in the staircase lifecycle.
    pub fn role(&self) -> SessionRole {
        match self.session_type {
            SessionType::Practice => SessionRole::Practice,
            SessionType::Training => SessionRole::Training,
            SessionType::Testing if self.session_id == ADAPTIVE_SESSION_ID => {
                SessionRole::AdaptiveTesting
            }
            SessionType::Testing => SessionRole::FixedTesting,
        }
    }
}

impl fmt::Display for SessionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subj_{}_sess_{}_{}",
            self.subject_id, self.session_id, self.session_type
        )
    }
}

fn parse_id(field: &str, raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::config(format!("{field} is required")));
    }
    trimmed
        .parse()
        .map_err(|_| Error::config(format!("{field} must be a non-negative integer, got '{raw}'")))
}

/// A running session: the generated trials plus the staircase state that
/// applies to them.
#[derive(Debug, Clone)]
pub struct Session {
    descriptor: SessionDescriptor,
    trials: Vec<TrialRecord>,
    rewards: OptionRewards,
    controller: Option<AdaptiveDeltaController>,
    next_index: usize,
    rng: SessionRng,
}

impl Session {
    /// Start a session with the preset sequence parameters of its type.
    pub fn begin<S: DeltaStore + ?Sized>(
        descriptor: SessionDescriptor,
        staircase: StaircaseConfig,
        store: &S,
    ) -> Result<Self> {
        let sequence = SequenceConfig::for_session(descriptor.session_type);
        Self::with_sequence(descriptor, sequence, staircase, store)
    }

    /// Start a session with explicit sequence parameters.
    ///
    /// Fails with [`Error::MissingStaircaseState`] for a follow-up testing
    /// session whose subject has no stored delta. No trials are generated
    /// when setup fails.
    pub fn with_sequence<S: DeltaStore + ?Sized>(
        descriptor: SessionDescriptor,
        sequence: SequenceConfig,
        staircase: StaircaseConfig,
        store: &S,
    ) -> Result<Self> {
        staircase.validate()?;
        let generator = ConditionSequenceGenerator::new(sequence)?;
        let role = descriptor.role();

        let mut rewards = OptionRewards::new(staircase.initial_delta);
        if role == SessionRole::FixedTesting {
            let stored = store
                .load(descriptor.subject_id)?
                .ok_or(Error::MissingStaircaseState {
                    subject_id: descriptor.subject_id,
                })?;
            rewards.set_delta(stored.delta);
        }

        let mut rng = descriptor.rng();
        let trials = generator.generate(&mut rng);

        let controller = if role == SessionRole::AdaptiveTesting {
            let limited = staircase.max_observations(trials.len());
            Some(AdaptiveDeltaController::new(limited)?)
        } else {
            None
        };

        tracing::info!(
            session = %descriptor,
            ?role,
            seed = descriptor.seed(),
            n_trials = trials.len(),
            delta = rewards.delta(),
            "session started"
        );

        Ok(Self {
            descriptor,
            trials,
            rewards,
            controller,
            next_index: 0,
            rng,
        })
    }

    /// The session's descriptor.
    pub fn descriptor(&self) -> &SessionDescriptor {
        &self.descriptor
    }

    /// Role of the session.
    pub fn role(&self) -> SessionRole {
        self.descriptor.role()
    }

    /// The generated trial list.
    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    /// Current option rewards, twins priced at the current delta.
    pub fn rewards(&self) -> &OptionRewards {
        &self.rewards
    }

    /// Current delta.
    pub fn delta(&self) -> f64 {
        self.rewards.delta()
    }

    /// The staircase, present only in the adaptive testing session.
    pub fn controller(&self) -> Option<&AdaptiveDeltaController> {
        self.controller.as_ref()
    }

    /// Index of the next trial to record.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Whether every trial has been recorded.
    pub fn is_complete(&self) -> bool {
        self.next_index == self.trials.len()
    }

    /// Record the outcome of trial `index`.
    ///
    /// Returns the updated delta when the trial is a bonus trial of the
    /// adaptive session, `None` otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not the next unrecorded trial; the staircase must
    /// advance strictly in trial order.
    pub fn record(&mut self, index: usize, correct: bool) -> Option<f64> {
        assert!(
            index == self.next_index && index < self.trials.len(),
            "trial {index} recorded out of order (expected {} of {})",
            self.next_index,
            self.trials.len()
        );
        self.next_index += 1;

        if !self.trials[index].is_bonus() {
            return None;
        }
        let controller = self.controller.as_mut()?;
        let delta = controller.observe(correct);
        if let Some(update) = controller.last_step() {
            self.rewards.apply_step(update.step);
        }
        Some(delta)
    }

    /// Score the choice of `chosen` on trial `index`, draw its payout from the
    /// session RNG, and record the outcome.
    ///
    /// Returns the outcome and, for bonus trials of the adaptive session, the
    /// updated delta.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of order (see [`Session::record`]) or
    /// `chosen` is not shown on the trial.
    pub fn respond(&mut self, index: usize, chosen: usize) -> (Outcome, Option<f64>) {
        assert!(
            index < self.trials.len(),
            "trial {index} outside session of {}",
            self.trials.len()
        );
        let trial = self.trials[index];
        let outcome = self.rewards.outcome(&trial, chosen, &mut self.rng);
        let delta = self.record(index, outcome.correct);
        (outcome, delta)
    }

    /// End the session, persisting the staircase state of an adaptive session.
    ///
    /// Returns the stored delta, or `None` for sessions that do not own the
    /// staircase.
    pub fn finish<S: DeltaStore + ?Sized>(self, store: &mut S) -> Result<Option<f64>> {
        let Some(controller) = self.controller else {
            return Ok(None);
        };
        if self.next_index < self.trials.len() {
            tracing::warn!(
                session = %self.descriptor,
                recorded = self.next_index,
                total = self.trials.len(),
                "adaptive session ended early"
            );
        }
        let state = controller.state();
        store.save(self.descriptor.subject_id, state)?;
        Ok(Some(state.delta))
    }
}
