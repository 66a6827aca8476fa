//! # choice-trials
//!
//! Trial scheduling and adaptive bonus pricing for two-alternative
//! forced-choice experiments.
//!
//! The crate provides two core components:
//! - [`ConditionSequenceGenerator`]: a balanced, shuffled sequence of trial
//!   conditions with bonus trials injected into testing sessions
//! - [`AdaptiveDeltaController`]: a staircase that tunes the offset `delta`
//!   between a base option's reward and its numeric bonus twins
//!
//! Around them, [`Session`] ties a [`SessionDescriptor`] to its seeded RNG,
//! trial list, reward table and a [`DeltaStore`] holding each subject's
//! final delta.
//!
//! Rendering, response capture and trial-data files belong to the caller.
//!
//! ## Quick Start
//!
//! ```ignore
//! use choice_trials::{MemoryDeltaStore, Session, SessionDescriptor, StaircaseConfig};
//!
//! let mut store = MemoryDeltaStore::new();
//! let descriptor = SessionDescriptor::parse("7", "0", "testing")?;
//! let mut session = Session::begin(descriptor, StaircaseConfig::default(), &store)?;
//!
//! for index in 0..session.trials().len() {
//!     let trial = session.trials()[index];
//!     let chosen = present(&trial); // caller-owned presentation
//!     let (outcome, delta) = session.respond(index, chosen);
//!     show_feedback(outcome.reward);
//!     if let Some(delta) = delta {
//!         reprice_bonus_stimuli(delta);
//!     }
//! }
//! session.finish(&mut store)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod constants;
mod error;
mod types;

pub mod sequence;
pub mod session;
pub mod staircase;
pub mod store;

pub use config::{SequenceConfig, SessionType, ShufflePolicy, StaircaseConfig};
pub use constants::{
    DEFAULT_BONUS_PER_OPTION, DEFAULT_DECAY_WINDOW, DEFAULT_DOWN_STEP, DEFAULT_INITIAL_DELTA,
    DEFAULT_REL_FREQ, DEFAULT_UP_STEP, MINUS_OFFSET, N_BASE_OPTIONS, N_CONDITIONS, PLUS_OFFSET,
    SHAPE_REWARD_SD,
};
pub use error::{Error, Result, StoreError};
pub use sequence::{generate, option_pair, ConditionSequence, ConditionSequenceGenerator};
pub use session::{Session, SessionDescriptor, SessionRng, SessionRole, ADAPTIVE_SESSION_ID};
pub use staircase::{
    AdaptiveDeltaController, OptionRewards, Outcome, StaircaseState, StaircaseStep,
};
pub use store::{DeltaStore, JsonDeltaStore, MemoryDeltaStore};
pub use types::{BonusKind, ConditionRole, TrialRecord};
