//! Adaptive staircase for the bonus-offset parameter.
//!
//! The controller is purely numeric: it turns a sequence of bonus-trial
//! outcomes into a sequence of delta updates. Applying those updates to the
//! options shown on screen is left to whoever owns them; [`OptionRewards`] is
//! the numeric model of that table and keeps `plus - minus == 2 * delta`.

mod controller;
mod rewards;

pub use controller::{AdaptiveDeltaController, StaircaseState, StaircaseStep};
pub use rewards::{base_rewards, OptionRewards, Outcome};
