//! Fixed layout of the option space and the default experiment parameters.

/// Number of canonical reward-bearing options (4 option sets of 3).
pub const N_BASE_OPTIONS: usize = 12;

/// Number of options in one option set.
pub const OPTIONS_PER_SET: usize = 3;

/// Total number of condition codes (standard, plus-bonus, minus-bonus).
pub const N_CONDITIONS: usize = 3 * N_BASE_OPTIONS;

/// Offset from a base code to its plus-bonus code.
pub const PLUS_OFFSET: usize = N_BASE_OPTIONS;

/// Offset from a base code to its minus-bonus code.
pub const MINUS_OFFSET: usize = 2 * N_BASE_OPTIONS;

/// Number of base conditions that receive the high sampling weight.
pub const N_FREQUENT_CONDITIONS: usize = 6;

/// Default relative frequency of the frequent conditions.
pub const DEFAULT_REL_FREQ: usize = 4;

/// Default number of bonus trials inserted per base option in testing sessions.
pub const DEFAULT_BONUS_PER_OPTION: usize = 2;

/// Mean reward around which every option set is centred.
pub const MEAN_REWARD: f64 = 10.0;

/// Stakes of the four option sets, in set order.
pub const SET_STAKES: [f64; 4] = [4.0, 1.0, 4.0, 1.0];

/// Standard deviation of a shape option's payout.
pub const SHAPE_REWARD_SD: f64 = 1.0;

/// Initial staircase offset for a subject's adaptive session.
pub const DEFAULT_INITIAL_DELTA: f64 = 4.0;

/// Staircase step magnitude applied after a correct bonus response.
pub const DEFAULT_DOWN_STEP: f64 = 0.16;

/// Staircase step magnitude applied after an incorrect bonus response.
pub const DEFAULT_UP_STEP: f64 = 0.84;

/// Number of adaptive observations over which the step size decays to zero.
pub const DEFAULT_DECAY_WINDOW: usize = 20;
