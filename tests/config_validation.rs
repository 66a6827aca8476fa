//! Tests for configuration validation.
//!
//! These tests verify that invalid configuration values are rejected by the
//! builder methods with appropriate panic messages, and that inconsistent
//! structs are reported by `validate()`.

use choice_trials::{
    ConditionSequenceGenerator, Error, SequenceConfig, SessionType, ShufflePolicy,
    StaircaseConfig,
};

// =============================================================================
// SEQUENCE BUILDERS
// =============================================================================

#[test]
#[should_panic(expected = "n_repeats must be > 0")]
fn n_repeats_zero_panics() {
    let _ = SequenceConfig::testing().n_repeats(0);
}

#[test]
#[should_panic(expected = "rel_freq must be > 0")]
fn rel_freq_zero_panics() {
    let _ = SequenceConfig::testing().rel_freq(0);
}

#[test]
fn rel_freq_one_is_uniform() {
    let config = SequenceConfig::practice().rel_freq(1);
    assert_eq!(config.block_len(), 12);
    assert_eq!(config.n_trials, 12);
    assert!(config.validate().is_ok());
}

#[test]
fn zero_bonus_per_option_valid() {
    let config = SequenceConfig::testing().n_bonus_per_option(0);
    assert_eq!(config.expected_bonus_trials(), 0);
    assert!(ConditionSequenceGenerator::new(config).is_ok());
}

#[test]
fn bonus_can_be_enabled_for_custom_sessions() {
    let config = SequenceConfig::training().inject_bonus(true);
    assert_eq!(config.expected_bonus_trials(), 24);
    assert!(config.validate().is_ok());
}

#[test]
fn shuffle_policy_default_is_whole_session() {
    assert_eq!(SequenceConfig::default().shuffle, ShufflePolicy::WholeSession);
    let config = SequenceConfig::default().shuffle(ShufflePolicy::PerBlock);
    assert_eq!(config.shuffle, ShufflePolicy::PerBlock);
}

// =============================================================================
// SEQUENCE VALIDATE
// =============================================================================

#[test]
fn hand_edited_trial_count_is_rejected() {
    let mut config = SequenceConfig::for_session(SessionType::Training);
    config.n_trials = 200;
    match ConditionSequenceGenerator::new(config) {
        Err(Error::Configuration(msg)) => assert!(msg.contains("n_trials 200")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn hand_edited_zero_repeats_is_rejected() {
    let mut config = SequenceConfig::testing();
    config.n_repeats = 0;
    config.n_trials = 0;
    assert!(config.validate().is_err());
}

// =============================================================================
// STAIRCASE BUILDERS
// =============================================================================

#[test]
#[should_panic(expected = "initial_delta must be finite and non-negative")]
fn negative_initial_delta_panics() {
    let _ = StaircaseConfig::new().initial_delta(-0.5);
}

#[test]
#[should_panic(expected = "initial_delta must be finite and non-negative")]
fn nan_initial_delta_panics() {
    let _ = StaircaseConfig::new().initial_delta(f64::NAN);
}

#[test]
#[should_panic(expected = "step magnitudes must be finite and non-negative")]
fn negative_step_panics() {
    let _ = StaircaseConfig::new().steps(-0.16, 0.84);
}

#[test]
#[should_panic(expected = "max_observations must be > 0")]
fn zero_max_observations_panics() {
    let _ = StaircaseConfig::new().max_observations(0);
}

#[test]
fn zero_initial_delta_valid() {
    let config = StaircaseConfig::new().initial_delta(0.0);
    assert_eq!(config.initial_delta, 0.0);
    assert!(config.validate().is_ok());
}

#[test]
fn builder_chain() {
    let config = StaircaseConfig::new()
        .initial_delta(3.0)
        .steps(0.2, 0.6)
        .window(30)
        .max_observations(50);
    assert_eq!(config.initial_delta, 3.0);
    assert_eq!((config.down_step, config.up_step), (0.2, 0.6));
    assert_eq!(config.window, 30);
    assert_eq!(config.max_observations, 50);
}

// =============================================================================
// STAIRCASE VALIDATE
// =============================================================================

#[test]
fn hand_edited_infinite_step_is_rejected() {
    let mut config = StaircaseConfig::default();
    config.up_step = f64::INFINITY;
    assert!(matches!(config.validate(), Err(Error::Configuration(_))));
}
