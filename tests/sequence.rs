//! Properties of generated condition sequences.
//!
//! Covers the weight ratio of the base multiset, conservation of the base
//! order under bonus injection, the per-option bonus count, and the option
//! pair mapping.

use choice_trials::sequence::{
    base_conditions, condition_counts, inject_bonus, option_pair, weighted_block,
};
use choice_trials::{
    generate, ConditionRole, ConditionSequenceGenerator, SequenceConfig, SessionType,
    ShufflePolicy, N_BASE_OPTIONS, N_CONDITIONS,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn rng(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// True if `needle` appears in `haystack` in order (not necessarily contiguous).
fn is_subsequence(needle: &[usize], haystack: &[usize]) -> bool {
    let mut it = haystack.iter();
    needle.iter().all(|n| it.any(|h| h == n))
}

// =============================================================================
// WEIGHT INVARIANT
// =============================================================================

#[test]
fn weight_ratio_holds_for_every_session_type_and_policy() {
    for session_type in SessionType::ALL {
        for policy in [ShufflePolicy::WholeSession, ShufflePolicy::PerBlock] {
            let config = SequenceConfig::for_session(session_type).shuffle(policy);
            for seed in 0..10 {
                let counts = condition_counts(&base_conditions(&config, &mut rng(seed)));
                for frequent in 0..6 {
                    for rare in 6..12 {
                        assert_eq!(counts[frequent], config.rel_freq * counts[rare]);
                    }
                }
                assert_eq!(counts[6], config.n_repeats);
            }
        }
    }
}

#[test]
fn weight_ratio_follows_custom_rel_freq() {
    let config = SequenceConfig::testing().rel_freq(2);
    let counts = condition_counts(&base_conditions(&config, &mut rng(4)));
    assert_eq!(counts[0], 6);
    assert_eq!(counts[11], 3);
    assert_eq!(counts.iter().sum::<usize>(), config.n_trials);
}

#[test]
fn block_length_matches_preset_trial_counts() {
    assert_eq!(weighted_block(4).len(), 30);
    assert_eq!(SequenceConfig::practice().n_trials, 30);
    assert_eq!(SequenceConfig::training().n_trials, 30 * 7);
    assert_eq!(SequenceConfig::testing().n_trials, 30 * 3);
}

// =============================================================================
// CONSERVATION
// =============================================================================

#[test]
fn injection_preserves_base_order() {
    for seed in 0..20 {
        let generator = ConditionSequenceGenerator::for_session(SessionType::Testing);
        let sequence = generator.condition_sequence(&mut rng(seed));

        let standard: Vec<usize> = sequence
            .conditions
            .iter()
            .copied()
            .filter(|&c| c < N_BASE_OPTIONS)
            .collect();
        assert_eq!(standard, sequence.base);
        assert!(is_subsequence(&sequence.base, &sequence.conditions));
        assert_eq!(
            sequence.conditions.len(),
            sequence.base.len() + sequence.n_bonus()
        );
    }
}

#[test]
fn injection_length_accounts_for_inserted_trials() {
    let config = SequenceConfig::testing();
    let mut r = rng(77);
    let base = base_conditions(&config, &mut r);
    let mut conditions = base.clone();
    let inserted = inject_bonus(&mut conditions, 2, &mut r);
    assert_eq!(inserted, 24);
    assert_eq!(conditions.len(), base.len() + inserted);
}

#[test]
fn each_bonus_trial_directly_follows_a_base_occurrence() {
    let generator = ConditionSequenceGenerator::for_session(SessionType::Testing);
    let sequence = generator.condition_sequence(&mut rng(5));
    for (idx, &code) in sequence.conditions.iter().enumerate() {
        if code < N_BASE_OPTIONS {
            continue;
        }
        let base = ConditionRole::of(code).base();
        // The nearest preceding standard trial is the bonus trial's base.
        let preceding = sequence.conditions[..idx]
            .iter()
            .rev()
            .find(|&&c| c < N_BASE_OPTIONS)
            .copied();
        assert_eq!(preceding, Some(base));
    }
}

// =============================================================================
// BONUS CAP
// =============================================================================

fn bonus_counts(conditions: &[usize]) -> ([usize; 12], [usize; 12]) {
    let mut plus = [0; 12];
    let mut minus = [0; 12];
    for &code in conditions {
        match code {
            12..=23 => plus[code - 12] += 1,
            24..=35 => minus[code - 24] += 1,
            _ => {}
        }
    }
    (plus, minus)
}

#[test]
fn testing_gets_exact_bonus_count_per_option() {
    for seed in 0..10 {
        let sequence = ConditionSequenceGenerator::for_session(SessionType::Testing)
            .condition_sequence(&mut rng(seed));
        let (plus, minus) = bonus_counts(&sequence.conditions);
        for base in 0..N_BASE_OPTIONS {
            assert_eq!(plus[base], 1, "plus count for base {base}");
            assert_eq!(minus[base], 1, "minus count for base {base}");
        }
    }
}

#[test]
fn odd_bonus_count_gives_extra_plus() {
    let config = SequenceConfig::testing().n_bonus_per_option(3);
    let generator = ConditionSequenceGenerator::new(config).unwrap();
    let sequence = generator.condition_sequence(&mut rng(8));
    let (plus, minus) = bonus_counts(&sequence.conditions);
    for base in 0..N_BASE_OPTIONS {
        assert_eq!(plus[base], 2);
        assert_eq!(minus[base], 1);
    }
    assert_eq!(sequence.n_bonus(), 36);
}

#[test]
fn practice_and_training_never_contain_bonus_codes() {
    for session_type in [SessionType::Practice, SessionType::Training] {
        for seed in 0..5 {
            let trials = generate(session_type, seed, &mut rng(seed));
            assert!(trials.iter().all(|t| t.condition < N_BASE_OPTIONS));
        }
    }
}

// =============================================================================
// PAIR MAPPING
// =============================================================================

#[test]
fn option_pair_examples() {
    assert_eq!(option_pair(0), (1, 2));
    assert_eq!(option_pair(13), (1, 13));
    assert_eq!(option_pair(24), (0, 24));
    assert_eq!(option_pair(4), (3, 5));
    assert_eq!(option_pair(8), (6, 7));
}

#[test]
fn generated_records_use_mapped_pairs() {
    let trials = generate(SessionType::Testing, 0, &mut rng(21));
    for trial in &trials {
        let (a, b) = option_pair(trial.condition);
        let shown = (trial.option_a, trial.option_b);
        assert!(shown == (a, b) || shown == (b, a), "{trial:?}");
        assert!(trial.option_a < N_CONDITIONS && trial.option_b < N_CONDITIONS);
    }
}

#[test]
fn bonus_records_show_their_base_option() {
    let trials = generate(SessionType::Testing, 0, &mut rng(33));
    let bonus: Vec<_> = trials.iter().filter(|t| t.is_bonus()).collect();
    assert_eq!(bonus.len(), 24);
    for trial in bonus {
        let base = ConditionRole::of(trial.condition).base();
        assert!(trial.options().contains(&base), "{trial:?}");
        assert!(trial.options().contains(&trial.condition), "{trial:?}");
    }
}

#[test]
fn minus_twin_is_scored_against_its_base() {
    let record = choice_trials::TrialRecord {
        condition: 24,
        option_a: 24,
        option_b: 0,
    };
    for delta in [0.5, 2.0, 4.0, 6.0] {
        let rewards = choice_trials::OptionRewards::new(delta);
        assert_eq!(rewards.correct_option(&record), 0, "delta {delta}");
        assert!(!rewards.is_correct(&record, 24));
    }
}

#[test]
fn left_right_assignment_is_randomized() {
    let trials = generate(SessionType::Training, 0, &mut rng(2));
    let zero_trials: Vec<_> = trials.iter().filter(|t| t.condition == 0).collect();
    assert!(zero_trials.iter().any(|t| t.option_a == 1));
    assert!(zero_trials.iter().any(|t| t.option_a == 2));
}

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn fixed_seed_reproduces_session() {
    let a = generate(SessionType::Testing, 0, &mut rng(42));
    let b = generate(SessionType::Testing, 0, &mut rng(42));
    let c = generate(SessionType::Testing, 0, &mut rng(43));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn seed_42_testing_scenario() {
    let generator = ConditionSequenceGenerator::for_session(SessionType::Testing);
    let config = generator.config().clone();
    let sequence = generator.condition_sequence(&mut rng(42));

    assert_eq!(sequence.conditions.len(), sequence.base.len() + 24);
    let zeros = sequence.base.iter().filter(|&&c| c == 0).count();
    assert_eq!(zeros, 4 * config.n_repeats);
}
