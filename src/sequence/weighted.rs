//! Weighted base multiset of standard conditions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{SequenceConfig, ShufflePolicy};
use crate::constants::{N_BASE_OPTIONS, N_FREQUENT_CONDITIONS};

/// One unshuffled block: codes 0–5 repeated `rel_freq` times, then codes 6–11 once.
pub fn weighted_block(rel_freq: usize) -> Vec<usize> {
    let mut block = Vec::with_capacity(
        N_FREQUENT_CONDITIONS * rel_freq + (N_BASE_OPTIONS - N_FREQUENT_CONDITIONS),
    );
    for code in 0..N_FREQUENT_CONDITIONS {
        block.extend(std::iter::repeat(code).take(rel_freq));
    }
    block.extend(N_FREQUENT_CONDITIONS..N_BASE_OPTIONS);
    block
}

/// Draw the shuffled standard-condition sequence for a session.
///
/// The result always holds `n_repeats * rel_freq` copies of each of codes
/// 0–5 and `n_repeats` copies of each of codes 6–11; only the order depends
/// on `rng` and the shuffle policy.
pub fn base_conditions<R: Rng + ?Sized>(config: &SequenceConfig, rng: &mut R) -> Vec<usize> {
    let block = weighted_block(config.rel_freq);
    let mut conditions = Vec::with_capacity(block.len() * config.n_repeats);

    match config.shuffle {
        ShufflePolicy::WholeSession => {
            for _ in 0..config.n_repeats {
                conditions.extend_from_slice(&block);
            }
            conditions.shuffle(rng);
        }
        ShufflePolicy::PerBlock => {
            for _ in 0..config.n_repeats {
                let mut shuffled = block.clone();
                shuffled.shuffle(rng);
                conditions.extend(shuffled);
            }
        }
    }

    conditions
}

/// Count occurrences of each standard condition.
pub fn condition_counts(conditions: &[usize]) -> [usize; N_BASE_OPTIONS] {
    let mut counts = [0; N_BASE_OPTIONS];
    for &code in conditions {
        if code < N_BASE_OPTIONS {
            counts[code] += 1;
        }
    }
    counts
}
