//! Mapping from condition codes to the pair of options shown on a trial.
//!
//! Within each option set of three, standard condition `c` pits the two
//! options other than `c` against each other. A bonus condition shows base
//! option `b` against its own twin, whose index equals the bonus condition
//! code (`b + 12` or `b + 24`).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{ConditionRole, TrialRecord};

/// Option pair of a standard condition, in canonical order.
///
/// # Panics
///
/// Panics if `code` is not a standard condition (`>= 12`).
pub fn base_pair(code: usize) -> (usize, usize) {
    assert!(code < crate::constants::N_BASE_OPTIONS, "condition {code} is not a base condition");
    match code % 3 {
        0 => (code + 1, code + 2),
        1 => (code - 1, code + 1),
        _ => (code - 2, code - 1),
    }
}

/// Option pair for any condition code in `[0, 36)`, in canonical order.
///
/// # Panics
///
/// Panics if `code` is outside `[0, 36)`.
pub fn option_pair(code: usize) -> (usize, usize) {
    match ConditionRole::of(code) {
        ConditionRole::Standard(base) => base_pair(base),
        ConditionRole::Bonus(_, base) => (base, code),
    }
}

/// Build a trial record for `code`, randomly assigning the pair to left and right.
pub fn assign_options<R: Rng + ?Sized>(code: usize, rng: &mut R) -> TrialRecord {
    let (first, second) = option_pair(code);
    let mut sides = [first, second];
    sides.shuffle(rng);
    TrialRecord {
        condition: code,
        option_a: sides[0],
        option_b: sides[1],
    }
}
