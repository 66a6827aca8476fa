//! Bonus-trial injection for testing sessions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::N_BASE_OPTIONS;
use crate::types::BonusKind;

/// Split of `n_bonus_per_option` into plus and minus insertions.
///
/// Odd counts give the extra insertion to the plus twin.
pub fn bonus_split(n_bonus_per_option: usize) -> (usize, usize) {
    let minus = n_bonus_per_option / 2;
    (n_bonus_per_option - minus, minus)
}

/// Insert bonus trials after randomly chosen occurrences of each base condition.
///
/// For each base code in order 0..12, the positions where it currently occurs
/// are shuffled; the first `plus` of them receive a plus-bonus trial and the
/// next `minus` a minus-bonus trial, inserted directly after the chosen
/// occurrence. Insertions run from the highest index down so the remaining
/// chosen indices stay valid. Existing elements are never moved relative to
/// each other.
///
/// When a base code occurs fewer times than requested every occurrence is
/// used. Returns the number of inserted trials.
pub fn inject_bonus<R: Rng + ?Sized>(
    conditions: &mut Vec<usize>,
    n_bonus_per_option: usize,
    rng: &mut R,
) -> usize {
    let (n_plus, n_minus) = bonus_split(n_bonus_per_option);
    let mut inserted = 0;

    for base in 0..N_BASE_OPTIONS {
        let mut positions: Vec<usize> = conditions
            .iter()
            .enumerate()
            .filter(|&(_, &code)| code == base)
            .map(|(idx, _)| idx)
            .collect();
        positions.shuffle(rng);

        let plus_end = n_plus.min(positions.len());
        let minus_end = (n_plus + n_minus).min(positions.len());

        let mut chosen: Vec<(usize, BonusKind)> = positions[..plus_end]
            .iter()
            .map(|&idx| (idx, BonusKind::Plus))
            .chain(
                positions[plus_end..minus_end]
                    .iter()
                    .map(|&idx| (idx, BonusKind::Minus)),
            )
            .collect();

        if chosen.len() < n_bonus_per_option {
            tracing::warn!(
                base,
                requested = n_bonus_per_option,
                available = positions.len(),
                "not enough occurrences for requested bonus trials"
            );
        }

        chosen.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        for (idx, kind) in chosen {
            conditions.insert(idx + 1, kind.code_for(base));
            inserted += 1;
        }
    }

    inserted
}
