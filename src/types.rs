//! Condition codes and trial records.

use serde::{Deserialize, Serialize};

use crate::constants::{MINUS_OFFSET, N_BASE_OPTIONS, N_CONDITIONS, PLUS_OFFSET};

/// Which of the two bonus twins a bonus trial offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusKind {
    /// Numeric offer worth the base reward plus the current delta.
    Plus,
    /// Numeric offer worth the base reward minus the current delta.
    Minus,
}

impl BonusKind {
    /// Offset added to a base code to obtain this kind's condition code.
    pub fn offset(self) -> usize {
        match self {
            BonusKind::Plus => PLUS_OFFSET,
            BonusKind::Minus => MINUS_OFFSET,
        }
    }

    /// Condition code (and bonus option index) for the given base code.
    pub fn code_for(self, base: usize) -> usize {
        assert!(base < N_BASE_OPTIONS, "base condition {base} out of range");
        base + self.offset()
    }
}

/// Role a condition code plays in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionRole {
    /// Two base options compete; the payload is the condition code itself.
    Standard(usize),
    /// A base option against one of its numeric twins; the payload is the base code.
    Bonus(BonusKind, usize),
}

impl ConditionRole {
    /// Classify a condition code.
    ///
    /// # Panics
    ///
    /// Panics if `code` is outside `[0, 36)`. Such a code can only come from a
    /// defect upstream.
    pub fn of(code: usize) -> Self {
        assert!(
            code < N_CONDITIONS,
            "condition code {code} outside [0, {N_CONDITIONS})"
        );
        if code < PLUS_OFFSET {
            ConditionRole::Standard(code)
        } else if code < MINUS_OFFSET {
            ConditionRole::Bonus(BonusKind::Plus, code - PLUS_OFFSET)
        } else {
            ConditionRole::Bonus(BonusKind::Minus, code - MINUS_OFFSET)
        }
    }

    /// The base condition this code derives from.
    pub fn base(self) -> usize {
        match self {
            ConditionRole::Standard(base) | ConditionRole::Bonus(_, base) => base,
        }
    }

    /// The bonus kind, if this is a bonus condition.
    pub fn bonus_kind(self) -> Option<BonusKind> {
        match self {
            ConditionRole::Standard(_) => None,
            ConditionRole::Bonus(kind, _) => Some(kind),
        }
    }
}

/// One scheduled trial: a condition code and the options shown left and right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Condition code in `[0, 36)`.
    pub condition: usize,
    /// Option index presented on the left.
    pub option_a: usize,
    /// Option index presented on the right.
    pub option_b: usize,
}

impl TrialRecord {
    /// Role of this trial's condition.
    pub fn role(&self) -> ConditionRole {
        ConditionRole::of(self.condition)
    }

    /// Whether this is a bonus trial.
    pub fn is_bonus(&self) -> bool {
        self.condition >= PLUS_OFFSET
    }

    /// Both presented options, left first.
    pub fn options(&self) -> [usize; 2] {
        [self.option_a, self.option_b]
    }
}
