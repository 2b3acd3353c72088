//! Incremental roster constraints.
//!
//! A constraint scores the whole roster once in `initialize`, then keeps its
//! score current through `on_retract` / `on_insert` deltas as shift
//! assignments change. Constraints are combined in tuples implementing
//! [`ConstraintSet`], which keeps dispatch static.

mod availability;
mod fairness;

#[cfg(test)]
mod tests;

use roster_core::{HardSoftScore, Result, Roster, ShiftId};

pub use availability::AvailabilityConstraint;
pub use fairness::FairnessConstraint;

/// A single constraint with incremental scoring.
///
/// # Incremental protocol
///
/// 1. `initialize` once to populate internal state
/// 2. before changing a shift's employee: `on_retract` with the old state
/// 3. after the change: `on_insert` with the new state
///
/// Each incremental call returns the score delta it caused.
pub trait IncrementalConstraint: Send + Sync {
    /// Scores the roster from scratch without touching internal state.
    fn evaluate(&self, roster: &Roster) -> Result<HardSoftScore>;

    /// Resets, then inserts every shift. Returns the total score.
    fn initialize(&mut self, roster: &Roster) -> Result<HardSoftScore>;

    fn on_insert(&mut self, roster: &Roster, shift: ShiftId) -> Result<HardSoftScore>;

    fn on_retract(&mut self, roster: &Roster, shift: ShiftId) -> Result<HardSoftScore>;

    fn reset(&mut self);

    fn name(&self) -> &str;

    fn is_hard(&self) -> bool {
        false
    }
}

/// Score contribution of one constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintResult {
    pub name: String,
    pub score: HardSoftScore,
    pub is_hard: bool,
}

/// A set of constraints evaluated together.
pub trait ConstraintSet: Send + Sync {
    fn evaluate_all(&self, roster: &Roster) -> Result<HardSoftScore>;

    fn evaluate_each(&self, roster: &Roster) -> Result<Vec<ConstraintResult>>;

    fn constraint_count(&self) -> usize;

    fn initialize_all(&mut self, roster: &Roster) -> Result<HardSoftScore>;

    fn on_insert_all(&mut self, roster: &Roster, shift: ShiftId) -> Result<HardSoftScore>;

    fn on_retract_all(&mut self, roster: &Roster, shift: ShiftId) -> Result<HardSoftScore>;

    fn reset_all(&mut self);
}

impl ConstraintSet for () {
    fn evaluate_all(&self, _roster: &Roster) -> Result<HardSoftScore> {
        Ok(HardSoftScore::ZERO)
    }

    fn evaluate_each(&self, _roster: &Roster) -> Result<Vec<ConstraintResult>> {
        Ok(Vec::new())
    }

    fn constraint_count(&self) -> usize {
        0
    }

    fn initialize_all(&mut self, _roster: &Roster) -> Result<HardSoftScore> {
        Ok(HardSoftScore::ZERO)
    }

    fn on_insert_all(&mut self, _roster: &Roster, _shift: ShiftId) -> Result<HardSoftScore> {
        Ok(HardSoftScore::ZERO)
    }

    fn on_retract_all(&mut self, _roster: &Roster, _shift: ShiftId) -> Result<HardSoftScore> {
        Ok(HardSoftScore::ZERO)
    }

    fn reset_all(&mut self) {}
}

macro_rules! impl_constraint_set_for_tuple {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> ConstraintSet for ($($T,)+)
        where
            $($T: IncrementalConstraint,)+
        {
            fn evaluate_all(&self, roster: &Roster) -> Result<HardSoftScore> {
                let mut total = HardSoftScore::ZERO;
                $(total += self.$idx.evaluate(roster)?;)+
                Ok(total)
            }

            fn evaluate_each(&self, roster: &Roster) -> Result<Vec<ConstraintResult>> {
                Ok(vec![$(ConstraintResult {
                    name: self.$idx.name().to_string(),
                    score: self.$idx.evaluate(roster)?,
                    is_hard: self.$idx.is_hard(),
                }),+])
            }

            fn constraint_count(&self) -> usize {
                let mut count = 0;
                $(let _ = &self.$idx; count += 1;)+
                count
            }

            fn initialize_all(&mut self, roster: &Roster) -> Result<HardSoftScore> {
                let mut total = HardSoftScore::ZERO;
                $(total += self.$idx.initialize(roster)?;)+
                Ok(total)
            }

            #[inline]
            fn on_insert_all(&mut self, roster: &Roster, shift: ShiftId) -> Result<HardSoftScore> {
                let mut total = HardSoftScore::ZERO;
                $(total += self.$idx.on_insert(roster, shift)?;)+
                Ok(total)
            }

            #[inline]
            fn on_retract_all(&mut self, roster: &Roster, shift: ShiftId) -> Result<HardSoftScore> {
                let mut total = HardSoftScore::ZERO;
                $(total += self.$idx.on_retract(roster, shift)?;)+
                Ok(total)
            }

            fn reset_all(&mut self) {
                $(self.$idx.reset();)+
            }
        }
    };
}

impl_constraint_set_for_tuple!(0: C0);
impl_constraint_set_for_tuple!(0: C0, 1: C1);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3);
