//! Incremental score director for rosters.

use roster_core::{EmployeeId, HardSoftScore, Result, Roster, RosterError, ShiftId};
use tracing::info;

use crate::constraint::{AvailabilityConstraint, ConstraintResult, ConstraintSet, FairnessConstraint};

#[cfg(test)]
mod tests;

/// Constraint set used by [`RosterScoreDirector::with_default_constraints`].
pub type DefaultConstraints = (AvailabilityConstraint, FairnessConstraint);

/// Owns a roster and keeps its score current under employee changes.
///
/// The first [`calculate_score`](Self::calculate_score) initializes every
/// constraint; later changes go through
/// [`change_employee`](Self::change_employee), which retracts the shift,
/// applies the change and reinserts it, so only deltas are computed.
///
/// # Example
///
/// ```
/// use roster_scoring::director::RosterScoreDirector;
/// use roster_test::roster::sample_roster;
///
/// let roster = sample_roster();
/// let anna = roster.employee_by_name("Anna").unwrap().id();
/// let first = roster.shifts()[0].id();
///
/// let mut director = RosterScoreDirector::with_default_constraints(roster);
/// director.calculate_score().unwrap();
/// let after = director.change_employee(first, Some(anna)).unwrap();
/// assert_eq!(after, director.evaluate().unwrap());
/// ```
pub struct RosterScoreDirector<C> {
    roster: Roster,
    constraints: C,
    cached_score: HardSoftScore,
    initialized: bool,
}

impl RosterScoreDirector<DefaultConstraints> {
    /// Director with availability and fairness constraints weighted by the
    /// roster's parametrization.
    pub fn with_default_constraints(roster: Roster) -> Self {
        let params = roster.parametrization();
        let constraints = (
            AvailabilityConstraint::from_parametrization(params),
            FairnessConstraint::from_parametrization(params),
        );
        Self::new(roster, constraints)
    }
}

impl<C: ConstraintSet> RosterScoreDirector<C> {
    pub fn new(roster: Roster, constraints: C) -> Self {
        Self {
            roster,
            constraints,
            cached_score: HardSoftScore::ZERO,
            initialized: false,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn into_roster(self) -> Roster {
        self.roster
    }

    pub fn constraints(&self) -> &C {
        &self.constraints
    }

    /// Current score. The first call initializes all constraints.
    pub fn calculate_score(&mut self) -> Result<HardSoftScore> {
        if !self.initialized {
            self.cached_score = self.constraints.initialize_all(&self.roster)?;
            self.initialized = true;
            info!(event = "score_initialized", score = %self.cached_score);
        }
        Ok(self.cached_score)
    }

    /// Full evaluation from scratch, ignoring cached state.
    pub fn evaluate(&self) -> Result<HardSoftScore> {
        self.constraints.evaluate_all(&self.roster)
    }

    /// Per-constraint breakdown of the current roster.
    pub fn explain(&self) -> Result<Vec<ConstraintResult>> {
        self.constraints.evaluate_each(&self.roster)
    }

    /// Assigns `employee` to `shift` (or unassigns it) and returns the new score.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::LockedShift`] for shifts locked by the user;
    /// nothing changes in that case. If a constraint fails to take the
    /// change, the previous employee is restored and the score is
    /// recomputed from scratch on the next call.
    pub fn change_employee(
        &mut self,
        shift: ShiftId,
        employee: Option<EmployeeId>,
    ) -> Result<HardSoftScore> {
        if self.roster.shift(shift).is_locked_by_user() {
            return Err(RosterError::LockedShift {
                shift: self.roster.shift(shift).label(&self.roster),
            });
        }
        self.calculate_score()?;

        let retracted = match self.constraints.on_retract_all(&self.roster, shift) {
            Ok(delta) => delta,
            Err(err) => {
                self.reset();
                return Err(err);
            }
        };
        let previous = self.roster.set_employee(shift, employee);
        let inserted = match self.constraints.on_insert_all(&self.roster, shift) {
            Ok(delta) => delta,
            Err(err) => {
                self.roster.set_employee(shift, previous);
                self.reset();
                return Err(err);
            }
        };

        self.cached_score += retracted + inserted;
        Ok(self.cached_score)
    }

    /// Drops all incremental state; the next score is computed from scratch.
    pub fn reset(&mut self) {
        self.constraints.reset_all();
        self.cached_score = HardSoftScore::ZERO;
        self.initialized = false;
    }
}
