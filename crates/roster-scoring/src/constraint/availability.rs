//! Per-shift availability penalties.

use std::collections::HashMap;

use roster_core::{HardSoftScore, Result, Roster, RosterParametrization, ShiftId};

use super::IncrementalConstraint;

/// Penalizes assignments that clash with an employee's availability.
///
/// For an assigned shift:
/// - hard: `vacation_weight` per covered day the employee is unavailable
/// - soft: `undesirable_weight` per covered undesirable day
/// - soft: the spot's before/after-vacation score when the shift's time slot
///   borders one of the employee's vacations
#[derive(Debug, Clone)]
pub struct AvailabilityConstraint {
    vacation_weight: i64,
    undesirable_weight: i64,
    tracked: HashMap<ShiftId, HardSoftScore>,
}

impl AvailabilityConstraint {
    pub fn new(vacation_weight: i64, undesirable_weight: i64) -> Self {
        Self {
            vacation_weight,
            undesirable_weight,
            tracked: HashMap::new(),
        }
    }

    pub fn from_parametrization(params: &RosterParametrization) -> Self {
        Self::new(params.vacation_overlap_weight, params.undesirable_overlap_weight)
    }

    /// Score contribution of one shift in its current state.
    pub fn impact(&self, roster: &Roster, shift: ShiftId) -> HardSoftScore {
        let assignment = roster.shift(shift);
        let Some(employee) = assignment.employee() else {
            return HardSoftScore::ZERO;
        };
        let employee = roster.employee(employee);
        let spot = roster.spot(assignment.spot());

        let hard = -(assignment.vacation_overlap(roster) as i64 * self.vacation_weight);
        let mut soft = -(assignment.undesirable_overlap(roster) as i64 * self.undesirable_weight);
        if employee
            .before_vacation_slots()
            .contains(&assignment.time_slot())
        {
            soft += i64::from(spot.score_before_vacation());
        }
        if employee
            .after_vacation_slots()
            .contains(&assignment.time_slot())
        {
            soft += i64::from(spot.score_after_vacation());
        }
        HardSoftScore::of(hard, soft)
    }
}

impl IncrementalConstraint for AvailabilityConstraint {
    fn evaluate(&self, roster: &Roster) -> Result<HardSoftScore> {
        Ok(roster
            .shifts()
            .iter()
            .map(|assignment| self.impact(roster, assignment.id()))
            .sum())
    }

    fn initialize(&mut self, roster: &Roster) -> Result<HardSoftScore> {
        self.reset();
        let mut total = HardSoftScore::ZERO;
        for assignment in roster.shifts() {
            total += self.on_insert(roster, assignment.id())?;
        }
        Ok(total)
    }

    fn on_insert(&mut self, roster: &Roster, shift: ShiftId) -> Result<HardSoftScore> {
        let impact = self.impact(roster, shift);
        if impact != HardSoftScore::ZERO {
            self.tracked.insert(shift, impact);
        }
        Ok(impact)
    }

    fn on_retract(&mut self, _roster: &Roster, shift: ShiftId) -> Result<HardSoftScore> {
        Ok(self.tracked.remove(&shift).map_or(HardSoftScore::ZERO, |impact| -impact))
    }

    fn reset(&mut self) {
        self.tracked.clear();
    }

    fn name(&self) -> &str {
        "Employee availability"
    }

    fn is_hard(&self) -> bool {
        true
    }
}
