use roster_core::{EmployeeId, HardSoftScore, Result, Roster, RosterError, ShiftId};
use roster_test::roster::{date, sample_roster};

use super::*;
use crate::constraint::IncrementalConstraint;

// Refuses any shift assigned to one employee.
struct Refusing {
    refused: EmployeeId,
}

impl IncrementalConstraint for Refusing {
    fn evaluate(&self, _roster: &Roster) -> Result<HardSoftScore> {
        Ok(HardSoftScore::ZERO)
    }

    fn initialize(&mut self, _roster: &Roster) -> Result<HardSoftScore> {
        Ok(HardSoftScore::ZERO)
    }

    fn on_insert(&mut self, roster: &Roster, shift: ShiftId) -> Result<HardSoftScore> {
        if roster.shift(shift).employee() == Some(self.refused) {
            return Err(RosterError::LockedShift {
                shift: roster.shift(shift).label(roster),
            });
        }
        Ok(HardSoftScore::ZERO)
    }

    fn on_retract(&mut self, _roster: &Roster, _shift: ShiftId) -> Result<HardSoftScore> {
        Ok(HardSoftScore::ZERO)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "Refusing"
    }
}

#[test]
fn test_initial_score_matches_evaluation() {
    let mut director = RosterScoreDirector::with_default_constraints(sample_roster());
    assert_eq!(director.calculate_score().unwrap(), HardSoftScore::ZERO);
    assert_eq!(director.evaluate().unwrap(), HardSoftScore::ZERO);
}

#[test]
fn test_incremental_score_tracks_every_move() {
    let roster = sample_roster();
    let employees: Vec<_> = roster.employees().iter().map(|e| e.id()).collect();
    let shifts: Vec<_> = roster.shifts().iter().map(|s| s.id()).collect();
    let mut director = RosterScoreDirector::with_default_constraints(roster);
    director.calculate_score().unwrap();

    // Walk assignments through every employee and back to unassigned
    for (step, shift) in shifts.iter().cycle().take(40).enumerate() {
        let choice = match step % 4 {
            3 => None,
            n => Some(employees[(n + step / 4) % employees.len()]),
        };
        let incremental = director.change_employee(*shift, choice).unwrap();
        assert_eq!(incremental, director.evaluate().unwrap(), "step {step}");
    }
}

#[test]
fn test_locked_shift_rejected() {
    let mut roster = sample_roster();
    let cleo = roster.employee_by_name("Cleo").unwrap().id();
    let anna = roster.employee_by_name("Anna").unwrap().id();
    let locked = roster.lock_assignment(cleo, "Ro", date(2019, 1, 7)).unwrap();

    let mut director = RosterScoreDirector::with_default_constraints(roster);
    let before = director.calculate_score().unwrap();

    let err = director.change_employee(locked, Some(anna)).unwrap_err();
    assert!(matches!(err, RosterError::LockedShift { .. }));
    assert_eq!(director.roster().shift(locked).employee(), Some(cleo));
    assert_eq!(director.calculate_score().unwrap(), before);
}

#[test]
fn test_locked_shifts_still_count() {
    let mut roster = sample_roster();
    let anna = roster.employee_by_name("Anna").unwrap().id();
    // Anna fixed on the week of her Monday off
    roster.lock_assignment(anna, "Ro", date(2019, 1, 14)).unwrap();

    let mut director = RosterScoreDirector::with_default_constraints(roster);
    assert_eq!(director.calculate_score().unwrap(), HardSoftScore::of(-1, -3));
}

#[test]
fn test_explain_and_reset() {
    let roster = sample_roster();
    let anna = roster.employee_by_name("Anna").unwrap().id();
    let night = roster.shifts()[1].id();

    let mut director = RosterScoreDirector::with_default_constraints(roster);
    let score = director.change_employee(night, Some(anna)).unwrap();
    assert_eq!(score, HardSoftScore::of_soft(-100));

    let explanation = director.explain().unwrap();
    assert_eq!(explanation.len(), 2);
    assert_eq!(explanation[0].score, HardSoftScore::of_soft(-100));
    assert_eq!(explanation[1].name, "Fair workload");

    director.reset();
    assert_eq!(director.calculate_score().unwrap(), score);

    let roster = director.into_roster();
    assert_eq!(roster.shift(night).employee(), Some(anna));
}

#[test]
fn test_empty_constraint_set() {
    let mut director = RosterScoreDirector::new(sample_roster(), ());
    let shift = director.roster().shifts()[0].id();
    assert_eq!(director.change_employee(shift, None).unwrap(), HardSoftScore::ZERO);
    assert_eq!(director.constraints().constraint_count(), 0);
}

#[test]
fn test_failed_insert_restores_employee() {
    let roster = sample_roster();
    let anna = roster.employee_by_name("Anna").unwrap().id();
    let ben = roster.employee_by_name("Ben").unwrap().id();
    let cleo = roster.employee_by_name("Cleo").unwrap().id();
    let first = roster.shifts()[0].id();
    let third = roster.shifts()[2].id();

    let constraints = (FairnessConstraint::new(1, 0), Refusing { refused: ben });
    let mut director = RosterScoreDirector::new(roster, constraints);
    director.change_employee(first, Some(anna)).unwrap();

    // Fairness already took Ben when the second constraint refused him
    assert!(director.change_employee(third, Some(ben)).is_err());
    assert_eq!(director.roster().shift(third).employee(), None);
    assert_eq!(director.calculate_score().unwrap(), director.evaluate().unwrap());
    assert_eq!(director.constraints().0.ledger().load(&ben), None);

    let score = director.change_employee(third, Some(cleo)).unwrap();
    assert_eq!(score, director.evaluate().unwrap());
}
