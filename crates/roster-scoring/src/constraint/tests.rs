//! Tests for roster constraints against the sample roster.
//!
//! Shifts of the sample roster are slot-major: `2 * week` is `Ro` and
//! `2 * week + 1` is `Night_A`.

use roster_core::{EmployeeId, HardSoftScore, Roster, RosterParametrization, ShiftId};
use roster_test::roster::{sample_roster, sample_roster_with};

use super::*;

fn employee(roster: &Roster, name: &str) -> EmployeeId {
    roster.employee_by_name(name).unwrap().id()
}

fn shift(roster: &Roster, index: usize) -> ShiftId {
    roster.shifts()[index].id()
}

fn assign(roster: &mut Roster, index: usize, name: &str) {
    let employee = employee(roster, name);
    let shift = shift(roster, index);
    roster.set_employee(shift, Some(employee));
}

// ============================================================================
// FairnessConstraint
// ============================================================================

#[test]
fn test_fairness_empty_roster_scores_zero() {
    let roster = sample_roster();
    let mut fairness = FairnessConstraint::new(1, 0);
    assert_eq!(fairness.evaluate(&roster).unwrap(), HardSoftScore::ZERO);
    assert_eq!(fairness.initialize(&roster).unwrap(), HardSoftScore::ZERO);
}

#[test]
fn test_fairness_uses_adjusted_cost() {
    let mut roster = sample_roster();
    assign(&mut roster, 0, "Anna"); // 7
    assign(&mut roster, 2, "Cleo"); // 700 / 75 = 9

    let mut fairness = FairnessConstraint::new(1, 0);
    // mean 8, max deviation 1
    assert_eq!(fairness.initialize(&roster).unwrap(), HardSoftScore::of_soft(-1));

    assign(&mut roster, 3, "Anna");
    // loads 14 and 9, mean 11.5, max deviation 2.5
    assert_eq!(fairness.evaluate(&roster).unwrap(), HardSoftScore::of_soft(-2));
}

#[test]
fn test_fairness_weight_and_threshold() {
    let mut roster = sample_roster();
    assign(&mut roster, 0, "Anna");
    assign(&mut roster, 1, "Anna");
    assign(&mut roster, 2, "Cleo");
    // loads 14 and 9, max deviation 2.5

    assert_eq!(
        FairnessConstraint::new(10, 0).evaluate(&roster).unwrap(),
        HardSoftScore::of_soft(-20)
    );
    assert_eq!(
        FairnessConstraint::new(10, 1).evaluate(&roster).unwrap(),
        HardSoftScore::of_soft(-10)
    );
    assert_eq!(
        FairnessConstraint::new(10, 3).evaluate(&roster).unwrap(),
        HardSoftScore::ZERO
    );
}

#[test]
fn test_fairness_deltas_follow_moves() {
    let mut roster = sample_roster();
    assign(&mut roster, 0, "Anna");
    assign(&mut roster, 2, "Cleo");

    let mut fairness = FairnessConstraint::new(1, 0);
    let mut score = fairness.initialize(&roster).unwrap();

    let moved = shift(&roster, 2);
    score += fairness.on_retract(&roster, moved).unwrap();
    let anna = employee(&roster, "Anna");
    roster.set_employee(moved, Some(anna));
    score += fairness.on_insert(&roster, moved).unwrap();

    // Anna alone carries everything
    assert_eq!(score, HardSoftScore::ZERO);
    assert_eq!(score, fairness.evaluate(&roster).unwrap());
    assert_eq!(fairness.ledger().load(&anna), Some(14));
}

#[test]
fn test_fairness_from_parametrization() {
    let params = RosterParametrization {
        fairness_weight: 3,
        max_deviation_threshold: 1,
        ..RosterParametrization::default()
    };
    let mut roster = sample_roster_with(params.clone());
    assign(&mut roster, 0, "Anna");
    assign(&mut roster, 1, "Anna");
    assign(&mut roster, 2, "Cleo");

    let fairness = FairnessConstraint::from_parametrization(&params);
    assert_eq!(fairness.evaluate(&roster).unwrap(), HardSoftScore::of_soft(-3));
}

#[test]
fn test_fairness_spread_uses_deviation_scale() {
    let params = RosterParametrization {
        spread_weight: 2,
        deviation_scale: 10.0,
        ..RosterParametrization::default()
    };
    let mut roster = sample_roster_with(params.clone());
    assign(&mut roster, 0, "Anna");
    assign(&mut roster, 1, "Anna");
    assign(&mut roster, 2, "Cleo");

    // Loads 14 and 9: max deviation 2.5 -> 2, sqrt(12.5) * 10 -> 35
    let mut fairness = FairnessConstraint::from_parametrization(&params);
    let score = fairness.initialize(&roster).unwrap();
    assert_eq!(score, HardSoftScore::of_soft(-(2 + 2 * 35)));
    assert_eq!(score, fairness.evaluate(&roster).unwrap());

    // A single remaining load has no spread
    let delta = fairness.on_retract(&roster, shift(&roster, 2)).unwrap();
    assert_eq!(score + delta, HardSoftScore::ZERO);

    // Without a spread weight the scale has no effect
    let plain = FairnessConstraint::new(1, 0).with_spread(0, 10.0);
    assert_eq!(plain.evaluate(&roster).unwrap(), HardSoftScore::of_soft(-2));
}

// ============================================================================
// AvailabilityConstraint
// ============================================================================

#[test]
fn test_vacation_overlap_is_hard() {
    let mut roster = sample_roster();
    // Ro in the week of Anna's Monday off; 01-12, 01-13 and 01-15 are undesirable
    assign(&mut roster, 2, "Anna");

    let availability = AvailabilityConstraint::new(1, 1);
    assert_eq!(availability.evaluate(&roster).unwrap(), HardSoftScore::of(-1, -3));
}

#[test]
fn test_before_vacation_score() {
    let mut roster = sample_roster();
    // Night_A in the week ending the Friday before Anna's vacation
    assign(&mut roster, 1, "Anna");

    let availability = AvailabilityConstraint::new(1, 1);
    assert_eq!(availability.evaluate(&roster).unwrap(), HardSoftScore::of_soft(-100));
}

#[test]
fn test_after_vacation_undesirable_weekend() {
    let mut roster = sample_roster();
    // Ro in the week after Cleo's Friday off; Ro has no after-vacation score
    assign(&mut roster, 6, "Cleo");

    let availability = AvailabilityConstraint::new(5, 2);
    assert_eq!(availability.evaluate(&roster).unwrap(), HardSoftScore::of_soft(-4));
}

#[test]
fn test_availability_deltas() {
    let mut roster = sample_roster();
    let mut availability = AvailabilityConstraint::new(1, 1);
    assert_eq!(availability.initialize(&roster).unwrap(), HardSoftScore::ZERO);

    let target = shift(&roster, 2);
    let anna = employee(&roster, "Anna");
    let mut score = HardSoftScore::ZERO;
    score += availability.on_retract(&roster, target).unwrap();
    roster.set_employee(target, Some(anna));
    score += availability.on_insert(&roster, target).unwrap();
    assert_eq!(score, HardSoftScore::of(-1, -3));

    score += availability.on_retract(&roster, target).unwrap();
    roster.set_employee(target, None);
    score += availability.on_insert(&roster, target).unwrap();
    assert_eq!(score, HardSoftScore::ZERO);
}

// ============================================================================
// ConstraintSet
// ============================================================================

#[test]
fn test_tuple_set_sums_members() {
    let mut roster = sample_roster();
    assign(&mut roster, 0, "Anna");
    assign(&mut roster, 1, "Anna");
    assign(&mut roster, 2, "Cleo");

    let mut set = (AvailabilityConstraint::new(1, 1), FairnessConstraint::new(1, 0));
    assert_eq!(set.constraint_count(), 2);

    let total = set.initialize_all(&roster).unwrap();
    assert_eq!(total, set.evaluate_all(&roster).unwrap());
    // before-vacation -100 for Anna on Night_A, fairness -2
    assert_eq!(total, HardSoftScore::of_soft(-102));

    let each = set.evaluate_each(&roster).unwrap();
    assert_eq!(each[0].name, "Employee availability");
    assert!(each[0].is_hard);
    assert_eq!(each[1].score, HardSoftScore::of_soft(-2));

    assert_eq!(().constraint_count(), 0);
}
