use chrono::{NaiveDate, Weekday};

use super::*;
use crate::domain::{EmployeeId, RosterParametrization, Skill};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, m, d).unwrap()
}

/// Weekly slots Saturday..Friday from 2019-01-05, four weeks.
fn roster_with(unavailable: &[NaiveDate], undesirable: &[NaiveDate]) -> (Roster, EmployeeId) {
    let slots = TimeSlot::tile(date(1, 5), date(2, 1), 7).unwrap();
    let mut roster = Roster::new(RosterParametrization::default(), slots).unwrap();
    let mut anna = Employee::new("Anna", [Skill::Wildcard]).unwrap();
    for d in unavailable {
        anna.add_unavailable_date(*d);
    }
    for d in undesirable {
        anna.add_undesirable_date(*d);
    }
    let id = roster.add_employee(anna).unwrap();
    (roster, id)
}

fn slot(roster: &Roster, start: NaiveDate) -> TimeSlotId {
    roster.time_slot_for_date(start).unwrap()
}

#[test]
fn test_single_day_marks_whole_week() {
    let (mut roster, anna) = roster_with(&[date(1, 16)], &[]);
    AvailabilityDeriver::default().derive(&mut roster);

    let anna = roster.employee(anna);
    let expected: Vec<_> = vec![slot(&roster, date(1, 12))];
    assert_eq!(anna.unavailable_slots().iter().copied().collect::<Vec<_>>(), expected);
    // Wednesday is neither a first nor a last workday
    assert!(anna.before_vacation_slots().is_empty());
    assert!(anna.after_vacation_slots().is_empty());
}

#[test]
fn test_monday_vacation_marks_slot_before() {
    // Monday 2019-01-14, preceding Friday 2019-01-11 available
    let (mut roster, anna) = roster_with(&[date(1, 14)], &[]);
    AvailabilityDeriver::default().derive(&mut roster);

    let anna = roster.employee(anna);
    assert_eq!(anna.before_vacation_slots().len(), 1);
    let before = *anna.before_vacation_slots().iter().next().unwrap();
    assert_eq!(roster.time_slot(before).last_date(), date(1, 11));

    assert!(anna.is_undesirable(date(1, 12)));
    assert!(anna.is_undesirable(date(1, 13)));
    assert!(!anna.is_undesirable(date(1, 11)));
}

#[test]
fn test_monday_after_unavailable_friday_adds_no_boundary() {
    let (mut roster, anna) = roster_with(&[date(1, 11), date(1, 14)], &[]);
    AvailabilityDeriver::default().derive(&mut roster);

    let anna = roster.employee(anna);
    assert!(anna.before_vacation_slots().is_empty());
}

#[test]
fn test_friday_vacation_marks_slot_after() {
    // Friday 2019-01-18, following Saturday available
    let (mut roster, anna) = roster_with(&[date(1, 18)], &[]);
    AvailabilityDeriver::default().derive(&mut roster);

    let anna = roster.employee(anna);
    let after: Vec<_> = anna.after_vacation_slots().iter().copied().collect();
    assert_eq!(after, vec![slot(&roster, date(1, 19))]);
    assert_eq!(roster.time_slot(after[0]).start_date(), date(1, 19));
    assert!(anna.is_undesirable(date(1, 19)));
    assert!(anna.is_undesirable(date(1, 20)));
    assert!(!anna.is_undesirable(date(1, 21)));
}

#[test]
fn test_consecutive_vacation_weeks() {
    // Monday 2019-01-14 through Friday 2019-01-25, weekend included
    let vacation: Vec<_> = date(1, 14).iter_days().take(12).collect();
    let (mut roster, anna) = roster_with(&vacation, &[]);
    AvailabilityDeriver::default().derive(&mut roster);

    let anna = roster.employee(anna);
    assert_eq!(anna.unavailable_slots().len(), 2);
    assert_eq!(anna.before_vacation_slots().len(), 1);
    assert_eq!(anna.after_vacation_slots().len(), 1);
    assert_eq!(
        roster.time_slot(*anna.after_vacation_slots().iter().next().unwrap()).start_date(),
        date(1, 26)
    );
}

#[test]
fn test_day_after_vacation() {
    let (mut roster, anna) = roster_with(&[date(1, 16)], &[]);
    AvailabilityDeriver::default().derive(&mut roster);
    assert!(roster.employee(anna).is_undesirable(date(1, 17)));

    AvailabilityDeriver::default()
        .with_mark_day_after_vacation(false)
        .derive(&mut roster);
    assert!(!roster.employee(anna).is_undesirable(date(1, 17)));
}

#[test]
fn test_undesirable_slots_exclude_unavailable_slots() {
    let (mut roster, anna) = roster_with(&[date(1, 8)], &[date(1, 9), date(1, 23)]);
    AvailabilityDeriver::default()
        .with_mark_day_after_vacation(false)
        .derive(&mut roster);

    let anna = roster.employee(anna);
    let undesirable: Vec<_> = anna.undesirable_slots().iter().copied().collect();
    assert_eq!(undesirable, vec![slot(&roster, date(1, 19))]);
}

#[test]
fn test_rerun_is_idempotent_and_keeps_raw_dates() {
    let (mut roster, anna) = roster_with(&[date(1, 14), date(1, 18)], &[date(1, 24)]);
    let deriver = AvailabilityDeriver::default();

    let first = deriver.derive(&mut roster);
    let derived = roster.employee(anna).derived().clone();
    let second = deriver.derive(&mut roster);

    assert_eq!(first, second);
    assert_eq!(roster.employee(anna).derived(), &derived);
    assert_eq!(roster.employee(anna).unavailable_dates().len(), 2);
    assert_eq!(roster.employee(anna).undesirable_dates().len(), 1);
}

#[test]
fn test_dates_outside_horizon_are_ignored() {
    let (mut roster, anna) = roster_with(&[date(3, 4)], &[date(3, 5)]);
    let report = AvailabilityDeriver::default().derive(&mut roster);

    assert_eq!(report.employees, 1);
    assert_eq!(report.unavailable_slots, 0);
    assert_eq!(report.undesirable_slots, 0);
    assert!(roster.employee(anna).unavailable_slots().is_empty());
}

#[test]
fn test_sunday_cadence() {
    // Windows Sunday..Saturday, workdays Monday..Saturday
    let cadence = WeekCadence::new(Weekday::Sun, Weekday::Mon, Weekday::Sat);
    let slots = TimeSlot::tile(date(1, 6), date(2, 1), 7).unwrap();
    let mut roster = Roster::new(RosterParametrization::default(), slots).unwrap();
    let mut anna = Employee::new("Anna", [Skill::Wildcard]).unwrap();
    anna.add_unavailable_date(date(1, 14));
    let anna = roster.add_employee(anna).unwrap();

    AvailabilityDeriver::new(cadence).derive(&mut roster);

    let anna = roster.employee(anna);
    let before = *anna.before_vacation_slots().iter().next().unwrap();
    assert_eq!(roster.time_slot(before).last_date(), date(1, 12));
    assert!(anna.is_undesirable(date(1, 13)));
    assert!(!anna.is_undesirable(date(1, 12)));
}

#[test]
fn test_report_sums_employees() {
    let (mut roster, _) = roster_with(&[date(1, 14)], &[]);
    let mut ben = Employee::new("Ben", [Skill::Wildcard]).unwrap();
    ben.add_unavailable_date(date(1, 18));
    roster.add_employee(ben).unwrap();

    let report = AvailabilityDeriver::default().derive(&mut roster);
    assert_eq!(report.employees, 2);
    assert_eq!(report.unavailable_slots, 2);
    assert_eq!(report.before_vacation_slots, 1);
    assert_eq!(report.after_vacation_slots, 1);
}
