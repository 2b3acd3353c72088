use roster_core::Roster;
use roster_test::roster::{date, sample_roster};

use super::*;

fn assign(roster: &mut Roster, index: usize, name: &str) {
    let employee = roster.employee_by_name(name).unwrap().id();
    let shift = roster.shifts()[index].id();
    roster.set_employee(shift, Some(employee));
}

fn summary_of<'a>(summaries: &'a [EmployeeSummary], name: &str) -> &'a EmployeeSummary {
    summaries.iter().find(|s| s.name == name).unwrap()
}

fn totals(count: i64, adjusted_cost: i64) -> BucketTotals {
    BucketTotals {
        count,
        adjusted_cost,
    }
}

#[test]
fn test_unassigned_roster_has_empty_summaries() {
    let roster = sample_roster();
    let summaries = summarize(&roster).unwrap();

    assert_eq!(summaries.len(), 3);
    for summary in &summaries {
        assert_eq!(summary.total_shifts, 0);
        assert_eq!(summary.normalized_days, 0);
        assert!(summary.by_spot.is_empty());
    }
    assert_eq!(total_adjusted_cost(&roster).unwrap(), 0);
}

#[test]
fn test_totals_and_buckets() {
    let mut roster = sample_roster();
    assign(&mut roster, 0, "Anna"); // Ro
    assign(&mut roster, 1, "Anna"); // Night_A
    assign(&mut roster, 2, "Cleo"); // Ro

    let summaries = summarize(&roster).unwrap();

    let anna = summary_of(&summaries, "Anna");
    assert_eq!(anna.total_shifts, 2);
    assert_eq!(anna.total_days, 14);
    assert_eq!(anna.total_cost, 140);
    assert_eq!(anna.adjusted_cost, 14);
    assert_eq!(anna.normalized_days, 14);
    assert_eq!(anna.by_spot["Ro"], totals(1, 7));
    assert_eq!(anna.by_spot["Night_A"], totals(1, 7));
    assert_eq!(anna.by_shift_type["Night"], totals(1, 7));

    // 75% effective capacity
    let cleo = summary_of(&summaries, "Cleo");
    assert_eq!(cleo.total_days, 7);
    assert_eq!(cleo.total_cost, 70);
    assert_eq!(cleo.adjusted_cost, 9);
    assert_eq!(cleo.normalized_days, 9);

    assert_eq!(total_adjusted_cost(&roster).unwrap(), 23);
}

#[test]
fn test_extra_shifts_are_reported_separately() {
    let mut roster = sample_roster();
    let extras = roster
        .add_extra_shifts(date(2019, 1, 24), &["Ro"], 2)
        .unwrap();
    let anna = roster.employee_by_name("Anna").unwrap().id();
    roster.set_employee(extras[0], Some(anna));
    assign(&mut roster, 0, "Anna");

    let summary = summarize_employee(&roster, roster.employee(anna)).unwrap();
    assert_eq!(summary.total_shifts, 2);
    assert_eq!(summary.total_days, 9);
    assert_eq!(summary.extra_days, 2);
    assert_eq!(summary.extra_cost, 20);
    assert_eq!(summary.by_spot["EX_Ro"], totals(1, 2));
    assert_eq!(summary.by_shift_type["EX"], totals(1, 2));
    assert!(summary.to_string().contains("extra 2 days cost 20"));
}

#[test]
fn test_derived_windows_are_exported() {
    let roster = sample_roster();
    let summaries = summarize(&roster).unwrap();

    let anna = summary_of(&summaries, "Anna");
    assert_eq!(anna.unavailable_slots, vec!["2019-01-12"]);
    assert_eq!(anna.before_vacation_slots, vec!["2019-01-05"]);
    assert!(anna.after_vacation_slots.is_empty());

    let cleo = summary_of(&summaries, "Cleo");
    assert_eq!(cleo.after_vacation_slots, vec!["2019-01-26"]);
}

#[test]
fn test_summary_display_and_json() {
    let mut roster = sample_roster();
    assign(&mut roster, 0, "Anna");
    let summaries = summarize(&roster).unwrap();
    let anna = summary_of(&summaries, "Anna");

    let line = anna.to_string();
    assert!(line.starts_with("Anna |"));
    assert!(line.contains("shifts 1 days 7"));
    assert!(!line.contains("extra"));

    let json = serde_json::to_value(anna).unwrap();
    assert_eq!(json["by_spot"]["Ro"]["adjusted_cost"], 7);
    assert_eq!(json["normalized_days"], 7);
}
