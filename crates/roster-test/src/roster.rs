//! Sample roster fixture.
//!
//! Four weekly time slots from Saturday 2019-01-05, two spots and three
//! employees:
//!
//! | employee | skills          | time | vip | unavailable        |
//! |----------|-----------------|------|-----|--------------------|
//! | Anna     | Ro, Night       | 100  | 0   | Monday 2019-01-14  |
//! | Ben      | Night, Trainee  | 50   | 0   |                    |
//! | Cleo     | Ro              | 100  | 3   | Friday 2019-01-25  |
//!
//! `Night_A` lists `Trainee` as unsuitable, so Ben cannot take it.
//!
//! # Example
//!
//! ```
//! use roster_test::roster::sample_roster;
//!
//! let roster = sample_roster();
//! assert_eq!(roster.shifts().len(), 8);
//! assert_eq!(roster.employees().len(), 3);
//! ```

use chrono::NaiveDate;
use roster_core::{
    AvailabilityDeriver, Employee, Roster, RosterParametrization, Skill, Spot, TimeSlot,
};

/// Shorthand for a calendar date.
///
/// # Panics
///
/// Panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Builds the sample roster with availability already derived.
pub fn sample_roster() -> Roster {
    sample_roster_with(RosterParametrization::default())
}

/// Builds the sample roster with the given scoring parameters.
pub fn sample_roster_with(parametrization: RosterParametrization) -> Roster {
    let slots = TimeSlot::tile(date(2019, 1, 5), date(2019, 2, 1), 7).expect("fixture horizon");
    let mut roster = Roster::new(parametrization, slots).expect("fixture slots tile");

    for skill in ["Ro", "Night", "Trainee"] {
        roster.add_skill(Skill::named(skill));
    }
    roster
        .add_spot(Spot::new("Ro", Skill::named("Ro")))
        .expect("fixture spot Ro");
    roster
        .add_spot(
            Spot::new("Night_A", Skill::named("Night"))
                .with_unsuitable_skill(Skill::named("Trainee"))
                .with_vacation_scores(-100, -50),
        )
        .expect("fixture spot Night_A");

    let mut anna = Employee::new("Anna", [Skill::named("Ro"), Skill::named("Night")])
        .expect("fixture employee Anna");
    anna.add_unavailable_date(date(2019, 1, 14));
    let ben = Employee::with_capacity(
        "Ben",
        [Skill::named("Night"), Skill::named("Trainee")],
        50.0,
        0.0,
    )
    .expect("fixture employee Ben");
    let mut cleo = Employee::with_capacity("Cleo", [Skill::named("Ro")], 100.0, 3.0)
        .expect("fixture employee Cleo");
    cleo.add_unavailable_date(date(2019, 1, 25));

    for employee in [anna, ben, cleo] {
        roster.add_employee(employee).expect("fixture employee");
    }
    roster
        .generate_shift_assignments()
        .expect("fixture shifts");
    AvailabilityDeriver::default().derive(&mut roster);
    roster
}
