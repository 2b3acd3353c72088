//! Availability derivation.
//!
//! Turns each employee's raw unavailable and undesirable dates into the
//! week-level sets consumed by scoring:
//!
//! 1. every time slot containing an unavailable date is an unavailable slot;
//! 2. a vacation starting on the first workday makes the slot ending on the
//!    preceding last workday a before-vacation slot, and marks the weekend
//!    in between undesirable;
//! 3. a vacation ending on the last workday makes the slot starting the next
//!    day an after-vacation slot, and marks the weekend after undesirable;
//! 4. the day after each unavailable day is marked undesirable (optional);
//! 5. every slot containing an undesirable date, and not unavailable, is an
//!    undesirable slot.
//!
//! Steps 2 and 3 skip when the neighbouring workday is itself unavailable,
//! so consecutive vacation weeks do not produce inner boundaries.
//!
//! Derivation is a full recomputation. Derived state is cleared first,
//! making reruns idempotent; raw date sets are never touched.

use std::ops::Add;

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::info;

use crate::calendar::{add_days, WeekCadence};
use crate::domain::{Employee, Roster, TimeSlot, TimeSlotId};

#[cfg(test)]
mod tests;

/// Totals produced by one derivation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivationReport {
    pub employees: usize,
    pub unavailable_slots: usize,
    pub undesirable_slots: usize,
    pub before_vacation_slots: usize,
    pub after_vacation_slots: usize,
    pub undesirable_dates: usize,
}

impl Add for DerivationReport {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            employees: self.employees + other.employees,
            unavailable_slots: self.unavailable_slots + other.unavailable_slots,
            undesirable_slots: self.undesirable_slots + other.undesirable_slots,
            before_vacation_slots: self.before_vacation_slots + other.before_vacation_slots,
            after_vacation_slots: self.after_vacation_slots + other.after_vacation_slots,
            undesirable_dates: self.undesirable_dates + other.undesirable_dates,
        }
    }
}

/// Derives week-level availability for every employee of a roster.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_core::availability::AvailabilityDeriver;
/// use roster_core::domain::{Employee, Roster, RosterParametrization, Skill, TimeSlot};
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2019, m, day).unwrap();
/// let slots = TimeSlot::tile(d(1, 5), d(2, 1), 7).unwrap();
/// let mut roster = Roster::new(RosterParametrization::default(), slots).unwrap();
/// let mut anna = Employee::new("Anna", [Skill::Wildcard]).unwrap();
/// anna.add_unavailable_date(d(1, 14)); // Monday
/// let anna = roster.add_employee(anna).unwrap();
///
/// let report = AvailabilityDeriver::default().derive(&mut roster);
/// assert_eq!(report.before_vacation_slots, 1);
///
/// let anna = roster.employee(anna);
/// assert!(anna.is_undesirable(d(1, 12))); // Saturday before
/// assert!(anna.is_undesirable(d(1, 13))); // Sunday before
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityDeriver {
    cadence: WeekCadence,
    mark_day_after_vacation: bool,
}

impl Default for AvailabilityDeriver {
    fn default() -> Self {
        Self::new(WeekCadence::default())
    }
}

impl AvailabilityDeriver {
    pub fn new(cadence: WeekCadence) -> Self {
        Self {
            cadence,
            mark_day_after_vacation: true,
        }
    }

    pub fn with_mark_day_after_vacation(mut self, mark: bool) -> Self {
        self.mark_day_after_vacation = mark;
        self
    }

    pub fn cadence(&self) -> WeekCadence {
        self.cadence
    }

    /// Recomputes the derived availability of every employee.
    ///
    /// Employees are independent, so they are processed in parallel.
    pub fn derive(&self, roster: &mut Roster) -> DerivationReport {
        let (slots, employees) = roster.slots_and_employees_mut();
        let report = employees
            .par_iter_mut()
            .map(|employee| self.derive_employee(slots, employee))
            .reduce(DerivationReport::default, Add::add);

        info!(
            event = "availability_derived",
            employees = report.employees,
            unavailable_slots = report.unavailable_slots,
            undesirable_slots = report.undesirable_slots,
            before_vacation_slots = report.before_vacation_slots,
            after_vacation_slots = report.after_vacation_slots,
        );
        report
    }

    /// Recomputes the derived availability of one employee.
    pub fn derive_employee(&self, slots: &[TimeSlot], employee: &mut Employee) -> DerivationReport {
        employee.derived_mut().clear();
        let gap = self.cadence.weekend_gap();

        let mut unavailable_slots = Vec::new();
        let mut before = Vec::new();
        let mut after = Vec::new();
        let mut marked = Vec::new();

        for &date in employee.unavailable_dates() {
            if let Some(slot) = slot_containing(slots, date) {
                unavailable_slots.push(slot);
            }

            if self.cadence.is_first_workday(date) {
                let previous = add_days(date, -gap);
                if !employee.is_unavailable(previous) {
                    if let Some(slot) = slot_ending_on(slots, previous) {
                        before.push(slot);
                    }
                    marked.extend(previous.iter_days().skip(1).take_while(|d| *d < date));
                }
            }

            if self.cadence.is_last_workday(date) {
                let next = add_days(date, 1);
                if !employee.is_unavailable(next) {
                    if let Some(slot) = slot_starting_on(slots, next) {
                        after.push(slot);
                    }
                    let workday = add_days(date, gap);
                    marked.extend(next.iter_days().take_while(|d| *d < workday));
                }
            }

            if self.mark_day_after_vacation {
                marked.push(add_days(date, 1));
            }
        }

        marked.retain(|d| !employee.is_unavailable(*d));

        let derived = employee.derived_mut();
        derived.unavailable_slots.extend(unavailable_slots);
        derived.before_vacation_slots.extend(before);
        derived.after_vacation_slots.extend(after);
        derived.undesirable_dates.extend(marked);

        let undesirable: Vec<TimeSlotId> = employee
            .undesirable_dates()
            .iter()
            .chain(employee.derived().undesirable_dates.iter())
            .filter(|d| !employee.is_unavailable(**d))
            .filter_map(|d| slot_containing(slots, *d))
            .filter(|slot| !employee.unavailable_slots().contains(slot))
            .collect();
        employee.derived_mut().undesirable_slots.extend(undesirable);

        let derived = employee.derived();
        DerivationReport {
            employees: 1,
            unavailable_slots: derived.unavailable_slots.len(),
            undesirable_slots: derived.undesirable_slots.len(),
            before_vacation_slots: derived.before_vacation_slots.len(),
            after_vacation_slots: derived.after_vacation_slots.len(),
            undesirable_dates: derived.undesirable_dates.len(),
        }
    }
}

fn slot_containing(slots: &[TimeSlot], date: NaiveDate) -> Option<TimeSlotId> {
    let position = slots.partition_point(|slot| slot.end_date() <= date);
    slots
        .get(position)
        .filter(|slot| slot.contains_date(date))
        .map(TimeSlot::id)
}

fn slot_ending_on(slots: &[TimeSlot], last_date: NaiveDate) -> Option<TimeSlotId> {
    let position = slots.partition_point(|slot| slot.last_date() < last_date);
    slots
        .get(position)
        .filter(|slot| slot.last_date() == last_date)
        .map(TimeSlot::id)
}

fn slot_starting_on(slots: &[TimeSlot], start_date: NaiveDate) -> Option<TimeSlotId> {
    let position = slots.partition_point(|slot| slot.start_date() < start_date);
    slots
        .get(position)
        .filter(|slot| slot.start_date() == start_date)
        .map(TimeSlot::id)
}
