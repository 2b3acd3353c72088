//! Shift assignments, the planning entities of a roster.

use chrono::NaiveDate;

use super::{EmployeeId, PlanningId, Roster, ShiftId, Spot, SpotId, TimeSlot, TimeSlotId};
use crate::calendar::{add_days, days_between, DaySet};
use crate::error::{Result, RosterError};

/// Flat cost of one assigned day.
pub const COST_PER_DAY: i64 = 10;

/// One instance of a spot within one time slot.
///
/// The spot and time slot never change after creation, so the covered days
/// are computed once. Only `employee` and `locked_by_user` are mutable, and
/// only through the owning [`Roster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftAssignment {
    id: ShiftId,
    spot: SpotId,
    time_slot: TimeSlotId,
    employee: Option<EmployeeId>,
    locked_by_user: bool,
    days: DaySet,
}

impl ShiftAssignment {
    /// Creates an unassigned shift of `spot` in `time_slot`.
    ///
    /// Covered days are `[slot start + offset, slot start + offset + days)`.
    pub(crate) fn new(id: ShiftId, spot: &Spot, time_slot: &TimeSlot) -> Result<Self> {
        let start = add_days(time_slot.start_date(), spot.offset());
        let end = add_days(start, i64::from(spot.days()));
        Ok(Self {
            id,
            spot: spot.id(),
            time_slot: time_slot.id(),
            employee: None,
            locked_by_user: false,
            days: days_between(start, end)?,
        })
    }

    pub fn id(&self) -> ShiftId {
        self.id
    }

    pub fn spot(&self) -> SpotId {
        self.spot
    }

    pub fn time_slot(&self) -> TimeSlotId {
        self.time_slot
    }

    pub fn employee(&self) -> Option<EmployeeId> {
        self.employee
    }

    pub fn is_assigned(&self) -> bool {
        self.employee.is_some()
    }

    pub fn is_locked_by_user(&self) -> bool {
        self.locked_by_user
    }

    pub(crate) fn set_employee(&mut self, employee: Option<EmployeeId>) -> Option<EmployeeId> {
        std::mem::replace(&mut self.employee, employee)
    }

    pub(crate) fn set_locked_by_user(&mut self, locked: bool) {
        self.locked_by_user = locked;
    }

    /// Calendar days covered by this shift, ascending.
    pub fn covered_days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.days.binary_search(&date).is_ok()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    /// Flat nominal cost: ten per covered day.
    pub fn cost(&self) -> i64 {
        self.days.len() as i64 * COST_PER_DAY
    }

    /// Cost scaled by the assigned employee's effective capacity:
    /// `days * 100 / capacity`, truncated.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::UnassignedEmployee`] if no employee is set.
    pub fn adjusted_cost(&self, roster: &Roster) -> Result<i64> {
        let employee = self.employee.ok_or_else(|| RosterError::UnassignedEmployee {
            shift: self.label(roster),
        })?;
        let capacity = roster.employee(employee).effective_capacity();
        Ok((self.days.len() as f64 * 100.0 / capacity) as i64)
    }

    /// Number of covered days on which the assigned employee is unavailable.
    pub fn vacation_overlap(&self, roster: &Roster) -> usize {
        self.employee.map_or(0, |id| {
            let employee = roster.employee(id);
            self.days.iter().filter(|d| employee.is_unavailable(**d)).count()
        })
    }

    /// Number of covered days the assigned employee would rather not work.
    pub fn undesirable_overlap(&self, roster: &Roster) -> usize {
        self.employee.map_or(0, |id| {
            let employee = roster.employee(id);
            self.days.iter().filter(|d| employee.is_undesirable(**d)).count()
        })
    }

    /// `"<spot> <slot>"`, naming the shift in messages and reports.
    pub fn label(&self, roster: &Roster) -> String {
        format!(
            "{} {}",
            roster.spot(self.spot).name(),
            roster.time_slot(self.time_slot).slot_name()
        )
    }
}

impl PlanningId for ShiftAssignment {
    type Id = ShiftId;

    fn planning_id(&self) -> ShiftId {
        self.id
    }
}
