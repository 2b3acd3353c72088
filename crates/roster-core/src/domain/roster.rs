//! The roster aggregate root.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use super::{
    Employee, EmployeeId, ShiftAssignment, ShiftId, Skill, Spot, SpotId, TimeSlot, TimeSlotId,
};
use crate::error::{Result, RosterError};

/// Global scoring parameters carried by a roster.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterParametrization {
    /// Deviation from the mean load tolerated before fairness is penalized.
    pub max_deviation_threshold: i64,
    /// Multiplier applied to the root of the squared deviation sum.
    pub deviation_scale: f64,
    /// Soft weight of one unit of fairness penalty.
    pub fairness_weight: i64,
    /// Soft weight of one unit of the scaled deviation root. Zero disables it.
    pub spread_weight: i64,
    /// Hard weight of one shift day overlapping an unavailable date.
    pub vacation_overlap_weight: i64,
    /// Soft weight of one shift day overlapping an undesirable date.
    pub undesirable_overlap_weight: i64,
}

impl Default for RosterParametrization {
    fn default() -> Self {
        Self {
            max_deviation_threshold: 0,
            deviation_scale: 1_000.0,
            fairness_weight: 1,
            spread_weight: 0,
            vacation_overlap_weight: 1,
            undesirable_overlap_weight: 1,
        }
    }
}

/// Owns every entity of one planning session.
///
/// Entities are added through `add_*` methods which validate them against
/// what the roster already holds, so a roster is never observed in an
/// inconsistent state. After construction the only mutations are
/// [`Roster::set_employee`], [`Roster::set_locked_by_user`] and the
/// availability derivation pass.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_core::domain::{Employee, Roster, RosterParametrization, Skill, Spot, TimeSlot};
///
/// let start = NaiveDate::from_ymd_opt(2019, 1, 5).unwrap();
/// let end = NaiveDate::from_ymd_opt(2019, 2, 1).unwrap();
/// let slots = TimeSlot::tile(start, end, 7).unwrap();
///
/// let mut roster = Roster::new(RosterParametrization::default(), slots).unwrap();
/// roster.add_skill(Skill::named("Ro"));
/// roster.add_spot(Spot::new("Ro", Skill::named("Ro"))).unwrap();
/// let anna = roster.add_employee(Employee::new("Anna", [Skill::named("Ro")]).unwrap()).unwrap();
/// roster.generate_shift_assignments().unwrap();
///
/// assert_eq!(roster.shifts().len(), 4);
/// let first = roster.shifts()[0].id();
/// roster.set_employee(first, Some(anna));
/// assert_eq!(roster.employee_assignments(anna).count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Roster {
    parametrization: RosterParametrization,
    skills: Vec<Skill>,
    spots: Vec<Spot>,
    time_slots: Vec<TimeSlot>,
    employees: Vec<Employee>,
    shifts: Vec<ShiftAssignment>,
    shift_index: HashMap<(SpotId, TimeSlotId), ShiftId>,
}

impl Roster {
    /// Creates an empty roster over the given time slots.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::HorizonNotTiled`] if consecutive slots leave a
    /// gap or overlap.
    pub fn new(parametrization: RosterParametrization, time_slots: Vec<TimeSlot>) -> Result<Self> {
        for pair in time_slots.windows(2) {
            if pair[0].end() != pair[1].start() {
                return Err(RosterError::HorizonNotTiled(format!(
                    "slot ending {} is followed by slot starting {}",
                    pair[0].end(),
                    pair[1].start()
                )));
            }
        }
        let time_slots = time_slots
            .into_iter()
            .enumerate()
            .map(|(index, mut slot)| {
                slot.set_id(TimeSlotId(index));
                slot
            })
            .collect();
        Ok(Self {
            parametrization,
            skills: Vec::new(),
            spots: Vec::new(),
            time_slots,
            employees: Vec::new(),
            shifts: Vec::new(),
            shift_index: HashMap::new(),
        })
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Adds a skill unless it is already known. The wildcard is implicit.
    pub fn add_skill(&mut self, skill: Skill) {
        if !skill.is_wildcard() && !self.skills.contains(&skill) {
            self.skills.push(skill);
        }
    }

    /// Looks up a known skill by name. `"any"` resolves to the wildcard.
    pub fn resolve_skill(&self, name: &str, owner: &str) -> Result<Skill> {
        let skill: Skill = match name.parse() {
            Ok(skill) => skill,
            Err(never) => match never {},
        };
        if skill.is_wildcard() || self.skills.contains(&skill) {
            Ok(skill)
        } else {
            Err(RosterError::UnknownSkill {
                skill: name.to_string(),
                owner: owner.to_string(),
            })
        }
    }

    fn check_skill(&self, skill: &Skill, owner: &str) -> Result<()> {
        if skill.is_wildcard() || self.skills.contains(skill) {
            Ok(())
        } else {
            Err(RosterError::UnknownSkill {
                skill: skill.name().to_string(),
                owner: owner.to_string(),
            })
        }
    }

    /// Adds a spot after validating it.
    ///
    /// # Errors
    ///
    /// Fails if the spot is malformed, references an unknown skill, or
    /// reuses the name of another regular spot. Extra spots may share names.
    pub fn add_spot(&mut self, mut spot: Spot) -> Result<SpotId> {
        spot.validate()?;
        self.check_skill(spot.required_skill(), spot.name())?;
        if let Some(unsuitable) = spot.unsuitable_skill() {
            self.check_skill(unsuitable, spot.name())?;
        }
        if !spot.is_extra()
            && self
                .spots
                .iter()
                .any(|s| !s.is_extra() && s.name() == spot.name())
        {
            return Err(RosterError::DuplicateName {
                kind: "spot",
                name: spot.name().to_string(),
            });
        }
        let id = SpotId(self.spots.len());
        spot.set_id(id);
        self.spots.push(spot);
        Ok(id)
    }

    /// Adds an employee after validating its skills and name.
    pub fn add_employee(&mut self, mut employee: Employee) -> Result<EmployeeId> {
        for skill in employee.skills() {
            self.check_skill(skill, employee.name())?;
        }
        if self.employee_by_name(employee.name()).is_some() {
            return Err(RosterError::DuplicateName {
                kind: "employee",
                name: employee.name().to_string(),
            });
        }
        let id = EmployeeId(self.employees.len());
        employee.set_id(id);
        self.employees.push(employee);
        Ok(id)
    }

    /// Adds the shift assignment of `spot` in `time_slot`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::DuplicateShift`] if the pair already exists.
    pub fn add_shift(&mut self, spot: SpotId, time_slot: TimeSlotId) -> Result<ShiftId> {
        if self.shift_index.contains_key(&(spot, time_slot)) {
            return Err(RosterError::DuplicateShift {
                spot: self.spot(spot).name().to_string(),
                time_slot: self.time_slot(time_slot).slot_name(),
            });
        }
        let id = ShiftId(self.shifts.len());
        let shift = ShiftAssignment::new(id, self.spot(spot), self.time_slot(time_slot))?;
        self.shifts.push(shift);
        self.shift_index.insert((spot, time_slot), id);
        Ok(id)
    }

    /// Creates one shift per regular spot and time slot.
    ///
    /// Returns the number of shifts created.
    pub fn generate_shift_assignments(&mut self) -> Result<usize> {
        let regular: Vec<SpotId> = self
            .spots
            .iter()
            .filter(|s| !s.is_extra())
            .map(Spot::id)
            .collect();
        let slots: Vec<TimeSlotId> = self.time_slots.iter().map(TimeSlot::id).collect();

        let before = self.shifts.len();
        for slot in slots {
            for &spot in &regular {
                self.add_shift(spot, slot)?;
            }
        }
        let created = self.shifts.len() - before;
        debug!(event = "shifts_generated", created);
        Ok(created)
    }

    /// Adds extra (holiday) shifts on `date` for each named base spot.
    ///
    /// Each base spot yields one extra spot starting on `date` and lasting
    /// `days` days, placed in the time slot containing `date`.
    pub fn add_extra_shifts<S: AsRef<str>>(
        &mut self,
        date: NaiveDate,
        base_spots: &[S],
        days: u32,
    ) -> Result<Vec<ShiftId>> {
        let slot = self.time_slot_for_date(date)?;
        let offset = (date - self.time_slot(slot).start_date()).num_days();

        let mut extras = Vec::with_capacity(base_spots.len());
        for name in base_spots {
            let name = name.as_ref().trim();
            let base = self
                .spot_by_name(name)
                .ok_or_else(|| RosterError::UnknownSpot {
                    spot: name.to_string(),
                })?;
            extras.push(Spot::extra(base, offset, days));
        }

        let mut created = Vec::with_capacity(extras.len());
        for extra in extras {
            let spot = self.add_spot(extra)?;
            created.push(self.add_shift(spot, slot)?);
        }
        Ok(created)
    }

    /// Fixes `employee` to the first shift of `spot_name` covering `date`
    /// and locks it against optimizer moves.
    pub fn lock_assignment(
        &mut self,
        employee: EmployeeId,
        spot_name: &str,
        date: NaiveDate,
    ) -> Result<ShiftId> {
        if self.spot_by_name(spot_name).is_none() {
            return Err(RosterError::UnknownSpot {
                spot: spot_name.to_string(),
            });
        }
        let shift = self
            .shifts
            .iter()
            .find(|sa| self.spot(sa.spot()).name() == spot_name && sa.covers(date))
            .map(ShiftAssignment::id)
            .ok_or_else(|| RosterError::UnknownShift {
                spot: spot_name.to_string(),
                date,
            })?;
        self.set_employee(shift, Some(employee));
        self.set_locked_by_user(shift, true);
        debug!(
            event = "assignment_locked",
            employee = self.employee(employee).name(),
            spot = spot_name,
            %date
        );
        Ok(shift)
    }

    // ------------------------------------------------------------------
    // Mutation points for the optimizer
    // ------------------------------------------------------------------

    /// Sets or clears the employee of a shift, returning the previous one.
    pub fn set_employee(&mut self, shift: ShiftId, employee: Option<EmployeeId>) -> Option<EmployeeId> {
        self.shifts[shift.0].set_employee(employee)
    }

    pub fn set_locked_by_user(&mut self, shift: ShiftId, locked: bool) {
        self.shifts[shift.0].set_locked_by_user(locked);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn parametrization(&self) -> &RosterParametrization {
        &self.parametrization
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn shifts(&self) -> &[ShiftAssignment] {
        &self.shifts
    }

    #[inline]
    pub fn spot(&self, id: SpotId) -> &Spot {
        &self.spots[id.0]
    }

    #[inline]
    pub fn time_slot(&self, id: TimeSlotId) -> &TimeSlot {
        &self.time_slots[id.0]
    }

    #[inline]
    pub fn employee(&self, id: EmployeeId) -> &Employee {
        &self.employees[id.0]
    }

    #[inline]
    pub fn shift(&self, id: ShiftId) -> &ShiftAssignment {
        &self.shifts[id.0]
    }

    // Raw dates are fixed once an employee joins; derivation reads them once.
    #[cfg(test)]
    pub(crate) fn employee_mut(&mut self, id: EmployeeId) -> &mut Employee {
        &mut self.employees[id.0]
    }

    pub fn employee_by_name(&self, name: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.name() == name)
    }

    /// Finds a regular spot by name.
    pub fn spot_by_name(&self, name: &str) -> Option<&Spot> {
        self.spots
            .iter()
            .find(|s| !s.is_extra() && s.name() == name)
            .or_else(|| self.spots.iter().find(|s| s.name() == name))
    }

    pub fn shift_for(&self, spot: SpotId, time_slot: TimeSlotId) -> Option<ShiftId> {
        self.shift_index.get(&(spot, time_slot)).copied()
    }

    /// Shifts currently assigned to `employee`.
    pub fn employee_assignments(
        &self,
        employee: EmployeeId,
    ) -> impl Iterator<Item = &ShiftAssignment> + '_ {
        self.shifts
            .iter()
            .filter(move |sa| sa.employee() == Some(employee))
    }

    /// Employees the optimizer may assign to `shift`.
    pub fn assignable_employees(&self, shift: ShiftId) -> Vec<EmployeeId> {
        let spot = self.spot(self.shift(shift).spot());
        self.employees
            .iter()
            .filter(|e| e.can_perform(spot))
            .map(Employee::id)
            .collect()
    }

    /// Shifts the optimizer may change.
    pub fn movable_shifts(&self) -> impl Iterator<Item = ShiftId> + '_ {
        self.shifts
            .iter()
            .filter(|sa| !sa.is_locked_by_user())
            .map(ShiftAssignment::id)
    }

    /// Number of shifts without an employee.
    pub fn unassigned_count(&self) -> usize {
        self.shifts.iter().filter(|sa| !sa.is_assigned()).count()
    }

    /// Returns the time slot containing `date`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::DateOutsideHorizon`] if no slot contains it.
    pub fn time_slot_for_date(&self, date: NaiveDate) -> Result<TimeSlotId> {
        let position = self
            .time_slots
            .partition_point(|slot| slot.end_date() <= date);
        match self.time_slots.get(position) {
            Some(slot) if slot.contains_date(date) => Ok(slot.id()),
            _ => Err(RosterError::DateOutsideHorizon { date }),
        }
    }

    pub fn next_time_slot(&self, id: TimeSlotId) -> Option<TimeSlotId> {
        self.time_slots.get(id.0 + 1).map(TimeSlot::id)
    }

    pub fn previous_time_slot(&self, id: TimeSlotId) -> Option<TimeSlotId> {
        id.0.checked_sub(1)
            .and_then(|index| self.time_slots.get(index))
            .map(TimeSlot::id)
    }

    /// Names of the distinct shift types, in spot order.
    pub fn shift_types(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.spots
            .iter()
            .map(Spot::shift_type)
            .filter(|t| seen.insert(*t))
            .collect()
    }

    pub(crate) fn slots_and_employees_mut(&mut self) -> (&[TimeSlot], &mut [Employee]) {
        (&self.time_slots, &mut self.employees)
    }
}
