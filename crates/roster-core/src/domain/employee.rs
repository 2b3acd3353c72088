//! Employees and their availability.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::{EmployeeId, PlanningId, Skill, Spot, TimeSlotId};
use crate::error::{Result, RosterError};

/// Nominal capacity of a full-time employee, in percent.
pub const FULL_TIME: f64 = 100.0;

/// Divisor applied to the VIP factor when reducing capacity.
pub const VIP_DIVISOR: f64 = 12.0;

/// Availability facts derived from an employee's raw dates.
///
/// Owned by the employee but written only by the availability deriver.
/// Rerunning the deriver clears and recomputes every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedAvailability {
    /// Time slots containing at least one unavailable date.
    pub unavailable_slots: BTreeSet<TimeSlotId>,
    /// Time slots containing an undesirable date, excluding unavailable slots.
    pub undesirable_slots: BTreeSet<TimeSlotId>,
    /// Time slots ending right before a vacation begins.
    pub before_vacation_slots: BTreeSet<TimeSlotId>,
    /// Time slots starting right after a vacation ends.
    pub after_vacation_slots: BTreeSet<TimeSlotId>,
    /// Dates marked undesirable by derivation, never unavailable ones.
    pub undesirable_dates: BTreeSet<NaiveDate>,
}

impl DerivedAvailability {
    pub fn clear(&mut self) {
        self.unavailable_slots.clear();
        self.undesirable_slots.clear();
        self.before_vacation_slots.clear();
        self.after_vacation_slots.clear();
        self.undesirable_dates.clear();
    }
}

/// An employee that can be assigned to shifts.
///
/// # Example
///
/// ```
/// use roster_core::domain::{Employee, Skill, Spot};
///
/// let anna = Employee::with_capacity("Anna", [Skill::named("Ro")], 100.0, 3.0).unwrap();
/// assert_eq!(anna.effective_capacity(), 75.0);
///
/// let ro = Spot::new("Ro", Skill::named("Ro"));
/// assert!(anna.can_perform(&ro));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    skills: BTreeSet<Skill>,
    time: f64,
    vip_factor: f64,
    unavailable_dates: BTreeSet<NaiveDate>,
    undesirable_dates: BTreeSet<NaiveDate>,
    derived: DerivedAvailability,
}

impl Employee {
    /// Creates a full-time employee without VIP reduction.
    pub fn new(name: impl Into<String>, skills: impl IntoIterator<Item = Skill>) -> Result<Self> {
        Self::with_capacity(name, skills, FULL_TIME, 0.0)
    }

    /// Creates an employee working `time` percent with the given VIP factor.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::EmptySkillSet`] if no skill is given and
    /// [`RosterError::NonPositiveCapacity`] if the effective capacity
    /// `time * (1 - vip_factor / 12)` is not positive.
    pub fn with_capacity(
        name: impl Into<String>,
        skills: impl IntoIterator<Item = Skill>,
        time: f64,
        vip_factor: f64,
    ) -> Result<Self> {
        let name = name.into();
        let skills: BTreeSet<Skill> = skills.into_iter().collect();
        if skills.is_empty() {
            return Err(RosterError::EmptySkillSet { employee: name });
        }
        let capacity = time * (1.0 - vip_factor / VIP_DIVISOR);
        if capacity.is_nan() || capacity <= 0.0 {
            return Err(RosterError::NonPositiveCapacity {
                employee: name,
                capacity,
            });
        }
        Ok(Self {
            id: EmployeeId::default(),
            name,
            skills,
            time,
            vip_factor,
            unavailable_dates: BTreeSet::new(),
            undesirable_dates: BTreeSet::new(),
            derived: DerivedAvailability::default(),
        })
    }

    pub(crate) fn set_id(&mut self, id: EmployeeId) {
        self.id = id;
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skills(&self) -> &BTreeSet<Skill> {
        &self.skills
    }

    /// Capacity in percent of a full-time equivalent, before VIP reduction.
    pub fn nominal_capacity(&self) -> f64 {
        self.time
    }

    pub fn vip_factor(&self) -> f64 {
        self.vip_factor
    }

    /// Capacity after VIP reduction. Always positive.
    pub fn effective_capacity(&self) -> f64 {
        self.time * (1.0 - self.vip_factor / VIP_DIVISOR)
    }

    /// Scales a cost by the inverse of the effective capacity.
    pub fn time_adjusted_cost(&self, cost: f64) -> f64 {
        cost * FULL_TIME / self.effective_capacity()
    }

    /// Returns true if the employee holds `skill`. The wildcard always matches.
    pub fn has_skill(&self, skill: &Skill) -> bool {
        skill.is_wildcard() || self.skills.contains(skill)
    }

    /// Returns true if the employee is qualified for and not excluded from `spot`.
    pub fn can_perform(&self, spot: &Spot) -> bool {
        let qualified = self.has_skill(spot.required_skill());
        let excluded = spot
            .unsuitable_skill()
            .is_some_and(|unsuitable| self.has_skill(unsuitable));
        qualified && !excluded
    }

    pub fn add_unavailable_date(&mut self, date: NaiveDate) {
        self.unavailable_dates.insert(date);
    }

    pub fn add_undesirable_date(&mut self, date: NaiveDate) {
        self.undesirable_dates.insert(date);
    }

    /// Raw unavailable dates as imported.
    pub fn unavailable_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.unavailable_dates
    }

    /// Raw undesirable dates as imported.
    pub fn undesirable_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.undesirable_dates
    }

    pub fn is_unavailable(&self, date: NaiveDate) -> bool {
        self.unavailable_dates.contains(&date)
    }

    /// Returns true if `date` is undesirable, raw or derived, and not unavailable.
    pub fn is_undesirable(&self, date: NaiveDate) -> bool {
        !self.is_unavailable(date)
            && (self.undesirable_dates.contains(&date)
                || self.derived.undesirable_dates.contains(&date))
    }

    pub fn derived(&self) -> &DerivedAvailability {
        &self.derived
    }

    pub(crate) fn derived_mut(&mut self) -> &mut DerivedAvailability {
        &mut self.derived
    }

    pub fn unavailable_slots(&self) -> &BTreeSet<TimeSlotId> {
        &self.derived.unavailable_slots
    }

    pub fn undesirable_slots(&self) -> &BTreeSet<TimeSlotId> {
        &self.derived.undesirable_slots
    }

    pub fn before_vacation_slots(&self) -> &BTreeSet<TimeSlotId> {
        &self.derived.before_vacation_slots
    }

    pub fn after_vacation_slots(&self) -> &BTreeSet<TimeSlotId> {
        &self.derived.after_vacation_slots
    }

    /// One-line description: `name |skill|...|time|vip|`.
    pub fn info(&self) -> String {
        let mut info = format!("{} |", self.name);
        for skill in &self.skills {
            info.push_str(skill.name());
            info.push('|');
        }
        info.push_str(&format!("{}|{}|", self.effective_capacity(), self.vip_factor));
        info
    }
}

impl PlanningId for Employee {
    type Id = EmployeeId;

    fn planning_id(&self) -> EmployeeId {
        self.id
    }
}
