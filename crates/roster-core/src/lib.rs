//! Roster Core - domain model for shift rostering
//!
//! This crate provides the fundamental pieces of a roster:
//! - Calendar utilities for half-open day ranges and week windows
//! - Domain types: skills, spots, time slots, employees, shift assignments
//! - Availability derivation from raw vacation dates
//! - Score type for hard/soft penalties

pub mod availability;
pub mod calendar;
pub mod domain;
pub mod error;
pub mod score;

pub use availability::{AvailabilityDeriver, DerivationReport};
pub use calendar::{days_between, week_window, DaySet, WeekCadence};
pub use domain::{
    Employee, EmployeeId, PlanningId, Roster, RosterParametrization, ShiftAssignment, ShiftId,
    Skill, Spot, SpotId, TimeSlot, TimeSlotId, TimeSlotState,
};
pub use error::{Result, RosterError};
pub use score::HardSoftScore;
