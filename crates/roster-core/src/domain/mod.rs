//! Domain model of a shift roster
//!
//! The [`Roster`] owns every entity. Entities refer to each other only by
//! typed index:
//! - [`Skill`]: a qualification, or the wildcard
//! - [`Spot`]: a recurring duty requiring a skill
//! - [`TimeSlot`]: a window of the planning horizon
//! - [`Employee`]: a person with skills, capacity and availability
//! - [`ShiftAssignment`]: one spot in one time slot, the planning entity

mod employee;
mod roster;
mod shift_assignment;
mod skill;
mod spot;
mod time_slot;
mod traits;


pub use employee::{DerivedAvailability, Employee, FULL_TIME, VIP_DIVISOR};
pub use roster::{Roster, RosterParametrization};
pub use shift_assignment::{ShiftAssignment, COST_PER_DAY};
pub use skill::{Skill, WILDCARD_SKILL_NAME};
pub use spot::{Spot, DEFAULT_SPOT_DAYS, EXTRA_SPOT_PREFIX, EXTRA_SPOT_VACATION_SCORE};
pub use time_slot::{TimeSlot, TimeSlotState};
pub use traits::{EmployeeId, PlanningId, ShiftId, SpotId, TimeSlotId};
