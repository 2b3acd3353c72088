//! Identity traits and typed indices for roster entities.
//!
//! Entities never hold references to each other. A shift assignment names
//! its spot, time slot and employee by index into the owning [`Roster`],
//! which keeps ownership strictly root-down.
//!
//! [`Roster`]: super::Roster

use std::fmt;
use std::hash::Hash;

/// Trait for unique identification of roster entities.
///
/// # Example
///
/// ```
/// use roster_core::domain::{PlanningId, Roster, RosterParametrization, Skill, Spot};
///
/// let mut roster = Roster::new(RosterParametrization::default(), Vec::new()).unwrap();
/// roster.add_skill(Skill::named("Night"));
/// roster.add_spot(Spot::new("Day", Skill::Wildcard)).unwrap();
/// let night = roster.add_spot(Spot::new("Night_A", Skill::named("Night"))).unwrap();
///
/// // Ids are assigned when the spot is added to a roster.
/// assert_eq!(roster.spot(night).planning_id(), night);
/// assert_eq!(night.index(), 1);
/// ```
pub trait PlanningId {
    /// The type of the unique identifier.
    type Id: Copy + Eq + Ord + Hash + Send + Sync + 'static;

    /// Returns the unique identifier for this object.
    ///
    /// This must never change during solving.
    fn planning_id(&self) -> Self::Id;
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Position of the entity in its roster collection.
            #[inline]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

define_id!(
    /// Index of an [`Employee`](super::Employee) in its roster.
    EmployeeId,
    "employee"
);
define_id!(
    /// Index of a [`Spot`](super::Spot) in its roster.
    SpotId,
    "spot"
);
define_id!(
    /// Index of a [`TimeSlot`](super::TimeSlot) in its roster.
    TimeSlotId,
    "time_slot"
);
define_id!(
    /// Index of a [`ShiftAssignment`](super::ShiftAssignment) in its roster.
    ShiftId,
    "shift"
);
