//! Error types for roster planning

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for roster operations.
///
/// Configuration errors are raised while the roster is built from imported
/// data. Contract violations are raised at the call site of a scoring
/// operation that was used incorrectly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    /// A date range whose exclusive end is not after its start.
    #[error("Invalid date range: end ({end}) must be after start ({start})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A skill name that is not part of the roster's skill list.
    #[error("Unknown skill ({skill}) referenced by {owner}")]
    UnknownSkill { skill: String, owner: String },

    /// An employee declared without any skill.
    #[error("Employee ({employee}) has an empty skill set")]
    EmptySkillSet { employee: String },

    /// An employee whose effective capacity is zero or negative.
    #[error("Employee ({employee}) has non-positive effective capacity ({capacity})")]
    NonPositiveCapacity { employee: String, capacity: f64 },

    /// A spot with malformed parameters.
    #[error("Invalid spot ({spot}): {reason}")]
    InvalidSpot { spot: String, reason: String },

    /// Two shift assignments for the same spot in the same time slot.
    #[error("Duplicate shift assignment for spot ({spot}) in time slot ({time_slot})")]
    DuplicateShift { spot: String, time_slot: String },

    /// A second employee or regular spot with an existing name.
    #[error("Duplicate {kind} name ({name})")]
    DuplicateName { kind: &'static str, name: String },

    /// A spot name that is not part of the roster.
    #[error("Unknown spot ({spot})")]
    UnknownSpot { spot: String },

    /// An employee name that is not part of the roster.
    #[error("Unknown employee ({employee})")]
    UnknownEmployee { employee: String },

    /// No shift of the given spot covers the given date.
    #[error("No shift assignment of spot ({spot}) covers {date}")]
    UnknownShift { spot: String, date: NaiveDate },

    /// A date that no time slot of the planning horizon contains.
    #[error("Date {date} is outside the planning horizon")]
    DateOutsideHorizon { date: NaiveDate },

    /// Time slots that leave a gap or overlap.
    #[error("Time slots do not tile the horizon: {0}")]
    HorizonNotTiled(String),

    /// Adjusted cost requested for a shift without an employee.
    #[error("Shift assignment ({shift}) has no employee assigned")]
    UnassignedEmployee { shift: String },

    /// An optimizer move on a shift the user has locked.
    #[error("Shift assignment ({shift}) is locked by the user")]
    LockedShift { shift: String },

    /// A value retracted from an accumulator that never accumulated it.
    #[error("Retracted value {value} was never accumulated")]
    RetractionMismatch { value: String },

    /// A statistic that is undefined for an empty population.
    #[error("Statistic is undefined for an empty population")]
    EmptyPopulation,
}

impl RosterError {
    /// Returns true for errors that signal a bug in the calling scoring logic
    /// rather than corrupt input data.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            RosterError::UnassignedEmployee { .. }
                | RosterError::LockedShift { .. }
                | RosterError::RetractionMismatch { .. }
                | RosterError::EmptyPopulation
        )
    }
}

/// Result type alias for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;
