//! Roster - fair shift rostering in Rust
//!
//! Imports employees, spots and vacations into a validated [`Roster`],
//! derives availability windows, and scores workload fairness
//! incrementally while an optimizer reassigns shifts.
//!
//! # Example
//!
//! ```rust
//! use roster::prelude::*;
//!
//! let import = RosterImport::from_json_str(r#"{
//!     "skills": ["Ro"],
//!     "spots": [{ "name": "Ro", "required_skill": "Ro" }],
//!     "employees": [
//!         { "name": "Anna", "skills": ["Ro"] },
//!         { "name": "Ben", "skills": ["Ro"], "time": 50 }
//!     ]
//! }"#).unwrap();
//!
//! let config = RosterConfig::from_toml_str(r#"
//!     [horizon]
//!     start = "2019-01-05"
//!     end = "2019-02-01"
//! "#).unwrap();
//!
//! let roster = import.build(&config).unwrap();
//! let anna = roster.employee_by_name("Anna").unwrap().id();
//! let first = roster.shifts()[0].id();
//!
//! let mut director = RosterScoreDirector::with_default_constraints(roster);
//! assert_eq!(director.calculate_score().unwrap(), HardSoftScore::ZERO);
//! director.change_employee(first, Some(anna)).unwrap();
//!
//! let summaries = summarize(director.roster()).unwrap();
//! assert_eq!(summaries[0].total_days, 7);
//! ```

pub mod import;
pub mod report;

#[cfg(feature = "console")]
pub mod console;

// Domain model
pub use roster_core::{
    AvailabilityDeriver, DerivationReport, Employee, EmployeeId, HardSoftScore, Roster,
    RosterError, RosterParametrization, ShiftAssignment, ShiftId, Skill, Spot, SpotId, TimeSlot,
    TimeSlotId, TimeSlotState, WeekCadence,
};

// Incremental scoring
pub use roster_scoring::{
    ConstraintResult, ConstraintSet, DeviationStats, IncrementalConstraint, LoadLedger,
    RosterScoreDirector,
};

// Configuration
pub use roster_config::{ConfigError, RosterConfig};

pub use import::{ImportError, RosterImport};
pub use report::{summarize, EmployeeSummary};

pub mod prelude {
    pub use super::import::RosterImport;
    pub use super::report::summarize;
    pub use super::{HardSoftScore, Roster, RosterConfig, RosterScoreDirector};
    pub use roster_core::domain::{Employee, Skill, Spot};
}
