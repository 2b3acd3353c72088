//! Incremental scoring for shift rosters.
//!
//! This crate provides:
//! - Collectors with O(1) insertion and retraction (`sum`, `max_deviation`,
//!   `load_ledger`) and per-bucket accumulators
//! - Incremental constraints for workload fairness and employee availability
//! - `RosterScoreDirector`, which keeps a roster's score current under
//!   employee changes

pub mod collector;
pub mod constraint;
pub mod director;

pub use collector::{
    Accumulator, BucketedAccumulators, DeviationStats, LoadLedger, MaxDeviationAccumulator,
    UniCollector,
};
pub use constraint::{
    AvailabilityConstraint, ConstraintResult, ConstraintSet, FairnessConstraint,
    IncrementalConstraint,
};
pub use director::{DefaultConstraints, RosterScoreDirector};
