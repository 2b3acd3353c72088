//! Shared test fixtures for roster crates.
//!
//! This crate provides sample data and generators for testing.
//! It depends only on `roster-core`, so every other crate can use it as a
//! dev-dependency.
//!
//! - [`roster`] - a small four-week roster with derived availability
//! - [`accumulator`] - seeded balanced accumulate/reverse sequences
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! roster-test = { workspace = true }
//! ```

pub mod accumulator;
pub mod roster;

pub use accumulator::{balanced_ops, AccumulatorOp};
pub use roster::{date, sample_roster, sample_roster_with};
