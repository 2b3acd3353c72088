//! Score type for penalizing roster quality.
//!
//! Hard levels rank feasibility, soft levels rank preference. Fairness
//! penalties from the accumulators land on the soft level.

mod hard_soft;

#[cfg(test)]
mod tests;

pub use hard_soft::HardSoftScore;
