// Collectors for grouping and aggregating shift metrics.

mod bucketed;
mod ledger;
mod max_deviation;
mod sum;
mod uni;


pub use bucketed::BucketedAccumulators;
pub use ledger::{load_ledger, LoadLedger, LoadLedgerCollector};
pub use max_deviation::{
    max_deviation, DeviationStats, MaxDeviationAccumulator, MaxDeviationCollector, MICROS_SCALE,
    MILLIS_SCALE,
};
pub use sum::{sum, SumAccumulator, SumCollector};
pub use uni::{Accumulator, UniCollector};
