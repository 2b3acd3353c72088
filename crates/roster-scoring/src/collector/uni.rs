// Collector and accumulator traits for single-entity aggregation.

use roster_core::Result;

// Aggregates values extracted from entities into a running result.
//
// Every `retract` must be paired with an earlier `accumulate` of an equal
// value that has not been retracted yet. Pairings need not be LIFO.
pub trait Accumulator<V, R>: Send + Sync {
    // Adds one value.
    fn accumulate(&mut self, value: &V);

    // Removes one earlier accumulated value.
    //
    // Fails with `RosterError::RetractionMismatch` when the accumulator
    // cannot account for `value`. The state is left unchanged in that case.
    fn retract(&mut self, value: &V) -> Result<()>;

    // Returns a snapshot of the current result.
    fn finish(&self) -> R;

    // Returns to the empty state.
    fn reset(&mut self);
}

// Extracts values from entities and creates matching accumulators.
//
// The mapping closures live once in the collector; accumulators only ever
// see extracted values.
pub trait UniCollector<A>: Send + Sync {
    type Value;
    type Result;
    type Accumulator: Accumulator<Self::Value, Self::Result>;

    fn extract(&self, entity: &A) -> Self::Value;

    fn create_accumulator(&self) -> Self::Accumulator;
}
