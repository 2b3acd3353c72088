// Sum collector over integral metrics.

use std::marker::PhantomData;

use roster_core::{Result, RosterError};

use super::{Accumulator, UniCollector};

// Creates a collector summing an integral metric of each entity.
//
// # Example
//
// ```
// use roster_scoring::collector::{sum, Accumulator, UniCollector};
//
// struct Shift { days: i64 }
//
// let collector = sum(|shift: &Shift| shift.days);
// let mut acc = collector.create_accumulator();
//
// acc.accumulate(&collector.extract(&Shift { days: 7 }));
// acc.accumulate(&collector.extract(&Shift { days: 1 }));
// assert_eq!(acc.finish(), 8);
//
// acc.retract(&collector.extract(&Shift { days: 7 })).unwrap();
// assert_eq!(acc.finish(), 1);
// ```
pub fn sum<A, F>(mapper: F) -> SumCollector<A, F>
where
    A: Send + Sync,
    F: Fn(&A) -> i64 + Send + Sync,
{
    SumCollector {
        mapper,
        _phantom: PhantomData,
    }
}

// Collector created by [`sum()`].
pub struct SumCollector<A, F> {
    mapper: F,
    _phantom: PhantomData<fn(&A) -> i64>,
}

impl<A, F> UniCollector<A> for SumCollector<A, F>
where
    A: Send + Sync,
    F: Fn(&A) -> i64 + Send + Sync,
{
    type Value = i64;
    type Result = i64;
    type Accumulator = SumAccumulator;

    #[inline]
    fn extract(&self, entity: &A) -> i64 {
        (self.mapper)(entity)
    }

    fn create_accumulator(&self) -> SumAccumulator {
        SumAccumulator::default()
    }
}

// Running sum with an item count.
//
// The count lets retraction detect an empty accumulator; individual values
// are not remembered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumAccumulator {
    sum: i64,
    count: usize,
}

impl SumAccumulator {
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Accumulator<i64, i64> for SumAccumulator {
    #[inline]
    fn accumulate(&mut self, value: &i64) {
        self.sum += *value;
        self.count += 1;
    }

    #[inline]
    fn retract(&mut self, value: &i64) -> Result<()> {
        if self.count == 0 {
            return Err(RosterError::RetractionMismatch {
                value: value.to_string(),
            });
        }
        self.sum -= *value;
        self.count -= 1;
        Ok(())
    }

    #[inline]
    fn finish(&self) -> i64 {
        self.sum
    }

    #[inline]
    fn reset(&mut self) {
        *self = Self::default();
    }
}
