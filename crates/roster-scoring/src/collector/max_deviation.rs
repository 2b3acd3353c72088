//! Max-deviation collector for workload fairness.
//!
//! Keeps the count, sum and sum of squares of a multiset of integral values
//! together with the multiset itself. Aggregates update in O(1) on both
//! insertion and retraction; the multiset is kept because the maximum
//! absolute deviation from the mean depends on the current members, not
//! only on the aggregates.

use std::collections::HashMap;
use std::marker::PhantomData;

use roster_core::{Result, RosterError};

use super::{Accumulator, UniCollector};

/// Scale of [`DeviationStats::mean_deviation_squared_sum_root_millis`].
pub const MILLIS_SCALE: f64 = 1_000.0;

/// Scale of [`DeviationStats::mean_deviation_squared_sum_root_micros`].
pub const MICROS_SCALE: f64 = 1_000_000.0;

// Squares are widened so any i64 metric fits.
#[inline]
fn square(value: i64) -> i128 {
    i128::from(value) * i128::from(value)
}

/// Read-only snapshot of a [`MaxDeviationAccumulator`].
///
/// # Example
///
/// ```
/// use roster_scoring::collector::{Accumulator, MaxDeviationAccumulator};
///
/// let mut acc = MaxDeviationAccumulator::new();
/// for value in [10, 20, 30] {
///     acc.accumulate(&value);
/// }
/// let stats = acc.finish();
///
/// assert_eq!(stats.mean().unwrap(), 20.0);
/// assert_eq!(stats.max_deviation().unwrap(), 10.0);
/// assert_eq!(stats.max_deviation_exceeding(5).unwrap(), 5);
/// assert_eq!(stats.mean_deviation_squared_sum_root_millis().unwrap(), 14_142);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviationStats {
    count: usize,
    sum: i64,
    sum_of_squares: i128,
    /// Members of the multiset in ascending order, repeated by multiplicity.
    values: Vec<i64>,
}

impl DeviationStats {
    /// Builds a snapshot by summing `values` from scratch.
    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut values: Vec<i64> = values.into_iter().collect();
        values.sort_unstable();
        Self {
            count: values.len(),
            sum: values.iter().sum(),
            sum_of_squares: values.iter().map(|&v| square(v)).sum(),
            values,
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn sum(&self) -> i64 {
        self.sum
    }

    #[inline]
    pub fn sum_of_squares(&self) -> i128 {
        self.sum_of_squares
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Arithmetic mean of the values.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::EmptyPopulation`] when there are no values.
    pub fn mean(&self) -> Result<f64> {
        if self.count == 0 {
            return Err(RosterError::EmptyPopulation);
        }
        Ok(self.sum as f64 / self.count as f64)
    }

    /// Largest absolute distance of a value from the mean.
    ///
    /// The values are sorted, so only the extremes need checking.
    pub fn max_deviation(&self) -> Result<f64> {
        let mean = self.mean()?;
        let (Some(min), Some(max)) = (self.values.first(), self.values.last()) else {
            return Err(RosterError::EmptyPopulation);
        };
        Ok((mean - *min as f64).abs().max((*max as f64 - mean).abs()))
    }

    /// Part of the max deviation above `threshold`, truncated, never negative.
    ///
    /// Used directly as a penalty magnitude.
    pub fn max_deviation_exceeding(&self, threshold: i64) -> Result<i64> {
        let excess = self.max_deviation()? - threshold as f64;
        Ok(excess.max(0.0) as i64)
    }

    /// `sqrt(sum_of_squares - sum² / n) * scale`.
    ///
    /// The root of the summed squared deviations. Not divided by `n`, so the
    /// result grows with the population.
    pub fn mean_deviation_squared_sum_root(&self, scale: f64) -> Result<f64> {
        if self.count == 0 {
            return Err(RosterError::EmptyPopulation);
        }
        let sum = self.sum as f64;
        let inner = self.sum_of_squares as f64 - sum * sum / self.count as f64;
        // Rounding can push a zero spread slightly below zero.
        Ok(inner.max(0.0).sqrt() * scale)
    }

    /// [`mean_deviation_squared_sum_root`](Self::mean_deviation_squared_sum_root)
    /// at scale 1000, truncated.
    pub fn mean_deviation_squared_sum_root_millis(&self) -> Result<i64> {
        Ok(self.mean_deviation_squared_sum_root(MILLIS_SCALE)? as i64)
    }

    /// [`mean_deviation_squared_sum_root`](Self::mean_deviation_squared_sum_root)
    /// at scale 1 000 000, truncated.
    pub fn mean_deviation_squared_sum_root_micros(&self) -> Result<i64> {
        Ok(self.mean_deviation_squared_sum_root(MICROS_SCALE)? as i64)
    }
}

/// Incremental statistics over a multiset of `i64` values.
///
/// Insertion and retraction are O(1) amortized. Each scoring bucket owns its
/// own instance; the type holds no shared state and needs no locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaxDeviationAccumulator {
    count: usize,
    sum: i64,
    sum_of_squares: i128,
    multiplicities: HashMap<i64, usize>,
}

impl MaxDeviationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn sum(&self) -> i64 {
        self.sum
    }

    #[inline]
    pub fn sum_of_squares(&self) -> i128 {
        self.sum_of_squares
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of occurrences of `value` currently held.
    pub fn multiplicity(&self, value: i64) -> usize {
        self.multiplicities.get(&value).copied().unwrap_or(0)
    }
}

impl Accumulator<i64, DeviationStats> for MaxDeviationAccumulator {
    #[inline]
    fn accumulate(&mut self, value: &i64) {
        let value = *value;
        self.count += 1;
        self.sum += value;
        self.sum_of_squares += square(value);
        *self.multiplicities.entry(value).or_insert(0) += 1;
    }

    fn retract(&mut self, value: &i64) -> Result<()> {
        let value = *value;
        let Some(held) = self.multiplicities.get_mut(&value) else {
            return Err(RosterError::RetractionMismatch {
                value: value.to_string(),
            });
        };
        *held -= 1;
        if *held == 0 {
            self.multiplicities.remove(&value);
        }
        self.count -= 1;
        self.sum -= value;
        self.sum_of_squares -= square(value);
        Ok(())
    }

    fn finish(&self) -> DeviationStats {
        let mut values = Vec::with_capacity(self.count);
        for (&value, &times) in &self.multiplicities {
            values.extend(std::iter::repeat(value).take(times));
        }
        values.sort_unstable();
        DeviationStats {
            count: self.count,
            sum: self.sum,
            sum_of_squares: self.sum_of_squares,
            values,
        }
    }

    fn reset(&mut self) {
        self.count = 0;
        self.sum = 0;
        self.sum_of_squares = 0;
        self.multiplicities.clear();
    }
}

/// Creates a collector feeding an integral metric into a
/// [`MaxDeviationAccumulator`].
///
/// # Example
///
/// ```
/// use roster_scoring::collector::{max_deviation, Accumulator, UniCollector};
///
/// struct Load { days: i64 }
///
/// let collector = max_deviation(|load: &Load| load.days);
/// let mut acc = collector.create_accumulator();
/// acc.accumulate(&collector.extract(&Load { days: 4 }));
/// acc.accumulate(&collector.extract(&Load { days: 8 }));
/// assert_eq!(acc.finish().max_deviation().unwrap(), 2.0);
/// ```
pub fn max_deviation<A, F>(metric_fn: F) -> MaxDeviationCollector<A, F>
where
    A: Send + Sync,
    F: Fn(&A) -> i64 + Send + Sync,
{
    MaxDeviationCollector {
        metric_fn,
        _phantom: PhantomData,
    }
}

/// Collector created by [`max_deviation()`].
pub struct MaxDeviationCollector<A, F> {
    metric_fn: F,
    _phantom: PhantomData<fn(&A) -> i64>,
}

impl<A, F> UniCollector<A> for MaxDeviationCollector<A, F>
where
    A: Send + Sync,
    F: Fn(&A) -> i64 + Send + Sync,
{
    type Value = i64;
    type Result = DeviationStats;
    type Accumulator = MaxDeviationAccumulator;

    #[inline]
    fn extract(&self, entity: &A) -> i64 {
        (self.metric_fn)(entity)
    }

    fn create_accumulator(&self) -> MaxDeviationAccumulator {
        MaxDeviationAccumulator::new()
    }
}
