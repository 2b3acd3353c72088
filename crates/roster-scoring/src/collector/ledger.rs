//! Per-key load ledger with live fairness statistics.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use roster_core::{Result, RosterError};

use super::{Accumulator, DeviationStats, MaxDeviationAccumulator, UniCollector};

/// Running load of every key, plus deviation statistics over those loads.
///
/// Each key holds the multiset of metrics inserted for it, so only a metric
/// the key actually holds can be retracted. Whenever a load changes, the old
/// load is retracted from and the new load accumulated into a single
/// [`MaxDeviationAccumulator`], so fairness over keys is always current. A
/// key leaves the ledger when its last item is retracted.
///
/// # Example
///
/// ```
/// use roster_scoring::collector::LoadLedger;
///
/// let mut ledger = LoadLedger::new();
/// ledger.insert_load("anna", 7);
/// ledger.insert_load("anna", 7);
/// ledger.insert_load("ben", 7);
/// assert_eq!(ledger.load(&"anna"), Some(14));
///
/// // Loads 14 and 7, mean 10.5
/// assert_eq!(ledger.stats().max_deviation().unwrap(), 3.5);
///
/// ledger.retract_load(&"anna", 7).unwrap();
/// assert_eq!(ledger.stats().max_deviation().unwrap(), 0.0);
///
/// // Anna never held a 9
/// assert!(ledger.retract_load(&"anna", 9).is_err());
/// assert_eq!(ledger.load(&"anna"), Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct LoadLedger<K> {
    loads: HashMap<K, MaxDeviationAccumulator>,
    deviation: MaxDeviationAccumulator,
}

impl<K> Default for LoadLedger<K> {
    fn default() -> Self {
        Self {
            loads: HashMap::new(),
            deviation: MaxDeviationAccumulator::new(),
        }
    }
}

impl<K: Clone + Eq + Hash + Debug> LoadLedger<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `metric` to the load of `key`.
    pub fn insert_load(&mut self, key: K, metric: i64) {
        let load = self.loads.entry(key).or_default();
        if !load.is_empty() {
            let replaced = self.deviation.retract(&load.sum());
            debug_assert!(replaced.is_ok(), "load {} missing from deviation", load.sum());
        }
        load.accumulate(&metric);
        self.deviation.accumulate(&load.sum());
    }

    /// Removes one occurrence of `metric` from the load of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::RetractionMismatch`] if `key` does not hold
    /// `metric`. The ledger is left unchanged.
    pub fn retract_load(&mut self, key: &K, metric: i64) -> Result<()> {
        let mismatch = || RosterError::RetractionMismatch {
            value: format!("{metric} for {key:?}"),
        };
        let load = self.loads.get_mut(key).ok_or_else(mismatch)?;
        if load.multiplicity(metric) == 0 {
            return Err(mismatch());
        }
        let old = load.sum();
        self.deviation.retract(&old)?;
        load.retract(&metric)?;
        if load.is_empty() {
            self.loads.remove(key);
        } else {
            self.deviation.accumulate(&load.sum());
        }
        Ok(())
    }

    /// Current load of `key`, if it holds any item.
    pub fn load(&self, key: &K) -> Option<i64> {
        self.loads.get(key).map(MaxDeviationAccumulator::sum)
    }

    /// Number of items counted for `key`.
    pub fn item_count(&self, key: &K) -> usize {
        self.loads.get(key).map_or(0, MaxDeviationAccumulator::count)
    }

    pub fn loads(&self) -> impl Iterator<Item = (&K, i64)> + '_ {
        self.loads.iter().map(|(key, load)| (key, load.sum()))
    }

    /// Number of keys with at least one item.
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Deviation statistics over the current loads.
    pub fn stats(&self) -> DeviationStats {
        self.deviation.finish()
    }

    pub fn deviation(&self) -> &MaxDeviationAccumulator {
        &self.deviation
    }

    pub fn clear(&mut self) {
        self.loads.clear();
        self.deviation.reset();
    }
}

impl<K> Accumulator<(K, i64), DeviationStats> for LoadLedger<K>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
{
    #[inline]
    fn accumulate(&mut self, value: &(K, i64)) {
        let (key, metric) = value;
        self.insert_load(key.clone(), *metric);
    }

    #[inline]
    fn retract(&mut self, value: &(K, i64)) -> Result<()> {
        let (key, metric) = value;
        self.retract_load(key, *metric)
    }

    fn finish(&self) -> DeviationStats {
        self.stats()
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// Creates a collector that balances a metric across keys.
///
/// # Example
///
/// ```
/// use roster_scoring::collector::{load_ledger, Accumulator, UniCollector};
///
/// struct Shift { employee: usize, days: i64 }
///
/// let collector = load_ledger(|s: &Shift| s.employee, |s: &Shift| s.days);
/// let mut acc = collector.create_accumulator();
/// acc.accumulate(&collector.extract(&Shift { employee: 0, days: 7 }));
/// acc.accumulate(&collector.extract(&Shift { employee: 1, days: 3 }));
///
/// let stats = acc.finish();
/// assert_eq!(stats.values(), &[3, 7]);
/// assert_eq!(stats.max_deviation_exceeding(1).unwrap(), 1);
/// ```
pub fn load_ledger<A, K, F, M>(key_fn: F, metric_fn: M) -> LoadLedgerCollector<A, K, F, M>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
    F: Fn(&A) -> K + Send + Sync,
    M: Fn(&A) -> i64 + Send + Sync,
{
    LoadLedgerCollector {
        key_fn,
        metric_fn,
        _phantom: PhantomData,
    }
}

/// Collector created by [`load_ledger()`].
pub struct LoadLedgerCollector<A, K, F, M> {
    key_fn: F,
    metric_fn: M,
    _phantom: PhantomData<fn(&A) -> K>,
}

impl<A, K, F, M> UniCollector<A> for LoadLedgerCollector<A, K, F, M>
where
    A: Send + Sync,
    K: Clone + Eq + Hash + Debug + Send + Sync,
    F: Fn(&A) -> K + Send + Sync,
    M: Fn(&A) -> i64 + Send + Sync,
{
    type Value = (K, i64);
    type Result = DeviationStats;
    type Accumulator = LoadLedger<K>;

    #[inline]
    fn extract(&self, entity: &A) -> (K, i64) {
        ((self.key_fn)(entity), (self.metric_fn)(entity))
    }

    fn create_accumulator(&self) -> LoadLedger<K> {
        LoadLedger::new()
    }
}
