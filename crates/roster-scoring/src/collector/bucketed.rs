// Independent accumulators per scoring bucket.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use roster_core::{Result, RosterError};

use super::{Accumulator, UniCollector};

// One accumulator per group key, all created by the same collector.
//
// Buckets never share state, so a scoring rule can keep, for example, one
// fairness accumulator per shift type.
pub struct BucketedAccumulators<G, A, C>
where
    C: UniCollector<A>,
{
    collector: C,
    buckets: HashMap<G, C::Accumulator>,
    _phantom: PhantomData<fn(&A)>,
}

impl<G, A, C> BucketedAccumulators<G, A, C>
where
    G: Clone + Eq + Hash + Debug,
    C: UniCollector<A>,
{
    pub fn new(collector: C) -> Self {
        Self {
            collector,
            buckets: HashMap::new(),
            _phantom: PhantomData,
        }
    }

    // Accumulates `entity` into the bucket of `group`, creating it on demand.
    pub fn insert(&mut self, group: G, entity: &A) {
        let value = self.collector.extract(entity);
        self.buckets
            .entry(group)
            .or_insert_with(|| self.collector.create_accumulator())
            .accumulate(&value);
    }

    // Retracts `entity` from the bucket of `group`.
    pub fn retract(&mut self, group: &G, entity: &A) -> Result<()> {
        let value = self.collector.extract(entity);
        match self.buckets.get_mut(group) {
            Some(bucket) => bucket.retract(&value),
            None => Err(RosterError::RetractionMismatch {
                value: format!("entity of unknown bucket {group:?}"),
            }),
        }
    }

    pub fn result(&self, group: &G) -> Option<C::Result> {
        self.buckets.get(group).map(Accumulator::finish)
    }

    pub fn results(&self) -> impl Iterator<Item = (&G, C::Result)> + '_ {
        self.buckets
            .iter()
            .map(|(group, bucket)| (group, bucket.finish()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
