//! Seeded operation sequences for accumulator tests.
//!
//! # Example
//!
//! ```
//! use roster_test::accumulator::{balanced_ops, AccumulatorOp};
//!
//! let ops = balanced_ops(7, 100, 20);
//! assert_eq!(ops.len(), 100);
//! assert!(matches!(ops[0], AccumulatorOp::Accumulate(_)));
//! assert_eq!(ops, balanced_ops(7, 100, 20));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One call on an accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorOp {
    Accumulate(i64),
    Reverse(i64),
}

/// Generates `steps` operations with values in `-max_value..=max_value`.
///
/// Every `Reverse(v)` retracts a `v` accumulated earlier and not yet
/// reversed, in random rather than LIFO order. Duplicates are frequent for
/// small ranges. The same seed always yields the same sequence.
pub fn balanced_ops(seed: u64, steps: usize, max_value: i64) -> Vec<AccumulatorOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut held: Vec<i64> = Vec::new();
    let mut ops = Vec::with_capacity(steps);

    for _ in 0..steps {
        if held.is_empty() || rng.random_bool(0.6) {
            let value = rng.random_range(-max_value..=max_value);
            held.push(value);
            ops.push(AccumulatorOp::Accumulate(value));
        } else {
            let index = rng.random_range(0..held.len());
            ops.push(AccumulatorOp::Reverse(held.swap_remove(index)));
        }
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_are_balanced() {
        for seed in 0..16 {
            let mut held: Vec<i64> = Vec::new();
            for op in balanced_ops(seed, 300, 5) {
                match op {
                    AccumulatorOp::Accumulate(v) => held.push(v),
                    AccumulatorOp::Reverse(v) => {
                        let index = held.iter().position(|h| *h == v).unwrap();
                        held.swap_remove(index);
                    }
                }
            }
        }
    }

    #[test]
    fn test_values_in_range() {
        assert!(balanced_ops(3, 500, 4).iter().all(|op| match op {
            AccumulatorOp::Accumulate(v) | AccumulatorOp::Reverse(v) => v.abs() <= 4,
        }));
    }
}
