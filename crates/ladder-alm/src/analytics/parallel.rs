//! Parallel processing utilities for portfolio projection.
//!
//! Provides conditional parallel iteration based on configuration
//! and collection size. Uses rayon when the `parallel` feature is enabled.

use crate::types::ProjectionConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
///
/// Output order always matches input order.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &ProjectionConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

/// Folds over items with a reduce step, conditionally using parallel iteration.
///
/// `reduce` must be associative and commutative: partial results are
/// combined in an unspecified order when running in parallel.
///
/// # Arguments
///
/// * `items` - The collection to process
/// * `config` - Projection configuration
/// * `identity` - The identity value for the fold
/// * `fold` - The fold function: `(accumulator, item) -> accumulator`
/// * `reduce` - The reduce function: `(acc1, acc2) -> combined`
#[allow(unused_variables)]
pub fn maybe_parallel_fold<T, U, F, R>(
    items: &[T],
    config: &ProjectionConfig,
    identity: U,
    fold: F,
    reduce: R,
) -> U
where
    T: Sync,
    U: Send + Sync + Clone,
    F: Fn(U, &T) -> U + Sync + Send,
    R: Fn(U, U) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items
                .par_iter()
                .fold(|| identity.clone(), &fold)
                .reduce(|| identity.clone(), reduce);
        }
    }

    items.iter().fold(identity, fold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maybe_parallel_map() {
        let config = ProjectionConfig::sequential();
        let items = vec![1, 2, 3, 4, 5];
        let results: Vec<i32> = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_maybe_parallel_fold() {
        let config = ProjectionConfig::sequential();
        let items: Vec<i64> = (1..=5).collect();
        let sum = maybe_parallel_fold(&items, &config, 0, |acc, x| acc + x, |a, b| a + b);
        assert_eq!(sum, 15);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let items: Vec<i64> = (0..1_000).collect();
        let parallel = ProjectionConfig::new().with_threshold(1);
        let sequential = ProjectionConfig::sequential();

        let a = maybe_parallel_fold(&items, &parallel, 0, |acc, x| acc + x, |a, b| a + b);
        let b = maybe_parallel_fold(&items, &sequential, 0, |acc, x| acc + x, |a, b| a + b);
        assert_eq!(a, b);
        assert_eq!(
            maybe_parallel_map(&items, &parallel, |x| x * 3),
            maybe_parallel_map(&items, &sequential, |x| x * 3)
        );
    }
}
