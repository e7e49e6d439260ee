//! Thread-pool setup shared by training and batch prediction.

use rayon::prelude::*;

/// Passed down from [`run_with_threads`] so inner loops never build their own pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// `0` follows the size of the current rayon pool.
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        let effective = if n_threads == 0 { rayon::current_num_threads() } else { n_threads };
        if effective > 1 {
            Self::Parallel
        } else {
            Self::Sequential
        }
    }

    #[inline]
    pub fn is_parallel(self) -> bool {
        self == Self::Parallel
    }

    /// Map over an indexable collection, in parallel when allowed.
    ///
    /// Output order always matches input order.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

/// Run `f` inside a pool of `n_threads` workers (`0` for all cores, `1` for
/// the calling thread only). Falls back to the global pool if a dedicated one
/// cannot be built.
#[inline]
pub fn run_with_threads<T: Send>(n_threads: usize, f: impl FnOnce(Parallelism) -> T + Send) -> T {
    match Parallelism::from_threads(n_threads) {
        Parallelism::Sequential => f(Parallelism::Sequential),
        Parallelism::Parallel => match rayon::ThreadPoolBuilder::new().num_threads(n_threads).build() {
            Ok(pool) => pool.install(|| f(Parallelism::Parallel)),
            Err(err) => {
                tracing::warn!("failed to create thread pool ({err}), using the global pool");
                f(Parallelism::Parallel)
            }
        },
    }
}
