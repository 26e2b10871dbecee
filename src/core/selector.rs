/// Random selection over data pools.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one entry out of a pool.
///
/// An empty pool yields `None`; selection never panics.
pub trait Selector {
    /// Choose an index in `0..len`, or `None` when `len == 0`.
    fn pick_index(&mut self, len: usize) -> Option<usize>;

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        self.pick_index(items.len()).and_then(|i| items.get(i))
    }
}

/// Uniform random selection backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomSelector<R = StdRng> {
    rng: R,
}

impl RandomSelector<StdRng> {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible selection sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Selector for RandomSelector<R> {
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }
}

/// Always picks the first entry. Makes generation fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSelector;

impl Selector for FirstSelector {
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then_some(0)
    }
}
