use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_MIN: i32 = 5233;
pub const DEFAULT_MAX: i32 = 70_000_000;

/// Uniform integers in `[min, max]`.
pub struct DataGenerator {
    rng: StdRng,
    min: i32,
    max: i32,
}

impl DataGenerator {
    /// Seeded from the OS, every instance yields a different sequence.
    pub fn new(min: i32, max: i32) -> Self {
        Self::from_rng(StdRng::from_os_rng(), min, max)
    }

    pub fn with_seed(min: i32, max: i32, seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), min, max)
    }

    fn from_rng(rng: StdRng, min: i32, max: i32) -> Self {
        assert!(min <= max, "empty range [{min}, {max}]");
        Self { rng, min, max }
    }

    pub fn rand_int(&mut self) -> i32 {
        self.rng.random_range(self.min..=self.max)
    }

    pub fn int_nums(&mut self, size: usize) -> Vec<i32> {
        (0..size).map(|_| self.rand_int()).collect()
    }
}
