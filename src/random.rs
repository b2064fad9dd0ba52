use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Uniform float source shared by everything that needs randomness.
///
/// One instance is created at startup and passed by `&mut` to policies,
/// agents and targets; nothing reaches for a thread-local generator.
pub struct RandomSource {
    rng: SmallRng,
    seed: u64,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed), seed }
    }

    /// Seed from the wall clock, once per process.
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED_CAFE_0123_4567);
        Self::seeded(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Value in `[min, max)`. A degenerate range yields `min`.
    pub fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    pub fn color(&mut self) -> [u8; 3] {
        [self.rng.r#gen(), self.rng.r#gen(), self.rng.r#gen()]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = RandomSource::seeded(7);
        for _ in 0..10_000 {
            let v = rng.uniform(-0.1, 0.1);
            assert!((-0.1..0.1).contains(&v), "{v} escaped [-0.1, 0.1)");
        }
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut rng = RandomSource::seeded(1);
        assert_eq!(rng.uniform(3.0, 3.0), 3.0);
        assert_eq!(rng.uniform(5.0, 2.0), 5.0);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = RandomSource::seeded(42);
        let mut b = RandomSource::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
        }
        assert_eq!(a.seed(), 42);
    }
}
