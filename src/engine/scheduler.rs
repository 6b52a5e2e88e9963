use super::rand::{rand_range, RandomSource};

/// Shortest allowed gap between automatic launches, so that a large
/// population cannot schedule itself into a busy loop.
pub const MIN_DELAY_MS: f64 = 80.0;

const DELAY_MIN_MS: f64 = 600.0;
const DELAY_MAX_MS: f64 = 1000.0;

/// Delay until the next automatic launch, in milliseconds.
///
/// Higher `population` shortens the gap proportionally; values below 1
/// behave like 1.
pub fn next_delay(rng: &mut dyn RandomSource, population: f64) -> f64 {
    (rand_range(rng, DELAY_MIN_MS, DELAY_MAX_MS) / population.max(1.0)).max(MIN_DELAY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rand::SeededRandom;

    fn mean_delay(seed: u64, population: f64, samples: usize) -> f64 {
        let mut rng = SeededRandom::new(seed);
        let total: f64 = (0..samples).map(|_| next_delay(&mut rng, population)).sum();

        total / samples as f64
    }

    #[test]
    fn test_delay_within_bounds() {
        let mut rng = SeededRandom::new(13);

        for _ in 0..1000 {
            let delay = next_delay(&mut rng, 1.0);
            assert!((600.0..1000.0).contains(&delay));
        }
    }

    #[test]
    fn test_population_two_roughly_halves_the_delay() {
        let ratio = mean_delay(14, 1.0, 2000) / mean_delay(15, 2.0, 2000);

        assert!(ratio > 1.8 && ratio < 2.2, "ratio was {ratio}");
    }

    #[test]
    fn test_floor_binds_for_large_populations() {
        let mut rng = SeededRandom::new(16);

        for _ in 0..100 {
            assert_eq!(next_delay(&mut rng, 1000.0), MIN_DELAY_MS);
        }
    }

    #[test]
    fn test_population_below_one_behaves_like_one() {
        let mut a = SeededRandom::new(17);
        let mut b = SeededRandom::new(17);

        for _ in 0..100 {
            assert_eq!(next_delay(&mut a, 0.25), next_delay(&mut b, 1.0));
        }
    }
}
