/// Uniform source of `f64` values in `[0, 1)`.
///
/// The simulation only ever asks for raw uniform draws; everything else
/// (ranges, integer picks, colours) is derived here so tests can swap in
/// a seeded generator.
pub trait RandomSource {
    fn sample(&mut self) -> f64;
}

/// Production source backed by `Math.random`.
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn sample(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

pub fn rand_range(rng: &mut dyn RandomSource, min: f64, max: f64) -> f64 {
    rng.sample() * (max - min) + min
}

/// Uniform integer in `min..max` (exclusive upper bound).
pub fn rand_int(rng: &mut dyn RandomSource, min: u32, max: u32) -> u32 {
    (rng.sample() * (max - min) as f64) as u32 + min
}

/// Fully saturated colour with a random hue.
pub fn random_hsl(rng: &mut dyn RandomSource) -> String {
    format!("hsl({}, 100%, 50%)", rand_int(rng, 0, 360))
}

#[cfg(test)]
pub(crate) struct SeededRandom(rand_chacha::ChaCha8Rng);

#[cfg(test)]
impl SeededRandom {
    pub(crate) fn new(seed: u64) -> SeededRandom {
        use rand::SeedableRng;

        SeededRandom(rand_chacha::ChaCha8Rng::seed_from_u64(seed))
    }
}

#[cfg(test)]
impl RandomSource for SeededRandom {
    fn sample(&mut self) -> f64 {
        use rand::Rng;

        self.0.gen::<f64>()
    }
}
