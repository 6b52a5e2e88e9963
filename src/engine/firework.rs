use std::f64::consts::{FRAC_PI_2, TAU};

use wasm_bindgen::JsValue;

use super::particle::Particle;
use super::rand::{rand_int, rand_range, RandomSource};
use crate::config::RangeOrValue;
use crate::draw::Painter;

/// Downward pull on a rising shell per frame.
const SHELL_GRAVITY: f64 = 0.02;
/// Gravity and drag shared by every spark in a burst.
const BURST_GRAVITY: f64 = 0.06;
const BURST_FRICTION: f64 = 0.985;
/// Bounds on the number of sparks per burst.
const BURST_MIN: u32 = 40;
const BURST_MAX: u32 = 140;

/// A rising firework shell, tracked with a trailing position history.
///
/// The y axis grows downward, so a shell ascends while `vy` is negative
/// and "above the target" means `y <= target_y`.
pub struct Firework {
    x: f64,
    y: f64,
    target_y: f64,
    vx: f64,
    vy: f64,
    color: String,
    size: f64,
    trail: Vec<(f64, f64)>,
    trail_length: usize,
    particle_speed: RangeOrValue,
    particle_size: RangeOrValue,
    exploded: bool,
}

impl Firework {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rng: &mut dyn RandomSource,
        x: f64,
        y: f64,
        target_y: f64,
        color: String,
        speed: f64,
        size: f64,
        particle_speed: RangeOrValue,
        particle_size: RangeOrValue,
    ) -> Firework {
        // Straight up with a bounded sideways skew.
        let angle = -FRAC_PI_2 + rand_range(rng, -0.3, 0.3);

        Firework {
            x,
            y,
            target_y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            color,
            size,
            trail: Vec::new(),
            trail_length: rand_int(rng, 6, 18) as usize,
            particle_speed,
            particle_size,
            exploded: false,
        }
    }

    /// Advances one frame. Returns `false` once the shell has burst into
    /// `burst` and should be dropped from the active collection.
    pub fn tick(&mut self, rng: &mut dyn RandomSource, burst: &mut Vec<Particle>) -> bool {
        self.trail.push((self.x, self.y));
        if self.trail.len() > self.trail_length {
            self.trail.remove(0);
        }

        self.x += self.vx;
        self.y += self.vy;
        self.vy += SHELL_GRAVITY;

        // Burst at the apex or once past the target height.
        if self.vy >= 0.0 || self.y <= self.target_y {
            self.explode(rng, burst);
            return false;
        }

        true
    }

    /// Emits the spark burst exactly once; repeat calls are no-ops.
    pub fn explode(&mut self, rng: &mut dyn RandomSource, burst: &mut Vec<Particle>) {
        if self.exploded {
            return;
        }

        self.exploded = true;

        let count = rand_int(rng, BURST_MIN, BURST_MAX);
        burst.reserve(count as usize);

        for _ in 0..count {
            let direction = rand_range(rng, 0.0, TAU);
            let speed = self.particle_speed.sample(rng);
            let size = self.particle_size.sample(rng);

            burst.push(Particle::new(
                rng,
                self.x,
                self.y,
                self.color.clone(),
                speed,
                direction,
                BURST_GRAVITY,
                BURST_FRICTION,
                size,
            ));
        }
    }

    pub fn draw(&self, painter: &mut dyn Painter) -> Result<(), JsValue> {
        if self.trail.len() < 2 {
            return Ok(());
        }

        painter.stroke_trail(&self.trail, &self.color, self.size)
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn target_y(&self) -> f64 {
        self.target_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rand::SeededRandom;

    fn shell(rng: &mut dyn RandomSource, y: f64, target_y: f64, speed: f64) -> Firework {
        Firework::new(
            rng,
            200.0,
            y,
            target_y,
            "hsl(30, 100%, 50%)".to_string(),
            speed,
            2.0,
            RangeOrValue::Range { min: 2.0, max: 6.0 },
            RangeOrValue::Range { min: 1.0, max: 2.0 },
        )
    }

    #[test]
    fn test_burst_count_within_bounds() {
        for seed in 0..32 {
            let mut rng = SeededRandom::new(seed);
            let mut firework = shell(&mut rng, 400.0, 100.0, 5.0);
            let mut burst = Vec::new();

            firework.explode(&mut rng, &mut burst);

            assert!(burst.len() >= 40 && burst.len() <= 140);
        }
    }

    #[test]
    fn test_explode_is_idempotent() {
        let mut rng = SeededRandom::new(8);
        let mut firework = shell(&mut rng, 400.0, 100.0, 5.0);
        let mut burst = Vec::new();

        firework.explode(&mut rng, &mut burst);
        let first = burst.len();

        firework.explode(&mut rng, &mut burst);
        firework.explode(&mut rng, &mut burst);

        assert_eq!(burst.len(), first);
    }

    #[test]
    fn test_shell_bursts_at_target_height() {
        let mut rng = SeededRandom::new(9);
        let mut firework = shell(&mut rng, 400.0, 350.0, 6.0);
        let mut burst = Vec::new();

        let mut frames = 0;
        while firework.tick(&mut rng, &mut burst) {
            frames += 1;
            assert!(frames < 1000, "shell never burst");
        }

        // Either it crossed the target or it reached the apex.
        assert!(firework.y <= firework.target_y || firework.vy >= 0.0);
        assert!(!burst.is_empty());
    }

    #[test]
    fn test_shell_bursts_at_apex_when_target_unreachable() {
        let mut rng = SeededRandom::new(10);
        // Slow shell, target far above its apex.
        let mut firework = shell(&mut rng, 400.0, 0.0, 1.0);
        let mut burst = Vec::new();

        let mut frames = 0;
        while firework.tick(&mut rng, &mut burst) {
            frames += 1;
            assert!(frames < 1000, "shell never burst");
        }

        assert!(firework.vy >= 0.0);
        assert!(!burst.is_empty());
    }

    #[test]
    fn test_trail_is_a_bounded_window() {
        let mut rng = SeededRandom::new(11);
        let mut firework = shell(&mut rng, 4000.0, 0.0, 8.0);
        let mut burst = Vec::new();

        for _ in 0..100 {
            if !firework.tick(&mut rng, &mut burst) {
                break;
            }
            assert!(firework.trail.len() <= firework.trail_length);
        }

        assert!((6..18).contains(&firework.trail_length));
    }

    #[test]
    fn test_short_trail_draws_nothing() {
        let mut rng = SeededRandom::new(12);
        let firework = shell(&mut rng, 400.0, 100.0, 5.0);
        let mut painter = crate::draw::RecordingPainter::default();

        firework.draw(&mut painter).unwrap();

        assert!(painter.trails.is_empty());
    }
}
