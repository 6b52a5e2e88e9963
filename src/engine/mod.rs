mod firework;
mod particle;
pub mod rand;
pub mod scheduler;

pub use firework::*;
pub use particle::*;

use wasm_bindgen::JsValue;

use self::rand::{rand_range, RandomSource};
use crate::config::FireworksOptions;
use crate::draw::Painter;

/// Owns every live shell and spark for one widget instance.
///
/// The engine is pure simulation: randomness comes in through a
/// [`RandomSource`] and drawing goes out through a [`Painter`], so the
/// whole thing runs without a DOM.
pub struct Engine {
    options: FireworksOptions,
    fireworks: Vec<Firework>,
    particles: Vec<Particle>,
}

impl Engine {
    pub fn new(options: FireworksOptions) -> Engine {
        Engine {
            options,
            fireworks: Vec::new(),
            particles: Vec::new(),
        }
    }

    pub fn options(&self) -> &FireworksOptions {
        &self.options
    }

    /// Launches one shell from `(x, y)` towards `target_y`.
    pub fn launch(&mut self, rng: &mut dyn RandomSource, x: f64, y: f64, target_y: f64) {
        let color = self.options.pick_color(rng);
        let speed = self.options.firework_speed.sample(rng);
        let size = self.options.firework_size.sample(rng);

        self.fireworks.push(Firework::new(
            rng,
            x,
            y,
            target_y,
            color,
            speed,
            size,
            self.options.particle_speed,
            self.options.particle_size,
        ));
    }

    /// Launches from a random spot along the bottom edge, aimed at the
    /// upper band of the surface.
    pub fn launch_random(&mut self, rng: &mut dyn RandomSource, width: f64, height: f64) {
        let x = rand_range(rng, width * 0.1, width * 0.9);
        let target_y = rand_range(rng, height * 0.1, height * 0.45);

        self.launch(rng, x, height, target_y);
    }

    /// Advances and redraws every live object for one frame.
    ///
    /// Both collections are walked in reverse index order; removal shifts
    /// later elements forward, so walking backward visits each element
    /// exactly once despite in-place deletion.
    pub fn tick(
        &mut self,
        rng: &mut dyn RandomSource,
        painter: &mut dyn Painter,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue> {
        painter.clear(width, height);

        for index in (0..self.fireworks.len()).rev() {
            if self.fireworks[index].tick(rng, &mut self.particles) {
                self.fireworks[index].draw(painter)?;
            } else {
                self.fireworks.remove(index);
            }
        }

        for index in (0..self.particles.len()).rev() {
            self.particles[index].tick();

            if self.particles[index].is_alive() {
                self.particles[index].draw(painter)?;
            } else {
                self.particles.remove(index);
            }
        }

        Ok(())
    }

    /// Drops every live object; nothing is drawn after this until a new
    /// launch happens.
    pub fn clear(&mut self) {
        self.fireworks.clear();
        self.particles.clear();
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::rand::SeededRandom;
    use super::*;
    use crate::draw::RecordingPainter;

    fn engine() -> Engine {
        Engine::new(FireworksOptions::default())
    }

    #[test]
    fn test_launch_adds_one_shell_from_the_bottom_edge() {
        let mut rng = SeededRandom::new(20);
        let mut engine = engine();

        engine.launch(&mut rng, 120.0, 480.0, 96.0);

        assert_eq!(engine.fireworks().len(), 1);
        assert_eq!(engine.fireworks()[0].position(), (120.0, 480.0));
        assert_eq!(engine.fireworks()[0].target_y(), 96.0);
        assert!(engine.particles().is_empty());
    }

    #[test]
    fn test_launch_random_stays_within_the_middle_band() {
        let mut rng = SeededRandom::new(21);
        let mut engine = engine();

        for _ in 0..100 {
            engine.launch_random(&mut rng, 800.0, 600.0);
        }

        for firework in engine.fireworks() {
            let (x, y) = firework.position();
            assert!((80.0..720.0).contains(&x));
            assert_eq!(y, 600.0);
            assert!((60.0..270.0).contains(&firework.target_y()));
        }
    }

    #[test]
    fn test_shell_lifecycle_runs_to_an_empty_sky() {
        let mut rng = SeededRandom::new(22);
        let mut engine = engine();
        let mut painter = RecordingPainter::default();

        engine.launch(&mut rng, 400.0, 600.0, 150.0);

        let mut ticks = 0;
        while !engine.fireworks().is_empty() || !engine.particles().is_empty() {
            engine
                .tick(&mut rng, &mut painter, 800.0, 600.0)
                .unwrap();
            ticks += 1;
            assert!(ticks < 2000, "animation never settled");
        }

        // The shell burst and its sparks were drawn before fading out.
        assert!(!painter.circles.is_empty());
        assert!(painter.circles.iter().all(|circle| circle.alpha > 0.0));
    }

    #[test]
    fn test_clear_stops_all_drawing() {
        let mut rng = SeededRandom::new(23);
        let mut engine = engine();

        engine.launch(&mut rng, 400.0, 600.0, 150.0);
        engine.launch_random(&mut rng, 800.0, 600.0);
        engine.clear();

        let mut painter = RecordingPainter::default();
        for _ in 0..10 {
            engine
                .tick(&mut rng, &mut painter, 800.0, 600.0)
                .unwrap();
        }

        assert_eq!(painter.clears, 10);
        assert!(painter.trails.is_empty());
        assert!(painter.circles.is_empty());
        assert!(engine.fireworks().is_empty());
        assert!(engine.particles().is_empty());
    }
}
