use wasm_bindgen::JsValue;

use super::rand::{rand_range, RandomSource};
use crate::draw::Painter;

/// Sparks below this opacity would render as near-invisible specks, so
/// they are culled instead.
const ALPHA_CUTOFF: f64 = 0.01;

/// A single decaying spark emitted when a shell bursts.
pub struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    color: String,
    gravity: f64,
    friction: f64,
    alpha: f64,
    decay: f64,
    size: f64,
}

impl Particle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rng: &mut dyn RandomSource,
        x: f64,
        y: f64,
        color: String,
        speed: f64,
        direction: f64,
        gravity: f64,
        friction: f64,
        size: f64,
    ) -> Particle {
        Particle {
            x,
            y,
            vx: direction.cos() * speed,
            vy: direction.sin() * speed,
            color,
            gravity,
            friction,
            alpha: 1.0,
            decay: rand_range(rng, 0.004, 0.02),
            size,
        }
    }

    /// Drag, then gravity, then integration, then fade.
    pub fn tick(&mut self) {
        self.vx *= self.friction;
        self.vy *= self.friction;
        self.vy += self.gravity;
        self.x += self.vx;
        self.y += self.vy;
        self.alpha -= self.decay;
    }

    pub fn is_alive(&self) -> bool {
        self.alpha > ALPHA_CUTOFF
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn draw(&self, painter: &mut dyn Painter) -> Result<(), JsValue> {
        painter.fill_circle(self.x, self.y, self.size, &self.color, self.alpha.max(0.0))
    }
}
