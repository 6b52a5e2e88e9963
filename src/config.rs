use serde::Deserialize;

use crate::engine::rand::{rand_int, rand_range, random_hsl, RandomSource};

/// A cosmetic parameter given either as a fixed value or as a range to
/// sample per shell or spark.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RangeOrValue {
    Value(f64),
    Range { min: f64, max: f64 },
}

impl RangeOrValue {
    pub fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        match *self {
            RangeOrValue::Value(value) => value,
            RangeOrValue::Range { min, max } => rand_range(rng, min, max),
        }
    }
}

/// Colour selection for launched shells: a single colour, or a palette
/// to pick from per launch.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColorChoice {
    Fixed(String),
    Palette(Vec<String>),
}

/// The widget's configuration surface, deserialized from the JS options
/// object. Every field is optional with the documented default.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FireworksOptions {
    /// Spawn-rate multiplier; higher means faster repeat launches.
    pub population: f64,
    /// Absent means a fully random hue per shell.
    pub color: Option<ColorChoice>,
    pub firework_speed: RangeOrValue,
    pub firework_size: RangeOrValue,
    pub particle_speed: RangeOrValue,
    pub particle_size: RangeOrValue,
    /// Whether the scheduler self-launches without user input.
    pub auto_play: bool,
}

impl Default for FireworksOptions {
    fn default() -> FireworksOptions {
        FireworksOptions {
            population: 1.0,
            color: None,
            firework_speed: RangeOrValue::Range { min: 2.0, max: 8.0 },
            firework_size: RangeOrValue::Range { min: 1.0, max: 4.0 },
            particle_speed: RangeOrValue::Range { min: 2.0, max: 6.0 },
            particle_size: RangeOrValue::Range { min: 1.0, max: 2.0 },
            auto_play: true,
        }
    }
}

impl FireworksOptions {
    /// Picks the colour for one shell.
    pub fn pick_color(&self, rng: &mut dyn RandomSource) -> String {
        match &self.color {
            Some(ColorChoice::Fixed(color)) => color.clone(),
            Some(ColorChoice::Palette(colors)) if !colors.is_empty() => {
                colors[rand_int(rng, 0, colors.len() as u32) as usize].clone()
            }
            _ => random_hsl(rng),
        }
    }
}
