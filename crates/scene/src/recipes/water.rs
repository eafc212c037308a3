//! Water: short horizontal ripple strokes scattered over a band.

use inkwash_core::params::{param_color, param_f64, param_usize};
use inkwash_core::{to_global, InkError, LatticeNoise, Point, Polyline, Prng, Rgba, StrokeConfig};
use serde_json::Value;

use super::{ink, require_positive};
use crate::node::Composite;
use crate::shapes::stroke;

const DEFAULT_WIDTH: f64 = 600.0;
const DEFAULT_HEIGHT: f64 = 60.0;
const DEFAULT_LINES: usize = 20;
const DEFAULT_MIN_LENGTH: f64 = 40.0;
const DEFAULT_MAX_LENGTH: f64 = 160.0;
/// Samples per ripple centerline.
const RIPPLE_SAMPLES: usize = 8;
/// Peak vertical wobble of a ripple.
const RIPPLE_AMPLITUDE: f64 = 6.0;

/// Parameters for `water`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterParams {
    /// Horizontal extent of the band, centered on the anchor.
    pub width: f64,
    /// Vertical extent of the band, below the anchor.
    pub height: f64,
    pub lines: usize,
    pub min_length: f64,
    pub max_length: f64,
    pub color: Rgba,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            lines: DEFAULT_LINES,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            color: ink(0.4),
        }
    }
}

impl WaterParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            width: param_f64(params, "width", DEFAULT_WIDTH),
            height: param_f64(params, "height", DEFAULT_HEIGHT),
            lines: param_usize(params, "lines", DEFAULT_LINES),
            min_length: param_f64(params, "min_length", DEFAULT_MIN_LENGTH),
            max_length: param_f64(params, "max_length", DEFAULT_MAX_LENGTH),
            color: param_color(params, "color", ink(0.4)),
        }
    }

    fn validate(&self) -> Result<(), InkError> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        require_positive("min_length", self.min_length)?;
        if self.max_length < self.min_length {
            return Err(InkError::InvalidParameter {
                name: "max_length".into(),
                reason: "must not be below min_length".into(),
            });
        }
        Ok(())
    }
}

/// Ripples of random length and position. Each ripple follows the noise
/// field vertically so neighbouring lines do not look ruled.
pub fn water(
    rng: &mut Prng,
    noise: &LatticeNoise,
    origin: Point,
    params: &WaterParams,
) -> Result<Composite, InkError> {
    params.validate()?;
    let half = params.width / 2.0;
    let mut out = Composite::new();
    for _ in 0..params.lines {
        let length = rng.random(params.min_length, params.max_length).min(params.width);
        let x0 = rng.random(-half, half - length);
        let y = rng.random(0.0, params.height);
        let line: Polyline = (0..RIPPLE_SAMPLES)
            .map(|k| {
                let x = x0 + length * k as f64 / (RIPPLE_SAMPLES - 1) as f64;
                let dy = (noise.noise2(rng, x * 0.02, y * 0.1) - 0.5) * RIPPLE_AMPLITUDE;
                Point::new(x, y + dy)
            })
            .collect();
        let config = StrokeConfig {
            width: rng.random(0.5, 1.5),
            ..StrokeConfig::default()
        };
        out.add(stroke(rng, noise, &to_global(origin, &line), &config, params.color)?);
    }
    Ok(out)
}
