//! Brush strokes: a centerline expanded into a closed, width-modulated ribbon.

use std::f64::consts::PI;

use crate::error::InkError;
use crate::noise::LatticeNoise;
use crate::point::{Point, Polyline, Vector};
use crate::prng::Prng;

/// Default width profile: tapers to zero at both ends.
pub fn sine_taper(t: f64) -> f64 {
    (t * PI).sin()
}

/// Stroke shape parameters.
#[derive(Debug, Clone, Copy)]
pub struct StrokeConfig {
    /// Peak half-width of the ribbon.
    pub width: f64,
    /// Mix between the clean profile (0) and a fully noise-modulated one (1).
    pub noise: f64,
    /// Translation applied to every output point.
    pub offset: Vector,
    /// Width multiplier along the stroke, sampled at `i / N`.
    pub profile: fn(f64) -> f64,
    /// Width of the line drawn around the finished ribbon.
    pub outline_width: f64,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            width: 2.0,
            noise: 0.5,
            offset: Vector::ZERO,
            profile: sine_taper,
            outline_width: 1.0,
        }
    }
}

/// Expands `centerline` into a closed ribbon polygon.
///
/// The result runs first point, left rail, last point, right rail reversed,
/// and back to the first point. A jitter seed is drawn from `rng` once per
/// call, so consecutive strokes do not repeat the same jitter.
pub fn stroke_points(
    rng: &mut Prng,
    noise: &LatticeNoise,
    centerline: &[Point],
    config: &StrokeConfig,
) -> Result<Polyline, InkError> {
    let n = centerline.len();
    if n < 3 {
        return Err(InkError::InsufficientPoints { needed: 3, got: n });
    }

    let jitter_seed = rng.random(0.0, 10.0);
    let mut left = Vec::with_capacity(n - 2);
    let mut right = Vec::with_capacity(n - 2);
    for i in 1..n - 1 {
        let base = config.width * (config.profile)(i as f64 / n as f64);
        let jitter = noise.noise2(rng, i as f64 * 0.5, jitter_seed);
        let w = base * (1.0 - config.noise) + base * config.noise * jitter;

        let (prev, here, next) = (centerline[i - 1], centerline[i], centerline[i + 1]);
        let incoming = (here - prev).angle();
        let outgoing = (here - next).angle();
        let mut normal = (incoming + outgoing) / 2.0;
        if normal < outgoing {
            normal += PI;
        }
        let offset = Vector::from_angle(normal) * w;
        left.push(here + offset);
        right.push(here - offset);
    }

    let first = centerline[0];
    let mut ring = Vec::with_capacity(2 * n);
    ring.push(first);
    ring.extend(left);
    ring.push(centerline[n - 1]);
    ring.extend(right.into_iter().rev());
    ring.push(first);
    Ok(ring.into_iter().map(|p| p + config.offset).collect())
}
