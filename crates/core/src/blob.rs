//! Blobs: closed, radially sampled leaf and rock silhouettes.

use std::f64::consts::PI;

use crate::error::InkError;
use crate::noise::LatticeNoise;
use crate::point::{Point, Polyline, Vector};
use crate::prng::Prng;

/// Default blob profile: a half-sine lobe on [0, 1] and its negated mirror
/// on (1, 2], so the two halves bulge to opposite sides.
pub fn leaf_lobe(p: f64) -> f64 {
    if p <= 1.0 {
        (p * PI).sin().max(0.0).sqrt()
    } else {
        -((p + 1.0) * PI).sin().max(0.0).sqrt()
    }
}

/// Blob shape parameters.
#[derive(Debug, Clone, Copy)]
pub struct BlobConfig {
    /// Extent along the blob's axis.
    pub length: f64,
    /// Extent across the axis.
    pub width: f64,
    /// Rotation of the axis in radians.
    pub angle: f64,
    /// Mix between a clean outline (0) and a fully noise-scaled one (1).
    pub noise: f64,
    /// Number of angular steps around the outline.
    pub resolution: usize,
    /// Lateral offset profile over the outline parameter `p` in [0, 2].
    pub profile: fn(f64) -> f64,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            length: 20.0,
            width: 5.0,
            angle: 0.0,
            noise: 0.5,
            resolution: 15,
            profile: leaf_lobe,
        }
    }
}

/// Outline of a blob centered at `center`.
///
/// Returns `resolution + 1` points; the first and last coincide (up to
/// floating point), so the outline is closed. A zero-length blob collapses
/// every point onto `center`.
pub fn blob_points(
    rng: &mut Prng,
    noise: &LatticeNoise,
    center: Point,
    config: &BlobConfig,
) -> Result<Polyline, InkError> {
    let reso = config.resolution;
    if reso == 0 {
        return Err(InkError::InvalidResolution(reso));
    }
    if config.length == 0.0 {
        return Ok(vec![center; reso + 1]);
    }

    let polar: Vec<(f64, f64)> = (0..=reso)
        .map(|i| {
            let p = i as f64 / reso as f64 * 2.0;
            let along = config.length / 2.0 - (p - 1.0).abs() * config.length;
            let across = (config.profile)(p) * config.width / 2.0;
            (along.hypot(across), across.atan2(along))
        })
        .collect();

    let jitter_seed = rng.random(0.0, 10.0);
    let raw: Vec<f64> = (0..=reso)
        .map(|i| noise.noise2(rng, i as f64 * 0.05, jitter_seed))
        .collect();
    let series = normalize_noise(&raw)?;

    Ok(polar
        .iter()
        .zip(&series)
        .map(|(&(radius, theta), &ns)| {
            let scale = ns * config.noise + (1.0 - config.noise);
            center + Vector::from_angle(theta + config.angle) * (radius * scale)
        })
        .collect())
}

/// Removes end-to-end drift from `series` and rescales it into [0, 1].
///
/// A ramp equal to the last-minus-first difference is added so both ends
/// meet, then the series is mapped onto [0, 1] by its own extremes. A
/// constant series maps to all `0.5`.
pub fn normalize_noise(series: &[f64]) -> Result<Vec<f64>, InkError> {
    let n = series.len();
    if n < 2 {
        return Err(InkError::InsufficientPoints { needed: 2, got: n });
    }
    let drift = series[n - 1] - series[0];
    let last = (n - 1) as f64;
    let detrended: Vec<f64> = series
        .iter()
        .enumerate()
        .map(|(i, v)| v + drift * (last - i as f64) / last)
        .collect();
    let (lo, hi) = detrended
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;
    if range.is_nan() || range <= f64::EPSILON {
        return Ok(vec![0.5; n]);
    }
    Ok(detrended.iter().map(|v| (v - lo) / range).collect())
}
