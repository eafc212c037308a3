//! Polyline resampling and quadratic curve fitting.

use crate::error::InkError;
use crate::point::{Point, Polyline};

/// Samples emitted per quadratic segment in [`fit_curve`].
pub const SAMPLES_PER_SEGMENT: usize = 20;

/// Configuration for [`fit_curve`].
#[derive(Debug, Clone, Copy)]
pub struct CurveConfig {
    /// Rational weight on each middle control point. `1.0` gives a plain
    /// quadratic Bezier; larger values pull the curve towards the control.
    pub weight: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}

/// Linearly resamples `points` with `resolution` samples per segment.
///
/// `N` input points produce `(N - 1) * resolution + 1` output points. Both
/// endpoints are preserved exactly. A single point is returned unchanged.
pub fn subdivide(points: &[Point], resolution: usize) -> Result<Polyline, InkError> {
    if resolution == 0 {
        return Err(InkError::InvalidResolution(resolution));
    }
    let Some(last) = points.last() else {
        return Err(InkError::InsufficientPoints { needed: 1, got: 0 });
    };
    let total = (points.len() - 1) * resolution;
    let mut out = Vec::with_capacity(total + 1);
    for i in 0..total {
        let from = points[i / resolution];
        let to = points[(i + resolution - 1) / resolution];
        let t = (i % resolution) as f64 / resolution as f64;
        out.push(from.lerp(to, t));
    }
    out.push(*last);
    Ok(out)
}

/// Fits a chain of quadratic Bezier segments through `controls`.
///
/// Each consecutive triple of controls forms one segment. Inner joints sit
/// at the midpoint of adjacent controls, so the chain is continuous while
/// only the first and last controls are interpolated. Two controls get a
/// synthetic midpoint control. Every segment emits
/// [`SAMPLES_PER_SEGMENT`] samples; the last one emits one extra to land on
/// the final control.
pub fn fit_curve(controls: &[Point], config: &CurveConfig) -> Result<Polyline, InkError> {
    let padded;
    let controls = match controls.len() {
        0 | 1 => {
            return Err(InkError::InsufficientPoints {
                needed: 2,
                got: controls.len(),
            })
        }
        2 => {
            padded = [controls[0], midpoint(controls[0], controls[1]), controls[1]];
            &padded[..]
        }
        _ => controls,
    };

    let segments = controls.len() - 2;
    let w = config.weight;
    let mut out = Vec::with_capacity(segments * SAMPLES_PER_SEGMENT + 1);
    for j in 0..segments {
        let is_last = j == segments - 1;
        let p0 = if j == 0 {
            controls[0]
        } else {
            midpoint(controls[j], controls[j + 1])
        };
        let p1 = controls[j + 1];
        let p2 = if is_last {
            controls[j + 2]
        } else {
            midpoint(controls[j + 1], controls[j + 2])
        };
        let samples = SAMPLES_PER_SEGMENT + usize::from(is_last);
        for i in 0..samples {
            let t = i as f64 / SAMPLES_PER_SEGMENT as f64;
            let a = (1.0 - t).powi(2);
            let b = 2.0 * t * (1.0 - t) * w;
            let c = t * t;
            let denom = a + b + c;
            out.push(Point::new(
                (a * p0.x + b * p1.x + c * p2.x) / denom,
                (a * p0.y + b * p1.y + c * p2.y) / denom,
            ));
        }
    }
    Ok(out)
}

fn midpoint(a: Point, b: Point) -> Point {
    a.lerp(b, 0.5)
}
