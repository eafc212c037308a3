//! Mountains: the foreground `mount`, the low `flatmount` and the pale
//! `distmount` ranges.

use std::f64::consts::PI;

use inkwash_core::params::{param_color, param_f64, param_usize};
use inkwash_core::{
    fit_curve, subdivide, to_global, CurveConfig, InkError, LatticeNoise, Point, Polyline, Prng,
    Rgba, StrokeConfig,
};
use serde_json::Value;

use super::{ink, paper, require_at_least, require_positive};
use crate::element::{Element, Style};
use crate::node::Composite;
use crate::shapes::stroke;

const DEFAULT_MOUNT_HEIGHT: f64 = 300.0;
const DEFAULT_MOUNT_WIDTH: f64 = 400.0;
const DEFAULT_MOUNT_ROWS: usize = 10;
const DEFAULT_MOUNT_COLS: usize = 50;
const DEFAULT_MOUNT_TEXTURE: usize = 120;

/// Parameters for `mount`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountParams {
    pub height: f64,
    /// Base width of the outermost ridge.
    pub width: f64,
    /// Nested ridge lines; inner rows shrink toward the summit.
    pub rows: usize,
    /// Samples per ridge line.
    pub cols: usize,
    /// Number of texture strokes laid over the body.
    pub texture: usize,
}

impl Default for MountParams {
    fn default() -> Self {
        Self {
            height: DEFAULT_MOUNT_HEIGHT,
            width: DEFAULT_MOUNT_WIDTH,
            rows: DEFAULT_MOUNT_ROWS,
            cols: DEFAULT_MOUNT_COLS,
            texture: DEFAULT_MOUNT_TEXTURE,
        }
    }
}

impl MountParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            height: param_f64(params, "height", DEFAULT_MOUNT_HEIGHT),
            width: param_f64(params, "width", DEFAULT_MOUNT_WIDTH),
            rows: param_usize(params, "rows", DEFAULT_MOUNT_ROWS),
            cols: param_usize(params, "cols", DEFAULT_MOUNT_COLS),
            texture: param_usize(params, "texture", DEFAULT_MOUNT_TEXTURE),
        }
    }

    fn validate(&self) -> Result<(), InkError> {
        require_positive("height", self.height)?;
        require_positive("width", self.width)?;
        require_at_least("rows", self.rows, 1)?;
        require_at_least("cols", self.cols, 3)
    }
}

/// Nested ridge lines, outermost first, each running left base to right base.
///
/// Row `j` is a noise-scaled cosine hump shrunk by `1 - j / rows` and lifted
/// by an accumulating random offset.
fn ridge_rows(
    rng: &mut Prng,
    noise: &LatticeNoise,
    height: f64,
    width: f64,
    rows: usize,
    cols: usize,
) -> Vec<Polyline> {
    let seed = rng.random(0.0, 100.0);
    let mut lift = 0.0;
    let mut out = Vec::with_capacity(rows);
    for j in 0..rows {
        lift += rng.random(0.0, height / 100.0);
        let shrink = 1.0 - j as f64 / rows as f64;
        let row = (0..cols)
            .map(|i| {
                let x = (i as f64 / (cols - 1) as f64 - 0.5) * PI;
                let y = x.cos() * noise.noise(rng, x + 10.0, j as f64 * 0.15, seed);
                Point::new(x / PI * width * shrink, -y * height * shrink + lift)
            })
            .collect();
        out.push(row);
    }
    out
}

/// A foreground mountain: white body, inked ridge outline and texture
/// strokes following the inner ridge lines.
pub fn mount(
    rng: &mut Prng,
    noise: &LatticeNoise,
    origin: Point,
    params: &MountParams,
) -> Result<Composite, InkError> {
    params.validate()?;
    let rows = ridge_rows(
        rng,
        noise,
        params.height,
        params.width,
        params.rows,
        params.cols,
    );
    let outer = to_global(origin, &rows[0]);

    let mut out = Composite::new();
    out.add(Element::polygon(
        outer.clone(),
        Style::from_colors(paper(), paper(), 0.0),
    ));
    let outline = StrokeConfig {
        width: 3.0,
        noise: 1.0,
        ..StrokeConfig::default()
    };
    out.add(stroke(rng, noise, &outer, &outline, ink(0.3))?);

    if params.rows > 1 {
        for _ in 0..params.texture {
            let j = 1 + ((rng.next_f64() * (params.rows - 1) as f64) as usize).min(params.rows - 2);
            let span = ((rng.random(0.1, 0.3) * params.cols as f64) as usize).max(3);
            let start = (rng.next_f64() * (params.cols - span + 1) as f64) as usize;
            let end = (start + span).min(params.cols);
            let line = to_global(origin, &rows[j][start..end]);
            let config = StrokeConfig {
                width: rng.random(0.8, 2.0),
                ..StrokeConfig::default()
            };
            let alpha = rng.random(0.1, 0.3);
            out.add(stroke(rng, noise, &line, &config, ink(alpha))?);
        }
    }
    tracing::debug!(elements = out.len(), "built mount");
    Ok(out)
}

const DEFAULT_FLAT_HEIGHT: f64 = 40.0;
const DEFAULT_FLAT_WIDTH: f64 = 400.0;
const DEFAULT_FLAT_COLS: usize = 50;
const DEFAULT_FLAT_CAP: f64 = 0.6;
const DEFAULT_FLAT_TEXTURE: usize = 30;

/// Parameters for `flatmount`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatMountParams {
    pub height: f64,
    pub width: f64,
    pub cols: usize,
    /// Fraction of the full hump height at which the top is cut flat.
    pub cap: f64,
    pub texture: usize,
}

impl Default for FlatMountParams {
    fn default() -> Self {
        Self {
            height: DEFAULT_FLAT_HEIGHT,
            width: DEFAULT_FLAT_WIDTH,
            cols: DEFAULT_FLAT_COLS,
            cap: DEFAULT_FLAT_CAP,
            texture: DEFAULT_FLAT_TEXTURE,
        }
    }
}

impl FlatMountParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            height: param_f64(params, "height", DEFAULT_FLAT_HEIGHT),
            width: param_f64(params, "width", DEFAULT_FLAT_WIDTH),
            cols: param_usize(params, "cols", DEFAULT_FLAT_COLS),
            cap: param_f64(params, "cap", DEFAULT_FLAT_CAP),
            texture: param_usize(params, "texture", DEFAULT_FLAT_TEXTURE),
        }
    }

    fn validate(&self) -> Result<(), InkError> {
        require_positive("height", self.height)?;
        require_positive("width", self.width)?;
        require_positive("cap", self.cap)?;
        require_at_least("cols", self.cols, 6)
    }
}

/// A low ridge whose top is cut flat and smoothed with a fitted curve.
pub fn flatmount(
    rng: &mut Prng,
    noise: &LatticeNoise,
    origin: Point,
    params: &FlatMountParams,
) -> Result<Composite, InkError> {
    params.validate()?;
    let seed = rng.random(0.0, 100.0);
    let cols = params.cols;
    let ridge: Polyline = (0..cols)
        .map(|i| {
            let x = (i as f64 / (cols - 1) as f64 - 0.5) * PI;
            let hump = x.cos() * noise.noise2(rng, x + 10.0, seed) * 2.0;
            Point::new(x / PI * params.width, -hump.min(params.cap) * params.height)
        })
        .collect();

    // Every fifth sample becomes a control point; the ends stay pinned.
    let mut controls: Polyline = ridge.iter().step_by(5).copied().collect();
    if let Some(&last) = ridge.last() {
        if controls.last() != Some(&last) {
            controls.push(last);
        }
    }
    let smooth = to_global(origin, &fit_curve(&controls, &CurveConfig::default())?);

    let mut out = Composite::new();
    out.add(Element::polygon(
        smooth.clone(),
        Style::from_colors(paper(), paper(), 0.0),
    ));
    let outline = StrokeConfig {
        width: 2.0,
        noise: 1.0,
        ..StrokeConfig::default()
    };
    out.add(stroke(rng, noise, &smooth, &outline, ink(0.3))?);

    // Horizontal strata under the flat top.
    let top = -params.cap * params.height;
    for _ in 0..params.texture {
        let y = rng.random(top, 0.0);
        let half = params.width * (1.0 - y / top).max(0.1) * rng.random(0.1, 0.4);
        let cx = rng.random(-params.width / 2.0, params.width / 2.0);
        let line: Polyline = (0..6)
            .map(|k| Point::new(cx - half + 2.0 * half * k as f64 / 5.0, y))
            .collect();
        let config = StrokeConfig {
            width: rng.random(0.5, 1.5),
            ..StrokeConfig::default()
        };
        let alpha = rng.random(0.05, 0.2);
        out.add(stroke(rng, noise, &to_global(origin, &line), &config, ink(alpha))?);
    }
    Ok(out)
}

const DEFAULT_DIST_HEIGHT: f64 = 150.0;
const DEFAULT_DIST_WIDTH: f64 = 800.0;
const DEFAULT_DIST_RANGES: usize = 3;
const DEFAULT_DIST_PEAKS: usize = 12;
const DEFAULT_DIST_DETAIL: usize = 5;

/// Parameters for `distmount`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistMountParams {
    pub height: f64,
    pub width: f64,
    /// Overlapping ranges, drawn back to front.
    pub ranges: usize,
    /// Coarse ridge samples per range before subdivision.
    pub peaks: usize,
    /// Subdivision resolution applied to the coarse ridge.
    pub detail: usize,
    pub color: Rgba,
}

impl Default for DistMountParams {
    fn default() -> Self {
        Self {
            height: DEFAULT_DIST_HEIGHT,
            width: DEFAULT_DIST_WIDTH,
            ranges: DEFAULT_DIST_RANGES,
            peaks: DEFAULT_DIST_PEAKS,
            detail: DEFAULT_DIST_DETAIL,
            color: ink(0.1),
        }
    }
}

impl DistMountParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            height: param_f64(params, "height", DEFAULT_DIST_HEIGHT),
            width: param_f64(params, "width", DEFAULT_DIST_WIDTH),
            ranges: param_usize(params, "ranges", DEFAULT_DIST_RANGES),
            peaks: param_usize(params, "peaks", DEFAULT_DIST_PEAKS),
            detail: param_usize(params, "detail", DEFAULT_DIST_DETAIL),
            color: param_color(params, "color", ink(0.1)),
        }
    }

    fn validate(&self) -> Result<(), InkError> {
        require_positive("height", self.height)?;
        require_positive("width", self.width)?;
        require_at_least("ranges", self.ranges, 1)?;
        require_at_least("peaks", self.peaks, 2)?;
        require_at_least("detail", self.detail, 1)
    }
}

/// Pale ranges in the distance: filled silhouettes only, each nearer range
/// lower and slightly darker.
pub fn distmount(
    rng: &mut Prng,
    noise: &LatticeNoise,
    origin: Point,
    params: &DistMountParams,
) -> Result<Composite, InkError> {
    params.validate()?;
    let mut out = Composite::new();
    let half = params.width / 2.0;
    for r in 0..params.ranges {
        let seed = rng.random(0.0, 100.0);
        let depth = r as f64 / params.ranges as f64;
        let peak = params.height * (1.0 - depth * 0.5);
        let last = (params.peaks - 1) as f64;
        let mut coarse: Polyline = (0..params.peaks)
            .map(|i| {
                let t = i as f64 / last;
                let envelope = (t * PI).sin();
                let h = noise.noise2(rng, t * 3.0, seed) * 2.0 * envelope * peak;
                Point::new(-half + t * params.width, -h)
            })
            .collect();
        coarse = subdivide(&coarse, params.detail)?;
        let color = params.color.with_alpha(params.color.a * (1.0 + depth));
        out.add(Element::polygon(
            to_global(origin, &coarse),
            Style::solid(color),
        ));
    }
    Ok(out)
}
