//! Boat: a curved hull, a cabin and a mast, optionally facing left.

use inkwash_core::params::{param_bool, param_f64};
use inkwash_core::{
    fit_curve, flip_horizontal, to_global, CurveConfig, InkError, LatticeNoise, Point, Polyline,
    Prng, StrokeConfig,
};
use serde_json::Value;

use super::{ink, paper, require_positive};
use crate::element::{Element, Style};
use crate::node::Composite;
use crate::shapes::stroke;

const DEFAULT_LENGTH: f64 = 120.0;
const DEFAULT_SCALE: f64 = 1.0;
const DEFAULT_KEEL_WEIGHT: f64 = 1.5;

/// Parameters for `boat`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoatParams {
    /// Hull length before scaling.
    pub length: f64,
    pub scale: f64,
    /// Mirror the boat so the bow points left.
    pub flip: bool,
    /// Rational weight of the keel control; larger values give a deeper hull.
    pub keel_weight: f64,
}

impl Default for BoatParams {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            scale: DEFAULT_SCALE,
            flip: false,
            keel_weight: DEFAULT_KEEL_WEIGHT,
        }
    }
}

impl BoatParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            length: param_f64(params, "length", DEFAULT_LENGTH),
            scale: param_f64(params, "scale", DEFAULT_SCALE),
            flip: param_bool(params, "flip", false),
            keel_weight: param_f64(params, "keel_weight", DEFAULT_KEEL_WEIGHT),
        }
    }

    fn validate(&self) -> Result<(), InkError> {
        require_positive("length", self.length)?;
        require_positive("scale", self.scale)?;
        require_positive("keel_weight", self.keel_weight)
    }
}

/// Scales, mirrors and places a locally built polyline.
fn place(points: &[Point], origin: Point, params: &BoatParams) -> Polyline {
    let scaled: Polyline = points.iter().map(|p| p.scaled(params.scale)).collect();
    let oriented = if params.flip {
        flip_horizontal(&scaled, 0.0)
    } else {
        scaled
    };
    to_global(origin, &oriented)
}

/// A small boat whose deck line sits on the anchor.
///
/// Draw order is hull, cabin, then mast so the mast overlaps the cabin roof.
pub fn boat(
    rng: &mut Prng,
    noise: &LatticeNoise,
    origin: Point,
    params: &BoatParams,
) -> Result<Composite, InkError> {
    params.validate()?;
    let len = params.length;
    let half = len / 2.0;
    let draft = len * rng.random(0.12, 0.18);
    let sheer = len * rng.random(0.02, 0.06);

    // Stern at the left, bow raised at the right; the closing edge is the deck.
    let hull = fit_curve(
        &[
            Point::new(-half, 0.0),
            Point::new(0.0, draft),
            Point::new(half, -sheer),
        ],
        &CurveConfig {
            weight: params.keel_weight,
        },
    )?;

    let cabin_left = -len * rng.random(0.25, 0.3);
    let cabin_right = len * rng.random(0.05, 0.1);
    let cabin_top = -len * rng.random(0.1, 0.14);
    let cabin = [
        Point::new(cabin_left, 0.0),
        Point::new(cabin_left + len * 0.02, cabin_top),
        Point::new(cabin_right - len * 0.02, cabin_top),
        Point::new(cabin_right, 0.0),
    ];

    let mast_x = len * rng.random(0.12, 0.18);
    let mast_top = -len * rng.random(0.5, 0.6);
    let mast = [
        Point::new(mast_x, 0.0),
        Point::new(mast_x, mast_top / 2.0),
        Point::new(mast_x, mast_top),
    ];

    let mut out = Composite::new();
    out.add(Element::polygon(
        place(&hull, origin, params),
        Style::from_colors(paper(), ink(0.8), params.scale),
    ));
    out.add(Element::polygon(
        place(&cabin, origin, params),
        Style::from_colors(paper(), ink(0.6), params.scale * 0.8),
    ));
    let mast_config = StrokeConfig {
        width: 1.5 * params.scale,
        noise: 0.3,
        ..StrokeConfig::default()
    };
    out.add(stroke(
        rng,
        noise,
        &place(&mast, origin, params),
        &mast_config,
        ink(0.7),
    )?);
    Ok(out)
}
