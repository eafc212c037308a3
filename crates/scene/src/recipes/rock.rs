//! Rock: a noisy boulder with an inked rim and shaded facets.

use inkwash_core::blob::leaf_lobe;
use inkwash_core::params::{param_bool, param_f64};
use inkwash_core::{
    blob_points, bounding_box, midpoint, triangulate, BlobConfig, InkError, LatticeNoise, Point,
    Prng, StrokeConfig, TriangulateConfig, Vector,
};
use serde_json::Value;

use super::{ink, paper, require_positive};
use crate::element::{Element, Style};
use crate::node::Composite;
use crate::shapes::stroke;

const DEFAULT_SIZE: f64 = 60.0;
const DEFAULT_ROUGHNESS: f64 = 0.6;
const OUTLINE_RESOLUTION: usize = 30;
/// Largest accepted `size`.
pub const MAX_SIZE: f64 = 10_000.0;

/// Parameters for `rock`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RockParams {
    /// Diameter of the boulder before noise.
    pub size: f64,
    /// Blob noise mix in [0, 1].
    pub roughness: f64,
    /// Shade the facets on the side away from the light.
    pub shade: bool,
}

impl Default for RockParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            roughness: DEFAULT_ROUGHNESS,
            shade: true,
        }
    }
}

impl RockParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            size: param_f64(params, "size", DEFAULT_SIZE),
            roughness: param_f64(params, "roughness", DEFAULT_ROUGHNESS),
            shade: param_bool(params, "shade", true),
        }
    }

    fn validate(&self) -> Result<(), InkError> {
        require_positive("size", self.size)?;
        if self.size > MAX_SIZE {
            return Err(InkError::InvalidParameter {
                name: "size".into(),
                reason: format!("must be at most {MAX_SIZE}, got {}", self.size),
            });
        }
        if !(0.0..=1.0).contains(&self.roughness) {
            return Err(InkError::InvalidParameter {
                name: "roughness".into(),
                reason: format!("must lie in [0, 1], got {}", self.roughness),
            });
        }
        Ok(())
    }
}

/// A boulder sitting on the anchor: white body, rim stroke, then facets
/// right of the centroid shaded with a light wash.
pub fn rock(
    rng: &mut Prng,
    noise: &LatticeNoise,
    origin: Point,
    params: &RockParams,
) -> Result<Composite, InkError> {
    params.validate()?;
    let config = BlobConfig {
        length: params.size,
        width: params.size * 1.6,
        angle: -std::f64::consts::FRAC_PI_2,
        noise: params.roughness,
        resolution: OUTLINE_RESOLUTION,
        profile: leaf_lobe,
    };
    let center = origin - Vector::new(0.0, params.size / 2.0);
    let outline = blob_points(rng, noise, center, &config)?;

    let mut out = Composite::new();
    out.add(Element::polygon(
        outline.clone(),
        Style::from_colors(paper(), paper(), 0.0),
    ));
    let rim = StrokeConfig {
        width: 2.0,
        noise: 0.8,
        ..StrokeConfig::default()
    };
    out.add(stroke(rng, noise, &outline, &rim, ink(0.5))?);

    if params.shade {
        let bounds = bounding_box(&outline)?;
        // The blob's closing point only nearly repeats the first.
        let ring = &outline[..outline.len() - 1];
        let facets = triangulate(
            ring,
            &TriangulateConfig {
                max_area: Some((params.size * params.size / 12.0).max(1.0)),
            },
        )?;
        for facet in facets {
            let centroid = midpoint(&facet)?;
            if centroid.x <= bounds.center().x {
                continue;
            }
            let alpha = rng.random(0.05, 0.15);
            out.add(Element::polygon(facet.to_vec(), Style::solid(ink(alpha))));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Render;
    use serde_json::json;

    fn build(seed: &str, params: &RockParams) -> Composite {
        let mut rng = Prng::new(seed);
        let noise = LatticeNoise::new();
        rock(&mut rng, &noise, Point::new(100.0, 100.0), params).unwrap()
    }

    #[test]
    fn body_and_rim_come_first() {
        let out = build("rock", &RockParams::default());
        assert!(out.len() >= 2);
        let body = out.elements()[0].points().unwrap();
        assert_eq!(body.len(), OUTLINE_RESOLUTION + 1);
        assert_eq!(out.elements()[0].style().fill(), "rgba(255,255,255,1)");
    }

    #[test]
    fn shading_adds_facets_only_when_enabled() {
        let shaded = build("facets", &RockParams::default());
        let plain = build("facets", &RockParams::from_json(&json!({"shade": false})));
        assert_eq!(plain.len(), 2);
        assert!(shaded.len() > plain.len());
        for facet in &shaded.elements()[2..] {
            assert_eq!(facet.points().unwrap().len(), 3);
        }
    }

    #[test]
    fn rock_sits_on_the_anchor() {
        let params = RockParams {
            roughness: 0.0,
            ..RockParams::default()
        };
        let out = build("seat", &params);
        let bb = bounding_box(out.elements()[0].points().unwrap()).unwrap();
        assert!((bb.max_y - 100.0).abs() < 1e-6, "base at {}", bb.max_y);
        assert!((bb.min_y - 40.0).abs() < 1e-6, "top at {}", bb.min_y);
    }

    #[test]
    fn roughness_out_of_range_is_rejected() {
        let mut rng = Prng::new("r");
        let noise = LatticeNoise::new();
        let params = RockParams::from_json(&json!({"roughness": 1.5}));
        let err = rock(&mut rng, &noise, Point::ORIGIN, &params).unwrap_err();
        assert!(err.to_string().contains("roughness"));
    }

    #[test]
    fn oversized_rock_is_rejected() {
        let mut rng = Prng::new("huge");
        let noise = LatticeNoise::new();
        let params = RockParams::from_json(&json!({"size": 1e200}));
        let err = rock(&mut rng, &noise, Point::ORIGIN, &params).unwrap_err();
        assert!(matches!(err, InkError::InvalidParameter { ref name, .. } if name == "size"));
    }

    #[test]
    fn largest_rock_still_shades() {
        let params = RockParams {
            size: MAX_SIZE,
            ..RockParams::default()
        };
        let out = build("boulder", &params);
        assert!(out.len() > 2);
    }

    #[test]
    fn same_seed_same_markup() {
        let a = build("twin", &RockParams::default()).render();
        let b = build("twin", &RockParams::default()).render();
        assert_eq!(a, b);
    }
}
