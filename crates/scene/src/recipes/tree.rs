//! Tree: a recursively grown trunk and branches with leaf blobs at the tips.

use std::f64::consts::FRAC_PI_2;

use inkwash_core::params::{param_bool, param_color, param_f64, param_usize};
use inkwash_core::{
    grow_tree, BlobConfig, BranchConfig, InkError, LatticeNoise, Point, Prng, Rgba, TreeConfig,
};
use serde_json::Value;

use super::{ink, paper, require_positive};
use crate::element::Style;
use crate::node::Composite;
use crate::shapes::{blob, branch_outline};

const DEFAULT_DEPTH: usize = 2;
/// Deepest recursion accepted; branch count grows geometrically with depth.
pub const MAX_DEPTH: usize = 5;
const DEFAULT_HEIGHT: f64 = 150.0;
const DEFAULT_WIDTH: f64 = 5.0;
const DEFAULT_BRANCH_PROBABILITY: f64 = 0.7;
const DEFAULT_LEAF_SIZE: f64 = 14.0;

/// Parameters for `tree`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub depth: usize,
    /// Trunk height.
    pub height: f64,
    /// Trunk half-width at the root.
    pub width: f64,
    pub branch_probability: f64,
    pub leaves: bool,
    pub leaf_size: f64,
    pub leaf_color: Rgba,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            branch_probability: DEFAULT_BRANCH_PROBABILITY,
            leaves: true,
            leaf_size: DEFAULT_LEAF_SIZE,
            leaf_color: Rgba::gray(60, 0.6),
        }
    }
}

impl TreeParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            depth: param_usize(params, "depth", DEFAULT_DEPTH),
            height: param_f64(params, "height", DEFAULT_HEIGHT),
            width: param_f64(params, "width", DEFAULT_WIDTH),
            branch_probability: param_f64(
                params,
                "branch_probability",
                DEFAULT_BRANCH_PROBABILITY,
            ),
            leaves: param_bool(params, "leaves", true),
            leaf_size: param_f64(params, "leaf_size", DEFAULT_LEAF_SIZE),
            leaf_color: param_color(params, "leaf_color", Rgba::gray(60, 0.6)),
        }
    }

    fn validate(&self) -> Result<(), InkError> {
        if self.depth > MAX_DEPTH {
            return Err(InkError::InvalidParameter {
                name: "depth".into(),
                reason: format!("must be at most {MAX_DEPTH}, got {}", self.depth),
            });
        }
        require_positive("height", self.height)?;
        require_positive("width", self.width)?;
        require_positive("leaf_size", self.leaf_size)
    }

    fn tree_config(&self) -> TreeConfig {
        let mut config = TreeConfig::new(self.depth);
        config.trunk = BranchConfig {
            height: self.height,
            width: self.width,
            angle: -FRAC_PI_2,
            ..config.trunk
        };
        config.branch_probability = self.branch_probability;
        config
    }
}

/// A tree rooted at the anchor. Branches are drawn trunk first; leaves go
/// on top at the tip of every branch except the trunk.
pub fn tree(
    rng: &mut Prng,
    noise: &LatticeNoise,
    origin: Point,
    params: &TreeParams,
) -> Result<Composite, InkError> {
    params.validate()?;
    let branches = grow_tree(rng, noise, origin, &params.tree_config())?;

    let bark = Style::from_colors(paper(), ink(0.8), 1.0);
    let mut out = Composite::new();
    for b in &branches {
        out.add(branch_outline(b, bark.clone()));
    }

    if params.leaves {
        for b in branches.iter().skip(1) {
            let Some(&tip) = b.centerline.last() else {
                continue;
            };
            let Some(heading) = b.heading_at(b.centerline.len() - 1) else {
                continue;
            };
            let config = BlobConfig {
                length: params.leaf_size * rng.random(0.7, 1.3),
                width: params.leaf_size * 0.5,
                angle: heading,
                ..BlobConfig::default()
            };
            out.add(blob(rng, noise, tip, &config, params.leaf_color)?);
        }
    }
    tracing::debug!(branches = branches.len(), elements = out.len(), "built tree");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Render;
    use serde_json::json;

    fn build(seed: &str, params: &TreeParams) -> Composite {
        let mut rng = Prng::new(seed);
        let noise = LatticeNoise::new();
        tree(&mut rng, &noise, Point::new(0.0, 300.0), params).unwrap()
    }

    #[test]
    fn depth_zero_is_a_bare_trunk() {
        let out = build("sapling", &TreeParams::from_json(&json!({"depth": 0})));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn certain_branching_gives_full_tree_and_leaves() {
        let params = TreeParams {
            depth: 1,
            branch_probability: 1.0,
            ..TreeParams::default()
        };
        let out = build("full", &params);
        // Trunk, three children, one leaf per child.
        assert_eq!(out.len(), 1 + 3 + 3);
        assert!(out.elements()[4..]
            .iter()
            .all(|e| e.style().fill() == "rgba(60,60,60,0.6)"));
    }

    #[test]
    fn leaves_can_be_disabled() {
        let params = TreeParams {
            depth: 1,
            branch_probability: 1.0,
            leaves: false,
            ..TreeParams::default()
        };
        assert_eq!(build("bare", &params).len(), 4);
    }

    #[test]
    fn trunk_grows_upward_from_the_anchor() {
        let out = build("up", &TreeParams::from_json(&json!({"depth": 0})));
        let bb = out.bounds().unwrap();
        // Root rails reach at most taper + wobble + burl below the anchor.
        assert!(bb.max_y <= 300.0 + 20.0);
        assert!(bb.min_y < 300.0 - DEFAULT_HEIGHT * 0.5);
    }

    #[test]
    fn excessive_depth_is_rejected() {
        let mut rng = Prng::new("deep");
        let noise = LatticeNoise::new();
        let params = TreeParams::from_json(&json!({"depth": 40}));
        let err = tree(&mut rng, &noise, Point::ORIGIN, &params).unwrap_err();
        assert!(matches!(err, InkError::InvalidParameter { ref name, .. } if name == "depth"));
    }

    #[test]
    fn deterministic_for_a_seed() {
        let a = build("oak", &TreeParams::default()).render();
        let b = build("oak", &TreeParams::default()).render();
        assert_eq!(a, b);
    }
}
