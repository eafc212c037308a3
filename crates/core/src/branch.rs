//! Tapering branches and recursively grown branch trees.
//!
//! A [`Branch`] is a randomly bent centerline plus two rails offset to either
//! side. [`grow_tree`] roots smaller branches along a parent's centerline up
//! to a fixed depth.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::curve::subdivide;
use crate::error::InkError;
use crate::noise::LatticeNoise;
use crate::point::{Point, Polyline, Vector};
use crate::prng::Prng;

/// Number of bent segments in a branch skeleton.
pub const SEGMENTS: usize = 3;

/// Branch shape parameters.
#[derive(Debug, Clone, Copy)]
pub struct BranchConfig {
    /// Straight-line length from root to tip.
    pub height: f64,
    /// Half-width at the root; the tip gets half of this.
    pub width: f64,
    /// Direction from root to tip in radians.
    pub angle: f64,
    /// Maximum bend per segment in radians.
    pub bend: f64,
    /// Samples per skeleton segment.
    pub detail: usize,
    /// Scale of the noise width jitter. `0.0` disables it.
    pub jitter: f64,
    /// Scale of the random bump at segment joints. `0.0` disables it.
    pub burl: f64,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            height: 300.0,
            width: 6.0,
            angle: 0.0,
            bend: 0.2 * PI,
            detail: 10,
            jitter: 1.0,
            burl: 1.0,
        }
    }
}

impl BranchConfig {
    fn validate(&self) -> Result<(), InkError> {
        if self.detail == 0 {
            return Err(InkError::InvalidResolution(self.detail));
        }
        let checks = [
            ("height", self.height),
            ("width", self.width),
            ("angle", self.angle),
            ("bend", self.bend),
        ];
        if let Some((name, _)) = checks.iter().find(|(_, v)| !v.is_finite()) {
            return Err(InkError::InvalidParameter {
                name: name.to_string(),
                reason: "must be finite".into(),
            });
        }
        if self.width < 0.0 {
            return Err(InkError::InvalidParameter {
                name: "width".into(),
                reason: "must not be negative".into(),
            });
        }
        Ok(())
    }
}

/// One branch: its sampled centerline and the two rails around it.
///
/// All three polylines have the same length, `SEGMENTS * detail + 1`, and
/// run from root to tip.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub centerline: Polyline,
    pub left: Polyline,
    pub right: Polyline,
}

impl Branch {
    /// Returns the branch shifted by `by`.
    pub fn translated(self, by: Vector) -> Self {
        let shift = |pl: Polyline| pl.into_iter().map(|p| p + by).collect();
        Self {
            centerline: shift(self.centerline),
            left: shift(self.left),
            right: shift(self.right),
        }
    }

    /// Closed outline: left rail root to tip, then right rail tip to root.
    pub fn outline(&self) -> Polyline {
        let mut ring = self.left.clone();
        ring.extend(self.right.iter().rev());
        if let Some(&first) = self.left.first() {
            ring.push(first);
        }
        ring
    }

    /// Direction of travel along the centerline at sample `i`, or `None`
    /// when `i` is out of range or the centerline has a single point.
    pub fn heading_at(&self, i: usize) -> Option<f64> {
        heading(&self.centerline, i)
    }

    /// Distance between the rails at sample `i`, or `None` when out of range.
    pub fn span_at(&self, i: usize) -> Option<f64> {
        Some(self.left.get(i)?.distance(*self.right.get(i)?))
    }
}

fn heading(line: &[Point], i: usize) -> Option<f64> {
    let here = *line.get(i)?;
    match (line.get(i + 1), i.checked_sub(1).and_then(|j| line.get(j))) {
        (Some(&next), _) => Some((next - here).angle()),
        (None, Some(&prev)) => Some((here - prev).angle()),
        (None, None) => None,
    }
}

/// Builds one branch rooted at the origin.
///
/// The skeleton turns by a random amount up to `bend` at each of its
/// [`SEGMENTS`] steps and is then rotated so root-to-tip points along
/// `angle`. Rail half-widths taper linearly from `width` at the root to
/// `width / 2` at the tip, with noise jitter and a random bump at every
/// joint, and never drop below zero.
pub fn branch(
    rng: &mut Prng,
    noise: &LatticeNoise,
    config: &BranchConfig,
) -> Result<Branch, InkError> {
    config.validate()?;
    let step = config.height / SEGMENTS as f64;

    let mut skeleton = Vec::with_capacity(SEGMENTS + 1);
    let mut pos = Point::ORIGIN;
    let mut turn = 0.0;
    skeleton.push(pos);
    for _ in 0..SEGMENTS {
        let amount = config.bend / 2.0 + rng.next_f64() * config.bend / 2.0;
        turn += amount * rng.random_sign();
        pos = Point::new(pos.x + turn.cos() * step, pos.y - turn.sin() * step);
        skeleton.push(pos);
    }
    let net = skeleton[SEGMENTS].angle();
    let skeleton: Polyline = skeleton
        .into_iter()
        .map(|p| p.rotated(config.angle - net))
        .collect();

    let centerline = subdivide(&skeleton, config.detail)?;
    let total = (centerline.len() - 1) as f64;
    let jitter_scale = config.width * config.height / 80.0 * config.jitter;

    let mut left = Vec::with_capacity(centerline.len());
    let mut right = Vec::with_capacity(centerline.len());
    for (i, &p) in centerline.iter().enumerate() {
        let taper = config.width * ((total - i as f64) / total * 0.5 + 0.5);
        let wobble = (noise.noise(rng, i as f64 * 0.3, 0.0, 0.0) - 0.5) * jitter_scale;
        let bump = if i % config.detail == 0 {
            rng.next_f64() * config.width * config.burl
        } else {
            0.0
        };

        let h = heading(&centerline, i).ok_or(InkError::InsufficientPoints {
            needed: 2,
            got: centerline.len(),
        })?;
        let lw = (taper + wobble + bump).max(0.0);
        let rw = (taper - wobble + bump).max(0.0);
        left.push(p + Vector::from_angle(h + FRAC_PI_2) * lw);
        right.push(p + Vector::from_angle(h - FRAC_PI_2) * rw);
    }

    Ok(Branch {
        centerline,
        left,
        right,
    })
}

/// Parameters for a recursively grown tree.
///
/// `depth` is required: there is no unbounded default.
#[derive(Debug, Clone, Copy)]
pub struct TreeConfig {
    /// Levels of child branches below the trunk.
    pub depth: usize,
    /// Shape of the trunk; children inherit everything but size and angle.
    pub trunk: BranchConfig,
    /// Height and width multiplier from parent to child.
    pub shrink: f64,
    /// Chance that each attachment slot grows a child.
    pub branch_probability: f64,
    /// Attachment slots tried per branch.
    pub attachments: usize,
    /// Maximum deviation of a child from its parent's heading.
    pub spread: f64,
}

impl TreeConfig {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            trunk: BranchConfig {
                angle: -FRAC_PI_2,
                ..BranchConfig::default()
            },
            shrink: 0.6,
            branch_probability: 0.7,
            attachments: 3,
            spread: FRAC_PI_4,
        }
    }
}

/// Grows a tree rooted at `root`, trunk first, each branch followed by its
/// descendants.
pub fn grow_tree(
    rng: &mut Prng,
    noise: &LatticeNoise,
    root: Point,
    config: &TreeConfig,
) -> Result<Vec<Branch>, InkError> {
    if !(config.shrink > 0.0 && config.shrink < 1.0) {
        return Err(InkError::InvalidParameter {
            name: "shrink".into(),
            reason: "must lie strictly between 0 and 1".into(),
        });
    }
    grow(rng, noise, root, &config.trunk, config.depth, config)
}

fn grow(
    rng: &mut Prng,
    noise: &LatticeNoise,
    root: Point,
    shape: &BranchConfig,
    depth: usize,
    config: &TreeConfig,
) -> Result<Vec<Branch>, InkError> {
    let parent = branch(rng, noise, shape)?.translated(root - Point::ORIGIN);
    if depth == 0 {
        return Ok(vec![parent]);
    }

    let last = parent.centerline.len() - 1;
    let mut children = Vec::new();
    for _ in 0..config.attachments {
        if rng.next_f64() >= config.branch_probability {
            continue;
        }
        let idx = ((last as f64 * rng.random(0.3, 0.95)) as usize).min(last);
        let deviation = rng.random_sign() * config.spread * rng.random(0.5, 1.0);
        let heading = parent.heading_at(idx).ok_or(InkError::InsufficientPoints {
            needed: 2,
            got: parent.centerline.len(),
        })?;
        let child_shape = BranchConfig {
            height: shape.height * config.shrink,
            width: shape.width * config.shrink,
            angle: heading + deviation,
            ..*shape
        };
        let at = parent.centerline[idx];
        children.extend(grow(rng, noise, at, &child_shape, depth - 1, config)?);
    }

    let mut out = Vec::with_capacity(children.len() + 1);
    out.push(parent);
    out.extend(children);
    Ok(out)
}
