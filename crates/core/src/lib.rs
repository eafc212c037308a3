#![deny(unsafe_code)]
//! Deterministic generative geometry for the inkwash landscape generator.
//!
//! Provides the seeded `Prng`, `LatticeNoise`, `Point`/`Vector` primitives,
//! polyline subdivision and curve fitting, and the shape generators that
//! turn noise-perturbed control points into closed polygons: brush strokes,
//! blobs and tapering branches. Every function that needs randomness takes
//! its generator explicitly.

pub mod blob;
pub mod branch;
pub mod color;
pub mod curve;
pub mod error;
pub mod geometry;
pub mod noise;
pub mod params;
pub mod point;
pub mod prng;
pub mod seed;
pub mod stroke;

pub use blob::{blob_points, normalize_noise, BlobConfig};
pub use branch::{branch, grow_tree, Branch, BranchConfig, TreeConfig};
pub use color::Rgba;
pub use curve::{fit_curve, subdivide, CurveConfig};
pub use error::InkError;
pub use geometry::{
    bounding_box, flip_horizontal, midpoint, to_global, triangulate, BoundingBox, TriangulateConfig,
};
pub use noise::LatticeNoise;
pub use point::{Point, Polyline, Vector};
pub use prng::Prng;
pub use seed::{SceneSpec, Seed};
pub use stroke::{stroke_points, StrokeConfig};
