//! Error types for the inkwash geometry core.

use thiserror::Error;

/// Errors produced by generators, helpers and the scene layer.
#[derive(Debug, Error)]
pub enum InkError {
    /// A polyline had fewer points than the operation requires.
    #[error("insufficient points: need at least {needed}, got {got}")]
    InsufficientPoints { needed: usize, got: usize },

    /// A subdivision or sampling resolution was zero.
    #[error("invalid resolution {0}: must be at least 1")]
    InvalidResolution(usize),

    /// Rejection sampling gave up after the attempt cap.
    #[error("distribution did not converge after {attempts} attempts")]
    DidNotConverge { attempts: usize },

    /// `random_choice` was given nothing to choose from.
    #[error("cannot choose from an empty slice")]
    EmptyChoice,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A fill or stroke color string was empty.
    #[error("color value must not be empty")]
    EmptyColor,

    /// A scene kind tag was not recognized.
    #[error("unknown scene kind: {0}")]
    UnknownKind(String),

    /// A reproducible scene spec was missing its seed.
    #[error("scene spec has no seed; reproducible generation requires one")]
    MissingSeed,

    /// A layer with this name already exists in the scene.
    #[error("duplicate layer name: {0}")]
    DuplicateLayerName(String),

    /// No layer with this name exists in the scene.
    #[error("layer not found: {0}")]
    LayerNotFound(String),

    /// A generator parameter was outside its valid domain.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}
