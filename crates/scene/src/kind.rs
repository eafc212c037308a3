//! The scene kind vocabulary.

use std::fmt;

use inkwash_core::InkError;
use serde::{Deserialize, Serialize};

/// All recognized kind tags, in declaration order.
const KIND_NAMES: &[&str] = &[
    "mount",
    "flatmount",
    "distmount",
    "water",
    "boat",
    "rock",
    "tree",
];

/// Category tag of a placed scene object.
///
/// Use [`SceneKind::from_name`] for string-based construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Foreground mountain with a white body, outline and texture.
    Mount,
    /// Low, flat-topped ridge.
    FlatMount,
    /// Pale, overlapping ranges in the distance.
    DistMount,
    /// Horizontal ripple strokes.
    Water,
    /// Hull, cabin and mast.
    Boat,
    /// Noisy boulder with shaded facets.
    Rock,
    /// Recursively grown tree with leaf blobs.
    Tree,
}

impl SceneKind {
    /// Returns `InkError::UnknownKind` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, InkError> {
        match name {
            "mount" => Ok(SceneKind::Mount),
            "flatmount" => Ok(SceneKind::FlatMount),
            "distmount" => Ok(SceneKind::DistMount),
            "water" => Ok(SceneKind::Water),
            "boat" => Ok(SceneKind::Boat),
            "rock" => Ok(SceneKind::Rock),
            "tree" => Ok(SceneKind::Tree),
            _ => Err(InkError::UnknownKind(name.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SceneKind::Mount => "mount",
            SceneKind::FlatMount => "flatmount",
            SceneKind::DistMount => "distmount",
            SceneKind::Water => "water",
            SceneKind::Boat => "boat",
            SceneKind::Rock => "rock",
            SceneKind::Tree => "tree",
        }
    }

    /// Returns a slice of all recognized kind names.
    pub fn list_kinds() -> &'static [&'static str] {
        KIND_NAMES
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
