//! Scene kind recipes.
//!
//! Each recipe builds its geometry around the local origin, moves it to the
//! anchor with `to_global`, and returns the styled elements as a
//! [`Composite`](crate::node::Composite) in back-to-front order. Parameters
//! come from a JSON object through a per-kind `*Params::from_json`.

pub mod boat;
pub mod mount;
pub mod rock;
pub mod tree;
pub mod water;

use inkwash_core::{InkError, Rgba};

pub use boat::{boat, BoatParams};
pub use mount::{distmount, flatmount, mount, DistMountParams, FlatMountParams, MountParams};
pub use rock::{rock, RockParams};
pub use tree::{tree, TreeParams};
pub use water::{water, WaterParams};

/// Opaque white used for solid bodies that hide what is behind them.
pub(crate) fn paper() -> Rgba {
    Rgba::gray(255, 1.0)
}

/// The ink gray used for outlines and texture.
pub(crate) fn ink(alpha: f64) -> Rgba {
    Rgba::gray(100, alpha)
}

/// Rejects a count below `min`.
pub(crate) fn require_at_least(name: &str, value: usize, min: usize) -> Result<(), InkError> {
    if value < min {
        return Err(InkError::InvalidParameter {
            name: name.into(),
            reason: format!("must be at least {min}, got {value}"),
        });
    }
    Ok(())
}

/// Rejects a size that is not strictly positive.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), InkError> {
    if value.is_nan() || value <= 0.0 {
        return Err(InkError::InvalidParameter {
            name: name.into(),
            reason: format!("must be positive, got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_at_least_reports_minimum() {
        assert!(require_at_least("cols", 3, 3).is_ok());
        let err = require_at_least("cols", 2, 3).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("cols") && msg.contains('3'), "{msg}");
    }

    #[test]
    fn require_positive_rejects_zero_and_nan() {
        assert!(require_positive("width", 1.0).is_ok());
        assert!(require_positive("width", 0.0).is_err());
        assert!(require_positive("width", -2.0).is_err());
        assert!(require_positive("width", f64::NAN).is_err());
    }
}
