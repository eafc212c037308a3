//! Seed values and reproducible scene descriptions.
//!
//! A [`Seed`] is either text or a number. It fully determines the output
//! trajectory of a [`Prng`](crate::prng::Prng). A [`SceneSpec`] captures
//! everything needed to regenerate one placed scene object.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::InkError;

/// Largest integer an f64 represents exactly; integral seeds below this
/// are written without a fractional part.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Positional base of the seed hash.
const HASH_BASE: u128 = 128;

/// A seed value: arbitrary text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(f64),
    Text(String),
}

impl Seed {
    /// Seed from the wall clock in milliseconds. Not reproducible.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0);
        Seed::Number(millis)
    }

    /// The canonical JSON text of the seed, which is what gets hashed.
    ///
    /// Text is quoted, so `Seed::Text("42")` and `Seed::Number(42.0)` hash
    /// differently. Integral numbers print without a fractional part.
    pub fn canonical_text(&self) -> String {
        match self {
            Seed::Text(s) => serde_json::Value::String(s.clone()).to_string(),
            Seed::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                format!("{}", *n as i64)
            }
            Seed::Number(n) => serde_json::Number::from_f64(*n)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "null".to_string()),
        }
    }

    /// Positional hash of the canonical text reduced modulo `modulus`.
    ///
    /// Each UTF-16 code unit is weighted by `128^i` for its position `i`.
    /// The sum is accumulated modulo `modulus` so arbitrarily long seeds
    /// never overflow.
    pub fn hash_mod(&self, modulus: u64) -> u64 {
        let m = u128::from(modulus);
        let (sum, _) = self
            .canonical_text()
            .encode_utf16()
            .fold((0u128, 1u128), |(sum, weight), unit| {
                (
                    (sum + u128::from(unit) * weight) % m,
                    (weight * HASH_BASE) % m,
                )
            });
        sum as u64
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Text(s)
    }
}

impl From<f64> for Seed {
    fn from(n: f64) -> Self {
        Seed::Number(n)
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Number(n as f64)
    }
}

/// Reproducible description of one generated scene object.
///
/// Contains the seed, the scene kind tag, the anchor position and the
/// kind-specific parameter overrides. Two identical specs produce identical
/// markup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneSpec {
    pub seed: Option<Seed>,
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub params: serde_json::Value,
}

impl SceneSpec {
    /// Creates a spec with empty params (`{}`).
    pub fn new(seed: impl Into<Seed>, kind: &str, x: f64, y: f64) -> Self {
        Self {
            seed: Some(seed.into()),
            kind: kind.to_string(),
            x,
            y,
            params: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Returns the seed, rejecting specs that omit it.
    pub fn validate(&self) -> Result<&Seed, InkError> {
        self.seed.as_ref().ok_or(InkError::MissingSeed)
    }
}
