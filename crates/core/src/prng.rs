//! Deterministic PRNG based on a quadratic residue generator.
//!
//! The state is squared modulo the product of two large primes on every
//! draw. Same seed always produces the same sequence on every platform: the
//! core step is pure integer arithmetic, and the only float operation is one
//! exactly-rounded division per draw.

use serde::{Deserialize, Serialize};

use crate::error::InkError;
use crate::seed::Seed;

/// First prime factor of the modulus.
pub const P1: u64 = 999_979;
/// Second prime factor of the modulus.
pub const P2: u64 = 999_983;
/// Modulus of the residue generator.
pub const MODULUS: u64 = P1 * P2;

/// Draws discarded after seeding to move past low-quality early states.
const WARMUP_DRAWS: usize = 10;

/// Upper bound on rejection-sampling attempts in [`Prng::weighted_random`].
pub const MAX_REJECTION_ATTEMPTS: usize = 10_000;

/// Quadratic residue PRNG. Same seed always produces the same sequence.
///
/// Each generation pipeline owns its own instance and passes it by `&mut`;
/// an instance is never shared between threads.
///
/// Deserializing rejects states the seeding search would never adopt, so a
/// restored generator keeps every draw inside (0, 1).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PrngState")]
pub struct Prng {
    state: u64,
}

/// Serialized form of [`Prng`], checked before it becomes a generator.
#[derive(Deserialize)]
struct PrngState {
    state: u64,
}

impl TryFrom<PrngState> for Prng {
    type Error = InkError;

    fn try_from(raw: PrngState) -> Result<Self, Self::Error> {
        if raw.state >= MODULUS || Self::is_degenerate(raw.state) {
            return Err(InkError::InvalidParameter {
                name: "state".into(),
                reason: format!(
                    "{} is not a non-degenerate residue below {MODULUS}",
                    raw.state
                ),
            });
        }
        Ok(Self { state: raw.state })
    }
}

impl Prng {
    /// Creates a generator seeded with `seed`.
    pub fn new(seed: impl Into<Seed>) -> Self {
        let mut rng = Self { state: 2 };
        rng.set_seed(&seed.into());
        rng
    }

    /// Creates a generator seeded from the wall clock. Not reproducible.
    pub fn from_time() -> Self {
        Self::new(Seed::now())
    }

    /// Re-seeds the generator, discarding all previous state.
    ///
    /// Searches for the smallest offset `z` such that `(hash + z) mod M` is
    /// neither 0, 1, nor a multiple of either prime factor, adopts it as the
    /// state, then discards the first ten draws.
    pub fn set_seed(&mut self, seed: &Seed) {
        let hash = seed.hash_mod(MODULUS);
        let mut offset = 0u64;
        let mut candidate = 0u64;
        while Self::is_degenerate(candidate) {
            candidate = (hash + offset) % MODULUS;
            offset += 1;
        }
        self.state = candidate;
        tracing::debug!(
            seed = %seed.canonical_text(),
            state = candidate,
            "seeded generator"
        );
        for _ in 0..WARMUP_DRAWS {
            self.next_f64();
        }
    }

    fn is_degenerate(value: u64) -> bool {
        value == 0 || value == 1 || value % P1 == 0 || value % P2 == 0
    }

    /// Current internal state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advances the state and returns a value in (0, 1).
    ///
    /// The state is coprime to the modulus, so it never reaches 0; it is
    /// always below the modulus, so the result never reaches 1.
    pub fn next_f64(&mut self) -> f64 {
        let s = u128::from(self.state);
        self.state = (s * s % u128::from(MODULUS)) as u64;
        self.state as f64 / MODULUS as f64
    }

    /// Returns a uniformly distributed f64 in [lo, hi).
    pub fn random(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Returns -1.0 or 1.0 with equal probability.
    pub fn random_sign(&mut self) -> f64 {
        if self.next_f64() > 0.5 {
            1.0
        } else {
            -1.0
        }
    }

    /// Picks one element uniformly.
    pub fn random_choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, InkError> {
        if items.is_empty() {
            return Err(InkError::EmptyChoice);
        }
        let idx = ((items.len() as f64 * self.next_f64()) as usize).min(items.len() - 1);
        Ok(&items[idx])
    }

    /// Range-mapped uniform draw: maps a unit draw linearly onto [lo, hi).
    pub fn normalized_random(&mut self, lo: f64, hi: f64) -> f64 {
        map_range(self.next_f64(), 0.0, 1.0, lo, hi)
    }

    /// Rejection sampling against `weight`.
    ///
    /// Draws `x, y` uniformly and accepts `x` when `y < weight(x)`. Gives up
    /// with [`InkError::DidNotConverge`] after [`MAX_REJECTION_ATTEMPTS`].
    pub fn weighted_random(&mut self, weight: impl Fn(f64) -> f64) -> Result<f64, InkError> {
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let x = self.next_f64();
            let y = self.next_f64();
            if y < weight(x) {
                return Ok(x);
            }
        }
        Err(InkError::DidNotConverge {
            attempts: MAX_REJECTION_ATTEMPTS,
        })
    }

    /// Bell-shaped draw in [-1, 1], peaked at 0.
    pub fn gaussian_random(&mut self) -> Result<f64, InkError> {
        let x = self.weighted_random(|x| (-24.0 * (x - 0.5).powi(2)).exp())?;
        Ok(x * 2.0 - 1.0)
    }
}

/// Linearly maps `value` from [in_lo, in_hi] onto [out_lo, out_hi].
pub fn map_range(value: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    (value - in_lo) * (out_hi - out_lo) / (in_hi - in_lo) + out_lo
}
