//! Multi-octave lattice value noise.
//!
//! A fixed table of 4096 pseudo-random values is filled from a [`Prng`] on
//! first use and then frozen. Queries blend the eight lattice corners around
//! the query point with cosine easing, summed over four octaves.

use std::cell::OnceCell;
use std::f64::consts::PI;

use crate::prng::Prng;

/// Index mask into the lattice (`2^12 - 1`). The table holds `MASK + 1` values.
pub const LATTICE_MASK: usize = 4095;
/// Bit shift applied to the y lattice coordinate (wrap width 16).
const Y_WRAP_BITS: u32 = 4;
const Y_WRAP: u64 = 1 << Y_WRAP_BITS;
/// Bit shift applied to the z lattice coordinate (wrap width 256).
const Z_WRAP_BITS: u32 = 8;
const Z_WRAP: u64 = 1 << Z_WRAP_BITS;
/// Number of summed octaves.
const OCTAVES: usize = 4;
/// Amplitude multiplier between successive octaves.
const AMPLITUDE_FALLOFF: f64 = 0.5;

/// Cosine easing on [0, 1].
fn ease(t: f64) -> f64 {
    0.5 * (1.0 - (t * PI).cos())
}

/// Lattice value noise.
///
/// The lattice is built lazily from the generator passed to the first
/// [`noise`](LatticeNoise::noise) call and never rebuilt: later calls with a
/// different generator sample the same lattice and leave that generator
/// untouched.
#[derive(Debug, Default)]
pub struct LatticeNoise {
    lattice: OnceCell<Vec<f64>>,
}

impl LatticeNoise {
    /// Creates a noise instance with an unbuilt lattice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a noise instance and fills its lattice from `rng` immediately.
    pub fn from_prng(rng: &mut Prng) -> Self {
        let noise = Self::new();
        noise.lattice(rng);
        noise
    }

    /// Whether the lattice has been built yet.
    pub fn is_initialized(&self) -> bool {
        self.lattice.get().is_some()
    }

    fn lattice(&self, rng: &mut Prng) -> &[f64] {
        self.lattice.get_or_init(|| {
            tracing::debug!(size = LATTICE_MASK + 1, "building noise lattice");
            (0..=LATTICE_MASK).map(|_| rng.next_f64()).collect()
        })
    }

    /// Samples the noise field at `(x, y, z)`. Output lies in [0, 1).
    ///
    /// Negative coordinates are mirrored, so the field is symmetric about
    /// each axis.
    pub fn noise(&self, rng: &mut Prng, x: f64, y: f64, z: f64) -> f64 {
        let table = self.lattice(rng);
        let at = |offset: u64| table[(offset as usize) & LATTICE_MASK];

        let (x, y, z) = (x.abs(), y.abs(), z.abs());
        let (mut xi, mut yi, mut zi) = (lattice_floor(x), lattice_floor(y), lattice_floor(z));
        let (mut xf, mut yf, mut zf) = (x - x.floor(), y - y.floor(), z - z.floor());

        let mut total = 0.0;
        let mut amplitude = 0.5;
        for _ in 0..OCTAVES {
            let mut of = xi
                .wrapping_add(yi.wrapping_shl(Y_WRAP_BITS))
                .wrapping_add(zi.wrapping_shl(Z_WRAP_BITS));
            let rxf = ease(xf);
            let ryf = ease(yf);

            let mut n1 = at(of);
            n1 += rxf * (at(of.wrapping_add(1)) - n1);
            let mut n2 = at(of.wrapping_add(Y_WRAP));
            n2 += rxf * (at(of.wrapping_add(Y_WRAP + 1)) - n2);
            n1 += ryf * (n2 - n1);

            of = of.wrapping_add(Z_WRAP);
            n2 = at(of);
            n2 += rxf * (at(of.wrapping_add(1)) - n2);
            let mut n3 = at(of.wrapping_add(Y_WRAP));
            n3 += rxf * (at(of.wrapping_add(Y_WRAP + 1)) - n3);
            n2 += ryf * (n3 - n2);

            n1 += ease(zf) * (n2 - n1);
            total += n1 * amplitude;
            amplitude *= AMPLITUDE_FALLOFF;

            (xi, xf) = double_octave(xi, xf);
            (yi, yf) = double_octave(yi, yf);
            (zi, zf) = double_octave(zi, zf);
        }
        total
    }

    /// Two-dimensional convenience for `noise(rng, x, y, 0.0)`.
    pub fn noise2(&self, rng: &mut Prng, x: f64, y: f64) -> f64 {
        self.noise(rng, x, y, 0.0)
    }
}

/// Integer part of a non-negative coordinate; non-finite input maps to 0.
fn lattice_floor(v: f64) -> u64 {
    if v.is_finite() {
        v.floor() as u64
    } else {
        0
    }
}

/// Doubles the frequency of one lattice coordinate, carrying the fraction.
fn double_octave(i: u64, f: f64) -> (u64, f64) {
    let (mut i, mut f) = (i.wrapping_shl(1), f * 2.0);
    if f >= 1.0 {
        i = i.wrapping_add(1);
        f -= 1.0;
    }
    (i, f)
}
