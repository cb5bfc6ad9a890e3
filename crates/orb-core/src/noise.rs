use ::noise::{NoiseFn, Perlin};
use std::fmt;

// Perlin's lattice hash repeats every 256 cells; folding inputs into one
// period keeps huge coordinates inside the range its integer casts accept.
const LATTICE_PERIOD: f32 = 256.0;

/// Seeded 2D gradient noise used to perturb the flow-field heading.
///
/// Wraps [`Perlin`] and remaps its `[-1, 1]` output to `[0, 1]`. Sampling
/// has no mutable state.
#[derive(Clone)]
pub struct NoiseField {
    seed: u64,
    perlin: Perlin,
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        let folded = (seed ^ (seed >> 32)) as u32;
        Self {
            seed,
            perlin: Perlin::new(folded),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sample the field at `(x, y)`. Always returns a value in `[0, 1]`.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let v = self.perlin.get([wrap(x), wrap(y)]);
        if v.is_finite() {
            ((v * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}

#[inline]
fn wrap(v: f32) -> f64 {
    if v.is_finite() {
        v.rem_euclid(LATTICE_PERIOD) as f64
    } else {
        0.0
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}
