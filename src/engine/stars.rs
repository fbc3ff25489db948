//! Decorative star field.
//!
//! The generator is part of the output contract: the same seed must give the
//! same sky on every render and in every port, so the algorithm is fixed.
//!
//! ```text
//! state' = state * 1664525 + 1013904223   (mod 2^32)
//! draw   = state' / 2^32                  in [0, 1)
//! ```
//!
//! Each star consumes four consecutive draws: x, y, size, opacity.

use serde::Serialize;

pub const DEFAULT_SEED: u32 = 7;
pub const DEFAULT_COUNT: usize = 60;

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const DRAWS_PER_STAR: u64 = 4;

/// Star diameters are laid out on a 400-unit reference width.
const REFERENCE_WIDTH: f64 = 400.0;

/// 32-bit linear congruential generator (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct Lcg32 {
    state: u32,
}

impl Lcg32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Jump ahead `n` draws in O(log n).
    pub fn skip(&mut self, mut n: u64) {
        // Compose the affine map x -> a*x + c with itself by squaring.
        let (mut a, mut c) = (LCG_MULTIPLIER, LCG_INCREMENT);
        let (mut acc_a, mut acc_c) = (1u32, 0u32);
        while n > 0 {
            if n & 1 == 1 {
                acc_a = acc_a.wrapping_mul(a);
                acc_c = acc_c.wrapping_mul(a).wrapping_add(c);
            }
            c = c.wrapping_mul(a).wrapping_add(c);
            a = a.wrapping_mul(a);
            n >>= 1;
        }
        self.state = self.state.wrapping_mul(acc_a).wrapping_add(acc_c);
    }
}

/// Star placement as fractions of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub x_frac: f64,
    pub y_frac: f64,
    /// Diameter as a fraction of canvas width.
    pub size_frac: f64,
    pub opacity: f64,
}

fn draw_star(rng: &mut Lcg32, sky_fraction: f64) -> Star {
    let x = rng.next_f64();
    let y = rng.next_f64();
    let size = rng.next_f64();
    let opacity = rng.next_f64();
    Star {
        x_frac: x,
        y_frac: y * sky_fraction,
        size_frac: (size * 1.5 + 0.5) / REFERENCE_WIDTH,
        opacity: opacity * 0.6 + 0.2,
    }
}

/// `count` stars restricted to the top `sky_fraction` of the canvas.
pub fn generate_stars(seed: u32, count: usize, sky_fraction: f64) -> Vec<Star> {
    let mut rng = Lcg32::new(seed);
    (0..count).map(|_| draw_star(&mut rng, sky_fraction)).collect()
}

/// The `index`-th star of the sequence for `seed`, without generating the rest.
pub fn star_at(seed: u32, index: usize, sky_fraction: f64) -> Star {
    let mut rng = Lcg32::new(seed);
    rng.skip(index as u64 * DRAWS_PER_STAR);
    draw_star(&mut rng, sky_fraction)
}
