use hexf::{hexf32, hexf64};
use super::math::Float;

#[cfg(feature = "float_as_double")]
pub const ONE_MINUS_EPSILON: f64 = hexf64!("0x1.fffffffffffffp-1");
#[cfg(not(feature = "float_as_double"))]
pub const ONE_MINUS_EPSILON: f32 = hexf32!("0x1.fffffep-1");

pub const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
pub const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
pub const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// PCG pseudo-random number generator.
///
/// Used to generate reproducible scenes and query rays, so two generators
/// created with the same sequence index always produce the same stream.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rng {
    state: u64,
    inc: u64
}

impl Rng {
    pub fn new(seed: u64) -> Rng {
        let mut rng = Rng::default();
        rng.set_sequence(seed);
        rng
    }

    pub fn set_sequence(&mut self, initseq: u64) {
        self.state = 0;
        self.inc = initseq.wrapping_shl(1) | 1;
        self.uniform_uint32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_uint32();
    }

    pub fn uniform_uint32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        let xorshifted = ((oldstate.wrapping_shr(18) ^ oldstate).wrapping_shr(27)) as u32;
        let rot = oldstate.wrapping_shr(59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform integer in `[0, b)` without modulo bias.
    pub fn uniform_uint32_bounded(&mut self, b: u32) -> u32 {
        debug_assert!(b > 0);
        let threshold = b.wrapping_neg() % b;
        loop {
            let r = self.uniform_uint32();
            if r >= threshold {
                return r % b;
            }
        }
    }

    /// Uniform float in `[0, 1)`.
    pub fn uniform_float(&mut self) -> Float {
        let v = self.uniform_uint32() as f64 * hexf64!("0x1.0p-32");
        (v as Float).min(ONE_MINUS_EPSILON)
    }

    /// Uniform float in `[lo, hi)`.
    #[inline]
    pub fn uniform_float_range(&mut self, lo: Float, hi: Float) -> Float {
        lo + (hi - lo) * self.uniform_float()
    }
}

impl Default for Rng {
    fn default() -> Rng {
        Rng {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM
        }
    }
}
