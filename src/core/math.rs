//! Type definitions and constants.

#[cfg(feature = "float_as_double")]
mod float_mod {
    pub type Float = f64;
    pub mod consts {
        pub use std::f64::consts::*;
        pub const MACHINE_EPSILON: f64 = std::f64::EPSILON * 0.5;
        pub const INFINITY: f64 = std::f64::INFINITY;
    }
}
#[cfg(not(feature = "float_as_double"))]
mod float_mod {
    pub type Float = f32;
    pub mod consts {
        pub use std::f32::consts::*;
        pub const MACHINE_EPSILON: f32 = std::f32::EPSILON * 0.5;
        pub const INFINITY: f32 = std::f32::INFINITY;
    }
}

pub use float_mod::Float;
pub mod consts {
    use super::float_mod::Float;
    pub use super::float_mod::consts::*;
    /// Hits closer than this to the ray origin are ignored to avoid self intersection.
    pub const RAY_EPSILON: Float = 1e-3;
}

/// Error propagation bound for `n` floating point operations.
#[inline]
pub fn gamma(n: i32) -> Float {
    (n as Float * consts::MACHINE_EPSILON) / (1.0 - n as Float * consts::MACHINE_EPSILON)
}

/// Returns the lower and upper roots of `a t^2 + 2 half_b t + c = 0`, or None
/// if there is no real solution.
#[inline]
pub fn quadratic_half_b(a: Float, half_b: Float, c: Float) -> Option<(Float, Float)> {
    // Find quadratic discriminant
    let discrim = half_b * half_b - a * c;
    if !(discrim >= 0.0) || a == 0.0 {
        return None;
    }
    let root_discrim = discrim.sqrt();

    // Compute quadratic _t_ values
    let t0 = (-half_b - root_discrim) / a;
    let t1 = (-half_b + root_discrim) / a;
    if t0 > t1 {
        Some((t1, t0))
    } else {
        Some((t0, t1))
    }
}
