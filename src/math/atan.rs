//! Vectorized arctangent approximation
//!
//! Provides `atan` and `atan2` built only from backend primitives (compare, select,
//! abs, sign-bit manipulation), so every backend computes identical results.
//!
//! # Error Bounds
//!
//! - Maximum absolute error: 0.004883 radians (~0.28 degrees)
//!
//! The target is speed in numeric kernels, not libm accuracy.

use super::sign::changesign;
use crate::traits::SimdVector;
use core::f32::consts::{FRAC_PI_2, PI};

/// Coefficient of the rational approximation `x / (1 + 0.28 x²)` on [-1, 1]
const ATAN_COEFF: f32 = 0.28;

/// Fast vectorized arctangent
///
/// Evaluates `x / (1 + 0.28 x²)` on [-1, 1]. Larger arguments are reduced with
/// `atan(x) = sign(x)·π/2 − atan(1/x)`, so the rational form only ever sees values
/// in [-1, 1].
///
/// - `atan(0) = 0`
/// - `atan(±∞) = ±π/2`
/// - NaN propagates
/// - Odd: `atan(-x) == -atan(x)` exactly
///
/// # Example
///
/// ```rust
/// use lanemath::{SimdVector, VFloat};
/// use lanemath::math::atan;
///
/// let result = atan(VFloat::splat(1.0));
/// assert!((result.lane(0) - core::f32::consts::FRAC_PI_4).abs() < 0.0049);
/// ```
#[inline(always)]
pub fn atan<V: SimdVector>(x: V) -> V {
    let one = V::splat(1.0);

    // Lanes outside [-1, 1] go through the reciprocal identity
    let reduce = x.abs().gt(one);
    let reflected = changesign(V::splat(FRAC_PI_2), x);

    // 0 never reaches the reciprocal: |0| > 1 is false
    let y = V::select(reduce, one / x, x);
    let y = y / (y * y * V::splat(ATAN_COEFF) + one);

    V::select(reduce, reflected - y, y)
}

/// Fast vectorized two-argument arctangent
///
/// Returns the angle of the vector `(x, y)` in [-π, π] with the error bound of
/// [`atan`]. The quadrant comes from the sign bit of `x` (so `-0.0` counts as
/// negative) and the result takes the sign of `y`.
///
/// Special values:
///
/// - `x = ±0`, `y ≠ 0`: `±π/2`
/// - `y = ±0`, `x = +0`: `±0`; `y = ±0`, `x = -0`: `±π` (standard library convention)
/// - both infinite: NaN (`∞/∞` has no ratio)
///
/// # Example
///
/// ```rust
/// use lanemath::{SimdVector, VFloat};
/// use lanemath::math::atan2;
///
/// let angle = atan2(VFloat::splat(1.0), VFloat::splat(-1.0));
/// assert!((angle.lane(0) - 3.0 * core::f32::consts::FRAC_PI_4).abs() < 0.0049);
/// ```
#[inline(always)]
pub fn atan2<V: SimdVector>(y: V, x: V) -> V {
    let zero = V::splat(0.0);

    // |y/x| at the origin is 0/0; pin those lanes to 0 so the quadrant step
    // yields 0 or π
    let origin = y.eq(zero) & x.eq(zero);
    let z = V::select(origin, zero, atan((y / x).abs()));

    let x_negative = x.sign_mask();
    let magnitude = V::select(x_negative, V::splat(PI) - z, z);

    changesign(magnitude, y)
}
