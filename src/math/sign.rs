//! Sign-bit manipulation

use crate::traits::{SimdInt, SimdVector};

/// IEEE 754 sign bit of an `f32` lane, as a signed integer
const SIGN_BIT: i32 = i32::MIN;

/// Flip the sign of each lane of `x` where the matching lane of `y` is negative
///
/// Computes `msb(y) ? -x : x` by XORing the sign bit of `y` into `x`. This is a
/// sign flip, not a sign copy: applying it twice with the same `y` restores `x`.
/// Pure bit operation, so NaN and infinity magnitudes pass through untouched and
/// `-0.0` in `y` counts as negative.
///
/// # Example
///
/// ```rust
/// use lanemath::{SimdVector, VFloat};
/// use lanemath::math::changesign;
///
/// let x = VFloat::splat(3.0);
/// assert_eq!(changesign(x, VFloat::splat(-1.0)).lane(0), -3.0);
/// assert_eq!(changesign(-x, VFloat::splat(-1.0)).lane(0), 3.0);
/// assert_eq!(changesign(x, VFloat::splat(2.0)).lane(0), 3.0);
/// ```
#[inline(always)]
pub fn changesign<V: SimdVector>(x: V, y: V) -> V {
    let sign = V::IntBits::splat(SIGN_BIT);
    V::from_bits(x.to_bits() ^ (y.to_bits() & sign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{VFloat1, VFloat4};

    #[test]
    fn test_changesign_table() {
        let cases = [
            (3.0f32, -1.0f32, -3.0f32),
            (-3.0, -1.0, 3.0),
            (3.0, 2.0, 3.0),
            (-3.0, 2.0, -3.0),
            (3.0, -0.0, -3.0),
            (0.0, -5.0, -0.0),
        ];

        for &(x, y, expected) in &cases {
            let result = changesign(VFloat1::splat(x), VFloat1::splat(y)).lane(0);
            assert_eq!(
                result.to_bits(),
                expected.to_bits(),
                "changesign({}, {}) = {}, expected {}",
                x,
                y,
                result,
                expected
            );
        }
    }

    #[test]
    fn test_changesign_is_per_lane() {
        let x = VFloat4::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let y = VFloat4::from_slice(&[-1.0, 1.0, -0.0, 0.0]);
        let result = changesign(x, y);

        assert_eq!(result.lane(0), -1.0);
        assert_eq!(result.lane(1), 2.0);
        assert_eq!(result.lane(2), -3.0);
        assert_eq!(result.lane(3), 4.0);
    }

    #[test]
    fn test_changesign_keeps_special_magnitudes() {
        let inf = changesign(VFloat1::splat(f32::INFINITY), VFloat1::splat(-1.0));
        assert_eq!(inf.lane(0), f32::NEG_INFINITY);

        let nan = changesign(VFloat1::splat(f32::NAN), VFloat1::splat(-1.0));
        assert!(nan.lane(0).is_nan());
        assert!(nan.lane(0).is_sign_negative());
    }
}
