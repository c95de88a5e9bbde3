//! Portable N-lane backend
//!
//! Array-backed reference implementation for any lane count. It stands in for the
//! width-qualified 4- and 8-lane types when no hardware backend of that width is
//! compiled in, so fixed-width call sites build on every target. Lane counts from
//! 1 to 32 are supported (the upper bound comes from `SimdMask::bitmask`); any other
//! `N` fails to compile once the type's `LANES` is used.

use crate::traits::{assert_aligned, SimdInt, SimdMask, SimdVector};
use core::array;
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

/// Lane count check shared by the portable `LANES` constants
const fn checked_lanes(n: usize) -> usize {
    assert!(matches!(n, 1..=32), "portable backend supports 1 to 32 lanes");
    n
}

/// Portable float vector (`N` lanes of f32)
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct LaneVector<const N: usize>(pub [f32; N]);

/// Portable integer vector (`N` lanes of i32)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct LaneInt<const N: usize>(pub [i32; N]);

/// Portable mask (`N` lanes, each `0` or `u32::MAX`)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct LaneMask<const N: usize>(pub [u32; N]);

impl<const N: usize> LaneVector<N> {
    /// Build a vector from `N` lane values
    #[inline(always)]
    pub const fn from_array(values: [f32; N]) -> Self {
        LaneVector(values)
    }

    /// Copy the lanes out into an array
    #[inline(always)]
    pub const fn to_array(self) -> [f32; N] {
        self.0
    }

    #[inline(always)]
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        LaneVector(array::from_fn(|i| f(self.0[i])))
    }

    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        LaneVector(array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    #[inline(always)]
    fn compare(self, rhs: Self, f: impl Fn(f32, f32) -> bool) -> LaneMask<N> {
        LaneMask(array::from_fn(|i| (f(self.0[i], rhs.0[i]) as u32).wrapping_neg()))
    }
}

impl<const N: usize> LaneInt<N> {
    /// Build a vector from `N` lane values
    #[inline(always)]
    pub const fn from_array(values: [i32; N]) -> Self {
        LaneInt(values)
    }

    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(i32, i32) -> i32) -> Self {
        LaneInt(array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }
}

impl<const N: usize> LaneMask<N> {
    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(u32, u32) -> u32) -> Self {
        LaneMask(array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }
}

impl<const N: usize> SimdVector for LaneVector<N> {
    type Mask = LaneMask<N>;
    type IntBits = LaneInt<N>;

    const LANES: usize = checked_lanes(N);
    const ALIGN: usize = 4 * Self::LANES;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        LaneVector([value; N])
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= N, "Slice too short for portable load");
        LaneVector(array::from_fn(|i| slice[i]))
    }

    #[inline(always)]
    fn load_aligned(slice: &[f32]) -> Self {
        assert_aligned(slice, Self::ALIGN);
        Self::from_slice(slice)
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= N, "Slice too short for portable store");
        slice[..N].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn store_aligned(self, slice: &mut [f32]) {
        assert_aligned(slice, Self::ALIGN);
        self.to_slice(slice)
    }

    #[inline(always)]
    fn lane(self, index: usize) -> f32 {
        assert!(index < N, "Lane index {} out of range", index);
        self.0[index]
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.map(libm::fabsf)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip(rhs, libm::fminf)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip(rhs, libm::fmaxf)
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        self.compare(rhs, |a, b| a < b)
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        self.compare(rhs, |a, b| a <= b)
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        self.compare(rhs, |a, b| a > b)
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        self.compare(rhs, |a, b| a >= b)
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        self.compare(rhs, |a, b| a == b)
    }

    #[inline(always)]
    fn sign_mask(self) -> Self::Mask {
        LaneMask(array::from_fn(|i| (self.0[i].to_bits() as i32 >> 31) as u32))
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        LaneVector(array::from_fn(|i| {
            let t = true_val.0[i].to_bits() & mask.0[i];
            let f = false_val.0[i].to_bits() & !mask.0[i];
            f32::from_bits(t | f)
        }))
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        LaneInt(array::from_fn(|i| self.0[i].to_bits() as i32))
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        LaneVector(array::from_fn(|i| f32::from_bits(bits.0[i] as u32)))
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        self.0.iter().sum()
    }
}

impl<const N: usize> Add for LaneVector<N> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl<const N: usize> Sub for LaneVector<N> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl<const N: usize> Mul for LaneVector<N> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a * b)
    }
}

impl<const N: usize> Div for LaneVector<N> {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a / b)
    }
}

impl<const N: usize> Neg for LaneVector<N> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl<const N: usize> SimdInt for LaneInt<N> {
    const LANES: usize = checked_lanes(N);

    #[inline(always)]
    fn splat(value: i32) -> Self {
        LaneInt([value; N])
    }

    #[inline(always)]
    fn from_slice(slice: &[i32]) -> Self {
        assert!(slice.len() >= N, "Slice too short for portable load");
        LaneInt(array::from_fn(|i| slice[i]))
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= N, "Slice too short for portable store");
        slice[..N].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn lane(self, index: usize) -> i32 {
        assert!(index < N, "Lane index {} out of range", index);
        self.0[index]
    }
}

impl<const N: usize> Add for LaneInt<N> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, i32::wrapping_add)
    }
}

impl<const N: usize> Sub for LaneInt<N> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, i32::wrapping_sub)
    }
}

impl<const N: usize> BitAnd for LaneInt<N> {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a & b)
    }
}

impl<const N: usize> BitOr for LaneInt<N> {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a | b)
    }
}

impl<const N: usize> BitXor for LaneInt<N> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a ^ b)
    }
}

impl<const N: usize> SimdMask for LaneMask<N> {
    const LANES: usize = checked_lanes(N);

    #[inline(always)]
    fn bitmask(self) -> u32 {
        self.0
            .iter()
            .take(Self::LANES)
            .enumerate()
            .fold(0, |acc, (i, &lane)| acc | ((lane >> 31) << i))
    }
}

impl<const N: usize> BitAnd for LaneMask<N> {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a & b)
    }
}

impl<const N: usize> BitOr for LaneMask<N> {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a | b)
    }
}

impl<const N: usize> BitXor for LaneMask<N> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a ^ b)
    }
}

impl<const N: usize> Not for LaneMask<N> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        LaneMask(self.0.map(|lane| !lane))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portable_arithmetic() {
        let a = LaneVector::from_array([1.0, 2.0, 3.0, 4.0]);
        let b = LaneVector::splat(2.0);

        assert_eq!((a + b).to_array(), [3.0, 4.0, 5.0, 6.0]);
        assert_eq!((a - b).to_array(), [-1.0, 0.0, 1.0, 2.0]);
        assert_eq!((a * b).to_array(), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!((a / b).to_array(), [0.5, 1.0, 1.5, 2.0]);
        assert_eq!((-a).to_array(), [-1.0, -2.0, -3.0, -4.0]);
        assert_eq!(a.horizontal_sum(), 10.0);
    }

    #[test]
    fn test_portable_select_per_lane() {
        let a = LaneVector::from_array([1.0, -2.0, 3.0, -4.0, 5.0, -6.0, 7.0, -8.0]);
        let zero = LaneVector::splat(0.0);
        let mask = a.lt(zero);

        assert_eq!(mask.bitmask(), 0b1010_1010);
        let picked = LaneVector::select(mask, zero, a);
        assert_eq!(
            picked.to_array(),
            [1.0, 0.0, 3.0, 0.0, 5.0, 0.0, 7.0, 0.0]
        );
    }

    #[test]
    fn test_portable_mask_reductions() {
        let a = LaneVector::<4>::from_array([1.0, 2.0, 3.0, 4.0]);
        let all = a.gt(LaneVector::splat(0.0));
        let some = a.gt(LaneVector::splat(2.5));

        assert!(all.all());
        assert!(some.any() && !some.all());
        assert!((!all).none());
        assert_eq!((all ^ some).bitmask(), 0b0011);
        assert_eq!((all & some).bitmask(), 0b1100);
        assert_eq!((!all | some).bitmask(), 0b1100);
    }

    #[test]
    fn test_portable_bits_and_sign_mask() {
        let a = LaneVector::from_array([-0.0, 0.0, -1.0, f32::NEG_INFINITY]);
        assert_eq!(a.sign_mask().bitmask(), 0b1101);

        let bits = a.to_bits();
        assert_eq!(bits.lane(0), i32::MIN);
        assert_eq!(LaneVector::from_bits(bits).to_bits(), bits);

        let sign = LaneInt::<4>::splat(i32::MIN);
        assert_eq!((bits & sign).0, [i32::MIN, 0, i32::MIN, i32::MIN]);
    }

    #[test]
    fn test_portable_memory() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let v = LaneVector::<4>::from_slice(&data[1..]);
        let mut out = [0.0; 4];
        v.to_slice(&mut out);
        assert_eq!(out, [2.0, 3.0, 4.0, 5.0]);
        assert_eq!(v.lane(3), 5.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_portable_lane_out_of_range() {
        let _ = LaneVector::<4>::splat(1.0).lane(4);
    }

    #[test]
    fn test_portable_mask_lane_bounds() {
        let one = LaneMask::<1>([u32::MAX]);
        assert!(one.all());
        assert_eq!(one.bitmask(), 1);

        let mut lanes = [u32::MAX; 32];
        assert!(LaneMask(lanes).all());
        assert_eq!(LaneMask(lanes).bitmask(), u32::MAX);

        lanes[31] = 0;
        let top_clear = LaneMask(lanes);
        assert!(!top_clear.all());
        assert_eq!(top_clear.bitmask(), u32::MAX >> 1);
        assert_eq!(<LaneVector<32> as SimdVector>::ALIGN, 128);
    }

    #[test]
    #[should_panic(expected = "1 to 32 lanes")]
    fn test_portable_rejects_zero_lanes() {
        let _ = checked_lanes(core::hint::black_box(0));
    }

    #[test]
    #[should_panic(expected = "1 to 32 lanes")]
    fn test_portable_rejects_wide_lanes() {
        let _ = checked_lanes(core::hint::black_box(33));
    }
}
