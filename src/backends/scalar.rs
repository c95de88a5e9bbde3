//! Scalar backend implementation
//!
//! This backend provides the 1-lane reference that always works on any platform.
//! It is the portable width when no capability feature is enabled, and the
//! baseline the wider backends are checked against.

use crate::traits::{assert_aligned, SimdInt, SimdMask, SimdVector};
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

/// Scalar vector wrapper (single-lane SIMD)
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct ScalarVector(pub f32);

/// Scalar integer wrapper (single `i32` lane)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct ScalarInt(pub i32);

/// Scalar mask wrapper
///
/// Holds `0` or `u32::MAX` so that `select` can blend bitwise like the wide backends.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct ScalarMask(pub u32);

impl ScalarMask {
    /// Build a mask lane from a comparison result
    #[inline(always)]
    pub const fn from_bool(value: bool) -> Self {
        ScalarMask((value as u32).wrapping_neg())
    }
}

impl SimdVector for ScalarVector {
    type Mask = ScalarMask;
    type IntBits = ScalarInt;

    const LANES: usize = 1;
    const ALIGN: usize = 4;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        ScalarVector(value)
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for scalar load");
        ScalarVector(slice[0])
    }

    #[inline(always)]
    fn load_aligned(slice: &[f32]) -> Self {
        assert_aligned(slice, Self::ALIGN);
        Self::from_slice(slice)
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(
            slice.len() >= Self::LANES,
            "Slice too short for scalar store"
        );
        slice[0] = self.0;
    }

    #[inline(always)]
    fn store_aligned(self, slice: &mut [f32]) {
        assert_aligned(slice, Self::ALIGN);
        self.to_slice(slice)
    }

    #[inline(always)]
    fn lane(self, index: usize) -> f32 {
        assert!(index < Self::LANES, "Lane index {} out of range", index);
        self.0
    }

    #[inline(always)]
    fn abs(self) -> Self {
        ScalarVector(libm::fabsf(self.0))
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        ScalarVector(libm::fminf(self.0, rhs.0))
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        ScalarVector(libm::fmaxf(self.0, rhs.0))
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        ScalarMask::from_bool(self.0 < rhs.0)
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        ScalarMask::from_bool(self.0 <= rhs.0)
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        ScalarMask::from_bool(self.0 > rhs.0)
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        ScalarMask::from_bool(self.0 >= rhs.0)
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        ScalarMask::from_bool(self.0 == rhs.0)
    }

    #[inline(always)]
    fn sign_mask(self) -> Self::Mask {
        // Arithmetic shift smears the sign bit across the lane
        ScalarMask((self.0.to_bits() as i32 >> 31) as u32)
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        let t = true_val.0.to_bits() & mask.0;
        let f = false_val.0.to_bits() & !mask.0;
        ScalarVector(f32::from_bits(t | f))
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        ScalarInt(self.0.to_bits() as i32)
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        ScalarVector(f32::from_bits(bits.0 as u32))
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        self.0
    }
}

impl Add for ScalarVector {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        ScalarVector(self.0 + rhs.0)
    }
}

impl Sub for ScalarVector {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        ScalarVector(self.0 - rhs.0)
    }
}

impl Mul for ScalarVector {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        ScalarVector(self.0 * rhs.0)
    }
}

impl Div for ScalarVector {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        ScalarVector(self.0 / rhs.0)
    }
}

impl Neg for ScalarVector {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        ScalarVector(-self.0)
    }
}

impl SimdInt for ScalarInt {
    const LANES: usize = 1;

    #[inline(always)]
    fn splat(value: i32) -> Self {
        ScalarInt(value)
    }

    #[inline(always)]
    fn from_slice(slice: &[i32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for scalar load");
        ScalarInt(slice[0])
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(
            slice.len() >= Self::LANES,
            "Slice too short for scalar store"
        );
        slice[0] = self.0;
    }

    #[inline(always)]
    fn lane(self, index: usize) -> i32 {
        assert!(index < Self::LANES, "Lane index {} out of range", index);
        self.0
    }
}

impl Add for ScalarInt {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        ScalarInt(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for ScalarInt {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        ScalarInt(self.0.wrapping_sub(rhs.0))
    }
}

impl BitAnd for ScalarInt {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        ScalarInt(self.0 & rhs.0)
    }
}

impl BitOr for ScalarInt {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        ScalarInt(self.0 | rhs.0)
    }
}

impl BitXor for ScalarInt {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        ScalarInt(self.0 ^ rhs.0)
    }
}

impl SimdMask for ScalarMask {
    const LANES: usize = 1;

    #[inline(always)]
    fn bitmask(self) -> u32 {
        self.0 >> 31
    }
}

impl BitAnd for ScalarMask {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        ScalarMask(self.0 & rhs.0)
    }
}

impl BitOr for ScalarMask {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        ScalarMask(self.0 | rhs.0)
    }
}

impl BitXor for ScalarMask {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        ScalarMask(self.0 ^ rhs.0)
    }
}

impl Not for ScalarMask {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        ScalarMask(!self.0)
    }
}
