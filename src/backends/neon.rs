//! NEON backend implementation (ARM64)
//!
//! This backend provides 4-lane (128-bit) SIMD operations using ARM NEON instructions.
//! Available on all ARM64 CPUs (Apple Silicon, AWS Graviton, Raspberry Pi 4+, etc.).
//!
//! **Note**: NEON is mandatory for ARM64, so no runtime detection is needed.

// This backend only compiles on aarch64 targets
#![cfg(target_arch = "aarch64")]

use crate::traits::{assert_aligned, SimdInt, SimdMask, SimdVector};
use core::arch::aarch64::*;
use core::fmt;
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

/// NEON vector wrapper (4 lanes of f32)
///
/// Wraps float32x4_t intrinsic type to provide SimdVector trait implementation.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonVector(float32x4_t);

/// NEON integer vector wrapper (4 lanes of i32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonInt(int32x4_t);

/// NEON mask wrapper (4-lane mask)
///
/// Uses uint32x4_t to represent per-lane boolean values.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonMask(uint32x4_t);

impl NeonVector {
    /// Build a vector from four lane values, lane 0 first
    #[inline(always)]
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        let values = [a, b, c, d];
        unsafe { NeonVector(vld1q_f32(values.as_ptr())) }
    }

    /// Copy the lanes out into an array
    #[inline(always)]
    pub fn to_array(self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { vst1q_f32(out.as_mut_ptr(), self.0) };
        out
    }
}

impl NeonInt {
    /// Build a vector from four lane values, lane 0 first
    #[inline(always)]
    pub fn new(a: i32, b: i32, c: i32, d: i32) -> Self {
        let values = [a, b, c, d];
        unsafe { NeonInt(vld1q_s32(values.as_ptr())) }
    }

    /// Copy the lanes out into an array
    #[inline(always)]
    pub fn to_array(self) -> [i32; 4] {
        let mut out = [0i32; 4];
        unsafe { vst1q_s32(out.as_mut_ptr(), self.0) };
        out
    }
}

impl fmt::Debug for NeonVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NeonVector").field(&self.to_array()).finish()
    }
}

impl fmt::Debug for NeonInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NeonInt").field(&self.to_array()).finish()
    }
}

impl fmt::Debug for NeonMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NeonMask({:#06b})", self.bitmask())
    }
}

// Implement SimdVector for NeonVector
impl SimdVector for NeonVector {
    type Mask = NeonMask;
    type IntBits = NeonInt;

    const LANES: usize = 4;
    const ALIGN: usize = 16;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { NeonVector(vdupq_n_f32(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON load");
        unsafe { NeonVector(vld1q_f32(slice.as_ptr())) }
    }

    #[inline(always)]
    fn load_aligned(slice: &[f32]) -> Self {
        assert_aligned(slice, Self::ALIGN);
        Self::from_slice(slice)
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON store");
        unsafe { vst1q_f32(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn store_aligned(self, slice: &mut [f32]) {
        assert_aligned(slice, Self::ALIGN);
        self.to_slice(slice)
    }

    #[inline(always)]
    fn lane(self, index: usize) -> f32 {
        assert!(index < Self::LANES, "Lane index {} out of range", index);
        self.to_array()[index]
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { NeonVector(vabsq_f32(self.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { NeonVector(vminq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { NeonVector(vmaxq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        unsafe { NeonMask(vcltq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        unsafe { NeonMask(vcleq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        unsafe { NeonMask(vcgtq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        unsafe { NeonMask(vcgeq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        unsafe { NeonMask(vceqq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sign_mask(self) -> Self::Mask {
        unsafe {
            let smeared = vshrq_n_s32::<31>(vreinterpretq_s32_f32(self.0));
            NeonMask(vreinterpretq_u32_s32(smeared))
        }
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        unsafe { NeonVector(vbslq_f32(mask.0, true_val.0, false_val.0)) }
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        unsafe { NeonInt(vreinterpretq_s32_f32(self.0)) }
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        unsafe { NeonVector(vreinterpretq_f32_s32(bits.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        unsafe { vaddvq_f32(self.0) }
    }
}

impl Add for NeonVector {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { NeonVector(vaddq_f32(self.0, rhs.0)) }
    }
}

impl Sub for NeonVector {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { NeonVector(vsubq_f32(self.0, rhs.0)) }
    }
}

impl Mul for NeonVector {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { NeonVector(vmulq_f32(self.0, rhs.0)) }
    }
}

impl Div for NeonVector {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { NeonVector(vdivq_f32(self.0, rhs.0)) }
    }
}

impl Neg for NeonVector {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { NeonVector(vnegq_f32(self.0)) }
    }
}

// Implement SimdInt for NeonInt
impl SimdInt for NeonInt {
    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { NeonInt(vdupq_n_s32(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[i32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON load");
        unsafe { NeonInt(vld1q_s32(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON store");
        unsafe { vst1q_s32(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn lane(self, index: usize) -> i32 {
        assert!(index < Self::LANES, "Lane index {} out of range", index);
        self.to_array()[index]
    }
}

impl Add for NeonInt {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { NeonInt(vaddq_s32(self.0, rhs.0)) }
    }
}

impl Sub for NeonInt {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { NeonInt(vsubq_s32(self.0, rhs.0)) }
    }
}

impl BitAnd for NeonInt {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { NeonInt(vandq_s32(self.0, rhs.0)) }
    }
}

impl BitOr for NeonInt {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { NeonInt(vorrq_s32(self.0, rhs.0)) }
    }
}

impl BitXor for NeonInt {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { NeonInt(veorq_s32(self.0, rhs.0)) }
    }
}

// Implement SimdMask for NeonMask
impl SimdMask for NeonMask {
    const LANES: usize = 4;

    #[inline(always)]
    fn bitmask(self) -> u32 {
        unsafe {
            // No movemask on NEON: move each lane's top bit to its lane index and sum
            let shifts = [0i32, 1, 2, 3];
            let bits = vshrq_n_u32::<31>(self.0);
            vaddvq_u32(vshlq_u32(bits, vld1q_s32(shifts.as_ptr())))
        }
    }
}

impl BitAnd for NeonMask {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { NeonMask(vandq_u32(self.0, rhs.0)) }
    }
}

impl BitOr for NeonMask {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { NeonMask(vorrq_u32(self.0, rhs.0)) }
    }
}

impl BitXor for NeonMask {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { NeonMask(veorq_u32(self.0, rhs.0)) }
    }
}

impl Not for NeonMask {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        unsafe { NeonMask(vmvnq_u32(self.0)) }
    }
}
