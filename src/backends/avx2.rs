//! AVX2 backend implementation (x86-64)
//!
//! This backend provides 8-lane (256-bit) SIMD operations using AVX2 instructions.
//! Requires x86-64 CPU with AVX2 support (Intel Haswell 2013+, AMD Excavator 2015+).
//!
//! **Note**: This implementation assumes AVX2 is available when the `avx2` feature is enabled.
//! Selection is compile-time only; build with `-C target-feature=+avx2` so the
//! intrinsics inline, and call [`crate::isa::validate_host`] to confirm the host.

// This backend only compiles on x86/x86_64 targets
#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

use crate::traits::{assert_aligned, SimdInt, SimdMask, SimdVector};
use core::fmt;
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// AVX2 vector wrapper (8 lanes of f32)
///
/// Wraps __m256 intrinsic type to provide SimdVector trait implementation.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Vector(__m256);

/// AVX2 integer vector wrapper (8 lanes of i32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Int(__m256i);

/// AVX2 mask wrapper (8-lane mask)
///
/// Uses __m256 to represent per-lane boolean values.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Mask(__m256);

impl Avx2Vector {
    /// Build a vector from an array of lane values, lane 0 first
    #[inline(always)]
    pub fn from_array(values: [f32; 8]) -> Self {
        unsafe { Avx2Vector(_mm256_loadu_ps(values.as_ptr())) }
    }

    /// Copy the lanes out into an array
    #[inline(always)]
    pub fn to_array(self) -> [f32; 8] {
        let mut out = [0.0f32; 8];
        unsafe { _mm256_storeu_ps(out.as_mut_ptr(), self.0) };
        out
    }
}

impl Avx2Int {
    /// Build a vector from an array of lane values, lane 0 first
    #[inline(always)]
    pub fn from_array(values: [i32; 8]) -> Self {
        unsafe { Avx2Int(_mm256_loadu_si256(values.as_ptr() as *const __m256i)) }
    }

    /// Copy the lanes out into an array
    #[inline(always)]
    pub fn to_array(self) -> [i32; 8] {
        let mut out = [0i32; 8];
        unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, self.0) };
        out
    }
}

impl fmt::Debug for Avx2Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Avx2Vector").field(&self.to_array()).finish()
    }
}

impl fmt::Debug for Avx2Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Avx2Int").field(&self.to_array()).finish()
    }
}

impl fmt::Debug for Avx2Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Avx2Mask({:#010b})", self.bitmask())
    }
}

// Implement SimdVector for Avx2Vector
impl SimdVector for Avx2Vector {
    type Mask = Avx2Mask;
    type IntBits = Avx2Int;

    const LANES: usize = 8;
    const ALIGN: usize = 32;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { Avx2Vector(_mm256_set1_ps(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 load");
        unsafe { Avx2Vector(_mm256_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn load_aligned(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 load");
        assert_aligned(slice, Self::ALIGN);
        unsafe { Avx2Vector(_mm256_load_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 store");
        unsafe { _mm256_storeu_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn store_aligned(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 store");
        assert_aligned(slice, Self::ALIGN);
        unsafe { _mm256_store_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn lane(self, index: usize) -> f32 {
        assert!(index < Self::LANES, "Lane index {} out of range", index);
        self.to_array()[index]
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe {
            let mask = _mm256_castsi256_ps(_mm256_set1_epi32(0x7fff_ffff));
            Avx2Vector(_mm256_and_ps(self.0, mask))
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        unsafe { Avx2Mask(_mm256_cmp_ps::<_CMP_LT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        unsafe { Avx2Mask(_mm256_cmp_ps::<_CMP_LE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        unsafe { Avx2Mask(_mm256_cmp_ps::<_CMP_GT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        unsafe { Avx2Mask(_mm256_cmp_ps::<_CMP_GE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        unsafe { Avx2Mask(_mm256_cmp_ps::<_CMP_EQ_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sign_mask(self) -> Self::Mask {
        unsafe {
            let smeared = _mm256_srai_epi32::<31>(_mm256_castps_si256(self.0));
            Avx2Mask(_mm256_castsi256_ps(smeared))
        }
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        unsafe { Avx2Vector(_mm256_blendv_ps(false_val.0, true_val.0, mask.0)) }
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        unsafe { Avx2Int(_mm256_castps_si256(self.0)) }
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        unsafe { Avx2Vector(_mm256_castsi256_ps(bits.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        unsafe {
            // Extract high and low 128-bit halves
            let high = _mm256_extractf128_ps::<1>(self.0);
            let low = _mm256_castps256_ps128(self.0);
            let sum128 = _mm_add_ps(high, low);

            // Horizontal add within 128-bit
            let shuf = _mm_movehdup_ps(sum128);
            let sums = _mm_add_ps(sum128, shuf);
            let shuf = _mm_movehl_ps(shuf, sums);
            let result = _mm_add_ss(sums, shuf);

            _mm_cvtss_f32(result)
        }
    }
}

impl Add for Avx2Vector {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_add_ps(self.0, rhs.0)) }
    }
}

impl Sub for Avx2Vector {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_sub_ps(self.0, rhs.0)) }
    }
}

impl Mul for Avx2Vector {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_mul_ps(self.0, rhs.0)) }
    }
}

impl Div for Avx2Vector {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_div_ps(self.0, rhs.0)) }
    }
}

impl Neg for Avx2Vector {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe {
            let sign = _mm256_castsi256_ps(_mm256_set1_epi32(i32::MIN));
            Avx2Vector(_mm256_xor_ps(self.0, sign))
        }
    }
}

// Implement SimdInt for Avx2Int
impl SimdInt for Avx2Int {
    const LANES: usize = 8;

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { Avx2Int(_mm256_set1_epi32(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[i32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 load");
        unsafe { Avx2Int(_mm256_loadu_si256(slice.as_ptr() as *const __m256i)) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 store");
        unsafe { _mm256_storeu_si256(slice.as_mut_ptr() as *mut __m256i, self.0) }
    }

    #[inline(always)]
    fn lane(self, index: usize) -> i32 {
        assert!(index < Self::LANES, "Lane index {} out of range", index);
        self.to_array()[index]
    }
}

impl Add for Avx2Int {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_add_epi32(self.0, rhs.0)) }
    }
}

impl Sub for Avx2Int {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_sub_epi32(self.0, rhs.0)) }
    }
}

impl BitAnd for Avx2Int {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_and_si256(self.0, rhs.0)) }
    }
}

impl BitOr for Avx2Int {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_or_si256(self.0, rhs.0)) }
    }
}

impl BitXor for Avx2Int {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_xor_si256(self.0, rhs.0)) }
    }
}

// Implement SimdMask for Avx2Mask
impl SimdMask for Avx2Mask {
    const LANES: usize = 8;

    #[inline(always)]
    fn bitmask(self) -> u32 {
        unsafe { _mm256_movemask_ps(self.0) as u32 }
    }
}

impl BitAnd for Avx2Mask {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { Avx2Mask(_mm256_and_ps(self.0, rhs.0)) }
    }
}

impl BitOr for Avx2Mask {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { Avx2Mask(_mm256_or_ps(self.0, rhs.0)) }
    }
}

impl BitXor for Avx2Mask {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { Avx2Mask(_mm256_xor_ps(self.0, rhs.0)) }
    }
}

impl Not for Avx2Mask {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        unsafe {
            let ones = _mm256_castsi256_ps(_mm256_set1_epi32(-1));
            Avx2Mask(_mm256_xor_ps(self.0, ones))
        }
    }
}
