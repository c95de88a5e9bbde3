//! SSE backend implementation (x86/x86-64)
//!
//! This backend provides 4-lane (128-bit) SIMD operations and covers two capability
//! levels:
//!
//! - `sse2`: level A, blends with and/andnot/or
//! - `sse41`: level B, blends with a single `blendv`
//!
//! **Note**: SSE4.1 availability is assumed when `sse41` is enabled. Use
//! [`crate::isa::validate_host`] at startup to confirm the host supports the build.

// This backend only compiles on x86/x86_64 targets
#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

use crate::traits::{assert_aligned, SimdInt, SimdMask, SimdVector};
use core::fmt;
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// SSE vector wrapper (4 lanes of f32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseVector(__m128);

/// SSE integer vector wrapper (4 lanes of i32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseInt(__m128i);

/// SSE mask wrapper (4 lanes, each all-ones or all-zeros)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseMask(__m128);

impl SseVector {
    /// Build a vector from four lane values, lane 0 first
    #[inline(always)]
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        // _mm_set_ps takes lanes in reverse order
        unsafe { SseVector(_mm_set_ps(d, c, b, a)) }
    }

    /// Copy the lanes out into an array
    #[inline(always)]
    pub fn to_array(self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.0) };
        out
    }
}

impl SseInt {
    /// Build a vector from four lane values, lane 0 first
    #[inline(always)]
    pub fn new(a: i32, b: i32, c: i32, d: i32) -> Self {
        unsafe { SseInt(_mm_set_epi32(d, c, b, a)) }
    }

    /// Copy the lanes out into an array
    #[inline(always)]
    pub fn to_array(self) -> [i32; 4] {
        let mut out = [0i32; 4];
        unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, self.0) };
        out
    }
}

impl fmt::Debug for SseVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SseVector").field(&self.to_array()).finish()
    }
}

impl fmt::Debug for SseInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SseInt").field(&self.to_array()).finish()
    }
}

impl fmt::Debug for SseMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SseMask({:#06b})", self.bitmask())
    }
}

impl SimdVector for SseVector {
    type Mask = SseMask;
    type IntBits = SseInt;

    const LANES: usize = 4;
    const ALIGN: usize = 16;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { SseVector(_mm_set1_ps(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE load");
        unsafe { SseVector(_mm_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn load_aligned(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE load");
        assert_aligned(slice, Self::ALIGN);
        unsafe { SseVector(_mm_load_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE store");
        unsafe { _mm_storeu_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn store_aligned(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE store");
        assert_aligned(slice, Self::ALIGN);
        unsafe { _mm_store_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn lane(self, index: usize) -> f32 {
        assert!(index < Self::LANES, "Lane index {} out of range", index);
        self.to_array()[index]
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe {
            let mask = _mm_castsi128_ps(_mm_set1_epi32(0x7fff_ffff));
            SseVector(_mm_and_ps(self.0, mask))
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        unsafe { SseMask(_mm_cmplt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        unsafe { SseMask(_mm_cmple_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        unsafe { SseMask(_mm_cmpgt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        unsafe { SseMask(_mm_cmpge_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        unsafe { SseMask(_mm_cmpeq_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sign_mask(self) -> Self::Mask {
        unsafe {
            let smeared = _mm_srai_epi32::<31>(_mm_castps_si128(self.0));
            SseMask(_mm_castsi128_ps(smeared))
        }
    }

    #[cfg(feature = "sse41")]
    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        unsafe { SseVector(_mm_blendv_ps(false_val.0, true_val.0, mask.0)) }
    }

    #[cfg(not(feature = "sse41"))]
    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        unsafe {
            let t = _mm_and_ps(mask.0, true_val.0);
            // _mm_andnot_ps(a, b) computes (!a) & b
            let f = _mm_andnot_ps(mask.0, false_val.0);
            SseVector(_mm_or_ps(t, f))
        }
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        unsafe { SseInt(_mm_castps_si128(self.0)) }
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        unsafe { SseVector(_mm_castsi128_ps(bits.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        unsafe {
            // [a+c, b+d, ..] then fold the second lane in
            let high = _mm_movehl_ps(self.0, self.0);
            let pairs = _mm_add_ps(self.0, high);
            let odd = _mm_shuffle_ps::<0b01>(pairs, pairs);
            _mm_cvtss_f32(_mm_add_ss(pairs, odd))
        }
    }
}

impl Add for SseVector {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_add_ps(self.0, rhs.0)) }
    }
}

impl Sub for SseVector {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_sub_ps(self.0, rhs.0)) }
    }
}

impl Mul for SseVector {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_mul_ps(self.0, rhs.0)) }
    }
}

impl Div for SseVector {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_div_ps(self.0, rhs.0)) }
    }
}

impl Neg for SseVector {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe {
            let sign = _mm_castsi128_ps(_mm_set1_epi32(i32::MIN));
            SseVector(_mm_xor_ps(self.0, sign))
        }
    }
}

impl SimdInt for SseInt {
    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { SseInt(_mm_set1_epi32(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[i32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE load");
        unsafe { SseInt(_mm_loadu_si128(slice.as_ptr() as *const __m128i)) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE store");
        unsafe { _mm_storeu_si128(slice.as_mut_ptr() as *mut __m128i, self.0) }
    }

    #[inline(always)]
    fn lane(self, index: usize) -> i32 {
        assert!(index < Self::LANES, "Lane index {} out of range", index);
        self.to_array()[index]
    }
}

impl Add for SseInt {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { SseInt(_mm_add_epi32(self.0, rhs.0)) }
    }
}

impl Sub for SseInt {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { SseInt(_mm_sub_epi32(self.0, rhs.0)) }
    }
}

impl BitAnd for SseInt {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { SseInt(_mm_and_si128(self.0, rhs.0)) }
    }
}

impl BitOr for SseInt {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { SseInt(_mm_or_si128(self.0, rhs.0)) }
    }
}

impl BitXor for SseInt {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { SseInt(_mm_xor_si128(self.0, rhs.0)) }
    }
}

impl SimdMask for SseMask {
    const LANES: usize = 4;

    #[inline(always)]
    fn bitmask(self) -> u32 {
        unsafe { _mm_movemask_ps(self.0) as u32 }
    }
}

impl BitAnd for SseMask {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { SseMask(_mm_and_ps(self.0, rhs.0)) }
    }
}

impl BitOr for SseMask {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { SseMask(_mm_or_ps(self.0, rhs.0)) }
    }
}

impl BitXor for SseMask {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { SseMask(_mm_xor_ps(self.0, rhs.0)) }
    }
}

impl Not for SseMask {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        unsafe {
            let ones = _mm_castsi128_ps(_mm_set1_epi32(-1));
            SseMask(_mm_xor_ps(self.0, ones))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_arithmetic() {
        let a = SseVector::new(1.0, 2.0, 3.0, 4.0);
        let b = SseVector::splat(2.0);

        assert_eq!((a + b).to_array(), [3.0, 4.0, 5.0, 6.0]);
        assert_eq!((a - b).to_array(), [-1.0, 0.0, 1.0, 2.0]);
        assert_eq!((a * b).to_array(), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!((a / b).to_array(), [0.5, 1.0, 1.5, 2.0]);
        assert_eq!((-a).to_array(), [-1.0, -2.0, -3.0, -4.0]);
        assert_eq!(a.horizontal_sum(), 10.0);
    }

    #[test]
    fn test_sse_select_and_masks() {
        let a = SseVector::new(1.0, -2.0, 3.0, -4.0);
        let zero = SseVector::splat(0.0);
        let negative = a.lt(zero);

        assert_eq!(negative.bitmask(), 0b1010);
        assert_eq!(
            SseVector::select(negative, zero, a).to_array(),
            [1.0, 0.0, 3.0, 0.0]
        );
        assert!((negative | !negative).all());
        assert!((negative & !negative).none());
        assert_eq!((negative ^ a.ge(zero)).bitmask(), 0b1111);
    }

    #[test]
    fn test_sse_sign_mask_and_abs() {
        let a = SseVector::new(-0.0, 0.0, -5.0, f32::INFINITY);
        assert_eq!(a.sign_mask().bitmask(), 0b0101);
        assert_eq!(a.abs().to_array(), [0.0, 0.0, 5.0, f32::INFINITY]);
    }

    #[test]
    fn test_sse_bits() {
        let v = SseVector::new(1.0, -1.0, 0.0, -0.0);
        let bits = v.to_bits();
        assert_eq!(bits.to_array(), [0x3f80_0000, -0x4080_0000, 0, i32::MIN]);
        assert_eq!(SseVector::from_bits(bits).to_bits().to_array(), bits.to_array());

        let x = SseInt::new(1, 2, 3, 4);
        assert_eq!((x + SseInt::splat(1)).to_array(), [2, 3, 4, 5]);
        assert_eq!((x - SseInt::splat(1)).to_array(), [0, 1, 2, 3]);
        assert_eq!((x & SseInt::splat(1)).to_array(), [1, 0, 1, 0]);
        assert_eq!((x | SseInt::splat(8)).to_array(), [9, 10, 11, 12]);
        assert_eq!((x ^ x).to_array(), [0; 4]);
    }

    #[test]
    fn test_sse_aligned_memory() {
        #[repr(C, align(16))]
        struct Aligned([f32; 8]);

        let mut data = Aligned([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let v = SseVector::load_aligned(&data.0[4..]);
        assert_eq!(v.to_array(), [5.0, 6.0, 7.0, 8.0]);

        v.store_aligned(&mut data.0[..4]);
        assert_eq!(data.0[..4], [5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    #[should_panic(expected = "not aligned")]
    fn test_sse_misaligned_load_panics() {
        #[repr(C, align(16))]
        struct Aligned([f32; 8]);

        let data = Aligned([0.0; 8]);
        let _ = SseVector::load_aligned(&data.0[1..]);
    }
}
