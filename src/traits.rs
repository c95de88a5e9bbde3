//! Core SIMD abstraction traits
//!
//! This module defines the contract every backend satisfies. Code written against
//! these traits (or against the portable `VFloat`/`VInt`/`VMask` aliases) compiles
//! unchanged for every lane width.

use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

/// Float vector abstraction: `LANES` independent `f32` lanes
///
/// All backends (scalar, portable, SSE, AVX2, NEON) implement this trait.
/// Arithmetic uses the `core::ops` operators and follows IEEE-754 lane by lane.
///
/// # Example
///
/// ```rust
/// use lanemath::{SimdVector, VFloat};
///
/// let a = VFloat::splat(2.0);
/// let b = VFloat::splat(3.0);
/// let result = a * b + a;
/// assert_eq!(result.horizontal_sum(), 8.0 * VFloat::LANES as f32);
/// ```
pub trait SimdVector:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Mask type produced by comparisons
    type Mask: SimdMask;

    /// Integer vector of equal width, the bit-reinterpretation dual
    type IntBits: SimdInt;

    /// Number of lanes (1 for scalar, 4 for SSE/NEON, 8 for AVX2)
    const LANES: usize;

    /// Byte alignment required by `load_aligned` and `store_aligned`
    const ALIGN: usize;

    // Construction and memory

    /// Broadcast a scalar value to all lanes
    fn splat(value: f32) -> Self;

    /// Load `LANES` contiguous values from a slice with no alignment requirement
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than `LANES` elements
    fn from_slice(slice: &[f32]) -> Self;

    /// Load `LANES` contiguous values from a slice aligned to `ALIGN` bytes
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than `LANES` elements or is misaligned
    fn load_aligned(slice: &[f32]) -> Self;

    /// Store all lanes to a slice with no alignment requirement
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than `LANES` elements
    fn to_slice(self, slice: &mut [f32]);

    /// Store all lanes to a slice aligned to `ALIGN` bytes
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than `LANES` elements or is misaligned
    fn store_aligned(self, slice: &mut [f32]);

    /// Read a single lane
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`
    fn lane(self, index: usize) -> f32;

    // Lane-wise math

    /// Absolute value (clears the sign bit, so NaN payloads survive)
    fn abs(self) -> Self;

    /// Lane-wise minimum
    fn min(self, rhs: Self) -> Self;

    /// Lane-wise maximum
    fn max(self, rhs: Self) -> Self;

    // Comparisons (ordered: any NaN operand yields a cleared lane)

    /// Lane set where `self < rhs`
    fn lt(self, rhs: Self) -> Self::Mask;

    /// Lane set where `self <= rhs`
    fn le(self, rhs: Self) -> Self::Mask;

    /// Lane set where `self > rhs`
    fn gt(self, rhs: Self) -> Self::Mask;

    /// Lane set where `self >= rhs`
    fn ge(self, rhs: Self) -> Self::Mask;

    /// Lane set where `self == rhs`
    fn eq(self, rhs: Self) -> Self::Mask;

    /// Lane set where the sign bit is set, including `-0.0` and negative NaN
    fn sign_mask(self) -> Self::Mask;

    // Blending

    /// Per-lane `mask ? true_val : false_val`
    ///
    /// Implemented as a bitwise blend in every backend; no lane ever branches.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lanemath::{SimdVector, VFloat};
    ///
    /// let a = VFloat::splat(1.0);
    /// let b = VFloat::splat(2.0);
    /// let picked = VFloat::select(a.lt(b), a, b);
    /// assert_eq!(picked.lane(0), 1.0);
    /// ```
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self;

    // Bit reinterpretation

    /// Reinterpret float lanes as integer lanes (no numeric conversion)
    ///
    /// ```rust
    /// use lanemath::{SimdInt, SimdVector, VFloat};
    ///
    /// let bits = VFloat::splat(1.0).to_bits();
    /// assert_eq!(bits.lane(0), 0x3f80_0000);
    /// ```
    fn to_bits(self) -> Self::IntBits;

    /// Reinterpret integer lanes as float lanes; inverse of `to_bits`
    fn from_bits(bits: Self::IntBits) -> Self;

    // Horizontal

    /// Sum of every lane
    fn horizontal_sum(self) -> f32;
}

/// Integer vector abstraction: `LANES` independent `i32` lanes
///
/// Besides integer arithmetic this is the target of float bit reinterpretation,
/// so the bitwise operators are part of the contract.
pub trait SimdInt:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
{
    /// Number of lanes (matches the associated float vector)
    const LANES: usize;

    /// Broadcast a scalar value to all lanes
    fn splat(value: i32) -> Self;

    /// Load `LANES` contiguous values
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than `LANES` elements
    fn from_slice(slice: &[i32]) -> Self;

    /// Store all lanes
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than `LANES` elements
    fn to_slice(self, slice: &mut [i32]);

    /// Read a single lane
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`
    fn lane(self, index: usize) -> i32;
}

/// Per-lane boolean mask, each lane all-ones or all-zeros
///
/// # Example
///
/// ```rust
/// use lanemath::{SimdMask, SimdVector, VFloat};
///
/// let a = VFloat::splat(1.0);
/// let b = VFloat::splat(2.0);
/// let mask = a.lt(b);
/// assert!(mask.all());
/// assert!((!mask).none());
/// ```
pub trait SimdMask:
    Copy
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// Number of lanes
    const LANES: usize;

    /// Bit `i` of the result is set when lane `i` is set
    fn bitmask(self) -> u32;

    /// Returns true if every lane is set
    #[inline(always)]
    fn all(self) -> bool {
        self.bitmask() == u32::MAX >> (32 - Self::LANES)
    }

    /// Returns true if any lane is set
    #[inline(always)]
    fn any(self) -> bool {
        self.bitmask() != 0
    }

    /// Returns true if no lane is set
    #[inline(always)]
    fn none(self) -> bool {
        self.bitmask() == 0
    }
}

/// Panics unless `slice` starts on an `align`-byte boundary
///
/// Shared by every backend's aligned load and store.
#[inline(always)]
#[track_caller]
pub(crate) fn assert_aligned<T>(slice: &[T], align: usize) {
    assert!(
        (slice.as_ptr() as usize) % align == 0,
        "Slice is not aligned to {} bytes",
        align
    );
}
