//! Compile-time width selection
//!
//! Binds the portable names `VFloat`, `VInt`, `VMask`, [`SIMD_WIDTH`], [`loada`] and
//! [`load1a`] to exactly one backend, chosen by cargo feature:
//!
//! | Feature | Width | Backend |
//! |---------|-------|---------|
//! | `avx2`  | 8     | `Avx2Vector` |
//! | `sse41` / `sse2` | 4 | `SseVector` |
//! | `neon`  | 4     | `NeonVector` |
//! | none    | 1     | `ScalarVector` |
//!
//! Width-qualified names (`VFloat1`, `VFloat4`, `VFloat8`, ...) are always available
//! for call sites that must pin a width. Without a matching hardware backend the
//! 4- and 8-lane names resolve to the portable array backend.

use crate::backends::scalar::{ScalarInt, ScalarMask, ScalarVector};
use crate::traits::SimdVector;

// avx2 implies sse2, so the portable backend backs at least the 8-lane names otherwise
#[cfg(not(feature = "avx2"))]
use crate::backends::portable::{LaneInt, LaneMask, LaneVector};

#[cfg(feature = "sse2")]
use crate::backends::sse::{SseInt, SseMask, SseVector};

#[cfg(feature = "avx2")]
use crate::backends::avx2::{Avx2Int, Avx2Mask, Avx2Vector};

#[cfg(feature = "neon")]
use crate::backends::neon::{NeonInt, NeonMask, NeonVector};

// 1-lane names

/// 1-lane float vector
pub type VFloat1 = ScalarVector;
/// 1-lane integer vector
pub type VInt1 = ScalarInt;
/// 1-lane mask
pub type VMask1 = ScalarMask;

// 4-lane names

/// 4-lane float vector
#[cfg(feature = "sse2")]
pub type VFloat4 = SseVector;
/// 4-lane integer vector
#[cfg(feature = "sse2")]
pub type VInt4 = SseInt;
/// 4-lane mask
#[cfg(feature = "sse2")]
pub type VMask4 = SseMask;

/// 4-lane float vector
#[cfg(feature = "neon")]
pub type VFloat4 = NeonVector;
/// 4-lane integer vector
#[cfg(feature = "neon")]
pub type VInt4 = NeonInt;
/// 4-lane mask
#[cfg(feature = "neon")]
pub type VMask4 = NeonMask;

/// 4-lane float vector (portable reference)
#[cfg(not(any(feature = "sse2", feature = "neon")))]
pub type VFloat4 = LaneVector<4>;
/// 4-lane integer vector (portable reference)
#[cfg(not(any(feature = "sse2", feature = "neon")))]
pub type VInt4 = LaneInt<4>;
/// 4-lane mask (portable reference)
#[cfg(not(any(feature = "sse2", feature = "neon")))]
pub type VMask4 = LaneMask<4>;

// 8-lane names

/// 8-lane float vector
#[cfg(feature = "avx2")]
pub type VFloat8 = Avx2Vector;
/// 8-lane integer vector
#[cfg(feature = "avx2")]
pub type VInt8 = Avx2Int;
/// 8-lane mask
#[cfg(feature = "avx2")]
pub type VMask8 = Avx2Mask;

/// 8-lane float vector (portable reference)
#[cfg(not(feature = "avx2"))]
pub type VFloat8 = LaneVector<8>;
/// 8-lane integer vector (portable reference)
#[cfg(not(feature = "avx2"))]
pub type VInt8 = LaneInt<8>;
/// 8-lane mask (portable reference)
#[cfg(not(feature = "avx2"))]
pub type VMask8 = LaneMask<8>;

// Portable names. Precedence: avx2 > sse > neon > scalar.

/// Float vector of the compiled width
#[cfg(feature = "avx2")]
pub type VFloat = VFloat8;
/// Integer vector of the compiled width
#[cfg(feature = "avx2")]
pub type VInt = VInt8;
/// Mask of the compiled width
#[cfg(feature = "avx2")]
pub type VMask = VMask8;

/// Float vector of the compiled width
#[cfg(all(not(feature = "avx2"), any(feature = "sse2", feature = "neon")))]
pub type VFloat = VFloat4;
/// Integer vector of the compiled width
#[cfg(all(not(feature = "avx2"), any(feature = "sse2", feature = "neon")))]
pub type VInt = VInt4;
/// Mask of the compiled width
#[cfg(all(not(feature = "avx2"), any(feature = "sse2", feature = "neon")))]
pub type VMask = VMask4;

/// Float vector of the compiled width
#[cfg(not(any(feature = "avx2", feature = "sse2", feature = "neon")))]
pub type VFloat = VFloat1;
/// Integer vector of the compiled width
#[cfg(not(any(feature = "avx2", feature = "sse2", feature = "neon")))]
pub type VInt = VInt1;
/// Mask of the compiled width
#[cfg(not(any(feature = "avx2", feature = "sse2", feature = "neon")))]
pub type VMask = VMask1;

/// Number of lanes in [`VFloat`]
pub const SIMD_WIDTH: usize = <VFloat as SimdVector>::LANES;

/// Aligned load of [`SIMD_WIDTH`] contiguous values
///
/// # Panics
///
/// Panics if `data` is shorter than [`SIMD_WIDTH`] or not aligned to
/// `VFloat::ALIGN` bytes. [`crate::AlignedBlock`] always satisfies the alignment.
///
/// # Example
///
/// ```rust
/// use lanemath::{loada, AlignedBlock, SimdVector, SIMD_WIDTH};
///
/// let block = AlignedBlock::<16>::from_slice(&[1.0; 16]);
/// let v = loada(block.as_slice());
/// assert_eq!(v.horizontal_sum(), SIMD_WIDTH as f32);
/// ```
#[inline(always)]
pub fn loada(data: &[f32]) -> VFloat {
    VFloat::load_aligned(data)
}

/// Broadcast one value to every lane of a [`VFloat`]
#[inline(always)]
pub fn load1a(value: &f32) -> VFloat {
    VFloat::splat(*value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{SimdInt, SimdMask};

    #[test]
    fn test_portable_names_agree() {
        assert_eq!(SIMD_WIDTH, <VInt as SimdInt>::LANES);
        assert_eq!(SIMD_WIDTH, <VMask as SimdMask>::LANES);
    }

    #[test]
    fn test_qualified_widths() {
        assert_eq!(<VFloat1 as SimdVector>::LANES, 1);
        assert_eq!(<VFloat4 as SimdVector>::LANES, 4);
        assert_eq!(<VFloat8 as SimdVector>::LANES, 8);
        assert_eq!(<VInt4 as SimdInt>::LANES, 4);
        assert_eq!(<VMask8 as SimdMask>::LANES, 8);
    }

    #[test]
    fn test_load1a_broadcasts() {
        let value = 2.5f32;
        let v = load1a(&value);
        for lane in 0..SIMD_WIDTH {
            assert_eq!(v.lane(lane), 2.5);
        }
    }
}
