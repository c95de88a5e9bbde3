#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! lanemath: lane-width-agnostic SIMD math with compile-time backend selection
//!
//! Kernels are written once against the [`SimdVector`] trait and compiled for a
//! single vector width chosen by cargo feature. The portable names [`VFloat`],
//! [`VInt`], [`VMask`] and [`SIMD_WIDTH`] resolve to that width, so the same
//! source builds for 1, 4 or 8 lanes without `#[cfg]` at the call site.
//!
//! # Features
//!
//! - **Width selection**: `avx2` (8 lanes), `sse41`/`sse2`/`neon` (4 lanes), none (1 lane)
//! - **Fixed-width names**: `VFloat1`, `VFloat4`, `VFloat8` are always available
//! - **Math kernels**: `changesign`, fast `atan` and `atan2`
//! - **Aligned buffers**: [`AlignedBlock`] for `loada`
//! - **Host validation**: [`isa::validate_host`] checks the CPU against the compiled level
//! - **No allocations**: everything is stack-based and `no_std`
//!
//! # Quick Start
//!
//! ```rust
//! use lanemath::{AlignedBlock, VFloat, SIMD_WIDTH};
//! use lanemath::math::atan2;
//!
//! let ys = AlignedBlock::<8>::from_slice(&[1.0; 8]);
//! let xs = AlignedBlock::<8>::from_slice(&[-1.0; 8]);
//!
//! let mut out = AlignedBlock::<8>::new();
//! for chunk in 0..8 / SIMD_WIDTH {
//!     let y: VFloat = ys.load(chunk);
//!     let x: VFloat = xs.load(chunk);
//!     out.store(chunk, atan2(y, x));
//! }
//!
//! let expected = 3.0 * core::f32::consts::FRAC_PI_4;
//! assert!(out.as_slice().iter().all(|v| (v - expected).abs() < 0.0049));
//! ```

// Core trait definitions
pub mod traits;

// Backend implementations
pub mod backends;

// Portable names and width-qualified aliases
pub mod width;

// Aligned buffers
pub mod block;

// Math kernels
pub mod math;

// Capability levels and host checks
pub mod isa;

// Public re-exports for convenience
pub use traits::{SimdInt, SimdMask, SimdVector};

pub use width::{
    load1a, loada, VFloat, VFloat1, VFloat4, VFloat8, VInt, VInt1, VInt4, VInt8, VMask, VMask1,
    VMask4, VMask8, SIMD_WIDTH,
};

pub use block::AlignedBlock;

// Re-export backend types
pub use backends::portable::{LaneInt, LaneMask, LaneVector};
pub use backends::scalar::{ScalarInt, ScalarMask, ScalarVector};

#[cfg(all(feature = "sse2", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::sse::{SseInt, SseMask, SseVector};

#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::avx2::{Avx2Int, Avx2Mask, Avx2Vector};

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub use backends::neon::{NeonInt, NeonMask, NeonVector};
