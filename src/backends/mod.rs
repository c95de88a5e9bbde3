//! SIMD backend implementations
//!
//! This module contains the concrete backends. The scalar and portable backends are
//! always compiled; hardware backends are selected at compile time via cargo
//! features. When `avx2` is enabled the SSE backend is compiled alongside it,
//! because fixed 4-lane call sites use it regardless of the portable width.

// Scalar backend (always available, 1-lane reference)
pub mod scalar;

// Array-backed reference for any lane count
pub mod portable;

// Platform-specific backends (feature-gated)
#[cfg(feature = "sse2")]
pub mod sse;

#[cfg(feature = "avx2")]
pub mod avx2;

#[cfg(feature = "neon")]
pub mod neon;

// Compile-time checks: a capability level must match the target architecture.
// There is no runtime fallback, so a mismatched build is rejected here.

#[cfg(all(
    feature = "sse2",
    not(any(target_arch = "x86", target_arch = "x86_64"))
))]
compile_error!(
    "The sse2, sse41 and avx2 features require an x86 or x86_64 target. Disable them or use neon."
);

#[cfg(all(feature = "neon", not(target_arch = "aarch64")))]
compile_error!("The neon feature requires an aarch64 target.");
