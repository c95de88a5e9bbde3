//! Capability levels and host validation
//!
//! The backend is fixed at compile time. This module reports which capability level
//! was compiled in and checks, once at startup, that the running CPU can execute it.
//! Nothing here changes the selected backend.

use core::fmt;

/// Instruction-set tier a build targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityLevel {
    /// No SIMD, 1-lane scalar reference
    None,
    /// 4-lane x86, capability level A
    Sse2,
    /// 4-lane x86, capability level B
    Sse41,
    /// 8-lane x86
    Avx2,
    /// 4-lane aarch64
    Neon,
}

impl CapabilityLevel {
    /// Short lowercase name, matching the cargo feature
    pub const fn name(self) -> &'static str {
        match self {
            CapabilityLevel::None => "none",
            CapabilityLevel::Sse2 => "sse2",
            CapabilityLevel::Sse41 => "sse41",
            CapabilityLevel::Avx2 => "avx2",
            CapabilityLevel::Neon => "neon",
        }
    }

    /// Portable vector width this level selects
    pub const fn lanes(self) -> usize {
        match self {
            CapabilityLevel::None => 1,
            CapabilityLevel::Sse2 | CapabilityLevel::Sse41 | CapabilityLevel::Neon => 4,
            CapabilityLevel::Avx2 => 8,
        }
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability level compiled into this build
#[cfg(feature = "avx2")]
pub const COMPILED_LEVEL: CapabilityLevel = CapabilityLevel::Avx2;

/// Capability level compiled into this build
#[cfg(all(feature = "sse41", not(feature = "avx2")))]
pub const COMPILED_LEVEL: CapabilityLevel = CapabilityLevel::Sse41;

/// Capability level compiled into this build
#[cfg(all(feature = "sse2", not(feature = "sse41")))]
pub const COMPILED_LEVEL: CapabilityLevel = CapabilityLevel::Sse2;

/// Capability level compiled into this build
#[cfg(all(feature = "neon", not(feature = "sse2")))]
pub const COMPILED_LEVEL: CapabilityLevel = CapabilityLevel::Neon;

/// Capability level compiled into this build
#[cfg(not(any(feature = "sse2", feature = "neon")))]
pub const COMPILED_LEVEL: CapabilityLevel = CapabilityLevel::None;

/// SIMD features detected on the running CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuFeatures {
    /// SSE2 (x86)
    pub has_sse2: bool,

    /// SSE4.1 (x86)
    pub has_sse41: bool,

    /// AVX2 (x86)
    pub has_avx2: bool,

    /// NEON (aarch64, always present)
    pub has_neon: bool,
}

impl CpuFeatures {
    /// Detect CPU features at runtime
    ///
    /// # Platform Behavior
    /// - **x86/x86_64**: CPUID detection using the `cpufeatures` crate (cached after the first call)
    /// - **aarch64**: NEON reported present, x86 flags false
    /// - **other**: everything false
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            cpufeatures::new!(cpuid_sse2, "sse2");
            cpufeatures::new!(cpuid_sse41, "sse4.1");
            cpufeatures::new!(cpuid_avx2, "avx2");

            Self {
                has_sse2: cpuid_sse2::get(),
                has_sse41: cpuid_sse41::get(),
                has_avx2: cpuid_avx2::get(),
                has_neon: false,
            }
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        {
            Self {
                has_sse2: false,
                has_sse41: false,
                has_avx2: false,
                has_neon: cfg!(target_arch = "aarch64"),
            }
        }
    }

    /// Returns true if code built for `level` can run on this CPU
    pub fn supports(&self, level: CapabilityLevel) -> bool {
        match level {
            CapabilityLevel::None => true,
            CapabilityLevel::Sse2 => self.has_sse2,
            CapabilityLevel::Sse41 => self.has_sse2 && self.has_sse41,
            CapabilityLevel::Avx2 => self.has_sse2 && self.has_sse41 && self.has_avx2,
            CapabilityLevel::Neon => self.has_neon,
        }
    }

    /// Widest level this CPU supports, for diagnostics
    pub fn best_level(&self) -> CapabilityLevel {
        [
            CapabilityLevel::Avx2,
            CapabilityLevel::Sse41,
            CapabilityLevel::Sse2,
            CapabilityLevel::Neon,
        ]
        .into_iter()
        .find(|&level| self.supports(level))
        .unwrap_or(CapabilityLevel::None)
    }
}

/// Errors reported by host validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IsaError {
    /// The build requires instructions the running CPU lacks
    #[error("build targets {required} but this CPU supports at most {available}")]
    Unsupported {
        /// Level compiled into the binary
        required: CapabilityLevel,
        /// Widest level the CPU supports
        available: CapabilityLevel,
    },
}

/// Check that the running CPU supports [`COMPILED_LEVEL`]
///
/// Call once at startup, before running any vector code. Using a backend the CPU
/// does not support faults with an illegal instruction instead of returning an error.
///
/// # Example
///
/// ```rust
/// use lanemath::isa::validate_host;
///
/// validate_host().expect("host CPU lacks the compiled SIMD level");
/// ```
pub fn validate_host() -> Result<(), IsaError> {
    validate_with(CpuFeatures::detect())
}

/// Check [`COMPILED_LEVEL`] against an explicit feature set
pub fn validate_with(features: CpuFeatures) -> Result<(), IsaError> {
    log::debug!(
        "compiled SIMD level {} ({} lanes), host features {:?}",
        COMPILED_LEVEL,
        COMPILED_LEVEL.lanes(),
        features
    );

    if features.supports(COMPILED_LEVEL) {
        return Ok(());
    }

    let available = features.best_level();
    log::warn!(
        "host CPU lacks {} support, best available level is {}",
        COMPILED_LEVEL,
        available
    );
    Err(IsaError::Unsupported {
        required: COMPILED_LEVEL,
        available,
    })
}
