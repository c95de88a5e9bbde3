//! Width-agnostic math kernels
//!
//! Every function here is generic over [`SimdVector`](crate::SimdVector) and built
//! only from backend primitives, so it runs unchanged on every lane width and
//! produces the same result lane for lane.
//!
//! # Modules
//!
//! - `sign`: `changesign` sign-bit flip
//! - `atan`: fast `atan` and `atan2`
//!
//! # Example
//!
//! ```rust
//! use lanemath::{SimdVector, VFloat};
//! use lanemath::math::{atan2, changesign};
//!
//! let angle = atan2(VFloat::splat(-1.0), VFloat::splat(1.0));
//! let mirrored = changesign(angle, VFloat::splat(-1.0));
//! assert!(mirrored.lane(0) > 0.0);
//! ```

pub mod atan;
pub mod sign;

pub use self::atan::{atan, atan2};
pub use self::sign::changesign;
