//! Fixed-size aligned buffers
//!
//! Aligned loads require their source to start on a vector boundary. `AlignedBlock`
//! guarantees 32-byte alignment, enough for every backend up to 8 lanes, and hands
//! out lane-sized chunks for `load_aligned`/`store_aligned`.

use crate::traits::SimdVector;
use core::ops::{Index, IndexMut};

/// Fixed-size `f32` buffer aligned for SIMD loads
///
/// # Memory Layout
///
/// Values are stored sequentially and processed in chunks of `V::LANES`:
///
/// ```text
/// AlignedBlock<16> with 8 lanes:
/// [0  1  2  3  4  5  6  7] [8  9  10 11 12 13 14 15]
///  └────── chunk 0 ──────┘ └─────── chunk 1 ───────┘
/// ```
///
/// # Example
///
/// ```rust
/// use lanemath::{AlignedBlock, SimdVector, VFloat};
///
/// let mut block = AlignedBlock::<16>::new();
/// for i in 0..16 {
///     block[i] = i as f32;
/// }
///
/// let half = VFloat::splat(0.5);
/// for chunk in 0..block.chunk_count::<VFloat>() {
///     let value = block.load::<VFloat>(chunk);
///     block.store(chunk, value * half);
/// }
/// assert_eq!(block[15], 7.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(32))]
pub struct AlignedBlock<const N: usize> {
    data: [f32; N],
}

impl<const N: usize> AlignedBlock<N> {
    /// Create a zero-filled block
    #[inline]
    pub const fn new() -> Self {
        Self { data: [0.0; N] }
    }

    /// Create a block by copying a slice
    ///
    /// # Panics
    ///
    /// Panics if slice length doesn't match block size N
    #[inline]
    pub fn from_slice(slice: &[f32]) -> Self {
        assert_eq!(
            slice.len(),
            N,
            "Slice length {} doesn't match block size {}",
            slice.len(),
            N
        );
        let mut data = [0.0; N];
        data.copy_from_slice(slice);
        Self { data }
    }

    /// Returns the number of values in this block
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns true if the block is empty (always false for N > 0)
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns a slice view of the entire block
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns a mutable slice view of the entire block
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Number of whole `V`-sized chunks in the block
    #[inline]
    pub const fn chunk_count<V: SimdVector>(&self) -> usize {
        N / V::LANES
    }

    /// Aligned load of chunk `index`
    ///
    /// # Panics
    ///
    /// Panics if the chunk runs past the end of the block
    #[inline(always)]
    pub fn load<V: SimdVector>(&self, index: usize) -> V {
        V::load_aligned(&self.data[index * V::LANES..])
    }

    /// Aligned store into chunk `index`
    ///
    /// # Panics
    ///
    /// Panics if the chunk runs past the end of the block
    #[inline(always)]
    pub fn store<V: SimdVector>(&mut self, index: usize, value: V) {
        value.store_aligned(&mut self.data[index * V::LANES..])
    }
}

impl<const N: usize> Default for AlignedBlock<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Index<usize> for AlignedBlock<N> {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.data[index]
    }
}

impl<const N: usize> IndexMut<usize> for AlignedBlock<N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.data[index]
    }
}
