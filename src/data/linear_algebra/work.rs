//! # Workspace arrays
//!
//! Many kernels need scratch memory that is proportional to the dimension of the matrix, like a
//! marker per row or a dense accumulator for a single column. These kernels are often called many
//! times in a row on matrices of the same shape, so the scratch memory is owned by the caller and
//! reused, instead of being allocated on every call.
//!
//! A workspace is not meant to be shared between threads; each thread should own its own.
use std::ops::{Deref, DerefMut};

/// Marks an empty slot in an index workspace, such as a node without a parent or a list without a
/// head.
pub(crate) const NONE: usize = usize::MAX;

/// A growable array that only reallocates when it needs to become larger than it ever was.
///
/// The logical length can be smaller than the allocated length. Only the first `len` elements are
/// visible through the slice interface.
#[derive(Eq, PartialEq, Clone, Debug, Default)]
pub struct GrowArray<T> {
    data: Vec<T>,
    len: usize,
}

impl<T: Copy + Default> GrowArray<T> {
    /// Create a new, empty instance that did not allocate yet.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            len: 0,
        }
    }

    /// Create an instance with the given length, with all values set to the default value.
    pub fn with_len(len: usize) -> Self {
        Self {
            data: vec![T::default(); len],
            len,
        }
    }

    /// Change the logical length.
    ///
    /// Values that were present before might still be present afterwards, but nothing is
    /// guaranteed about the contents. Values that were never written are the default value.
    ///
    /// # Arguments
    ///
    /// * `len`: New logical length.
    ///
    /// # Return value
    ///
    /// The first `len` values.
    pub fn reshape(&mut self, len: usize) -> &mut [T] {
        if self.data.len() < len {
            self.data.resize(len, T::default());
        }
        self.len = len;

        &mut self.data[..len]
    }

    /// Change the logical length and set all values to `value`.
    pub fn reshape_filled(&mut self, len: usize, value: T) -> &mut [T] {
        let data = self.reshape(len);
        data.fill(value);
        data
    }

    /// Number of elements allocated, which is at least the logical length.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl<T> Deref for GrowArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.data[..self.len]
    }
}

impl<T> DerefMut for GrowArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data[..self.len]
    }
}
