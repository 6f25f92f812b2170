//! # **Buffer** - *Shared, 64-byte aligned byte storage*
//!
//! Backs the element data of every `ArrayData` and the bits of every `Bitmask`.
//!
//! ## Design
//! - Storage is an `Arc<Vec64<u8>>`, so clones and array slices are O(1) and never copy.
//! - All allocations are 64-byte aligned, which keeps typed `bytemuck` casts to any
//!   primitive width valid for the whole buffer.
//!
//! ## Behaviour
//! - **Read-only ops** (`as_slice`, `typed`) operate directly on the shared bytes.
//! - **Mutating ops** (`as_mut_slice`, `typed_mut`) are copy-on-write: a buffer that is
//!   shared with another array is cloned first, so writes never leak into the source of
//!   a kernel call.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use bytemuck::Pod;
use vec64::Vec64;

const MAX_PREVIEW: usize = 32;

/// # Buffer
///
/// Reference-counted, 64-byte aligned byte buffer with copy-on-write mutation.
#[derive(Clone, PartialEq)]
pub struct Buffer {
    bytes: Arc<Vec64<u8>>,
}

impl Buffer {
    /// Construct from an owned aligned vector.
    #[inline]
    pub fn from_vec64(v: Vec64<u8>) -> Self {
        Self { bytes: Arc::new(v) }
    }

    /// Copy typed values into a new aligned buffer.
    #[inline]
    pub fn from_slice<T: Pod>(values: &[T]) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(values);
        let mut v = Vec64::with_capacity(bytes.len());
        v.extend_from_slice(bytes);
        Self::from_vec64(v)
    }

    /// A zero-filled buffer of `n_bytes`.
    #[inline]
    pub fn zeroed(n_bytes: usize) -> Self {
        let mut v = Vec64::with_capacity(n_bytes);
        v.resize(n_bytes, 0);
        Self::from_vec64(v)
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.len() == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Mutable bytes, cloning the storage first if it is shared.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.bytes).as_mut_slice()
    }

    /// Reinterprets the whole buffer as `&[T]`.
    ///
    /// # Panics
    /// If the byte length is not a multiple of `size_of::<T>()`.
    #[inline]
    pub fn typed<T: Pod>(&self) -> &[T] {
        // An empty Vec64 holds a dangling, byte-aligned pointer.
        if self.is_empty() {
            return &[];
        }
        bytemuck::cast_slice(self.as_slice())
    }

    /// Reinterprets the whole buffer as `&mut [T]`, copy-on-write.
    #[inline]
    pub fn typed_mut<T: Pod>(&mut self) -> &mut [T] {
        if self.is_empty() {
            return &mut [];
        }
        bytemuck::cast_slice_mut(self.as_mut_slice())
    }

    /// Base address of the storage.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// True if another `Buffer` shares this storage.
    #[inline]
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.bytes) > 1
    }

    /// True if both buffers point at the same storage.
    #[inline]
    pub fn ptr_eq(&self, other: &Buffer) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::from_vec64(Vec64::with_capacity(0))
    }
}

impl From<Vec64<u8>> for Buffer {
    #[inline]
    fn from(v: Vec64<u8>) -> Self {
        Self::from_vec64(v)
    }
}

impl AsRef<[u8]> for Buffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Debug for Buffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let bytes = self.as_slice();
        let preview = &bytes[..bytes.len().min(MAX_PREVIEW)];
        f.debug_struct("Buffer")
            .field("len", &bytes.len())
            .field("shared", &self.is_shared())
            .field("bytes", &preview)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_and_typed() {
        let b = Buffer::from_slice(&[1i32, -2, 3]);
        assert_eq!(b.len(), 12);
        assert_eq!(b.typed::<i32>(), &[1, -2, 3]);
    }

    #[test]
    fn test_zeroed() {
        let b = Buffer::zeroed(16);
        assert_eq!(b.len(), 16);
        assert!(b.as_slice().iter().all(|&x| x == 0));
        assert_eq!(b.typed::<u64>(), &[0, 0]);
    }

    #[test]
    fn test_aligned_to_64() {
        let b = Buffer::from_slice(&[1u8, 2, 3]);
        assert_eq!(b.as_ptr() as usize % 64, 0);
    }

    #[test]
    fn test_clone_shares_storage() {
        let a = Buffer::from_slice(&[1u32, 2]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(a.is_shared());
    }

    #[test]
    fn test_copy_on_write() {
        let a = Buffer::from_slice(&[1u32, 2]);
        let mut b = a.clone();
        b.typed_mut::<u32>()[0] = 99;
        assert_eq!(a.typed::<u32>(), &[1, 2]);
        assert_eq!(b.typed::<u32>(), &[99, 2]);
        assert!(!a.ptr_eq(&b));
        assert!(!a.is_shared());
    }

    #[test]
    fn test_unique_mutation_in_place() {
        let mut a = Buffer::zeroed(4);
        let before = a.as_ptr();
        a.as_mut_slice()[0] = 7;
        assert_eq!(a.as_ptr(), before);
        assert_eq!(a.as_slice()[0], 7);
    }

    #[test]
    fn test_empty() {
        let b = Buffer::default();
        assert!(b.is_empty());
        assert_eq!(b.typed::<f64>().len(), 0);
    }
}
