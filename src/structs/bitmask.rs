//! # **Bitmask Module** - *Bit-packed validity and boolean storage*
//!
//! Arrow-compatible, LSB-first packed bitmask over a shared [`Buffer`].
//!
//! ## Purpose
//! - Validity (null) masks for all array types (1 = valid, 0 = null).
//! - Element storage for `Boolean` arrays.
//!
//! ## Behaviour
//! - Bit `i` lives in byte `i >> 3` at position `i & 7`.
//! - A mask attached to a sliced array is *not* shifted: the array's offset applies
//!   to it exactly as it does to the element buffer.
//! - Trailing padding bits beyond `len` are kept cleared.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use crate::Buffer;

/// Reads bit `i` of an LSB-first packed byte slice.
#[inline(always)]
pub fn get_bit(bytes: &[u8], i: usize) -> bool {
    (bytes[i >> 3] >> (i & 7)) & 1 != 0
}

/// Sets or clears bit `i` of an LSB-first packed byte slice.
#[inline(always)]
pub fn set_bit(bytes: &mut [u8], i: usize, value: bool) {
    let bit = 1u8 << (i & 7);
    if value {
        bytes[i >> 3] |= bit;
    } else {
        bytes[i >> 3] &= !bit;
    }
}

/// Number of bytes needed to hold `n_bits`.
#[inline(always)]
pub fn bytes_for_bits(n_bits: usize) -> usize {
    (n_bits + 7) / 8
}

/// # Bitmask
///
/// 64-byte aligned packed bitmask.
///
/// ### Description
/// - Used for `Boolean` element data and as the validity mask for all datatypes.
/// - Arrow-compatible: LSB = first element, 1 = set/valid, 0 = cleared/null.
/// - Clones share the underlying bytes; [`set`](Self::set) is copy-on-write.
///
/// # Example
/// ```rust
/// use kernel_unpack::Bitmask;
///
/// let mut m = Bitmask::new_set_all(10, false);
/// m.set(3, true);
/// m.set(7, true);
/// assert!(m.get(3) && m.get(7));
/// assert_eq!(m.count_ones(), 2);
/// ```
#[derive(Clone, PartialEq, Default)]
pub struct Bitmask {
    pub bits: Buffer,
    pub len: usize,
}

impl Bitmask {
    /// Wraps an existing packed buffer holding `len` logical bits.
    ///
    /// # Panics
    /// If the buffer is shorter than `len` bits.
    #[inline]
    pub fn new(bits: Buffer, len: usize) -> Self {
        assert!(
            bits.len() >= bytes_for_bits(len),
            "Bitmask::new: buffer of {} bytes cannot hold {} bits",
            bits.len(),
            len
        );
        Self { bits, len }
    }

    /// Create new mask, length = `len`, all bits set if `set` else cleared.
    #[inline]
    pub fn new_set_all(len: usize, set: bool) -> Self {
        let mut mask = Self {
            bits: Buffer::zeroed(bytes_for_bits(len)),
            len,
        };
        if set {
            mask.bits.as_mut_slice().fill(0xFF);
            mask.mask_trailing_bits();
        }
        mask
    }

    /// Construct from a slice of bools (true = set).
    #[inline]
    pub fn from_bools(bits: &[bool]) -> Self {
        let mut mask = Self::new_set_all(bits.len(), false);
        let dst = mask.bits.as_mut_slice();
        for (i, &b) in bits.iter().enumerate() {
            if b {
                dst[i >> 3] |= 1u8 << (i & 7);
            }
        }
        mask
    }

    /// Copies the first `len` bits of a packed byte slice into a new mask.
    pub fn from_bytes(bytes: impl AsRef<[u8]>, len: usize) -> Self {
        let src = bytes.as_ref();
        let n_bytes = bytes_for_bits(len);
        assert!(
            src.len() >= n_bytes,
            "Bitmask::from_bytes: {} bytes cannot hold {} bits",
            src.len(),
            len
        );
        let mut mask = Self {
            bits: Buffer::from_slice(&src[..n_bytes]),
            len,
        };
        mask.mask_trailing_bits();
        mask
    }

    /// Ensures all unused bits above self.len are zeroed.
    #[inline]
    pub fn mask_trailing_bits(&mut self) {
        if self.len == 0 || (self.len & 7) == 0 {
            return;
        }
        let last = bytes_for_bits(self.len) - 1;
        let mask = (1u8 << (self.len & 7)) - 1;
        self.bits.as_mut_slice()[last] &= mask;
    }

    /// Returns the logical length of the bitmask
    ///
    /// *Excludes padding*
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns bit `idx`.
    ///
    /// # Panics
    /// If `idx >= self.len`.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        assert!(
            idx < self.len,
            "Bitmask::get out of bounds (idx={idx}, len={})",
            self.len
        );
        get_bit(self.bits.as_slice(), idx)
    }

    /// Set or clear bit at index `i`. Copies the bytes first if they are shared.
    ///
    /// # Panics
    /// If `i >= self.len`.
    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        assert!(
            i < self.len,
            "Bitmask::set out of bounds (idx={i}, len={})",
            self.len
        );
        set_bit(self.bits.as_mut_slice(), i, value);
    }

    /// Count number of set (1) bits.
    #[inline]
    pub fn count_ones(&self) -> usize {
        let bytes = self.bits.as_slice();
        let full_bytes = self.len / 8;
        let mut count = bytes[..full_bytes]
            .iter()
            .map(|&b| b.count_ones() as usize)
            .sum::<usize>();
        let rem = self.len & 7;
        if rem != 0 {
            let mask = (1u8 << rem) - 1;
            count += (bytes[full_bytes] & mask).count_ones() as usize;
        }
        count
    }

    /// Count number of cleared (0) bits.
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    /// Count cleared bits in the window `[offset, offset + len)`.
    ///
    /// This is the null count of an array slice sharing this mask.
    pub fn count_zeros_in(&self, offset: usize, len: usize) -> usize {
        assert!(
            offset + len <= self.len,
            "Bitmask::count_zeros_in out of bounds"
        );
        let bytes = self.bits.as_slice();
        (offset..offset + len)
            .filter(|&i| !get_bit(bytes, i))
            .count()
    }

    /// Returns true if all bits set (i.e. no nulls for a validity mask).
    #[inline]
    pub fn all_set(&self) -> bool {
        self.count_ones() == self.len
    }

    /// Returns the packed bytes, including trailing padding.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_slice()
    }

    /// Returns the pointer to the start of the mask.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.bits.as_ptr()
    }

    /// Copies bits `[offset, offset + len)` into a new, zero-offset mask.
    pub fn slice_clone(&self, offset: usize, len: usize) -> Self {
        assert!(
            offset + len <= self.len,
            "Bitmask::slice_clone out of bounds"
        );
        let mut out = Bitmask::new_set_all(len, false);
        let src = self.bits.as_slice();
        let dst = out.bits.as_mut_slice();
        for i in 0..len {
            if get_bit(src, offset + i) {
                dst[i >> 3] |= 1u8 << (i & 7);
            }
        }
        out
    }
}

impl AsRef<[u8]> for Bitmask {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bits.as_slice()
    }
}

impl Debug for Bitmask {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Bitmask")
            .field("len", &self.len)
            .field("ones", &self.count_ones())
            .field("zeros", &self.count_zeros())
            .field("buffer", &self.bits)
            .finish()
    }
}

impl Display for Bitmask {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(
            f,
            "Bitmask [{} bits] (ones: {}, zeros: {})",
            self.len,
            self.count_ones(),
            self.count_zeros()
        )?;

        const MAX_PREVIEW: usize = 64;
        let bytes = self.bits.as_slice();
        write!(f, "[")?;
        for i in 0..usize::min(self.len, MAX_PREVIEW) {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", if get_bit(bytes, i) { '1' } else { '0' })?;
        }
        if self.len > MAX_PREVIEW {
            write!(f, " … ({} total)", self.len)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmask_new_set_get() {
        let mut m = Bitmask::new_set_all(10, false);
        for i in 0..10 {
            assert!(!m.get(i));
        }
        m.set(3, true);
        assert!(m.get(3));
        m.set(3, false);
        assert!(!m.get(3));
    }

    #[test]
    fn test_new_set_all_masks_trailing_bits() {
        let m = Bitmask::new_set_all(10, true);
        assert_eq!(m.as_bytes(), &[0xFF, 0b0000_0011]);
        assert!(m.all_set());
        assert_eq!(m.count_zeros(), 0);
    }

    #[test]
    fn test_from_bools_lsb_first() {
        let m = Bitmask::from_bools(&[true, true, false, true, true]);
        assert_eq!(m.as_bytes(), &[0b0001_1011]);
        assert_eq!(m.count_zeros(), 1);
    }

    #[test]
    fn test_from_bytes_truncates_padding() {
        let m = Bitmask::from_bytes([0xFFu8, 0xFF], 12);
        assert_eq!(m.len(), 12);
        assert_eq!(m.as_bytes(), &[0xFF, 0x0F]);
    }

    #[test]
    fn test_count_zeros_in_window() {
        let m = Bitmask::from_bools(&[true, false, true, false, false, true, true]);
        assert_eq!(m.count_zeros_in(0, 7), 3);
        assert_eq!(m.count_zeros_in(1, 3), 2);
        assert_eq!(m.count_zeros_in(5, 2), 0);
        assert_eq!(m.count_zeros_in(3, 0), 0);
    }

    #[test]
    fn test_set_is_copy_on_write() {
        let a = Bitmask::new_set_all(8, true);
        let mut b = a.clone();
        b.set(0, false);
        assert!(a.get(0));
        assert!(!b.get(0));
    }

    #[test]
    fn test_slice_clone() {
        let mut m = Bitmask::new_set_all(10, false);
        m.set(2, true);
        m.set(5, true);
        let sub = m.slice_clone(2, 4);
        assert_eq!(sub.len(), 4);
        assert!(sub.get(0) && sub.get(3));
        assert!(!sub.get(1) && !sub.get(2));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds() {
        let m = Bitmask::new_set_all(3, true);
        m.get(3);
    }

    #[test]
    fn test_free_bit_helpers() {
        let mut bytes = [0u8; 2];
        set_bit(&mut bytes, 9, true);
        assert!(get_bit(&bytes, 9));
        assert_eq!(bytes, [0, 0b10]);
        set_bit(&mut bytes, 9, false);
        assert_eq!(bytes, [0, 0]);
        assert_eq!(bytes_for_bits(0), 0);
        assert_eq!(bytes_for_bits(9), 2);
    }

    #[test]
    fn test_display() {
        let m = Bitmask::from_bools(&[true, false, true]);
        let s = m.to_string();
        assert!(s.contains("ones: 2, zeros: 1"));
        assert!(s.ends_with("[1 0 1]"));
    }
}
