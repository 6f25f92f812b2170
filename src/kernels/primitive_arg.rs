// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Primitive Arg Module
//!
//! Normalised, borrowed view over a primitive array's physical storage.
//!
//! ## Addressing convention
//! `PrimitiveArg::data` is always the *unshifted* base of the element buffer.
//! The two layouts then differ only in how the window offset is applied:
//! - [`Addressing::ByteAligned`]: the window starts at byte `offset * byte_width`.
//!   Apply it once per call with [`PrimitiveArg::shifted_data`] or
//!   [`PrimitiveArg::values`], never per element.
//! - [`Addressing::BitPacked`]: no byte shift exists. Element `i` is bit
//!   `offset + i` of `data`. Use [`PrimitiveArg::bit`].
//!
//! Validity follows the bit-packed rule for every type.

use crate::kernels::bit_width::get_bit_width;
use crate::kernels::validity::get_validity_bitmap;
use crate::structs::bitmask::get_bit;
use crate::{ArrayData, BitWidth, Length, NativeType, NullCount, Offset};

/// How elements are located in [`PrimitiveArg::data`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Addressing {
    /// One bit per element, LSB-first. `bit_width == 1`.
    BitPacked,
    /// Whole bytes per element. `bit_width == byte_width * 8`.
    ByteAligned { byte_width: usize },
}

/// # PrimitiveArg
///
/// Transient, non-owning view of one primitive kernel input.
///
/// ## Description
/// - Built once per kernel call by [`get_primitive_arg`], so kernel bodies never
///   re-derive validity, width or offset logic.
/// - `len`, `offset` and `null_count` are copied verbatim from the source array.
/// - Borrows the source; it cannot outlive the `ArrayData` it was built from.
///
/// ## Null count
/// Only `NullCount::Known(0)` proves the absence of nulls. `Unknown` is handled
/// like a non-zero count, see [`may_have_nulls`](Self::may_have_nulls).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimitiveArg<'a> {
    /// Unshifted validity bitmap, `None` if the array declares none.
    pub validity: Option<&'a [u8]>,
    /// Unshifted element buffer.
    pub data: &'a [u8],
    pub bit_width: BitWidth,
    pub len: Length,
    pub offset: Offset,
    pub null_count: NullCount,
}

impl<'a> PrimitiveArg<'a> {
    #[inline]
    pub fn addressing(&self) -> Addressing {
        if self.bit_width == 1 {
            Addressing::BitPacked
        } else {
            Addressing::ByteAligned {
                byte_width: self.bit_width / 8,
            }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// False only when the null count is `Known(0)`.
    ///
    /// A missing bitmap alone proves nothing: the count is read as declared.
    #[inline]
    pub fn may_have_nulls(&self) -> bool {
        self.null_count.may_have_nulls()
    }

    /// True if element `i` of the window is non-null.
    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        assert!(i < self.len, "PrimitiveArg::is_valid: index {i} out of bounds");
        self.validity
            .map_or(true, |bits| get_bit(bits, self.offset + i))
    }

    /// Byte position of the window's first element in `data`.
    ///
    /// # Panics
    /// For bit-packed inputs, which have no byte shift.
    #[inline]
    pub fn byte_offset(&self) -> usize {
        match self.addressing() {
            Addressing::ByteAligned { byte_width } => self.offset * byte_width,
            Addressing::BitPacked => {
                panic!("PrimitiveArg::byte_offset: bit-packed data is addressed by bit index")
            }
        }
    }

    /// The window's bytes, with the offset shift applied.
    ///
    /// # Panics
    /// For bit-packed inputs.
    #[inline]
    pub fn shifted_data(&self) -> &'a [u8] {
        let start = self.byte_offset();
        let end = start + self.len * (self.bit_width / 8);
        let data: &'a [u8] = self.data;
        &data[start..end]
    }

    /// The window's elements as `&[T]`, with the offset shift applied.
    ///
    /// # Panics
    /// If `T` is not `bit_width` bits wide.
    #[inline]
    pub fn values<T: NativeType>(&self) -> &'a [T] {
        assert_eq!(
            T::bit_width(),
            self.bit_width,
            "PrimitiveArg::values: cannot read {}-bit data as {}",
            self.bit_width,
            std::any::type_name::<T>()
        );
        let bytes = self.shifted_data();
        if bytes.is_empty() {
            return &[];
        }
        bytemuck::cast_slice(bytes)
    }

    /// Bit-packed element `i` of the window, read at bit `offset + i`.
    ///
    /// # Panics
    /// For byte-aligned inputs, or if `i` is out of bounds.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        assert_eq!(
            self.addressing(),
            Addressing::BitPacked,
            "PrimitiveArg::bit: data is byte-aligned"
        );
        assert!(i < self.len, "PrimitiveArg::bit: index {i} out of bounds");
        get_bit(self.data, self.offset + i)
    }
}

/// Unpacks a primitive array into a [`PrimitiveArg`].
///
/// Resolves validity and bit width once each and copies `len`, `offset` and
/// `null_count` verbatim. Allocates nothing and never mutates `arr`.
///
/// # Panics
/// If `arr.dtype` is not primitive or `arr` has no element buffer.
pub fn get_primitive_arg(arr: &ArrayData) -> PrimitiveArg<'_> {
    let validity = get_validity_bitmap(arr);
    let bit_width = get_bit_width(&arr.dtype);
    let data = match arr.buffers.first() {
        Some(buf) => buf.as_slice(),
        None => panic!("get_primitive_arg: {} array has no data buffer", arr.dtype),
    };
    PrimitiveArg {
        validity,
        data,
        bit_width,
        len: arr.len,
        offset: arr.offset,
        null_count: arr.null_count,
    }
}
