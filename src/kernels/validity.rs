// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Validity Module
//!
//! Read-only access to an array's declared null bitmap.

use crate::{ArrayData, Bitmask};

/// Returns the packed bytes of the array's validity bitmap, or `None` if the
/// array declares no bitmap.
///
/// `None` means every element is valid. It never means "unknown".
/// The bitmap is unshifted: element `i` of the array is bit `arr.offset + i`.
#[inline]
pub fn get_validity_bitmap(arr: &ArrayData) -> Option<&[u8]> {
    arr.null_mask.as_ref().map(Bitmask::as_bytes)
}

/// As [`get_validity_bitmap`], returning the `Bitmask` itself.
#[inline]
pub fn get_validity_mask(arr: &ArrayData) -> Option<&Bitmask> {
    arr.null_mask.as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::bitmask::get_bit;
    use crate::{ArrowType, Buffer, NullCount, arr_data, arr_data_opt};

    #[test]
    fn test_absent_when_undeclared() {
        let arr = arr_data![i32; 1, 2, 3];
        assert!(get_validity_bitmap(&arr).is_none());
        assert!(get_validity_mask(&arr).is_none());
    }

    #[test]
    fn test_present_bitmap_is_the_arrays_own() {
        let arr = arr_data_opt![u64; Some(1), None, Some(3)];
        let bytes = get_validity_bitmap(&arr).unwrap();
        assert_eq!(bytes.as_ptr(), arr.null_mask.as_ref().unwrap().as_ptr());
        assert!(get_bit(bytes, 0) && !get_bit(bytes, 1) && get_bit(bytes, 2));
    }

    #[test]
    fn test_zero_length_follows_declaration() {
        let no_mask = ArrayData::new(
            ArrowType::Int64,
            0,
            0,
            NullCount::Known(0),
            None,
            vec![Buffer::default()],
        );
        assert!(get_validity_bitmap(&no_mask).is_none());

        let empty_mask = ArrayData::new(
            ArrowType::Int64,
            0,
            0,
            NullCount::Known(0),
            Some(Bitmask::new_set_all(0, true)),
            vec![Buffer::default()],
        );
        assert_eq!(get_validity_bitmap(&empty_mask), Some(&[][..]));
    }

    #[test]
    fn test_slice_keeps_unshifted_bitmap() {
        let arr = arr_data_opt![i32; Some(1), Some(2), None, Some(4)];
        let s = arr.slice(1, 3);
        let bytes = get_validity_bitmap(&s).unwrap();
        for i in 0..s.len {
            assert_eq!(get_bit(bytes, s.offset + i), s.is_valid(i));
        }
        assert!(!get_bit(bytes, s.offset + 1));
    }
}
