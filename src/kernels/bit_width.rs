// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Bit Width Module
//!
//! Physical element widths for primitive logical types.

use crate::{ArrowType, BitWidth};

/// Physical width in bits of one element of `dtype`.
///
/// `1` for `Boolean`, `N` for an `N`-bit integer, float or temporal type.
///
/// # Panics
/// If `dtype` is not primitive. Dispatch must restrict this path to primitive
/// types, so reaching it with e.g. `String` is a bug in the caller.
#[inline]
pub fn get_bit_width(dtype: &ArrowType) -> BitWidth {
    match dtype.fixed_bit_width() {
        Some(width) => width,
        None => panic!("get_bit_width: {dtype} is not a fixed-width primitive type"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoricalIndexType;

    #[test]
    fn test_boolean_is_one_bit() {
        assert_eq!(get_bit_width(&ArrowType::Boolean), 1);
    }

    #[test]
    fn test_declared_widths() {
        assert_eq!(get_bit_width(&ArrowType::Int32), 32);
        assert_eq!(get_bit_width(&ArrowType::Int64), 64);
        assert_eq!(get_bit_width(&ArrowType::UInt32), 32);
        assert_eq!(get_bit_width(&ArrowType::UInt64), 64);
        assert_eq!(get_bit_width(&ArrowType::Float32), 32);
        assert_eq!(get_bit_width(&ArrowType::Float64), 64);
    }

    #[cfg(feature = "extended_numeric_types")]
    #[test]
    fn test_extended_widths() {
        assert_eq!(get_bit_width(&ArrowType::Int8), 8);
        assert_eq!(get_bit_width(&ArrowType::UInt8), 8);
        assert_eq!(get_bit_width(&ArrowType::Int16), 16);
        assert_eq!(get_bit_width(&ArrowType::UInt16), 16);
    }

    #[test]
    fn test_every_primitive_resolves() {
        for t in ArrowType::primitive_types() {
            let w = get_bit_width(&t);
            assert!(w == 1 || w % 8 == 0, "{t}: {w}");
        }
    }

    #[test]
    #[should_panic(expected = "not a fixed-width primitive")]
    fn test_string_panics() {
        get_bit_width(&ArrowType::String);
    }

    #[test]
    #[should_panic(expected = "not a fixed-width primitive")]
    fn test_dictionary_panics() {
        get_bit_width(&ArrowType::Dictionary(CategoricalIndexType::UInt32));
    }

    #[test]
    #[should_panic(expected = "not a fixed-width primitive")]
    fn test_null_type_panics() {
        get_bit_width(&ArrowType::Null);
    }
}
