//! Integration tests for validity lookup, bit-width resolution and PrimitiveArg unpacking

use kernel_unpack::structs::bitmask::get_bit;
use kernel_unpack::{
    Addressing, ArrayData, ArrowType, Bitmask, Buffer, NullCount, arr_data, arr_data_opt,
    get_bit_width, get_primitive_arg, get_validity_bitmap,
};

/// A spread of primitive arrays: dense, nullable, sliced, empty and all-null.
fn sample_arrays() -> Vec<ArrayData> {
    let nullable = arr_data_opt![i32; Some(1), None, Some(3), Some(4), None, Some(6)];
    let bools = arr_data_opt![bool; Some(true), None, Some(false), Some(true), Some(true)];
    vec![
        arr_data![i64; 1, 2, 3],
        arr_data![f32; 0.5, -0.5],
        arr_data![u32;],
        nullable.clone(),
        nullable.slice(1, 4),
        nullable.slice(5, 0),
        bools.clone(),
        bools.slice(2, 3),
        ArrayData::new_null(ArrowType::UInt64, 4),
        ArrayData::new_null(ArrowType::Boolean, 9).slice(3, 5),
    ]
}

#[test]
fn test_identity_preservation() {
    for arr in sample_arrays() {
        let arg = get_primitive_arg(&arr);
        assert_eq!(arg.len, arr.len, "{:?}", arr.dtype);
        assert_eq!(arg.offset, arr.offset, "{:?}", arr.dtype);
        assert_eq!(arg.null_count, arr.null_count, "{:?}", arr.dtype);
        assert_eq!(arg.bit_width, get_bit_width(&arr.dtype));
        assert_eq!(arg.data.as_ptr(), arr.buffers[0].as_ptr());
    }
}

#[test]
fn test_validity_absent_iff_undeclared() {
    for arr in sample_arrays() {
        let bitmap = get_validity_bitmap(&arr);
        assert_eq!(bitmap.is_none(), arr.null_mask.is_none());
        assert_eq!(get_primitive_arg(&arr).validity, bitmap);
    }
}

#[test]
fn test_validity_bits_match_elements() {
    for arr in sample_arrays() {
        if let Some(bits) = get_validity_bitmap(&arr) {
            for i in 0..arr.len {
                assert_eq!(get_bit(bits, arr.offset + i), arr.is_valid(i));
            }
        }
    }
}

#[test]
fn test_bit_width_resolution() {
    assert_eq!(get_bit_width(&ArrowType::Boolean), 1);
    for t in ArrowType::signed_integer_types()
        .into_iter()
        .chain(ArrowType::unsigned_integer_types())
        .chain(ArrowType::floating_types())
    {
        let w = get_bit_width(&t);
        assert_eq!(Some(w), t.fixed_bit_width());
        assert!(w >= 8 && w % 8 == 0);
    }
}

#[test]
#[should_panic]
fn test_bit_width_large_string_panics() {
    get_bit_width(&ArrowType::LargeString);
}

#[test]
#[should_panic(expected = "not a fixed-width primitive")]
fn test_unpacking_string_array_panics() {
    let arr = ArrayData::new(
        ArrowType::String,
        0,
        0,
        NullCount::Known(0),
        None,
        vec![Buffer::default()],
    );
    get_primitive_arg(&arr);
}

#[test]
fn test_scenario_int32_with_null() {
    let arr = arr_data_opt![i32; Some(1), Some(2), None, Some(4), Some(5)];
    let arg = get_primitive_arg(&arr);

    assert_eq!(arg.bit_width, 32);
    assert_eq!(arg.len, 5);
    assert_eq!(arg.offset, 0);
    assert_eq!(arg.null_count, NullCount::Known(1));
    assert_eq!(arg.addressing(), Addressing::ByteAligned { byte_width: 4 });

    let bits = arg.validity.unwrap();
    let set: Vec<usize> = (0..5).filter(|&i| get_bit(bits, i)).collect();
    assert_eq!(set, vec![0, 1, 3, 4]);
    assert!(!get_bit(bits, 2));

    assert_eq!(arg.values::<i32>(), &[1, 2, 0, 4, 5]);
}

#[test]
fn test_scenario_boolean_offset_three() {
    let values: Vec<bool> = (0..13).map(|i| i % 3 == 0).collect();
    let parent = ArrayData::from_bools(&values);
    let arr = parent.slice(3, 10);
    assert_eq!(arr.len, 10);
    assert_eq!(arr.offset, 3);

    let arg = get_primitive_arg(&arr);
    assert_eq!(arg.bit_width, 1);
    assert_eq!(arg.addressing(), Addressing::BitPacked);

    // Unshifted: the view starts at the buffer base, not at byte 0 + 3 bits.
    assert_eq!(arg.data.as_ptr(), parent.buffers[0].as_ptr());
    for i in 0..10 {
        assert_eq!(get_bit(arg.data, 3 + i), values[3 + i]);
        assert_eq!(arg.bit(i), values[3 + i]);
    }
}

#[test]
fn test_sliced_numeric_shift_applied_once() {
    let parent = arr_data![u64; 10, 11, 12, 13, 14, 15];
    let arr = parent.slice(2, 3);
    let arg = get_primitive_arg(&arr);

    assert_eq!(arg.data.len(), parent.buffers[0].len());
    assert_eq!(arg.byte_offset(), 2 * 8);
    assert_eq!(arg.shifted_data(), &arg.data[16..40]);
    assert_eq!(arg.values::<u64>(), &[12, 13, 14]);
}

#[test]
fn test_unknown_null_count_may_have_nulls() {
    let parent = arr_data_opt![f64; Some(1.0), Some(2.0), None];
    let arr = parent.slice(0, 2);
    let arg = get_primitive_arg(&arr);
    assert_eq!(arg.null_count, NullCount::Unknown);
    assert!(arg.may_have_nulls());
    assert_eq!(arr.compute_null_count(), 0);
}

#[test]
fn test_known_zero_with_mask_is_null_free() {
    let arr = ArrayData::new(
        ArrowType::Int32,
        3,
        0,
        NullCount::Known(0),
        Some(Bitmask::new_set_all(3, true)),
        vec![Buffer::from_slice(&[1i32, 2, 3])],
    );
    let arg = get_primitive_arg(&arr);
    assert!(arg.validity.is_some());
    assert!(!arg.may_have_nulls());
}

#[test]
fn test_declared_nulls_without_mask_may_have_nulls() {
    for null_count in [NullCount::Known(2), NullCount::Unknown] {
        let arr = ArrayData::new(
            ArrowType::Int32,
            2,
            0,
            null_count,
            None,
            vec![Buffer::from_slice(&[0i32, 0])],
        );
        let arg = get_primitive_arg(&arr);
        assert!(arg.validity.is_none());
        assert!(arg.may_have_nulls(), "{null_count}");
    }
}

#[test]
fn test_unpacking_is_idempotent_and_read_only() {
    let arr = arr_data_opt![i64; Some(1), None];
    let before = arr.clone();
    let first = get_primitive_arg(&arr);
    let second = get_primitive_arg(&arr);
    assert_eq!(first, second);
    assert_eq!(arr, before);
}

#[cfg(feature = "datetime")]
#[test]
fn test_temporal_unpacks_as_physical_integer() {
    use kernel_unpack::TimeUnit;

    let arr = arr_data![i64; 1_000, 2_000].with_dtype(ArrowType::Timestamp(TimeUnit::Milliseconds));
    let arg = get_primitive_arg(&arr);
    assert_eq!(arg.bit_width, 64);
    assert_eq!(arg.values::<i64>(), &[1_000, 2_000]);

    let arr = arr_data![i32; 7].with_dtype(ArrowType::Date32);
    assert_eq!(get_primitive_arg(&arr).bit_width, 32);
}
