//! # **ArrayData** - *Type-erased primitive array storage*
//!
//! The array representation kernels receive through the dispatch layer.
//!
//! ## Layout
//! - `buffers[0]` holds the element storage.
//!   - Byte-aligned types: native little-endian values, element `i` at byte
//!     `(offset + i) * (bit_width / 8)`.
//!   - `Boolean`: LSB-first packed bits, element `i` at bit `offset + i`.
//! - `null_mask`, when present, is an *unshifted* validity bitmap: element `i`
//!   is valid iff bit `offset + i` is set. Absent means every element is valid.
//! - `null_count` may be [`NullCount::Unknown`] after slicing. Call
//!   [`compute_null_count`](ArrayData::compute_null_count) to resolve it.
//!
//! ## Sharing
//! Buffers are reference counted, so [`slice`](ArrayData::slice) and `clone`
//! never copy element data, and concurrent readers never contend.

use crate::structs::bitmask::{bytes_for_bits, get_bit};
use crate::{
    ArrowType, Bitmask, Buffer, KernelContext, KernelError, NativeType, NullCount, Scalar,
};

/// # ArrayData
///
/// Physical description of one primitive array or array slice.
///
/// ## Fields
/// - `dtype`: logical type.
/// - `len`: logical element count of this window.
/// - `offset`: element offset of this window into `buffers` and `null_mask`.
/// - `null_count`: nulls within the window, or `Unknown`.
/// - `null_mask`: optional validity bitmap, covering at least `offset + len` bits.
/// - `buffers`: physical buffers, element storage first.
#[derive(Clone, PartialEq, Debug)]
pub struct ArrayData {
    pub dtype: ArrowType,
    pub len: usize,
    pub offset: usize,
    pub null_count: NullCount,
    pub null_mask: Option<Bitmask>,
    pub buffers: Vec<Buffer>,
}

impl ArrayData {
    /// Assembles an array from its parts.
    ///
    /// # Panics
    /// For primitive types, if `buffers[0]` or `null_mask` is too short to cover
    /// `offset + len` elements.
    pub fn new(
        dtype: ArrowType,
        len: usize,
        offset: usize,
        null_count: NullCount,
        null_mask: Option<Bitmask>,
        buffers: Vec<Buffer>,
    ) -> Self {
        let arr = Self {
            dtype,
            len,
            offset,
            null_count,
            null_mask,
            buffers,
        };
        arr.validate();
        arr
    }

    fn validate(&self) {
        let end = self.offset + self.len;
        if let Some(mask) = &self.null_mask {
            assert!(
                mask.len() >= end,
                "ArrayData: null mask of {} bits cannot cover offset {} + len {}",
                mask.len(),
                self.offset,
                self.len
            );
        }
        if let Some(width) = self.dtype.fixed_bit_width() {
            let needed = if width == 1 {
                bytes_for_bits(end)
            } else {
                end * (width / 8)
            };
            let have = self.buffers.first().map_or(0, |b| b.len());
            assert!(
                have >= needed,
                "ArrayData: {} data buffer of {have} bytes cannot hold {end} elements",
                self.dtype
            );
        }
    }

    /// Dense, null-free array copied from `values`.
    pub fn from_slice<T: NativeType>(values: &[T]) -> Self {
        Self {
            dtype: T::arrow_type(),
            len: values.len(),
            offset: 0,
            null_count: NullCount::Known(0),
            null_mask: None,
            buffers: vec![Buffer::from_slice(values)],
        }
    }

    /// Nullable array. `None` slots hold the type's zero value.
    pub fn from_options<T: NativeType>(values: &[Option<T>]) -> Self {
        let data: Vec<T> = values.iter().map(|v| v.unwrap_or_default()).collect();
        let validity: Vec<bool> = values.iter().map(Option::is_some).collect();
        let mask = Bitmask::from_bools(&validity);
        Self {
            dtype: T::arrow_type(),
            len: values.len(),
            offset: 0,
            null_count: NullCount::Known(mask.count_zeros()),
            null_mask: Some(mask),
            buffers: vec![Buffer::from_slice(&data)],
        }
    }

    /// Dense, null-free boolean array.
    pub fn from_bools(values: &[bool]) -> Self {
        Self {
            dtype: ArrowType::Boolean,
            len: values.len(),
            offset: 0,
            null_count: NullCount::Known(0),
            null_mask: None,
            buffers: vec![Bitmask::from_bools(values).bits],
        }
    }

    /// Nullable boolean array. `None` slots hold `false`.
    pub fn from_opt_bools(values: &[Option<bool>]) -> Self {
        let data: Vec<bool> = values.iter().map(|v| v.unwrap_or(false)).collect();
        let validity: Vec<bool> = values.iter().map(Option::is_some).collect();
        let mask = Bitmask::from_bools(&validity);
        Self {
            dtype: ArrowType::Boolean,
            len: values.len(),
            offset: 0,
            null_count: NullCount::Known(mask.count_zeros()),
            null_mask: Some(mask),
            buffers: vec![Bitmask::from_bools(&data).bits],
        }
    }

    /// Relabels the logical type, e.g. `i32` storage as `Date32`.
    ///
    /// # Panics
    /// If the physical widths differ.
    pub fn with_dtype(mut self, dtype: ArrowType) -> Self {
        assert_eq!(
            self.dtype.fixed_bit_width(),
            dtype.fixed_bit_width(),
            "ArrayData::with_dtype: cannot relabel {} as {}",
            self.dtype,
            dtype
        );
        self.dtype = dtype;
        self
    }

    /// All-null array of a primitive type.
    ///
    /// # Panics
    /// If `dtype` is not primitive.
    pub fn new_null(dtype: ArrowType, len: usize) -> Self {
        let width = dtype
            .fixed_bit_width()
            .unwrap_or_else(|| panic!("ArrayData::new_null: {dtype} is not primitive"));
        let n_bytes = if width == 1 {
            bytes_for_bits(len)
        } else {
            len * (width / 8)
        };
        Self {
            dtype,
            len,
            offset: 0,
            null_count: NullCount::Known(len),
            null_mask: Some(Bitmask::new_set_all(len, false)),
            buffers: vec![Buffer::zeroed(n_bytes)],
        }
    }

    /// Materialises `len` copies of `scalar`, allocating through `ctx`.
    ///
    /// A null scalar yields zero-filled data with every validity bit cleared.
    pub fn from_scalar_in(
        ctx: &mut KernelContext,
        scalar: &Scalar,
        len: usize,
    ) -> Result<Self, KernelError> {
        let data = match scalar {
            Scalar::Boolean(v) => ctx.allocate_bitmap(len, v.unwrap_or(false))?.bits,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::Int8(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::Int16(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            Scalar::Int32(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            Scalar::Int64(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::UInt8(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::UInt16(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            Scalar::UInt32(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            Scalar::UInt64(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            Scalar::Float32(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            Scalar::Float64(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            #[cfg(feature = "datetime")]
            Scalar::Date32(v) => filled_in(ctx, v.unwrap_or_default(), len)?,
            #[cfg(feature = "datetime")]
            Scalar::Date64(v) | Scalar::Timestamp(v, _) | Scalar::Duration(v, _) => {
                filled_in(ctx, v.unwrap_or_default(), len)?
            }
        };

        let (null_mask, null_count) = if scalar.is_valid() {
            (None, NullCount::Known(0))
        } else {
            (Some(ctx.allocate_bitmap(len, false)?), NullCount::Known(len))
        };

        Ok(Self {
            dtype: scalar.arrow_type(),
            len,
            offset: 0,
            null_count,
            null_mask,
            buffers: vec![data],
        })
    }

    /// Zero-copy window `[offset, offset + len)` of this array.
    ///
    /// The null count stays known only when the parent is proven null-free.
    pub fn slice(&self, offset: usize, len: usize) -> Self {
        assert!(
            offset + len <= self.len,
            "ArrayData::slice: [{offset}, {}) out of bounds for length {}",
            offset + len,
            self.len
        );
        let null_count = if self.null_mask.is_none() || !self.null_count.may_have_nulls() {
            NullCount::Known(0)
        } else if offset == 0 && len == self.len {
            self.null_count
        } else {
            NullCount::Unknown
        };
        Self {
            dtype: self.dtype.clone(),
            len,
            offset: self.offset + offset,
            null_count,
            null_mask: self.null_mask.clone(),
            buffers: self.buffers.clone(),
        }
    }

    /// Number of nulls in the window, counting validity bits if not yet known.
    pub fn compute_null_count(&self) -> usize {
        match (self.null_count, &self.null_mask) {
            (NullCount::Known(n), _) => n,
            (NullCount::Unknown, None) => 0,
            (NullCount::Unknown, Some(mask)) => mask.count_zeros_in(self.offset, self.len),
        }
    }

    /// Resolves an `Unknown` null count in place and returns it.
    pub fn resolve_null_count(&mut self) -> usize {
        let n = self.compute_null_count();
        self.null_count = NullCount::Known(n);
        n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if element `i` of the window is non-null.
    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        assert!(i < self.len, "ArrayData::is_valid: index {i} out of bounds");
        self.null_mask
            .as_ref()
            .map_or(true, |m| get_bit(m.as_bytes(), self.offset + i))
    }

    #[inline]
    pub fn null_mask(&self) -> Option<&Bitmask> {
        self.null_mask.as_ref()
    }

    #[inline]
    pub fn null_mask_mut(&mut self) -> Option<&mut Bitmask> {
        self.null_mask.as_mut()
    }

    /// Replaces the validity bitmap. The null count is reset to match.
    pub fn set_null_mask(&mut self, mask: Option<Bitmask>) {
        self.null_count = if mask.is_some() {
            NullCount::Unknown
        } else {
            NullCount::Known(0)
        };
        self.null_mask = mask;
        self.validate();
    }

    fn assert_native<T: NativeType>(&self) {
        assert_eq!(
            self.dtype.fixed_bit_width(),
            Some(T::bit_width()),
            "ArrayData: cannot read {} storage as {}",
            self.dtype,
            std::any::type_name::<T>()
        );
    }

    /// The window's element values, already shifted by `offset`.
    ///
    /// # Panics
    /// If `T` does not match the physical width of `dtype`, or for booleans.
    pub fn values<T: NativeType>(&self) -> &[T] {
        self.assert_native::<T>();
        &self.buffers[0].typed::<T>()[self.offset..self.offset + self.len]
    }

    /// Mutable window values. Copies the data buffer first if it is shared.
    pub fn values_mut<T: NativeType>(&mut self) -> &mut [T] {
        self.assert_native::<T>();
        let (start, end) = (self.offset, self.offset + self.len);
        &mut self.buffers[0].typed_mut::<T>()[start..end]
    }

    /// Element `i` of the window. Null slots return their placeholder.
    #[inline]
    pub fn value<T: NativeType>(&self, i: usize) -> T {
        self.values::<T>()[i]
    }

    /// Boolean element `i` of the window. Null slots return their placeholder.
    pub fn bool_value(&self, i: usize) -> bool {
        assert!(
            self.dtype.is_bit_packed(),
            "ArrayData::bool_value: {} is not Boolean",
            self.dtype
        );
        assert!(i < self.len, "ArrayData::bool_value: index {i} out of bounds");
        get_bit(self.buffers[0].as_slice(), self.offset + i)
    }

    /// Element `i` of the window, value and validity, as a `Scalar`.
    ///
    /// # Panics
    /// If `dtype` is not primitive or `i` is out of bounds.
    pub fn scalar_at(&self, i: usize) -> Scalar {
        let arr = self;
        let valid = arr.is_valid(i);
        macro_rules! read {
            ($t:ty) => {
                valid.then(|| arr.value::<$t>(i))
            };
        }
        match &self.dtype {
            ArrowType::Boolean => Scalar::Boolean(valid.then(|| self.bool_value(i))),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::Int8 => Scalar::Int8(read!(i8)),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::Int16 => Scalar::Int16(read!(i16)),
            ArrowType::Int32 => Scalar::Int32(read!(i32)),
            ArrowType::Int64 => Scalar::Int64(read!(i64)),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::UInt8 => Scalar::UInt8(read!(u8)),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::UInt16 => Scalar::UInt16(read!(u16)),
            ArrowType::UInt32 => Scalar::UInt32(read!(u32)),
            ArrowType::UInt64 => Scalar::UInt64(read!(u64)),
            ArrowType::Float32 => Scalar::Float32(read!(f32)),
            ArrowType::Float64 => Scalar::Float64(read!(f64)),
            #[cfg(feature = "datetime")]
            ArrowType::Date32 => Scalar::Date32(read!(i32)),
            #[cfg(feature = "datetime")]
            ArrowType::Date64 => Scalar::Date64(read!(i64)),
            #[cfg(feature = "datetime")]
            ArrowType::Timestamp(unit) => Scalar::Timestamp(read!(i64), *unit),
            #[cfg(feature = "datetime")]
            ArrowType::Duration(unit) => Scalar::Duration(read!(i64), *unit),
            other => panic!("ArrayData::scalar_at: no scalar for non-primitive type {other}"),
        }
    }
}

/// `len` copies of `value` in a buffer drawn from `ctx`.
fn filled_in<T: NativeType>(
    ctx: &mut KernelContext,
    value: T,
    len: usize,
) -> Result<Buffer, KernelError> {
    let mut buf = ctx.allocate(len * std::mem::size_of::<T>())?;
    buf.typed_mut::<T>().fill(value);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr_data, arr_data_opt};

    #[test]
    fn test_from_slice() {
        let arr = arr_data![i32; 1, 2, 3];
        assert_eq!(arr.dtype, ArrowType::Int32);
        assert_eq!(arr.len, 3);
        assert_eq!(arr.null_count, NullCount::Known(0));
        assert!(arr.null_mask.is_none());
        assert_eq!(arr.values::<i32>(), &[1, 2, 3]);
    }

    #[test]
    fn test_from_options() {
        let arr = arr_data_opt![f64; Some(1.0), None, Some(3.0)];
        assert_eq!(arr.null_count, NullCount::Known(1));
        assert!(arr.is_valid(0));
        assert!(!arr.is_valid(1));
        assert_eq!(arr.value::<f64>(1), 0.0);
        assert_eq!(arr.scalar_at(1), Scalar::Float64(None));
        assert_eq!(arr.scalar_at(2), Scalar::Float64(Some(3.0)));
    }

    #[test]
    fn test_bools() {
        let arr = arr_data_opt![bool; Some(true), None, Some(false), Some(true)];
        assert_eq!(arr.dtype, ArrowType::Boolean);
        assert!(arr.bool_value(0));
        assert!(!arr.bool_value(2));
        assert_eq!(arr.scalar_at(1), Scalar::Boolean(None));
        assert_eq!(arr.scalar_at(3), Scalar::Boolean(Some(true)));
    }

    #[test]
    fn test_slice_shares_buffers_and_unshifts() {
        let arr = arr_data_opt![i64; Some(10), None, Some(30), Some(40), None];
        let s = arr.slice(2, 2);
        assert_eq!(s.offset, 2);
        assert_eq!(s.len, 2);
        assert!(s.buffers[0].ptr_eq(&arr.buffers[0]));
        assert_eq!(s.null_count, NullCount::Unknown);
        assert_eq!(s.compute_null_count(), 0);
        assert_eq!(s.values::<i64>(), &[30, 40]);

        let s2 = s.slice(1, 0);
        assert_eq!(s2.offset, 3);
        assert!(s2.is_empty());

        let mut tail = arr.slice(3, 2);
        assert_eq!(tail.resolve_null_count(), 1);
        assert_eq!(tail.null_count, NullCount::Known(1));
    }

    #[test]
    fn test_slice_of_null_free_keeps_known_zero() {
        let arr = arr_data![u32; 1, 2, 3, 4];
        assert_eq!(arr.slice(1, 2).null_count, NullCount::Known(0));
    }

    #[test]
    fn test_new_null() {
        let arr = ArrayData::new_null(ArrowType::Float32, 3);
        assert_eq!(arr.null_count, NullCount::Known(3));
        assert_eq!(arr.compute_null_count(), 3);
        assert_eq!(arr.buffers[0].len(), 12);
        assert_eq!(arr.scalar_at(0), Scalar::Float32(None));
    }

    #[test]
    #[should_panic(expected = "not primitive")]
    fn test_new_null_non_primitive() {
        ArrayData::new_null(ArrowType::String, 1);
    }

    #[test]
    fn test_from_scalar_in() {
        let mut ctx = KernelContext::new();
        let arr = ArrayData::from_scalar_in(&mut ctx, &Scalar::from(-5i32), 3).unwrap();
        assert_eq!(arr.values::<i32>(), &[-5, -5, -5]);
        assert!(arr.null_mask.is_none());
        assert_eq!(ctx.bytes_allocated(), 12);

        let arr = ArrayData::from_scalar_in(&mut ctx, &Scalar::UInt64(None), 2).unwrap();
        assert_eq!(arr.null_count, NullCount::Known(2));
        assert!(!arr.is_valid(0) && !arr.is_valid(1));
        assert_eq!(arr.values::<u64>(), &[0, 0]);

        let arr = ArrayData::from_scalar_in(&mut ctx, &Scalar::from(true), 9).unwrap();
        assert!((0..9).all(|i| arr.bool_value(i)));
    }

    #[test]
    fn test_from_scalar_in_respects_limit() {
        let mut ctx = KernelContext::with_memory_limit(4);
        let err = ArrayData::from_scalar_in(&mut ctx, &Scalar::from(1.0f64), 1).unwrap_err();
        assert!(matches!(err, KernelError::OutOfMemory { requested: 8, .. }));
    }

    #[cfg(feature = "datetime")]
    #[test]
    fn test_with_dtype_temporal() {
        use crate::TimeUnit;
        let arr = arr_data![i64; 5, 6].with_dtype(ArrowType::Timestamp(TimeUnit::Seconds));
        assert_eq!(arr.scalar_at(1), Scalar::Timestamp(Some(6), TimeUnit::Seconds));
    }

    #[test]
    #[should_panic(expected = "cannot relabel")]
    fn test_with_dtype_width_mismatch() {
        let _ = arr_data![i32; 1].with_dtype(ArrowType::Float64);
    }

    #[test]
    #[should_panic(expected = "cannot read Int32 storage")]
    fn test_values_wrong_width() {
        arr_data![i32; 1, 2].values::<i64>();
    }

    #[test]
    fn test_values_mut_is_copy_on_write() {
        let a = arr_data![f32; 1.0, 2.0];
        let mut b = a.clone();
        b.values_mut::<f32>()[0] = -1.0;
        assert_eq!(a.values::<f32>(), &[1.0, 2.0]);
        assert_eq!(b.values::<f32>(), &[-1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "cannot hold")]
    fn test_new_rejects_short_buffer() {
        ArrayData::new(
            ArrowType::Int64,
            2,
            1,
            NullCount::Known(0),
            None,
            vec![Buffer::from_slice(&[1i64, 2])],
        );
    }

    #[test]
    fn test_set_null_mask() {
        let mut arr = arr_data![i32; 1, 2, 3];
        arr.set_null_mask(Some(Bitmask::from_bools(&[true, false, true])));
        assert_eq!(arr.null_count, NullCount::Unknown);
        assert_eq!(arr.compute_null_count(), 1);
        arr.set_null_mask(None);
        assert_eq!(arr.null_count, NullCount::Known(0));
    }
}
