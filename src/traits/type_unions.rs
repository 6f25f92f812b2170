use std::fmt::Debug;

use num_traits::{Float as NumFloat, Num, NumCast, PrimInt, ToPrimitive};

use crate::{ArrowType, Scalar, impl_native_type};

/// Trait for types valid as primitive, i.e., floats, integers, and booleans.
///
/// Useful when specifying `my_fn::<T: Primitive>() {}`.
pub trait Primitive: Copy + Default + PartialEq + Debug + Send + Sync + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}
impl Primitive for i8 {}
impl Primitive for i16 {}
impl Primitive for i32 {}
impl Primitive for i64 {}
impl Primitive for u8 {}
impl Primitive for u16 {}
impl Primitive for u32 {}
impl Primitive for u64 {}
impl Primitive for bool {}

/// Byte-aligned primitive with a fixed physical layout.
///
/// Everything except `bool`, which is bit-packed and read through
/// `PrimitiveArg::bit` instead of a typed slice.
pub trait NativeType: Primitive + bytemuck::Pod {
    /// The logical type an array of `Self` carries by default.
    fn arrow_type() -> ArrowType;

    /// Wraps a possibly-null value as the matching `Scalar` variant.
    fn into_scalar(value: Option<Self>) -> Scalar;

    /// Physical width in bits.
    #[inline]
    fn bit_width() -> usize {
        std::mem::size_of::<Self>() * 8
    }
}

impl_native_type!(
    #[cfg(feature = "extended_numeric_types")]
    i8 => Int8,
    #[cfg(feature = "extended_numeric_types")]
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    #[cfg(feature = "extended_numeric_types")]
    u8 => UInt8,
    #[cfg(feature = "extended_numeric_types")]
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
);

/// Trait for types valid as numerical.
///
/// Extends and constrains the *num-traits* `Num` implementation to fit the crate's type universe.
pub trait Numeric: NativeType + Num + NumCast + ToPrimitive {}
impl<T> Numeric for T where T: NativeType + Num + NumCast + ToPrimitive {}

/// Trait for types valid as integer elements in columnar arrays.
pub trait Integer: Numeric + PrimInt {}
impl<T> Integer for T where T: Numeric + PrimInt {}

/// Trait for types valid as float elements in columnar arrays.
pub trait Float: Numeric + NumFloat {}
impl<T> Float for T where T: Numeric + NumFloat {}
