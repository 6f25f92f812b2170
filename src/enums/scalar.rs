//! # Scalar Module - *Single Value Container*
//!
//! Contains the Scalar type for holding a single, possibly-null primitive value.
//!
//! ## Purpose
//! - The scalar side of the kernel calling convention: wherever an `ArrayData`
//!   is accepted as a kernel input, a `Scalar` of the same type may appear instead.
//! - Every variant carries an `Option`, so a null scalar keeps its logical type.
//!   A null `Int32` and a null `Float64` are distinct values.

use std::convert::From;

#[cfg(feature = "datetime")]
use crate::TimeUnit;
use crate::{ArrowType, impl_scalar_accessors};

/// # Scalar
///
/// Typed, nullable scalar literal covering the primitive types.
///
/// ## Description
/// - One variant per primitive `ArrowType`, holding `None` when null.
/// - Includes accessor methods to avoid needing to match to a known type.
///   There are also `try_<type>` methods that return `None` instead of panicking.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Boolean(Option<bool>),
    // Signed integers
    #[cfg(feature = "extended_numeric_types")]
    Int8(Option<i8>),
    #[cfg(feature = "extended_numeric_types")]
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    // Unsigned integers
    #[cfg(feature = "extended_numeric_types")]
    UInt8(Option<u8>),
    #[cfg(feature = "extended_numeric_types")]
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    // Floats
    Float32(Option<f32>),
    Float64(Option<f64>),
    // Temporal, physically i32/i64
    #[cfg(feature = "datetime")]
    Date32(Option<i32>),
    #[cfg(feature = "datetime")]
    Date64(Option<i64>),
    #[cfg(feature = "datetime")]
    Timestamp(Option<i64>, TimeUnit),
    #[cfg(feature = "datetime")]
    Duration(Option<i64>, TimeUnit),
}

/// Applies `$body` to the inner `Option` of any variant, binding it as `$v`.
macro_rules! with_inner {
    ($s:expr, $v:ident => $body:expr) => {
        match $s {
            Scalar::Boolean($v) => $body,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::Int8($v) => $body,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::Int16($v) => $body,
            Scalar::Int32($v) => $body,
            Scalar::Int64($v) => $body,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::UInt8($v) => $body,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::UInt16($v) => $body,
            Scalar::UInt32($v) => $body,
            Scalar::UInt64($v) => $body,
            Scalar::Float32($v) => $body,
            Scalar::Float64($v) => $body,
            #[cfg(feature = "datetime")]
            Scalar::Date32($v) => $body,
            #[cfg(feature = "datetime")]
            Scalar::Date64($v) => $body,
            #[cfg(feature = "datetime")]
            Scalar::Timestamp($v, _) => $body,
            #[cfg(feature = "datetime")]
            Scalar::Duration($v, _) => $body,
        }
    };
}

impl Scalar {
    /// Logical type of the scalar. Defined for null scalars too.
    pub fn arrow_type(&self) -> ArrowType {
        match self {
            Scalar::Boolean(_) => ArrowType::Boolean,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::Int8(_) => ArrowType::Int8,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::Int16(_) => ArrowType::Int16,
            Scalar::Int32(_) => ArrowType::Int32,
            Scalar::Int64(_) => ArrowType::Int64,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::UInt8(_) => ArrowType::UInt8,
            #[cfg(feature = "extended_numeric_types")]
            Scalar::UInt16(_) => ArrowType::UInt16,
            Scalar::UInt32(_) => ArrowType::UInt32,
            Scalar::UInt64(_) => ArrowType::UInt64,
            Scalar::Float32(_) => ArrowType::Float32,
            Scalar::Float64(_) => ArrowType::Float64,
            #[cfg(feature = "datetime")]
            Scalar::Date32(_) => ArrowType::Date32,
            #[cfg(feature = "datetime")]
            Scalar::Date64(_) => ArrowType::Date64,
            #[cfg(feature = "datetime")]
            Scalar::Timestamp(_, unit) => ArrowType::Timestamp(*unit),
            #[cfg(feature = "datetime")]
            Scalar::Duration(_, unit) => ArrowType::Duration(*unit),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        with_inner!(self, v => v.is_some())
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        !self.is_valid()
    }

    /// Typed null of the given logical type.
    ///
    /// # Panics
    /// If `dtype` is not primitive. There is no scalar representation for
    /// strings, dictionaries or the `Null` type.
    pub fn null(dtype: &ArrowType) -> Self {
        match dtype {
            ArrowType::Boolean => Scalar::Boolean(None),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::Int8 => Scalar::Int8(None),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::Int16 => Scalar::Int16(None),
            ArrowType::Int32 => Scalar::Int32(None),
            ArrowType::Int64 => Scalar::Int64(None),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::UInt8 => Scalar::UInt8(None),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::UInt16 => Scalar::UInt16(None),
            ArrowType::UInt32 => Scalar::UInt32(None),
            ArrowType::UInt64 => Scalar::UInt64(None),
            ArrowType::Float32 => Scalar::Float32(None),
            ArrowType::Float64 => Scalar::Float64(None),
            #[cfg(feature = "datetime")]
            ArrowType::Date32 => Scalar::Date32(None),
            #[cfg(feature = "datetime")]
            ArrowType::Date64 => Scalar::Date64(None),
            #[cfg(feature = "datetime")]
            ArrowType::Timestamp(unit) => Scalar::Timestamp(None, *unit),
            #[cfg(feature = "datetime")]
            ArrowType::Duration(unit) => Scalar::Duration(None, *unit),
            other => panic!("Scalar::null: no scalar representation for non-primitive type {other}"),
        }
    }

    /// A valid scalar of the same type: `self` if valid, otherwise the type's zero value.
    ///
    /// Used to seed placeholder slots whose value is never read.
    pub fn with_placeholder(&self) -> Self {
        let mut out = self.clone();
        with_inner!(&mut out, v => {
            if v.is_none() {
                *v = Some(Default::default());
            }
        });
        out
    }
}

impl_scalar_accessors!(
    bool, try_bool => Boolean: bool,
    #[cfg(feature = "extended_numeric_types")]
    i8, try_i8 => Int8: i8,
    #[cfg(feature = "extended_numeric_types")]
    i16, try_i16 => Int16: i16,
    i32, try_i32 => Int32: i32,
    i64, try_i64 => Int64: i64,
    #[cfg(feature = "extended_numeric_types")]
    u8, try_u8 => UInt8: u8,
    #[cfg(feature = "extended_numeric_types")]
    u16, try_u16 => UInt16: u16,
    u32, try_u32 => UInt32: u32,
    u64, try_u64 => UInt64: u64,
    f32, try_f32 => Float32: f32,
    f64, try_f64 => Float64: f64,
);

#[cfg(feature = "datetime")]
impl Scalar {
    /// Raw temporal value (days, milliseconds or unit ticks), or `None` if null
    /// or not temporal. `Date32` widens to `i64`.
    #[inline]
    pub fn try_temporal(&self) -> Option<i64> {
        match self {
            Scalar::Date32(v) => v.map(i64::from),
            Scalar::Date64(v) | Scalar::Timestamp(v, _) | Scalar::Duration(v, _) => *v,
            _ => None,
        }
    }
}

macro_rules! impl_scalar_from {
    ($variant:ident: $($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Scalar {
                #[inline] fn from(v: $t) -> Self { Scalar::$variant(Some(v)) }
            }
            impl From<Option<$t>> for Scalar {
                #[inline] fn from(v: Option<$t>) -> Self { Scalar::$variant(v) }
            }
        )+
    };
}

impl_scalar_from!(Boolean: bool);
#[cfg(feature = "extended_numeric_types")]
impl_scalar_from!(Int8: i8);
#[cfg(feature = "extended_numeric_types")]
impl_scalar_from!(Int16: i16);
impl_scalar_from!(Int32: i32);
impl_scalar_from!(Int64: i64);
#[cfg(feature = "extended_numeric_types")]
impl_scalar_from!(UInt8: u8);
#[cfg(feature = "extended_numeric_types")]
impl_scalar_from!(UInt16: u16);
impl_scalar_from!(UInt32: u32);
impl_scalar_from!(UInt64: u64);
impl_scalar_from!(Float32: f32);
impl_scalar_from!(Float64: f64);
