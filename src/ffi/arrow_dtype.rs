//! # ArrowDType Module - *Logical type descriptors*
//!
//! Representations of the *Apache Arrow* logical types that kernels are dispatched on.
//!
//! ## Overview
//! - Covers boolean, integer and floating-point primitives, optional fixed-width temporal
//!   types, and the non-primitive types a dispatch layer may still hand over by mistake
//!   (`Null`, strings, dictionaries).
//! - [`ArrowType::fixed_bit_width`] is the single source of truth for physical widths.
//!   `kernels::bit_width::get_bit_width` is the asserting front door over it.
//! - Type groups (`numeric_types`, `primitive_types`, ...) are provided for registration
//!   code that builds one dispatch table entry per physical type.
//!
//! ## Copyright Notice
//! - This crate is not affiliated with the `Apache Arrow` project.
//! - The term `Apache Arrow` is a trademark of the *Apache Software Foundation*.

use std::fmt::{Display, Formatter, Result as FmtResult};

#[cfg(feature = "datetime")]
use crate::enums::time_units::TimeUnit;

/// # ArrowType
///
/// Logical type of an array or scalar.
///
/// ## Primitive vs. non-primitive
/// - **Primitive**: `Boolean` (1 bit) and every fixed-width numeric or temporal type
///   (a whole number of bytes). These can be unpacked into a `PrimitiveArg`.
/// - **Non-primitive**: `Null`, `String`, `LargeString`, `Dictionary`. Asking for their
///   bit width is a dispatch bug and panics.
///
/// ## Notes
/// - Temporal types share the physical layout of their integer counterparts:
///   `Date32` is 32 bits, `Date64`, `Timestamp` and `Duration` are 64 bits.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum ArrowType {
    Null,
    Boolean,
    #[cfg(feature = "extended_numeric_types")]
    Int8,
    #[cfg(feature = "extended_numeric_types")]
    Int16,
    Int32,
    Int64,
    #[cfg(feature = "extended_numeric_types")]
    UInt8,
    #[cfg(feature = "extended_numeric_types")]
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    #[cfg(feature = "datetime")]
    Date32,
    #[cfg(feature = "datetime")]
    Date64,
    #[cfg(feature = "datetime")]
    Timestamp(TimeUnit),
    #[cfg(feature = "datetime")]
    Duration(TimeUnit),
    String,
    LargeString,

    // Integer size for the categorical dictionary key.
    Dictionary(CategoricalIndexType),
}

/// # CategoricalIndexType
///
/// Unsigned integer width used for dictionary keys.
///
/// Dictionary arrays are not unpacked by this crate; the key width is carried
/// only so the type descriptor round-trips faithfully.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum CategoricalIndexType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

impl ArrowType {
    /// Physical width of one element in bits, or `None` for non-primitive types.
    ///
    /// Booleans are bit-packed and report `1`.
    #[inline]
    pub fn fixed_bit_width(&self) -> Option<usize> {
        match self {
            ArrowType::Boolean => Some(1),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::Int8 | ArrowType::UInt8 => Some(8),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::Int16 | ArrowType::UInt16 => Some(16),
            ArrowType::Int32 | ArrowType::UInt32 | ArrowType::Float32 => Some(32),
            ArrowType::Int64 | ArrowType::UInt64 | ArrowType::Float64 => Some(64),
            #[cfg(feature = "datetime")]
            ArrowType::Date32 => Some(32),
            #[cfg(feature = "datetime")]
            ArrowType::Date64 | ArrowType::Timestamp(_) | ArrowType::Duration(_) => Some(64),
            ArrowType::Null
            | ArrowType::String
            | ArrowType::LargeString
            | ArrowType::Dictionary(_) => None,
        }
    }

    /// True for boolean and fixed-width numeric/temporal types.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.fixed_bit_width().is_some()
    }

    /// True when elements are bit-packed rather than byte-aligned.
    #[inline]
    pub fn is_bit_packed(&self) -> bool {
        matches!(self, ArrowType::Boolean)
    }

    #[inline]
    pub fn is_signed_integer(&self) -> bool {
        match self {
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::Int8 | ArrowType::Int16 => true,
            ArrowType::Int32 | ArrowType::Int64 => true,
            _ => false,
        }
    }

    #[inline]
    pub fn is_unsigned_integer(&self) -> bool {
        match self {
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::UInt8 | ArrowType::UInt16 => true,
            ArrowType::UInt32 | ArrowType::UInt64 => true,
            _ => false,
        }
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    #[inline]
    pub fn is_floating(&self) -> bool {
        matches!(self, ArrowType::Float32 | ArrowType::Float64)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_floating()
    }

    #[cfg(feature = "datetime")]
    #[inline]
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            ArrowType::Date32 | ArrowType::Date64 | ArrowType::Timestamp(_) | ArrowType::Duration(_)
        )
    }

    /// Signed integer types, narrowest first.
    pub fn signed_integer_types() -> Vec<ArrowType> {
        let mut out = Vec::with_capacity(4);
        #[cfg(feature = "extended_numeric_types")]
        out.extend([ArrowType::Int8, ArrowType::Int16]);
        out.extend([ArrowType::Int32, ArrowType::Int64]);
        out
    }

    /// Unsigned integer types, narrowest first.
    pub fn unsigned_integer_types() -> Vec<ArrowType> {
        let mut out = Vec::with_capacity(4);
        #[cfg(feature = "extended_numeric_types")]
        out.extend([ArrowType::UInt8, ArrowType::UInt16]);
        out.extend([ArrowType::UInt32, ArrowType::UInt64]);
        out
    }

    /// Signed then unsigned integer types.
    pub fn integer_types() -> Vec<ArrowType> {
        let mut out = Self::signed_integer_types();
        out.extend(Self::unsigned_integer_types());
        out
    }

    pub fn floating_types() -> Vec<ArrowType> {
        vec![ArrowType::Float32, ArrowType::Float64]
    }

    /// Integer then floating-point types.
    pub fn numeric_types() -> Vec<ArrowType> {
        let mut out = Self::integer_types();
        out.extend(Self::floating_types());
        out
    }

    /// Every type `fixed_bit_width` accepts, with one representative unit
    /// for the parameterised temporal types.
    pub fn primitive_types() -> Vec<ArrowType> {
        let mut out = vec![ArrowType::Boolean];
        out.extend(Self::numeric_types());
        #[cfg(feature = "datetime")]
        out.extend([
            ArrowType::Date32,
            ArrowType::Date64,
            ArrowType::Timestamp(TimeUnit::default()),
            ArrowType::Duration(TimeUnit::default()),
        ]);
        out
    }
}

impl Display for ArrowType {
    /// Render the ArrowType as its variant name, including associated units where applicable.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ArrowType::Null => f.write_str("Null"),
            ArrowType::Boolean => f.write_str("Boolean"),

            #[cfg(feature = "extended_numeric_types")]
            ArrowType::Int8 => f.write_str("Int8"),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::Int16 => f.write_str("Int16"),
            ArrowType::Int32 => f.write_str("Int32"),
            ArrowType::Int64 => f.write_str("Int64"),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::UInt8 => f.write_str("UInt8"),
            #[cfg(feature = "extended_numeric_types")]
            ArrowType::UInt16 => f.write_str("UInt16"),
            ArrowType::UInt32 => f.write_str("UInt32"),
            ArrowType::UInt64 => f.write_str("UInt64"),

            ArrowType::Float32 => f.write_str("Float32"),
            ArrowType::Float64 => f.write_str("Float64"),

            #[cfg(feature = "datetime")]
            ArrowType::Date32 => f.write_str("Date32"),
            #[cfg(feature = "datetime")]
            ArrowType::Date64 => f.write_str("Date64"),
            #[cfg(feature = "datetime")]
            ArrowType::Timestamp(unit) => write!(f, "Timestamp({unit})"),
            #[cfg(feature = "datetime")]
            ArrowType::Duration(unit) => write!(f, "Duration({unit})"),

            ArrowType::String => f.write_str("String"),
            ArrowType::LargeString => f.write_str("LargeString"),

            ArrowType::Dictionary(key_type) => write!(f, "Dictionary({key_type})"),
        }
    }
}

impl Display for CategoricalIndexType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CategoricalIndexType::UInt8 => f.write_str("UInt8"),
            CategoricalIndexType::UInt16 => f.write_str("UInt16"),
            CategoricalIndexType::UInt32 => f.write_str("UInt32"),
            CategoricalIndexType::UInt64 => f.write_str("UInt64"),
        }
    }
}
