//! # **kernel-unpack** - *Kernel Argument Unpacking for Columnar Compute*
//!
//! The seam between a type-erased kernel dispatch layer and packed physical memory.
//!
//! ## Overview
//! - [`get_validity_bitmap`] returns the optional null bitmap of an array.
//! - [`get_bit_width`] maps a primitive [`ArrowType`] to its physical width in bits.
//! - [`get_primitive_arg`] unpacks an [`ArrayData`] into a [`PrimitiveArg`] view, once per
//!   kernel call, so kernel bodies never re-derive validity, width or offset logic.
//! - [`trivial_scalar_unary_as_arrays_exec`] lets a kernel written only for arrays also
//!   accept a [`Scalar`] input, with a [`NullHandling`] short-circuit for null scalars.
//!
//! ## Addressing convention
//! `PrimitiveArg::data` is always the *unshifted* base of the element buffer.
//! - Byte-aligned types: the first element starts at byte `offset * (bit_width / 8)`.
//!   Apply the shift once, e.g. via [`PrimitiveArg::values`].
//! - Bit-packed booleans: element `i` is bit `offset + i` of `data`.
//!
//! Validity bitmaps follow the bit-packed rule in both cases.

pub mod enums {
    pub mod error;
    pub mod exec_value;
    pub mod null_count;
    pub mod null_handling;
    pub mod scalar;
    pub mod time_units;
}

pub mod structs {
    pub mod array_data;
    pub mod bitmask;
    pub mod buffer;
    pub mod exec_batch;
    pub mod kernel_context;
}

pub mod ffi {
    pub mod arrow_dtype;
}

pub mod traits {
    pub mod type_unions;
}

pub mod kernels;

pub mod aliases;
pub mod macros;

pub use aliases::{BitWidth, Length, Offset};

pub use enums::error::KernelError;
pub use enums::exec_value::ExecValue;
pub use enums::null_count::NullCount;
pub use enums::null_handling::NullHandling;
pub use enums::scalar::Scalar;
pub use enums::time_units::TimeUnit;

pub use structs::array_data::ArrayData;
pub use structs::bitmask::Bitmask;
pub use structs::buffer::Buffer;
pub use structs::exec_batch::ExecBatch;
pub use structs::kernel_context::KernelContext;

pub use ffi::arrow_dtype::{ArrowType, CategoricalIndexType};
pub use traits::type_unions::{Float, Integer, NativeType, Numeric, Primitive};

pub use kernels::bit_width::get_bit_width;
pub use kernels::primitive_arg::{Addressing, PrimitiveArg, get_primitive_arg};
pub use kernels::scalar_exec::{
    ArrayKernelExec, array_kernel_exec, trivial_scalar_unary_as_arrays_exec,
    trivial_scalar_unary_as_arrays_exec_default,
};
pub use kernels::validity::{get_validity_bitmap, get_validity_mask};

pub use vec64::Vec64;
