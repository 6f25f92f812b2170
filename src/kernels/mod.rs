// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Kernels Module
//!
//! Argument unpacking for primitive compute kernels, leaves first:
//! validity lookup, bit-width resolution, the `PrimitiveArg` view builder,
//! and the adapter that runs array-only kernels against scalar inputs.

pub mod bit_width;
pub mod primitive_arg;
pub mod scalar_exec;
pub mod validity;

pub use bit_width::get_bit_width;
pub use primitive_arg::{Addressing, PrimitiveArg, get_primitive_arg};
pub use scalar_exec::{
    ArrayKernelExec, array_kernel_exec, trivial_scalar_unary_as_arrays_exec,
    trivial_scalar_unary_as_arrays_exec_default,
};
pub use validity::{get_validity_bitmap, get_validity_mask};
