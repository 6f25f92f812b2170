// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Scalar Exec Module
//!
//! Lets a unary kernel written only for arrays also run on a scalar input.
//!
//! The scalar path materialises a one-element array, runs the array kernel on
//! it and reads the single result back. That is deliberately the slow path:
//! it exists so kernels without native scalar handling still accept scalars,
//! with correct null propagation.

use std::sync::Arc;

use log::trace;

use crate::{ArrayData, ExecBatch, ExecValue, KernelContext, KernelError, NullHandling, Scalar};

/// Type-erased kernel entry point, as stored in dispatch tables.
///
/// Writes its result into the output slot, whose shape and type the caller
/// fixes up front. Cloning shares the underlying closure.
pub type ArrayKernelExec = Arc<
    dyn Fn(&mut KernelContext, &ExecBatch, &mut ExecValue) -> Result<(), KernelError>
        + Send
        + Sync,
>;

/// Boxes a closure as an [`ArrayKernelExec`].
#[inline]
pub fn array_kernel_exec<F>(f: F) -> ArrayKernelExec
where
    F: Fn(&mut KernelContext, &ExecBatch, &mut ExecValue) -> Result<(), KernelError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Wraps an array-only unary kernel so it also accepts a scalar input.
///
/// ## Behaviour
/// - **Array input** (or array output): calls `exec` unchanged.
/// - **Scalar input whose output `null_handling` proves null**: writes a typed
///   null scalar to `out` and returns. Nothing is allocated and `exec` is not called.
/// - **Any other scalar input**: builds a one-element input array from the
///   scalar and a one-element output array of the output scalar's type, calls
///   `exec` on them, then writes element `0` of the output, value and validity,
///   back to `out` as a scalar.
///
/// Only the first input is forwarded. Errors from allocation and from `exec`
/// are returned as-is, leaving `out` untouched. If `exec` leaves an empty or
/// non-primitive array in the output slot, the result cannot be read back and
/// `KernelError::LengthMismatch` or `KernelError::UnsupportedType` is returned.
///
/// ## Validity preallocation
/// Under `Intersection` and `ComputedPreallocate` the output array gets an
/// all-set validity bitmap before `exec` runs, unless the policy already
/// proves the output valid.
///
/// # Example
/// ```rust
/// use kernel_unpack::*;
///
/// let negate = array_kernel_exec(|_ctx, batch, out| {
///     let input = get_primitive_arg(batch[0].array().unwrap());
///     let dst = out.array_mut().unwrap().values_mut::<i64>();
///     for (o, v) in dst.iter_mut().zip(input.values::<i64>()) {
///         *o = -v;
///     }
///     Ok(())
/// });
/// let exec = trivial_scalar_unary_as_arrays_exec_default(negate);
///
/// let mut ctx = KernelContext::new();
/// let batch = ExecBatch::new(vec![Scalar::from(-5i64).into()], 1);
/// let mut out = ExecValue::Scalar(Scalar::Int64(None));
/// exec(&mut ctx, &batch, &mut out).unwrap();
/// assert_eq!(out, ExecValue::Scalar(Scalar::from(5i64)));
/// ```
pub fn trivial_scalar_unary_as_arrays_exec(
    exec: ArrayKernelExec,
    null_handling: NullHandling,
) -> ArrayKernelExec {
    array_kernel_exec(
        move |ctx: &mut KernelContext, batch: &ExecBatch, out: &mut ExecValue| {
            let (Some(ExecValue::Scalar(input)), Some(out_scalar)) =
                (batch.values.first(), out.scalar().cloned())
            else {
                return exec(ctx, batch, out);
            };

            let input_valid = [input.is_valid()];
            if null_handling.short_circuits(&input_valid) {
                trace!(
                    "{null_handling}: null {} scalar input, returning null {}",
                    input.arrow_type(),
                    out_scalar.arrow_type()
                );
                *out = ExecValue::Scalar(Scalar::null(&out_scalar.arrow_type()));
                return Ok(());
            }

            trace!(
                "{null_handling}: running {} scalar through a one-element array",
                input.arrow_type()
            );
            let in_arr = ArrayData::from_scalar_in(ctx, input, 1)?;
            let mut out_arr = ArrayData::from_scalar_in(ctx, &out_scalar.with_placeholder(), 1)?;
            if null_handling.preallocates_validity()
                && null_handling.output_validity(&input_valid) != Some(true)
            {
                out_arr.set_null_mask(Some(ctx.allocate_bitmap(1, true)?));
            }

            let args = ExecBatch::new(vec![ExecValue::Array(in_arr)], 1);
            let mut out_slot = ExecValue::Array(out_arr);
            exec(ctx, &args, &mut out_slot)?;

            *out = ExecValue::Scalar(match out_slot {
                ExecValue::Array(arr) => read_back(&arr)?,
                ExecValue::Scalar(s) => s,
            });
            Ok(())
        },
    )
}

/// Element `0` of the array a kernel left in the output slot.
fn read_back(arr: &ArrayData) -> Result<Scalar, KernelError> {
    if !arr.dtype.is_primitive() {
        return Err(KernelError::UnsupportedType(format!(
            "cannot read a {} kernel output back as a scalar",
            arr.dtype
        )));
    }
    if arr.is_empty() {
        return Err(KernelError::LengthMismatch(
            "kernel output has no element to read back as a scalar".to_string(),
        ));
    }
    Ok(arr.scalar_at(0))
}

/// [`trivial_scalar_unary_as_arrays_exec`] with `NullHandling::Intersection`.
#[inline]
pub fn trivial_scalar_unary_as_arrays_exec_default(exec: ArrayKernelExec) -> ArrayKernelExec {
    trivial_scalar_unary_as_arrays_exec(exec, NullHandling::default())
}
