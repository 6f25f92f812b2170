//! # ExecValue Module
//!
//! One tagged kernel argument or output slot: an array or a scalar.

use crate::{ArrayData, ArrowType, Scalar};

/// # ExecValue
///
/// Shape-tagged value crossing the kernel calling convention.
///
/// ## Description
/// - Kernel inputs arrive in an `ExecBatch` as a sequence of these.
/// - The output sink is a `&mut ExecValue` whose shape and type are fixed by
///   the caller before the kernel runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecValue {
    Array(ArrayData),
    Scalar(Scalar),
}

impl ExecValue {
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, ExecValue::Array(_))
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, ExecValue::Scalar(_))
    }

    /// Logical type of the array or scalar.
    pub fn arrow_type(&self) -> ArrowType {
        match self {
            ExecValue::Array(a) => a.dtype.clone(),
            ExecValue::Scalar(s) => s.arrow_type(),
        }
    }

    /// Array length, or `1` for a scalar.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            ExecValue::Array(a) => a.len,
            ExecValue::Scalar(_) => 1,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn array(&self) -> Option<&ArrayData> {
        match self {
            ExecValue::Array(a) => Some(a),
            ExecValue::Scalar(_) => None,
        }
    }

    #[inline]
    pub fn array_mut(&mut self) -> Option<&mut ArrayData> {
        match self {
            ExecValue::Array(a) => Some(a),
            ExecValue::Scalar(_) => None,
        }
    }

    #[inline]
    pub fn scalar(&self) -> Option<&Scalar> {
        match self {
            ExecValue::Scalar(s) => Some(s),
            ExecValue::Array(_) => None,
        }
    }

    #[inline]
    pub fn scalar_mut(&mut self) -> Option<&mut Scalar> {
        match self {
            ExecValue::Scalar(s) => Some(s),
            ExecValue::Array(_) => None,
        }
    }
}

impl From<ArrayData> for ExecValue {
    #[inline]
    fn from(a: ArrayData) -> Self {
        ExecValue::Array(a)
    }
}

impl From<Scalar> for ExecValue {
    #[inline]
    fn from(s: Scalar) -> Self {
        ExecValue::Scalar(s)
    }
}
