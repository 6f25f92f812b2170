//! # ExecBatch Module
//!
//! Ordered kernel inputs plus the logical batch length.

use std::ops::Index;

use crate::ExecValue;

/// # ExecBatch
///
/// The input side of one kernel call.
///
/// `len` is the logical row count: the length of the array inputs, or `1`
/// when every input is a scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecBatch {
    pub values: Vec<ExecValue>,
    pub len: usize,
}

impl ExecBatch {
    #[inline]
    pub fn new(values: Vec<ExecValue>, len: usize) -> Self {
        Self { values, len }
    }

    /// Number of inputs.
    #[inline]
    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Index<usize> for ExecBatch {
    type Output = ExecValue;

    #[inline]
    fn index(&self, i: usize) -> &ExecValue {
        &self.values[i]
    }
}
