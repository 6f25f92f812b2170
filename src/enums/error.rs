//! # Error Module - *Kernel Error Type*
//!
//! Defines the recoverable error type for kernel execution.
//!
//! ## Scope
//! - Resource failures (allocation refused by the context limit or by the allocator).
//! - Errors raised by kernel bodies themselves, which the scalar adapter propagates
//!   unchanged.
//! - Kernel output the scalar adapter cannot read back as a scalar.
//! - Precondition violations (e.g. asking for the bit width of a string type) are *not*
//!   represented here: they are dispatch bugs and panic instead.

use std::error::Error;
use std::fmt;

/// Catch all error type for kernel execution.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// An allocation of `requested` bytes was refused.
    /// `limit` is the context's memory limit, or `None` if the allocator itself failed.
    OutOfMemory {
        requested: usize,
        limit: Option<usize>,
    },
    InvalidArguments(String),
    /// A kernel produced fewer elements than its caller reads back.
    LengthMismatch(String),
    /// A kernel produced data of a type its caller cannot read back.
    UnsupportedType(String),
    /// Kernel-specific failure, e.g. overflow under a checked arithmetic mode.
    Execution(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::OutOfMemory { requested, limit } => match limit {
                Some(limit) => write!(
                    f,
                    "Out of memory: allocating {} bytes would exceed the limit of {} bytes.",
                    requested, limit
                ),
                None => write!(f, "Out of memory: failed to allocate {} bytes.", requested),
            },
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::UnsupportedType(msg) => write!(f, "Unsupported type: {}", msg),
            KernelError::Execution(msg) => write!(f, "Execution error: {}", msg),
        }
    }
}

impl Error for KernelError {}
