//! # **KernelContext** - *Per-invocation execution state*
//!
//! Passed mutably to every kernel call. Owns the allocation budget for the
//! temporaries a kernel (or the scalar adapter around it) creates.

use log::debug;
use vec64::Vec64;

use crate::structs::bitmask::bytes_for_bits;
use crate::{Bitmask, Buffer, KernelError};

/// # KernelContext
///
/// Execution context for one kernel invocation.
///
/// ## Behaviour
/// - `memory_limit` caps the total bytes handed out by [`allocate`](Self::allocate).
///   `None` means unlimited.
/// - Allocation never aborts: both a refused budget and a failed reservation
///   surface as [`KernelError::OutOfMemory`].
/// - Not shared between threads. Each concurrent call gets its own context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelContext {
    memory_limit: Option<usize>,
    bytes_allocated: usize,
}

impl KernelContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that refuses allocations beyond `limit` bytes in total.
    #[inline]
    pub fn with_memory_limit(limit: usize) -> Self {
        Self {
            memory_limit: Some(limit),
            bytes_allocated: 0,
        }
    }

    #[inline]
    pub fn memory_limit(&self) -> Option<usize> {
        self.memory_limit
    }

    /// Total bytes handed out so far.
    #[inline]
    pub fn bytes_allocated(&self) -> usize {
        self.bytes_allocated
    }

    /// Bytes left under the limit, or `None` if unlimited.
    #[inline]
    pub fn remaining(&self) -> Option<usize> {
        self.memory_limit
            .map(|limit| limit.saturating_sub(self.bytes_allocated))
    }

    /// Allocates a zero-filled, 64-byte aligned buffer of `n_bytes`.
    pub fn allocate(&mut self, n_bytes: usize) -> Result<Buffer, KernelError> {
        if let Some(limit) = self.memory_limit {
            if self.bytes_allocated.saturating_add(n_bytes) > limit {
                debug!(
                    "allocation of {n_bytes} bytes refused: {} of {limit} bytes already in use",
                    self.bytes_allocated
                );
                return Err(KernelError::OutOfMemory {
                    requested: n_bytes,
                    limit: Some(limit),
                });
            }
        }

        let mut v: Vec64<u8> = Vec64::new();
        v.try_reserve_exact(n_bytes).map_err(|_| {
            debug!("allocator failed to reserve {n_bytes} bytes");
            KernelError::OutOfMemory {
                requested: n_bytes,
                limit: None,
            }
        })?;
        v.resize(n_bytes, 0);

        self.bytes_allocated += n_bytes;
        Ok(Buffer::from_vec64(v))
    }

    /// Allocates a bitmask of `n_bits`, all set if `set` else cleared.
    pub fn allocate_bitmap(&mut self, n_bits: usize, set: bool) -> Result<Bitmask, KernelError> {
        let mut bits = self.allocate(bytes_for_bits(n_bits))?;
        if set {
            bits.as_mut_slice().fill(0xFF);
        }
        let mut mask = Bitmask::new(bits, n_bits);
        mask.mask_trailing_bits();
        Ok(mask)
    }
}
