//! # NullHandling Module
//!
//! How a kernel's output validity is derived from its inputs.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// # NullHandling
///
/// Null-propagation policy attached to a kernel.
///
/// ## Variants
/// - `Intersection`: output is null wherever any input is null. The default for
///   elementwise arithmetic and logical kernels.
/// - `ComputedPreallocate`: the kernel decides validity and writes it into a
///   preallocated bitmap.
/// - `ComputedNoPreallocate`: the kernel decides validity and allocates its own bitmap.
/// - `OutputNotNull`: the output is never null, whatever the inputs.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub enum NullHandling {
    #[default]
    Intersection,
    ComputedPreallocate,
    ComputedNoPreallocate,
    OutputNotNull,
}

impl NullHandling {
    /// Output validity decided from input validity alone, without running the kernel.
    ///
    /// - `Some(false)`: output is provably null.
    /// - `Some(true)`: output is provably valid.
    /// - `None`: the kernel body decides.
    #[inline]
    pub fn output_validity(&self, inputs_valid: &[bool]) -> Option<bool> {
        match self {
            NullHandling::Intersection => Some(inputs_valid.iter().all(|&v| v)),
            NullHandling::OutputNotNull => Some(true),
            NullHandling::ComputedPreallocate | NullHandling::ComputedNoPreallocate => None,
        }
    }

    /// True when a null output is proven, so the kernel need not run.
    #[inline]
    pub fn short_circuits(&self, inputs_valid: &[bool]) -> bool {
        self.output_validity(inputs_valid) == Some(false)
    }

    /// True when the output validity bitmap should be allocated before the kernel runs.
    #[inline]
    pub fn preallocates_validity(&self) -> bool {
        matches!(
            self,
            NullHandling::Intersection | NullHandling::ComputedPreallocate
        )
    }
}

impl Display for NullHandling {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NullHandling::Intersection => f.write_str("Intersection"),
            NullHandling::ComputedPreallocate => f.write_str("ComputedPreallocate"),
            NullHandling::ComputedNoPreallocate => f.write_str("ComputedNoPreallocate"),
            NullHandling::OutputNotNull => f.write_str("OutputNotNull"),
        }
    }
}
