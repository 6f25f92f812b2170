//! # NullCount Module
//!
//! Tagged null count for arrays whose count may not have been computed yet.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// # NullCount
///
/// Number of nulls in an array window, or `Unknown` if it has not been computed.
///
/// ## Behaviour
/// - Only `Known(0)` proves the absence of nulls.
/// - `Unknown` is treated exactly like a non-zero count by [`may_have_nulls`](Self::may_have_nulls),
///   so kernels take the null-aware path whenever the count is not proven zero.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub enum NullCount {
    Known(usize),
    #[default]
    Unknown,
}

impl NullCount {
    /// True unless the count is known to be exactly zero.
    #[inline]
    pub fn may_have_nulls(&self) -> bool {
        !matches!(self, NullCount::Known(0))
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        matches!(self, NullCount::Known(_))
    }

    /// The count, if known.
    #[inline]
    pub fn known(&self) -> Option<usize> {
        match self {
            NullCount::Known(n) => Some(*n),
            NullCount::Unknown => None,
        }
    }
}

impl From<usize> for NullCount {
    #[inline]
    fn from(n: usize) -> Self {
        NullCount::Known(n)
    }
}

impl Display for NullCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NullCount::Known(n) => write!(f, "{n}"),
            NullCount::Unknown => f.write_str("unknown"),
        }
    }
}
