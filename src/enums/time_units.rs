//! # **TimeUnits Module** - *Arrow Temporal Units*
//!
//! `TimeUnit` tags the resolution of the fixed-width `Timestamp` and `Duration`
//! types. The unit is metadata only: it never changes the physical width, so a
//! `Timestamp(Nanoseconds)` array unpacks exactly like an `Int64` array.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// # TimeUnit
///
/// Resolution of a 64-bit temporal value.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub enum TimeUnit {
    Seconds,
    #[default]
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TimeUnit::Seconds => f.write_str("Seconds"),
            TimeUnit::Milliseconds => f.write_str("Milliseconds"),
            TimeUnit::Microseconds => f.write_str("Microseconds"),
            TimeUnit::Nanoseconds => f.write_str("Nanoseconds"),
        }
    }
}
