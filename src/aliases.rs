//! # Aliases Module
//!
//! Semantic `usize` aliases used across the unpacking surface, so that
//! view fields such as `PrimitiveArg::offset` read unambiguously.

/// Logical element offset into the underlying buffers.
/// Set to `0` for an unsliced array.
pub type Offset = usize;

/// Logical element count of an array or view.
pub type Length = usize;

/// Physical width of one element, in bits.
///
/// `1` for bit-packed booleans, a multiple of `8` for everything else.
pub type BitWidth = usize;
