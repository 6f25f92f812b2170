//! # Macros Module
//!
//! Construction shorthands for `ArrayData`, plus the internal macros that stamp out
//! the per-type `NativeType` and `Scalar` accessor boilerplate.

/// Builds a dense `ArrayData` of the given native type.
///
/// ```rust
/// use kernel_unpack::{ArrowType, arr_data};
///
/// let arr = arr_data![i32; 1, 2, 3];
/// assert_eq!(arr.dtype, ArrowType::Int32);
/// assert_eq!(arr.len, 3);
/// ```
#[macro_export]
macro_rules! arr_data {
    (bool; $($x:expr),* $(,)?) => {
        $crate::ArrayData::from_bools(&[$($x),*])
    };
    ($t:ty; $($x:expr),* $(,)?) => {
        $crate::ArrayData::from_slice::<$t>(&[$($x),*])
    };
}

/// Builds a nullable `ArrayData` from `Option` literals.
///
/// ```rust
/// use kernel_unpack::arr_data_opt;
///
/// let arr = arr_data_opt![i64; Some(1), None, Some(3)];
/// assert_eq!(arr.compute_null_count(), 1);
/// ```
#[macro_export]
macro_rules! arr_data_opt {
    (bool; $($x:expr),* $(,)?) => {
        $crate::ArrayData::from_opt_bools(&[$($x),*])
    };
    ($t:ty; $($x:expr),* $(,)?) => {
        $crate::ArrayData::from_options::<$t>(&[$($x),*])
    };
}

/// Implements `NativeType` for each `type => ArrowType variant => Scalar variant`.
#[macro_export]
#[doc(hidden)]
macro_rules! impl_native_type {
    ($($(#[$meta:meta])* $t:ty => $variant:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            impl $crate::traits::type_unions::NativeType for $t {
                #[inline]
                fn arrow_type() -> $crate::ArrowType {
                    $crate::ArrowType::$variant
                }

                #[inline]
                fn into_scalar(value: Option<Self>) -> $crate::Scalar {
                    $crate::Scalar::$variant(value)
                }
            }
        )*
    };
}

/// Generates `x()` / `try_x()` accessors on `Scalar` for each variant.
#[macro_export]
#[doc(hidden)]
macro_rules! impl_scalar_accessors {
    ($($(#[$meta:meta])* $name:ident, $try_name:ident => $variant:ident: $t:ty),* $(,)?) => {
        impl $crate::Scalar {
            $(
                $(#[$meta])*
                #[doc = concat!("Returns the `", stringify!($t), "` value, or `None` if null or a different type.")]
                #[inline]
                pub fn $try_name(&self) -> Option<$t> {
                    match self {
                        $crate::Scalar::$variant(v) => *v,
                        _ => None,
                    }
                }

                $(#[$meta])*
                #[doc = concat!("Returns the `", stringify!($t), "` value.")]
                ///
                /// # Panics
                /// Panics if the scalar is null or holds a different type.
                /// Use the `try_` variant for a non-panicking alternative.
                #[inline]
                pub fn $name(&self) -> $t {
                    match self {
                        $crate::Scalar::$variant(Some(v)) => *v,
                        $crate::Scalar::$variant(None) => {
                            panic!(concat!("Cannot read a null scalar as ", stringify!($t)))
                        }
                        other => panic!(
                            concat!("Cannot read {} scalar as ", stringify!($t)),
                            other.arrow_type()
                        ),
                    }
                }
            )*
        }
    };
}
