//! Supported element types and their runtime tags.

use std::cmp::Ordering;
use std::fmt;

/// Runtime tag for the element type of an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl DType {
    /// Returns true for `F32` and `F64`.
    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    /// Returns the short numpy-style name of the type.
    pub fn name(self) -> &'static str {
        match self {
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::U64 => "u64",
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::F32 => "f32",
            DType::F64 => "f64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Scalar element stored in an ndfilter array.
///
/// The set of implementors is closed. Integer arithmetic wraps instead of
/// panicking; conversions from `f64` follow `as` cast semantics (truncation
/// toward zero, saturating at the type bounds, NaN to zero).
pub trait Element:
    sealed::Sealed + Copy + PartialOrd + Default + fmt::Debug + Send + Sync + 'static
{
    /// Runtime tag of this type.
    const DTYPE: DType;

    /// Additive identity.
    fn zero() -> Self {
        Self::default()
    }

    /// Widens the value to `f64`.
    fn to_f64(self) -> f64;

    /// Narrows an `f64` into this type.
    fn from_f64(value: f64) -> Self;

    /// Native addition; wraps for integers.
    fn add(self, rhs: Self) -> Self;

    /// Native subtraction; wraps for integers.
    fn sub(self, rhs: Self) -> Self;

    /// Native multiplication; wraps for integers.
    fn mul(self, rhs: Self) -> Self;

    /// Division by two in the native type.
    fn half(self) -> Self;

    /// Total order used for rank selection; NaN sorts after every number.
    fn cmp_total(&self, other: &Self) -> Ordering;

    /// `|self - rhs|` computed without unsigned underflow.
    fn abs_diff(self, rhs: Self) -> Self {
        if self > rhs {
            self.sub(rhs)
        } else {
            rhs.sub(self)
        }
    }
}

macro_rules! impl_int_element {
    ($($ty:ty => $tag:ident),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const DTYPE: DType = DType::$tag;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                #[inline]
                fn add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline]
                fn sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline]
                fn mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }

                #[inline]
                fn half(self) -> Self {
                    self / 2
                }

                #[inline]
                fn cmp_total(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )+
    };
}

macro_rules! impl_float_element {
    ($($ty:ty => $tag:ident),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const DTYPE: DType = DType::$tag;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                #[inline]
                fn add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline]
                fn half(self) -> Self {
                    self / 2.0
                }

                #[inline]
                fn cmp_total(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }
            }
        )+
    };
}

impl_int_element!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
);

impl_float_element!(f32 => F32, f64 => F64);
