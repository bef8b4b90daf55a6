//! Type-erased arrays for callers that only know the element type at runtime.
//!
//! Each variant wraps the generic array for one supported element type; the
//! `dispatch_*` macros turn a runtime [`DType`] tag into a call to the
//! monomorphised kernel.

use crate::array::{ArrayView, ArrayViewMut, DType, Element, OwnedArray};
use crate::util::NdFilterResult;

macro_rules! any_enum {
    ($(#[$meta:meta])* $name:ident $(<$lt:lifetime>)?, $inner:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $name $(<$lt>)? {
            U8($inner<$($lt,)? u8>),
            U16($inner<$($lt,)? u16>),
            U32($inner<$($lt,)? u32>),
            U64($inner<$($lt,)? u64>),
            I8($inner<$($lt,)? i8>),
            I16($inner<$($lt,)? i16>),
            I32($inner<$($lt,)? i32>),
            I64($inner<$($lt,)? i64>),
            F32($inner<$($lt,)? f32>),
            F64($inner<$($lt,)? f64>),
        }

        impl $(<$lt>)? $name $(<$lt>)? {
            /// Returns the runtime element type tag.
            pub fn dtype(&self) -> DType {
                match self {
                    Self::U8(_) => DType::U8,
                    Self::U16(_) => DType::U16,
                    Self::U32(_) => DType::U32,
                    Self::U64(_) => DType::U64,
                    Self::I8(_) => DType::I8,
                    Self::I16(_) => DType::I16,
                    Self::I32(_) => DType::I32,
                    Self::I64(_) => DType::I64,
                    Self::F32(_) => DType::F32,
                    Self::F64(_) => DType::F64,
                }
            }

            /// Returns the size of each axis.
            pub fn shape(&self) -> &[usize] {
                match self {
                    Self::U8(a) => a.shape(),
                    Self::U16(a) => a.shape(),
                    Self::U32(a) => a.shape(),
                    Self::U64(a) => a.shape(),
                    Self::I8(a) => a.shape(),
                    Self::I16(a) => a.shape(),
                    Self::I32(a) => a.shape(),
                    Self::I64(a) => a.shape(),
                    Self::F32(a) => a.shape(),
                    Self::F64(a) => a.shape(),
                }
            }
        }
    };
}

any_enum!(
    /// Owned array of any supported element type.
    AnyArray,
    OwnedArray
);
any_enum!(
    /// Borrowed view of any supported element type.
    AnyArrayView<'a>,
    ArrayView
);
any_enum!(
    /// Mutable view of any supported element type.
    AnyArrayViewMut<'a>,
    ArrayViewMut
);

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<OwnedArray<$ty>> for AnyArray {
                fn from(value: OwnedArray<$ty>) -> Self {
                    AnyArray::$variant(value)
                }
            }

            impl<'a> From<ArrayView<'a, $ty>> for AnyArrayView<'a> {
                fn from(value: ArrayView<'a, $ty>) -> Self {
                    AnyArrayView::$variant(value)
                }
            }

            impl<'a> From<ArrayViewMut<'a, $ty>> for AnyArrayViewMut<'a> {
                fn from(value: ArrayViewMut<'a, $ty>) -> Self {
                    AnyArrayViewMut::$variant(value)
                }
            }
        )+
    };
}

impl_from!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);

/// Evaluates `$body` with `$t` aliased to the element type tagged by `$dtype`.
macro_rules! with_dtype {
    ($dtype:expr, $t:ident => $body:expr) => {
        match $dtype {
            DType::U8 => {
                type $t = u8;
                $body
            }
            DType::U16 => {
                type $t = u16;
                $body
            }
            DType::U32 => {
                type $t = u32;
                $body
            }
            DType::U64 => {
                type $t = u64;
                $body
            }
            DType::I8 => {
                type $t = i8;
                $body
            }
            DType::I16 => {
                type $t = i16;
                $body
            }
            DType::I32 => {
                type $t = i32;
                $body
            }
            DType::I64 => {
                type $t = i64;
                $body
            }
            DType::F32 => {
                type $t = f32;
                $body
            }
            DType::F64 => {
                type $t = f64;
                $body
            }
        }
    };
}

impl AnyArray {
    /// Allocates a zero-filled dense array of the given element type.
    pub fn zeros(dtype: DType, shape: &[usize]) -> NdFilterResult<Self> {
        with_dtype!(dtype, T => OwnedArray::<T>::zeros(shape).map(AnyArray::from))
    }

    /// Builds a dense array of the given element type from `f64` values,
    /// converting each with [`Element::from_f64`].
    pub fn from_f64_slice(
        dtype: DType,
        values: &[f64],
        shape: &[usize],
    ) -> NdFilterResult<Self> {
        with_dtype!(dtype, T => {
            let data: Vec<T> = values.iter().map(|&v| <T as Element>::from_f64(v)).collect();
            OwnedArray::from_vec(data, shape).map(AnyArray::from)
        })
    }

    /// Borrows the array as a type-erased view.
    pub fn view(&self) -> AnyArrayView<'_> {
        match self {
            AnyArray::U8(a) => a.view().into(),
            AnyArray::U16(a) => a.view().into(),
            AnyArray::U32(a) => a.view().into(),
            AnyArray::U64(a) => a.view().into(),
            AnyArray::I8(a) => a.view().into(),
            AnyArray::I16(a) => a.view().into(),
            AnyArray::I32(a) => a.view().into(),
            AnyArray::I64(a) => a.view().into(),
            AnyArray::F32(a) => a.view().into(),
            AnyArray::F64(a) => a.view().into(),
        }
    }

    /// Borrows the array as a type-erased mutable view.
    pub fn view_mut(&mut self) -> AnyArrayViewMut<'_> {
        match self {
            AnyArray::U8(a) => a.view_mut().into(),
            AnyArray::U16(a) => a.view_mut().into(),
            AnyArray::U32(a) => a.view_mut().into(),
            AnyArray::U64(a) => a.view_mut().into(),
            AnyArray::I8(a) => a.view_mut().into(),
            AnyArray::I16(a) => a.view_mut().into(),
            AnyArray::I32(a) => a.view_mut().into(),
            AnyArray::I64(a) => a.view_mut().into(),
            AnyArray::F32(a) => a.view_mut().into(),
            AnyArray::F64(a) => a.view_mut().into(),
        }
    }
}

/// Matches two type-erased values holding the same element type and
/// evaluates `$body` with both inner values bound; evaluates `$mismatch`
/// otherwise.
macro_rules! dispatch_pair {
    ($ea:ident, $a:expr, $eb:ident, $b:expr, |$x:ident, $y:ident| $body:expr, $mismatch:expr) => {
        match ($a, $b) {
            ($ea::U8($x), $eb::U8($y)) => $body,
            ($ea::U16($x), $eb::U16($y)) => $body,
            ($ea::U32($x), $eb::U32($y)) => $body,
            ($ea::U64($x), $eb::U64($y)) => $body,
            ($ea::I8($x), $eb::I8($y)) => $body,
            ($ea::I16($x), $eb::I16($y)) => $body,
            ($ea::I32($x), $eb::I32($y)) => $body,
            ($ea::I64($x), $eb::I64($y)) => $body,
            ($ea::F32($x), $eb::F32($y)) => $body,
            ($ea::F64($x), $eb::F64($y)) => $body,
            _ => $mismatch,
        }
    };
}

/// Three-way variant of [`dispatch_pair`].
macro_rules! dispatch_triple {
    (
        $ea:ident, $a:expr,
        $eb:ident, $b:expr,
        $ec:ident, $c:expr,
        |$x:ident, $y:ident, $z:ident| $body:expr,
        $mismatch:expr
    ) => {
        match ($a, $b, $c) {
            ($ea::U8($x), $eb::U8($y), $ec::U8($z)) => $body,
            ($ea::U16($x), $eb::U16($y), $ec::U16($z)) => $body,
            ($ea::U32($x), $eb::U32($y), $ec::U32($z)) => $body,
            ($ea::U64($x), $eb::U64($y), $ec::U64($z)) => $body,
            ($ea::I8($x), $eb::I8($y), $ec::I8($z)) => $body,
            ($ea::I16($x), $eb::I16($y), $ec::I16($z)) => $body,
            ($ea::I32($x), $eb::I32($y), $ec::I32($z)) => $body,
            ($ea::I64($x), $eb::I64($y), $ec::I64($z)) => $body,
            ($ea::F32($x), $eb::F32($y), $ec::F32($z)) => $body,
            ($ea::F64($x), $eb::F64($y), $ec::F64($z)) => $body,
            _ => $mismatch,
        }
    };
}

/// Evaluates `$body` with the inner value of a type-erased array bound.
macro_rules! dispatch_one {
    ($enum:ident, $a:expr, |$x:ident| $body:expr) => {
        match $a {
            $enum::U8($x) => $body,
            $enum::U16($x) => $body,
            $enum::U32($x) => $body,
            $enum::U64($x) => $body,
            $enum::I8($x) => $body,
            $enum::I16($x) => $body,
            $enum::I32($x) => $body,
            $enum::I64($x) => $body,
            $enum::F32($x) => $body,
            $enum::F64($x) => $body,
        }
    };
}

pub(crate) use dispatch_one;
pub(crate) use dispatch_pair;
pub(crate) use dispatch_triple;

impl AnyArrayView<'_> {
    /// Copies the elements in row-major order, widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        dispatch_one!(AnyArrayView, self, |a| a.iter().map(Element::to_f64).collect())
    }
}
