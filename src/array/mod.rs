//! Strided N-dimensional arrays.
//!
//! `ArrayView` and `ArrayViewMut` borrow a 1D buffer and describe it with a
//! shape, per-axis element strides and a base offset. Kernels never allocate
//! the input storage; only `OwnedArray` owns memory, and it is always dense
//! row-major. Positions are tracked with an index-based [`Cursor`].

mod cursor;
mod dynamic;
mod element;
#[cfg(feature = "image-io")]
pub mod io;
mod owned;
mod view;

pub use cursor::Cursor;
pub use dynamic::{AnyArray, AnyArrayView, AnyArrayViewMut};
pub use element::{DType, Element};
pub use owned::OwnedArray;
pub use view::{ArrayView, ArrayViewMut, Iter};

pub(crate) use dynamic::{dispatch_one, dispatch_pair, dispatch_triple};
pub(crate) use view::Layout;

/// Maximum number of axes an array may have.
pub const MAX_DIMS: usize = 32;

use crate::util::{NdFilterError, NdFilterResult};

/// Fails with `ShapeMismatch` unless `out` matches `shape`, or `NotDense`
/// unless it is packed row-major.
pub(crate) fn check_dense_output<T: Element>(
    shape: &[usize],
    out: &ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    if out.ndim() != shape.len() {
        return Err(NdFilterError::RankMismatch {
            expected: shape.len(),
            got: out.ndim(),
        });
    }
    if out.shape() != shape {
        return Err(NdFilterError::ShapeMismatch {
            expected: shape.to_vec(),
            got: out.shape().to_vec(),
        });
    }
    if !out.is_dense() {
        return Err(NdFilterError::NotDense);
    }
    Ok(())
}
