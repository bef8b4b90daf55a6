//! Fast wavelet transforms on 2-D arrays, applied in place along each row.
//!
//! A forward step splits the first `2 * (n / 2)` samples of a row of length
//! `n` into `n / 2` low-pass values followed by `n / 2` high-pass values; an
//! inverse step interleaves them back. With an odd row length the trailing
//! sample is left untouched by both directions. Transforms are unnormalized
//! (no `1/sqrt(2)` factor), so forward and inverse pairs round-trip but are
//! not energy-preserving.
//!
//! Every call stages one row at a time through a single scratch allocation
//! made once per call.

mod daubechies;
mod haar;
mod lifting;
mod separable;

pub use daubechies::{daubechies, idaubechies, Daubechies};
pub use haar::{haar, ihaar};
pub use lifting::{iwavelet, wavelet};
pub use separable::{daubechies_2d, haar_2d, idaubechies_2d, ihaar_2d};

use crate::array::{dispatch_one, AnyArrayViewMut, ArrayViewMut, Element};
use crate::util::{NdFilterError, NdFilterResult};

/// A wavelet transform selectable at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transform {
    Haar,
    InverseHaar,
    Daubechies(Daubechies),
    InverseDaubechies(Daubechies),
}

impl Transform {
    /// Returns the transform that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Transform::Haar => Transform::InverseHaar,
            Transform::InverseHaar => Transform::Haar,
            Transform::Daubechies(order) => Transform::InverseDaubechies(order),
            Transform::InverseDaubechies(order) => Transform::Daubechies(order),
        }
    }

    /// Applies the transform along rows only, or along rows and then columns
    /// when `separable` is set (columns first for inverses).
    pub fn apply<T: Element>(
        self,
        array: &mut ArrayViewMut<'_, T>,
        separable: bool,
    ) -> NdFilterResult<()> {
        match (self, separable) {
            (Transform::Haar, false) => haar(array),
            (Transform::InverseHaar, false) => ihaar(array),
            (Transform::Daubechies(order), false) => daubechies(array, order.code()),
            (Transform::InverseDaubechies(order), false) => idaubechies(array, order.code()),
            (Transform::Haar, true) => haar_2d(array),
            (Transform::InverseHaar, true) => ihaar_2d(array),
            (Transform::Daubechies(order), true) => daubechies_2d(array, order.code()),
            (Transform::InverseDaubechies(order), true) => idaubechies_2d(array, order.code()),
        }
    }
}

/// Type-erased [`Transform::apply`].
pub fn transform_any(
    array: &mut AnyArrayViewMut<'_>,
    transform: Transform,
    separable: bool,
) -> NdFilterResult<()> {
    dispatch_one!(AnyArrayViewMut, array, |a| transform.apply(a, separable))
}

fn check_2d<T: Element>(array: &ArrayViewMut<'_, T>) -> NdFilterResult<(usize, usize)> {
    if array.ndim() != 2 {
        return Err(NdFilterError::RankMismatch {
            expected: 2,
            got: array.ndim(),
        });
    }
    Ok((array.shape()[0], array.shape()[1]))
}

fn row_buffer<T: Element>(len: usize) -> NdFilterResult<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| NdFilterError::AllocationFailure { elements: len })?;
    buf.resize(len, T::zero());
    Ok(buf)
}

/// Runs `transform(src, dst)` on every row of a 2-D array.
///
/// One scratch allocation of `2 * cols` is split into the staged row and the
/// transform output. Only the even prefix of `dst` is written back, so an
/// odd trailing sample keeps its value.
pub(crate) fn for_each_row<T, F>(
    array: &mut ArrayViewMut<'_, T>,
    mut transform: F,
) -> NdFilterResult<()>
where
    T: Element,
    F: FnMut(&[T], &mut [T]),
{
    let (rows, cols) = check_2d(array)?;
    let base = array.layout().base_offset();
    let (row_stride, col_stride) = (array.strides()[0], array.strides()[1]);
    let even = 2 * (cols / 2);
    let mut scratch = row_buffer::<T>(2 * cols)?;
    let (src, dst) = scratch.split_at_mut(cols);

    for y in 0..rows {
        let row = base + y * row_stride;
        for (x, slot) in src.iter_mut().enumerate() {
            *slot = array.at(row + x * col_stride);
        }
        transform(src, dst);
        for (x, &value) in dst[..even].iter().enumerate() {
            array.set(row + x * col_stride, value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{for_each_row, transform_any, Daubechies, Transform};
    use crate::array::{AnyArrayViewMut, ArrayViewMut};
    use crate::util::NdFilterError;

    #[test]
    fn rows_are_staged_through_views() {
        let mut backing: Vec<i32> = (0..12).collect();
        // Columns 0 and 2 of a 3x4 buffer.
        let mut view = ArrayViewMut::new(&mut backing, &[3, 2], &[4, 2]).unwrap();
        for_each_row(&mut view, |src, dst| {
            dst[0] = src[1];
            dst[1] = src[0];
        })
        .unwrap();
        assert_eq!(backing, vec![2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11]);
    }

    #[test]
    fn non_2d_arrays_are_rejected() {
        let mut data = [1.0f32; 8];
        let mut view = ArrayViewMut::from_slice(&mut data, &[2, 2, 2]).unwrap();
        let err = for_each_row(&mut view, |_, _| {}).unwrap_err();
        assert_eq!(err, NdFilterError::RankMismatch { expected: 2, got: 3 });
    }

    #[test]
    fn odd_trailing_sample_is_not_written_back() {
        let mut data = [1u16, 2, 3, 4, 5, 6];
        let mut view = ArrayViewMut::from_slice(&mut data, &[2, 3]).unwrap();
        for_each_row(&mut view, |src, dst| {
            dst.fill(0);
            dst[0] = src[1];
            dst[1] = src[0];
        })
        .unwrap();
        assert_eq!(data, [2, 1, 3, 5, 4, 6]);
    }

    #[test]
    fn runtime_transform_round_trips() {
        let mut data: Vec<f64> = (0..16).map(|v| f64::from(v) * 0.5).collect();
        let original = data.clone();
        let mut view: AnyArrayViewMut<'_> =
            ArrayViewMut::from_slice(&mut data, &[4, 4]).unwrap().into();
        let forward = Transform::Daubechies(Daubechies::D2);
        transform_any(&mut view, forward, true).unwrap();
        transform_any(&mut view, forward.inverse(), true).unwrap();
        drop(view);
        assert_eq!(data, original);
    }
}
