//! Two-pass transforms: rows first, then columns through the transposed view.
//! Inverses undo the column pass before the row pass.

use crate::array::{ArrayViewMut, Element};
use crate::util::NdFilterResult;
use crate::wavelet::{daubechies, haar, idaubechies, ihaar};

/// Haar transform along rows and then columns.
pub fn haar_2d<T: Element>(array: &mut ArrayViewMut<'_, T>) -> NdFilterResult<()> {
    haar(array)?;
    haar(&mut array.reborrow().transposed())
}

/// Inverse of [`haar_2d`].
pub fn ihaar_2d<T: Element>(array: &mut ArrayViewMut<'_, T>) -> NdFilterResult<()> {
    ihaar(&mut array.reborrow().transposed())?;
    ihaar(array)
}

/// Daubechies transform of order `code` along rows and then columns.
pub fn daubechies_2d<T: Element>(
    array: &mut ArrayViewMut<'_, T>,
    code: usize,
) -> NdFilterResult<()> {
    daubechies(array, code)?;
    daubechies(&mut array.reborrow().transposed(), code)
}

/// Inverse of [`daubechies_2d`].
pub fn idaubechies_2d<T: Element>(
    array: &mut ArrayViewMut<'_, T>,
    code: usize,
) -> NdFilterResult<()> {
    idaubechies(&mut array.reborrow().transposed(), code)?;
    idaubechies(array, code)
}
