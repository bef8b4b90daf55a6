//! Windowed filter kernels driven by the neighborhood iterator.
//!
//! Each kernel is a per-position reduction over the taps exposed by a
//! [`NeighborhoodIterator`]. The driver walks the primary array in row-major
//! order and writes one result per position into a dense output, so output
//! element `i` always belongs to primary position `i`.

mod convolve;
mod dispatch;
mod rank;
mod template;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use convolve::{convolve, convolve_into, convolve_with, Convolve};
pub use dispatch::{convolve_any, median_filter_any, rank_filter_any, template_match_any};
pub use rank::{median_filter, median_filter_with, rank_filter, rank_filter_with, RankSelect};

pub(crate) use rank::check_rank;
pub use template::{template_match, template_match_with, TemplateDistance};

use crate::array::{check_dense_output, ArrayView, ArrayViewMut, Element};
use crate::boundary::ExtendMode;
use crate::neighborhood::NeighborhoodIterator;
use crate::util::{NdFilterError, NdFilterResult};

/// Per-position reduction over the taps of a neighborhood.
pub trait Kernel<T: Element>: Sync {
    /// Whether taps are measured from the filter center (true) or its
    /// origin (false).
    const CENTERED: bool;

    /// Working memory reused across positions by one worker.
    type Scratch;

    /// Allocates working memory for a filter with `taps` elements.
    fn scratch(&self, taps: usize) -> NdFilterResult<Self::Scratch>;

    /// Computes the output value at the iterator's current position.
    fn evaluate(&self, taps: &NeighborhoodIterator<'_, T>, scratch: &mut Self::Scratch) -> T;
}

/// Validates inputs and output, then builds the iterator and exposes the
/// output as a dense slice.
pub(crate) fn prepare<'a, 'o, T: Element, K: Kernel<T>>(
    array: ArrayView<'a, T>,
    filter: ArrayView<'_, T>,
    mode: ExtendMode,
    out: &'o mut ArrayViewMut<'_, T>,
) -> NdFilterResult<(NeighborhoodIterator<'a, T>, &'o mut [T])> {
    check_dense_output(array.shape(), out)?;
    let taps = NeighborhoodIterator::new(array, filter, mode, K::CENTERED)?;
    let dst = out.as_dense_slice_mut().ok_or(NdFilterError::NotDense)?;
    Ok((taps, dst))
}

/// Evaluates `kernel` for `out.len()` consecutive positions starting at the
/// iterator's current position.
pub(crate) fn run_span<T: Element, K: Kernel<T>>(
    kernel: &K,
    mut taps: NeighborhoodIterator<'_, T>,
    out: &mut [T],
) -> NdFilterResult<()> {
    let mut scratch = kernel.scratch(taps.size())?;
    for slot in out.iter_mut() {
        *slot = kernel.evaluate(&taps, &mut scratch);
        taps.advance();
    }
    Ok(())
}

/// Runs `kernel` over every position of `array`, writing into `out`.
pub fn apply<T: Element, K: Kernel<T>>(
    kernel: &K,
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    mode: ExtendMode,
    out: &mut ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    let (taps, dst) = prepare::<T, K>(array, filter, mode, out)?;
    run_span(kernel, taps, dst)
}

fn check_filter_rank<T: Element>(
    array: &ArrayView<'_, T>,
    filter: &ArrayView<'_, T>,
) -> NdFilterResult<()> {
    if array.ndim() != filter.ndim() {
        return Err(NdFilterError::RankMismatch {
            expected: array.ndim(),
            got: filter.ndim(),
        });
    }
    Ok(())
}
