//! Rayon-parallel filter drivers (feature-gated).
//!
//! The dense output is split into contiguous chunks of the row-major order.
//! A chunk may start anywhere, including mid-row. Each worker clones the
//! neighborhood iterator, seeks it to the first position of its chunk and
//! runs the same kernel as the sequential path, so results are identical
//! element for element.

use crate::array::{ArrayView, ArrayViewMut, Element, OwnedArray};
use crate::boundary::ExtendMode;
use crate::filter::{
    check_filter_rank, check_rank, prepare, run_span, Convolve, Kernel, RankSelect,
    TemplateDistance,
};
use crate::trace::{kernel_span, trace_event};
use crate::util::NdFilterResult;
use rayon::prelude::*;

/// Chunks per worker thread; a few per thread keeps the pool balanced when
/// border rows are slower than interior ones.
const CHUNKS_PER_THREAD: usize = 4;

/// Below this many outputs a chunk is not worth a task.
const MIN_CHUNK: usize = 256;

fn chunk_len(len: usize) -> usize {
    let workers = rayon::current_num_threads().max(1) * CHUNKS_PER_THREAD;
    len.div_ceil(workers).max(MIN_CHUNK).min(len).max(1)
}

/// Parallel counterpart of [`apply`](crate::filter::apply).
pub fn apply_par<T: Element, K: Kernel<T>>(
    kernel: &K,
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    mode: ExtendMode,
    out: &mut ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    let (taps, dst) = prepare::<T, K>(array, filter, mode, out)?;
    if dst.is_empty() {
        return Ok(());
    }
    let chunk = chunk_len(dst.len());
    trace_event!("par_chunks", chunk = chunk, chunks = dst.len().div_ceil(chunk));

    dst.par_chunks_mut(chunk)
        .enumerate()
        .try_for_each(|(idx, span)| {
            let mut local = taps.clone();
            local.seek(idx * chunk);
            run_span(kernel, local, span)
        })
}

/// Parallel [`convolve`](crate::convolve).
pub fn convolve_par<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    mode: ExtendMode,
) -> NdFilterResult<OwnedArray<T>> {
    check_filter_rank(&array, &filter)?;
    let mut out = OwnedArray::zeros(array.shape())?;
    convolve_into_par(array, filter, mode, &mut out.view_mut())?;
    Ok(out)
}

/// Parallel [`convolve_into`](crate::convolve_into).
pub fn convolve_into_par<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    mode: ExtendMode,
    out: &mut ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    let _span = kernel_span!("convolve_par", T, array, filter, mode).entered();
    apply_par(&Convolve, array, filter, mode, out)
}

/// Parallel [`rank_filter`](crate::rank_filter).
pub fn rank_filter_par<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    rank: usize,
    mode: ExtendMode,
    out: &mut ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    check_rank(rank, filter.len())?;
    let _span = kernel_span!("rank_filter_par", T, array, filter, mode).entered();
    trace_event!("rank_select", rank = rank);
    apply_par(&RankSelect::new(rank), array, filter, mode, out)
}

/// Parallel [`median_filter`](crate::median_filter).
pub fn median_filter_par<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    mode: ExtendMode,
) -> NdFilterResult<OwnedArray<T>> {
    check_filter_rank(&array, &filter)?;
    let rank = filter.len() / 2;
    check_rank(rank, filter.len())?;
    let mut out = OwnedArray::zeros(array.shape())?;
    rank_filter_par(array, filter, rank, mode, &mut out.view_mut())?;
    Ok(out)
}

/// Parallel [`template_match`](crate::template_match).
pub fn template_match_par<T: Element>(
    array: ArrayView<'_, T>,
    template: ArrayView<'_, T>,
    mode: ExtendMode,
    out: &mut ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    let _span = kernel_span!("template_match_par", T, array, template, mode).entered();
    apply_par(&TemplateDistance, array, template, mode, out)
}
