use crate::array::{ArrayView, ArrayViewMut, Element, OwnedArray};
use crate::boundary::ExtendMode;
use crate::config::KernelConfig;
use crate::filter::{apply, check_filter_rank, Kernel};
use crate::neighborhood::NeighborhoodIterator;
use crate::trace::{kernel_span, trace_event};
use crate::util::{NdFilterError, NdFilterResult};

/// Order-statistic selection over the taps that yield a value.
///
/// The filter only defines the footprint; its values are ignored. When
/// fewer than `size` taps are valid, the rank is scaled down proportionally
/// (`valid * rank / size`) so that a median stays a median near the border.
#[derive(Clone, Copy, Debug)]
pub struct RankSelect {
    rank: usize,
}

impl RankSelect {
    /// Selects the `rank`-th smallest value (0-based).
    pub fn new(rank: usize) -> Self {
        Self { rank }
    }

    /// Requested 0-based rank.
    pub fn rank(&self) -> usize {
        self.rank
    }
}

impl<T: Element> Kernel<T> for RankSelect {
    const CENTERED: bool = true;
    type Scratch = Vec<T>;

    fn scratch(&self, taps: usize) -> NdFilterResult<Vec<T>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(taps)
            .map_err(|_| NdFilterError::AllocationFailure { elements: taps })?;
        Ok(buf)
    }

    fn evaluate(&self, taps: &NeighborhoodIterator<'_, T>, scratch: &mut Vec<T>) -> T {
        scratch.clear();
        let size = taps.size();
        scratch.extend((0..size).filter_map(|j| taps.retrieve(j)));
        let valid = scratch.len();
        if valid == 0 {
            return T::zero();
        }
        let rank = if valid == size {
            self.rank
        } else {
            valid * self.rank / size
        };
        let (_, nth, _) = scratch.select_nth_unstable_by(rank, |a, b| a.cmp_total(b));
        *nth
    }
}

pub(crate) fn check_rank(rank: usize, size: usize) -> NdFilterResult<()> {
    if rank >= size {
        return Err(NdFilterError::InvalidRank { rank, size });
    }
    Ok(())
}

/// Writes the `rank`-th smallest value of each neighborhood into `out`.
///
/// Fails with `InvalidRank` when `rank` is not below the number of filter
/// elements; `out` is left untouched in that case.
pub fn rank_filter<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    rank: usize,
    mode: ExtendMode,
    out: &mut ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    check_rank(rank, filter.len())?;
    let _span = kernel_span!("rank_filter", T, array, filter, mode).entered();
    trace_event!("rank_select", rank = rank);
    apply(&RankSelect::new(rank), array, filter, mode, out)
}

/// Median over the filter footprint, allocated as a new array.
///
/// The rank used is `size / 2`, the upper median for even footprints.
pub fn median_filter<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    mode: ExtendMode,
) -> NdFilterResult<OwnedArray<T>> {
    check_filter_rank(&array, &filter)?;
    let rank = filter.len() / 2;
    check_rank(rank, filter.len())?;
    let mut out = OwnedArray::zeros(array.shape())?;
    rank_filter(array, filter, rank, mode, &mut out.view_mut())?;
    Ok(out)
}

/// Rank filter with the boundary mode and execution strategy from `config`.
pub fn rank_filter_with<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    rank: usize,
    config: &KernelConfig,
    out: &mut ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    config.validate()?;
    #[cfg(feature = "rayon")]
    if config.parallel {
        return crate::filter::rayon::rank_filter_par(array, filter, rank, config.mode, out);
    }
    rank_filter(array, filter, rank, config.mode, out)
}

/// Median filter with the boundary mode and execution strategy from `config`.
pub fn median_filter_with<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    config: &KernelConfig,
) -> NdFilterResult<OwnedArray<T>> {
    config.validate()?;
    #[cfg(feature = "rayon")]
    if config.parallel {
        return crate::filter::rayon::median_filter_par(array, filter, config.mode);
    }
    median_filter(array, filter, config.mode)
}
