use crate::array::{ArrayViewMut, Element};
use crate::trace::trace_span;
use crate::util::NdFilterResult;
use crate::wavelet::for_each_row;

/// One forward Haar step: pairwise sums into the low half, differences
/// (`odd - even`) into the high half.
pub(crate) fn haar_row<T: Element>(src: &[T], dst: &mut [T]) {
    let half = src.len() / 2;
    for x in 0..half {
        let (even, odd) = (src[2 * x], src[2 * x + 1]);
        dst[x] = even.add(odd);
        dst[half + x] = odd.sub(even);
    }
}

pub(crate) fn ihaar_row<T: Element>(src: &[T], dst: &mut [T]) {
    let half = src.len() / 2;
    for x in 0..half {
        let (low, high) = (src[x], src[half + x]);
        dst[2 * x] = low.sub(high).half();
        dst[2 * x + 1] = low.add(high).half();
    }
}

/// Forward Haar transform along each row of a 2-D array, in place.
///
/// Arithmetic is native to `T`; integer sums wrap on overflow.
pub fn haar<T: Element>(array: &mut ArrayViewMut<'_, T>) -> NdFilterResult<()> {
    let _span = trace_span!("haar", shape = ?array.shape()).entered();
    for_each_row(array, haar_row)
}

/// Inverse of [`haar`].
pub fn ihaar<T: Element>(array: &mut ArrayViewMut<'_, T>) -> NdFilterResult<()> {
    let _span = trace_span!("ihaar", shape = ?array.shape()).entered();
    for_each_row(array, ihaar_row)
}
