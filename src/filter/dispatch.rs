//! Filter entry points for arrays whose element type is known only at
//! runtime. Every argument must carry the same [`DType`].

use crate::array::{
    dispatch_pair, dispatch_triple, AnyArray, AnyArrayView, AnyArrayViewMut, DType,
};
use crate::config::KernelConfig;
use crate::filter::{convolve_with, median_filter_with, rank_filter_with, template_match_with};
use crate::util::{NdFilterError, NdFilterResult};

fn mismatch<T>(expected: &AnyArrayView<'_>, got: DType) -> NdFilterResult<T> {
    Err(NdFilterError::DTypeMismatch {
        expected: expected.dtype(),
        got,
    })
}

fn output_mismatch<T>(
    array: &AnyArrayView<'_>,
    other: &AnyArrayView<'_>,
    out: &AnyArrayViewMut<'_>,
) -> NdFilterResult<T> {
    let got = if other.dtype() != array.dtype() {
        other.dtype()
    } else {
        out.dtype()
    };
    mismatch(array, got)
}

/// Type-erased [`convolve`](crate::convolve).
pub fn convolve_any(
    array: &AnyArrayView<'_>,
    filter: &AnyArrayView<'_>,
    config: &KernelConfig,
) -> NdFilterResult<AnyArray> {
    dispatch_pair!(
        AnyArrayView,
        array,
        AnyArrayView,
        filter,
        |a, f| convolve_with(a.clone(), f.clone(), config).map(AnyArray::from),
        mismatch(array, filter.dtype())
    )
}

/// Type-erased [`rank_filter`](crate::rank_filter).
pub fn rank_filter_any(
    array: &AnyArrayView<'_>,
    filter: &AnyArrayView<'_>,
    rank: usize,
    config: &KernelConfig,
    out: &mut AnyArrayViewMut<'_>,
) -> NdFilterResult<()> {
    let result = dispatch_triple!(
        AnyArrayView,
        array,
        AnyArrayView,
        filter,
        AnyArrayViewMut,
        &mut *out,
        |a, f, o| Some(rank_filter_with(a.clone(), f.clone(), rank, config, o)),
        None
    );
    result.unwrap_or_else(|| output_mismatch(array, filter, out))
}

/// Type-erased [`median_filter`](crate::median_filter).
pub fn median_filter_any(
    array: &AnyArrayView<'_>,
    filter: &AnyArrayView<'_>,
    config: &KernelConfig,
) -> NdFilterResult<AnyArray> {
    dispatch_pair!(
        AnyArrayView,
        array,
        AnyArrayView,
        filter,
        |a, f| median_filter_with(a.clone(), f.clone(), config).map(AnyArray::from),
        mismatch(array, filter.dtype())
    )
}

/// Type-erased [`template_match`](crate::template_match).
pub fn template_match_any(
    array: &AnyArrayView<'_>,
    template: &AnyArrayView<'_>,
    config: &KernelConfig,
    out: &mut AnyArrayViewMut<'_>,
) -> NdFilterResult<()> {
    let result = dispatch_triple!(
        AnyArrayView,
        array,
        AnyArrayView,
        template,
        AnyArrayViewMut,
        &mut *out,
        |a, t, o| Some(template_match_with(a.clone(), t.clone(), config, o)),
        None
    );
    result.unwrap_or_else(|| output_mismatch(array, template, out))
}
