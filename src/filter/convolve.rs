use crate::array::{ArrayView, ArrayViewMut, Element, OwnedArray};
use crate::boundary::ExtendMode;
use crate::config::KernelConfig;
use crate::filter::{apply, check_filter_rank, Kernel};
use crate::neighborhood::NeighborhoodIterator;
use crate::trace::kernel_span;
use crate::util::NdFilterResult;

/// Centered weighted sum over the taps that yield a value.
///
/// Products are accumulated in `f64` and cast back to the element type once
/// per position, so integer outputs truncate toward zero and saturate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Convolve;

impl<T: Element> Kernel<T> for Convolve {
    const CENTERED: bool = true;
    type Scratch = ();

    fn scratch(&self, _taps: usize) -> NdFilterResult<()> {
        Ok(())
    }

    #[inline]
    fn evaluate(&self, taps: &NeighborhoodIterator<'_, T>, _: &mut ()) -> T {
        let mut acc = 0.0f64;
        for j in 0..taps.size() {
            if let Some(value) = taps.retrieve(j) {
                acc += value.to_f64() * taps.tap_weight(j).to_f64();
            }
        }
        T::from_f64(acc)
    }
}

/// Convolves `array` with `filter` into a freshly allocated array of the
/// same shape.
pub fn convolve<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    mode: ExtendMode,
) -> NdFilterResult<OwnedArray<T>> {
    check_filter_rank(&array, &filter)?;
    let mut out = OwnedArray::zeros(array.shape())?;
    convolve_into(array, filter, mode, &mut out.view_mut())?;
    Ok(out)
}

/// Convolves `array` with `filter`, writing one value per position of
/// `array` into the dense output `out`.
pub fn convolve_into<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    mode: ExtendMode,
    out: &mut ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    let _span = kernel_span!("convolve", T, array, filter, mode).entered();
    apply(&Convolve, array, filter, mode, out)
}

/// Convolves with the boundary mode and execution strategy from `config`.
pub fn convolve_with<T: Element>(
    array: ArrayView<'_, T>,
    filter: ArrayView<'_, T>,
    config: &KernelConfig,
) -> NdFilterResult<OwnedArray<T>> {
    config.validate()?;
    #[cfg(feature = "rayon")]
    if config.parallel {
        return crate::filter::rayon::convolve_par(array, filter, config.mode);
    }
    convolve(array, filter, config.mode)
}

#[cfg(test)]
mod tests {
    use super::{convolve, convolve_into};
    use crate::array::{ArrayView, ArrayViewMut, OwnedArray};
    use crate::boundary::ExtendMode;
    use crate::util::NdFilterError;

    #[test]
    fn box_filter_drops_taps_past_the_edge() {
        let data = [1.0f64, 2.0, 3.0, 4.0, 5.0];
        let filter = [1.0f64; 3];
        let a = ArrayView::from_slice(&data, &[5]).unwrap();
        let f = ArrayView::from_slice(&filter, &[3]).unwrap();
        let out = convolve(a, f, ExtendMode::Nearest).unwrap();
        assert_eq!(out.data(), &[3.0, 6.0, 9.0, 12.0, 9.0]);
    }

    #[test]
    fn wrap_and_constant_edges() {
        let data = [1i32, 2, 3, 4, 5];
        let filter = [1i32; 3];
        let a = ArrayView::from_slice(&data, &[5]).unwrap();
        let f = ArrayView::from_slice(&filter, &[3]).unwrap();

        let wrapped = convolve(a.clone(), f.clone(), ExtendMode::Wrap).unwrap();
        assert_eq!(wrapped.data(), &[8, 6, 9, 12, 10]);

        let zero = convolve(a.clone(), f.clone(), ExtendMode::Constant).unwrap();
        assert_eq!(zero.data(), &[3, 6, 9, 12, 9]);

        let mirrored = convolve(a, f, ExtendMode::Mirror).unwrap();
        assert_eq!(mirrored.data(), &[5, 6, 9, 12, 13]);
    }

    #[test]
    fn integer_output_truncates_and_saturates() {
        let data = [200u8, 200, 200];
        let filter = [1u8; 3];
        let a = ArrayView::from_slice(&data, &[3]).unwrap();
        let f = ArrayView::from_slice(&filter, &[3]).unwrap();
        let out = convolve(a, f, ExtendMode::Nearest).unwrap();
        assert_eq!(out.data(), &[255, 255, 255]);
    }

    #[test]
    fn even_filter_center_sits_past_the_middle() {
        let data = [1.0f32, 2.0, 3.0, 4.0];
        let filter = [1.0f32, 10.0];
        let a = ArrayView::from_slice(&data, &[4]).unwrap();
        let f = ArrayView::from_slice(&filter, &[2]).unwrap();
        // Tap offsets are -1 and 0.
        let out = convolve(a, f, ExtendMode::Nearest).unwrap();
        assert_eq!(out.data(), &[10.0, 21.0, 32.0, 43.0]);
    }

    #[test]
    fn writes_into_caller_output() {
        let data: Vec<f64> = (0..6).map(f64::from).collect();
        let filter = [0.0f64, 1.0, 0.0];
        let a = ArrayView::from_slice(&data, &[2, 3]).unwrap();
        let f = ArrayView::from_slice(&filter, &[1, 3]).unwrap();
        let mut buf = vec![-1.0f64; 6];
        let mut out = ArrayViewMut::from_slice(&mut buf, &[2, 3]).unwrap();
        convolve_into(a, f, ExtendMode::Nearest, &mut out).unwrap();
        assert_eq!(buf, data);
    }

    #[test]
    fn rank_mismatch_is_reported_before_allocation() {
        let data = [0.0f32; 4];
        let a = ArrayView::from_slice(&data, &[2, 2]).unwrap();
        let f = ArrayView::from_slice(&data, &[4]).unwrap();
        let err = convolve(a, f, ExtendMode::Nearest).unwrap_err();
        assert_eq!(err, NdFilterError::RankMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn empty_primary_produces_empty_output() {
        let data: [f32; 0] = [];
        let filter = [1.0f32; 3];
        let a = ArrayView::from_slice(&data, &[0]).unwrap();
        let f = ArrayView::from_slice(&filter, &[3]).unwrap();
        let out: OwnedArray<f32> = convolve(a, f, ExtendMode::Nearest).unwrap();
        assert!(out.is_empty());
    }
}
