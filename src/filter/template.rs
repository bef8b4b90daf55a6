use crate::array::{ArrayView, ArrayViewMut, Element};
use crate::boundary::ExtendMode;
use crate::config::KernelConfig;
use crate::filter::{apply, Kernel};
use crate::neighborhood::NeighborhoodIterator;
use crate::trace::kernel_span;
use crate::util::NdFilterResult;

/// Sum of squared differences between the template and the window whose
/// origin sits at the current position.
///
/// Differences are taken as `|a - b|` so unsigned types do not underflow,
/// then squared and summed in the element type. Integer sums wrap on
/// overflow.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateDistance;

impl<T: Element> Kernel<T> for TemplateDistance {
    const CENTERED: bool = false;
    type Scratch = ();

    fn scratch(&self, _taps: usize) -> NdFilterResult<()> {
        Ok(())
    }

    #[inline]
    fn evaluate(&self, taps: &NeighborhoodIterator<'_, T>, _: &mut ()) -> T {
        let mut acc = T::zero();
        for j in 0..taps.size() {
            if let Some(value) = taps.retrieve(j) {
                let diff = value.abs_diff(taps.tap_weight(j));
                acc = acc.add(diff.mul(diff));
            }
        }
        acc
    }
}

/// Scores every origin-anchored placement of `template` over `array`.
///
/// `out[p]` is the squared distance between the template and the window
/// starting at `p`; windows hanging past the far edge follow `mode`.
pub fn template_match<T: Element>(
    array: ArrayView<'_, T>,
    template: ArrayView<'_, T>,
    mode: ExtendMode,
    out: &mut ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    let _span = kernel_span!("template_match", T, array, template, mode).entered();
    apply(&TemplateDistance, array, template, mode, out)
}

/// Template match with the boundary mode and execution strategy from
/// `config`.
pub fn template_match_with<T: Element>(
    array: ArrayView<'_, T>,
    template: ArrayView<'_, T>,
    config: &KernelConfig,
    out: &mut ArrayViewMut<'_, T>,
) -> NdFilterResult<()> {
    config.validate()?;
    #[cfg(feature = "rayon")]
    if config.parallel {
        return crate::filter::rayon::template_match_par(array, template, config.mode, out);
    }
    template_match(array, template, config.mode, out)
}
