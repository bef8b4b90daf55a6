use crate::array::{ArrayViewMut, Element};
use crate::trace::{trace_event, trace_span};
use crate::util::{NdFilterError, NdFilterResult};
use crate::wavelet::for_each_row;

pub(crate) fn check_coefficients(coeffs: &[f32]) -> NdFilterResult<()> {
    if coeffs.is_empty() {
        return Err(NdFilterError::InvalidCoefficients {
            reason: "coefficient vector is empty",
        });
    }
    if coeffs.len() % 2 != 0 {
        return Err(NdFilterError::InvalidCoefficients {
            reason: "coefficient count must be even",
        });
    }
    Ok(())
}

/// Sample `i` of the even-length prefix of `row`, zero outside it.
#[inline]
fn sample<T: Element>(row: &[T], i: isize, len: usize) -> f64 {
    if i < 0 || i as usize >= len {
        return 0.0;
    }
    row[i as usize].to_f64()
}

/// Forward step. For output pair `x`, taps `ci` read sample `2x + ci`:
/// low-pass uses the reversed coefficients, high-pass the coefficients with
/// a sign that starts negative and alternates.
pub(crate) fn forward_row<T: Element>(src: &[T], dst: &mut [T], coeffs: &[f32]) {
    let n = coeffs.len();
    let half = src.len() / 2;
    let len = 2 * half;
    for x in 0..half {
        let mut low = 0.0f64;
        let mut high = 0.0f64;
        for ci in 0..n {
            let value = sample(src, (2 * x + ci) as isize, len);
            low += f64::from(coeffs[n - ci - 1]) * value;
            let sign = if ci % 2 == 0 { -1.0 } else { 1.0 };
            high += sign * f64::from(coeffs[ci]) * value;
        }
        dst[x] = T::from_f64(low);
        dst[half + x] = T::from_f64(high);
    }
}

/// Inverse step. Output sample `x` gathers tap `ci` only when
/// `x + ci - n + 2` is odd, reading low/high index `(x + ci - n + 2) / 2`
/// (truncating division); indices outside `[0, half)` read zero.
pub(crate) fn inverse_row<T: Element>(src: &[T], dst: &mut [T], coeffs: &[f32]) {
    let n = coeffs.len() as isize;
    let half = src.len() / 2;
    let (low, high) = src.split_at(half);
    for (x, slot) in dst.iter_mut().take(2 * half).enumerate() {
        let mut l = 0.0f64;
        let mut h = 0.0f64;
        for ci in 0..n {
            let xmap2 = x as isize + ci - n + 2;
            if xmap2 % 2 == 0 {
                continue;
            }
            let xmap = xmap2 / 2;
            let cl = f64::from(coeffs[ci as usize]);
            let sign = if ci % 2 == 0 { 1.0 } else { -1.0 };
            let ch = sign * f64::from(coeffs[(n - ci - 1) as usize]);
            l += cl * sample(low, xmap, half);
            h += ch * sample(high, xmap, half);
        }
        *slot = T::from_f64((l + h) / 2.0);
    }
}

/// Forward wavelet transform with an arbitrary even-length filter along each
/// row of a 2-D array, in place.
///
/// Samples past the end of the row read as zero. Sums are accumulated in
/// `f64` and cast back to `T` per output sample.
pub fn wavelet<T: Element>(
    array: &mut ArrayViewMut<'_, T>,
    coeffs: &[f32],
) -> NdFilterResult<()> {
    check_coefficients(coeffs)?;
    let _span = trace_span!("wavelet", shape = ?array.shape()).entered();
    trace_event!("wavelet_taps", taps = coeffs.len());
    for_each_row(array, |src, dst| forward_row(src, dst, coeffs))
}

/// Inverse of [`wavelet`] for the same coefficients.
///
/// Reconstruction is exact (up to rounding) away from the start of each
/// row; for filters longer than two taps the first `coeffs.len() - 2`
/// samples also depend on the zero extension and are not recovered.
///
/// Run in the other order (`iwavelet` then `wavelet`), the unrecovered
/// samples are instead the last `coeffs.len() / 2 - 1` of each half of the
/// even prefix, where forward taps run past the zero-filled end.
pub fn iwavelet<T: Element>(
    array: &mut ArrayViewMut<'_, T>,
    coeffs: &[f32],
) -> NdFilterResult<()> {
    check_coefficients(coeffs)?;
    let _span = trace_span!("iwavelet", shape = ?array.shape()).entered();
    trace_event!("wavelet_taps", taps = coeffs.len());
    for_each_row(array, |src, dst| inverse_row(src, dst, coeffs))
}

#[cfg(test)]
mod tests {
    use super::{iwavelet, wavelet};
    use crate::array::ArrayViewMut;
    use crate::util::NdFilterError;
    use crate::wavelet::haar;

    #[test]
    fn two_unit_taps_match_haar() {
        let mut a = [0.5f64, -1.0, 4.0, 2.5, 3.0, 3.0];
        let mut b = a;
        wavelet(&mut ArrayViewMut::from_slice(&mut a, &[1, 6]).unwrap(), &[1.0, 1.0]).unwrap();
        haar(&mut ArrayViewMut::from_slice(&mut b, &[1, 6]).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn two_unit_taps_invert_exactly() {
        let mut data = [3.0f32, 7.0, 1.0, 1.0];
        iwavelet(&mut ArrayViewMut::from_slice(&mut data, &[1, 4]).unwrap(), &[1.0, 1.0]).unwrap();
        assert_eq!(data, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn high_pass_of_constant_row_vanishes_in_the_interior() {
        // D4 taps: the alternating-sign sum is zero.
        let taps = [0.683_012_7f32, 1.183_012_7, 0.316_987_3, -0.183_012_7];
        let mut data = [2.0f64; 8];
        wavelet(&mut ArrayViewMut::from_slice(&mut data, &[1, 8]).unwrap(), &taps).unwrap();
        for &h in &data[4..7] {
            assert!(h.abs() < 1e-5, "high-pass {h}");
        }
        for &l in &data[..3] {
            assert!((l - 4.0).abs() < 1e-5, "low-pass {l}");
        }
    }

    #[test]
    fn rejects_unusable_coefficients() {
        let mut data = [0.0f32; 4];
        let mut view = ArrayViewMut::from_slice(&mut data, &[2, 2]).unwrap();
        assert!(matches!(
            wavelet(&mut view, &[]),
            Err(NdFilterError::InvalidCoefficients { .. })
        ));
        assert!(matches!(
            iwavelet(&mut view, &[1.0, 2.0, 3.0]),
            Err(NdFilterError::InvalidCoefficients { .. })
        ));
    }
}
