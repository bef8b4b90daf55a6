use crate::array::{ArrayViewMut, Element};
use crate::trace::trace_span;
use crate::util::{NdFilterError, NdFilterResult};
use crate::wavelet::{iwavelet, wavelet};

// Scaling-function taps, scaled so they sum to 2. The wavelet taps are the
// same values with alternating sign.
const D2: [f32; 2] = [1.0, 1.0];
const D4: [f32; 4] = [0.6830127, 1.1830127, 0.3169873, -0.1830127];
const D6: [f32; 6] = [
    0.47046721,
    1.14111692,
    0.650365,
    -0.19093442,
    -0.12083221,
    0.0498175,
];
const D8: [f32; 8] = [
    0.32580343,
    1.01094572,
    0.8922014,
    -0.03957503,
    -0.26450717,
    0.0436163,
    0.0465036,
    -0.01498699,
];
const D10: [f32; 10] = [
    0.22641898,
    0.85394354,
    1.02432694,
    0.19576696,
    -0.34265671,
    -0.04560113,
    0.10970265,
    -0.0088268,
    -0.01779187,
    0.00471743,
];
const D12: [f32; 12] = [
    1.57742430e-01,
    6.99503810e-01,
    1.06226376e+00,
    4.45831320e-01,
    -3.19986600e-01,
    -1.83518060e-01,
    1.37888090e-01,
    3.89232100e-02,
    -4.46637500e-02,
    7.83251152e-04,
    6.75606236e-03,
    -1.52353381e-03,
];
const D14: [f32; 14] = [
    1.10099430e-01,
    5.60791280e-01,
    1.03114849e+00,
    6.64372480e-01,
    -2.03513820e-01,
    -3.16835010e-01,
    1.00846700e-01,
    1.14003450e-01,
    -5.37824500e-02,
    -2.34399400e-02,
    1.77497900e-02,
    6.07514995e-04,
    -2.54790472e-03,
    5.00226853e-04,
];
const D16: [f32; 16] = [
    7.69556200e-02,
    4.42467250e-01,
    9.55486150e-01,
    8.27816530e-01,
    -2.23857400e-02,
    -4.01658630e-01,
    6.68194092e-04,
    1.82076360e-01,
    -2.45639000e-02,
    -6.23502100e-02,
    1.97721600e-02,
    1.23688400e-02,
    -6.88771926e-03,
    -5.54004549e-04,
    9.55229711e-04,
    -1.66137261e-04,
];
const D18: [f32; 18] = [
    5.38503500e-02,
    3.44834300e-01,
    8.55349060e-01,
    9.29545710e-01,
    1.88369550e-01,
    -4.14751760e-01,
    -1.36953550e-01,
    2.10068340e-01,
    4.34526750e-02,
    -9.56472600e-02,
    3.54892813e-04,
    3.16241700e-02,
    -6.67962023e-03,
    -6.05496058e-03,
    2.61296728e-03,
    3.25814671e-04,
    -3.56329759e-04,
    5.56455140e-05,
];
const D20: [f32; 20] = [
    3.77171600e-02,
    2.66122180e-01,
    7.45575070e-01,
    9.73628110e-01,
    3.97637740e-01,
    -3.53336200e-01,
    -2.77109880e-01,
    1.80127450e-01,
    1.31602990e-01,
    -1.00966570e-01,
    -4.16592500e-02,
    4.69698100e-02,
    5.10043697e-03,
    -1.51790000e-02,
    1.97332536e-03,
    2.81768659e-03,
    -9.69947840e-04,
    -1.64709006e-04,
    1.32354367e-04,
    -1.87584100e-05,
];

/// Daubechies wavelet family member, named by tap count.
///
/// Order codes `0..=9` select `D2..=D20`; code `k` has `2 * (k + 1)` taps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Daubechies {
    D2,
    D4,
    D6,
    D8,
    D10,
    D12,
    D14,
    D16,
    D18,
    D20,
}

impl Daubechies {
    /// Every order, by increasing code.
    pub const ALL: [Daubechies; 10] = [
        Daubechies::D2,
        Daubechies::D4,
        Daubechies::D6,
        Daubechies::D8,
        Daubechies::D10,
        Daubechies::D12,
        Daubechies::D14,
        Daubechies::D16,
        Daubechies::D18,
        Daubechies::D20,
    ];

    /// Looks up an order code, failing with `InvalidOrder` outside `0..=9`.
    pub fn from_code(code: usize) -> NdFilterResult<Self> {
        Self::ALL
            .get(code)
            .copied()
            .ok_or(NdFilterError::InvalidOrder { code })
    }

    /// Order code of this member.
    pub fn code(self) -> usize {
        self as usize
    }

    /// Number of filter taps.
    pub fn taps(self) -> usize {
        2 * (self.code() + 1)
    }

    /// Scaling-function coefficients.
    pub fn coefficients(self) -> &'static [f32] {
        match self {
            Daubechies::D2 => &D2,
            Daubechies::D4 => &D4,
            Daubechies::D6 => &D6,
            Daubechies::D8 => &D8,
            Daubechies::D10 => &D10,
            Daubechies::D12 => &D12,
            Daubechies::D14 => &D14,
            Daubechies::D16 => &D16,
            Daubechies::D18 => &D18,
            Daubechies::D20 => &D20,
        }
    }
}

impl TryFrom<usize> for Daubechies {
    type Error = NdFilterError;

    fn try_from(code: usize) -> NdFilterResult<Self> {
        Self::from_code(code)
    }
}

/// Forward Daubechies transform of order `code` along each row, in place.
pub fn daubechies<T: Element>(array: &mut ArrayViewMut<'_, T>, code: usize) -> NdFilterResult<()> {
    let order = Daubechies::from_code(code)?;
    let _span = trace_span!("daubechies", code = code, shape = ?array.shape()).entered();
    wavelet(array, order.coefficients())
}

/// Inverse of [`daubechies`] for the same order code.
///
/// D2 inverts exactly. Longer orders share the edge losses described on
/// [`iwavelet`](crate::iwavelet) in either composition order.
pub fn idaubechies<T: Element>(
    array: &mut ArrayViewMut<'_, T>,
    code: usize,
) -> NdFilterResult<()> {
    let order = Daubechies::from_code(code)?;
    let _span = trace_span!("idaubechies", code = code, shape = ?array.shape()).entered();
    iwavelet(array, order.coefficients())
}
