//! ndfilter is a CPU library of N-dimensional filtering and wavelet kernels.
//!
//! It provides generic convolution, rank-order (median) filtering, template
//! matching by squared differences and Haar/Daubechies wavelet transforms
//! over strided array views of any supported element type. All windowed
//! kernels share one boundary-aware neighborhood iterator, so borders are
//! handled by an [`ExtendMode`] instead of padded copies of the input.
//! Parallel drivers are available with the `rayon` feature, image
//! loading with `image-io`, and span instrumentation with `tracing`.

pub mod array;
pub mod boundary;
pub mod config;
pub mod filter;
pub mod neighborhood;
mod trace;
pub mod util;
pub mod wavelet;

pub use array::{
    AnyArray, AnyArrayView, AnyArrayViewMut, ArrayView, ArrayViewMut, Cursor, DType, Element,
    OwnedArray, MAX_DIMS,
};
pub use boundary::ExtendMode;
pub use config::KernelConfig;
pub use filter::{
    convolve, convolve_any, convolve_into, convolve_with, median_filter, median_filter_any,
    median_filter_with, rank_filter, rank_filter_any, rank_filter_with, template_match,
    template_match_any, template_match_with, Kernel,
};
pub use neighborhood::NeighborhoodIterator;
pub use util::{ErrorKind, NdFilterError, NdFilterResult};
pub use wavelet::{
    daubechies, daubechies_2d, haar, haar_2d, idaubechies, idaubechies_2d, ihaar, ihaar_2d,
    iwavelet, transform_any, wavelet, Daubechies, Transform,
};
