//! Error types for ndfilter.

use crate::array::DType;
use thiserror::Error;

/// Result alias for ndfilter operations.
pub type NdFilterResult<T> = std::result::Result<T, NdFilterError>;

/// Coarse classification of [`NdFilterError`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Array dtype, rank, shape or layout does not satisfy an operation.
    TypeMismatch,
    /// A scalar argument (rank, order code, mode code, coefficients) is out of range.
    InvalidArgument,
    /// An output buffer could not be allocated.
    AllocationFailure,
    /// Reading or writing an external file failed.
    Io,
}

/// Errors that can occur when running ndfilter kernels.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NdFilterError {
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The array has more axes than supported.
    #[error("too many dimensions: {ndim} (max {max})")]
    TooManyDims { ndim: usize, max: usize },
    /// Shape and strides do not describe a valid layout.
    #[error("invalid shape {shape:?} with strides {strides:?}")]
    InvalidShape {
        shape: Vec<usize>,
        strides: Vec<usize>,
    },
    /// The backing buffer is smaller than the layout requires.
    #[error("buffer too small: need {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Two arrays disagree in dimensionality.
    #[error("dimensionality mismatch: expected {expected}, got {got}")]
    RankMismatch { expected: usize, got: usize },
    /// Two arrays disagree in shape.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    /// Two arrays disagree in element type.
    #[error("dtype mismatch: expected {expected}, got {got}")]
    DTypeMismatch { expected: DType, got: DType },
    /// An output array is not densely packed in row-major order.
    #[error("output array must be dense row-major")]
    NotDense,
    /// The requested rank is outside `[0, size)`.
    #[error("rank {rank} out of range for {size} taps")]
    InvalidRank { rank: usize, size: usize },
    /// The Daubechies order code is not in the coefficient table.
    #[error("invalid Daubechies order code {code} (expected 0..=9)")]
    InvalidOrder { code: usize },
    /// A wavelet coefficient vector cannot be used.
    #[error("invalid wavelet coefficients: {reason}")]
    InvalidCoefficients { reason: &'static str },
    /// A host-side extend mode code is unknown.
    #[error("invalid extend mode code {code}")]
    InvalidMode { code: i32 },
    /// The output buffer could not be allocated.
    #[error("allocation of {elements} elements failed")]
    AllocationFailure { elements: usize },
    /// The requested behaviour needs a crate feature that is not enabled.
    #[error("feature `{feature}` is not enabled")]
    FeatureDisabled { feature: &'static str },
    /// Image decoding or encoding failed.
    #[error("image io failed: {reason}")]
    ImageIo { reason: String },
}

impl NdFilterError {
    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NdFilterError::TooManyDims { .. }
            | NdFilterError::InvalidShape { .. }
            | NdFilterError::BufferTooSmall { .. }
            | NdFilterError::RankMismatch { .. }
            | NdFilterError::ShapeMismatch { .. }
            | NdFilterError::DTypeMismatch { .. }
            | NdFilterError::NotDense => ErrorKind::TypeMismatch,
            NdFilterError::InvalidInput(_)
            | NdFilterError::InvalidRank { .. }
            | NdFilterError::InvalidOrder { .. }
            | NdFilterError::InvalidCoefficients { .. }
            | NdFilterError::InvalidMode { .. }
            | NdFilterError::FeatureDisabled { .. } => ErrorKind::InvalidArgument,
            NdFilterError::AllocationFailure { .. } => ErrorKind::AllocationFailure,
            NdFilterError::ImageIo { .. } => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, NdFilterError};
    use crate::array::DType;

    #[test]
    fn kinds_follow_taxonomy() {
        let err = NdFilterError::DTypeMismatch {
            expected: DType::F32,
            got: DType::U8,
        };
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(
            NdFilterError::InvalidRank { rank: 9, size: 9 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            NdFilterError::AllocationFailure { elements: 1 }.kind(),
            ErrorKind::AllocationFailure
        );
    }

    #[test]
    fn messages_name_the_values() {
        let err = NdFilterError::DTypeMismatch {
            expected: DType::F32,
            got: DType::U8,
        };
        assert_eq!(err.to_string(), "dtype mismatch: expected f32, got u8");
        let err = NdFilterError::InvalidOrder { code: 12 };
        assert!(err.to_string().contains("12"));
    }
}
