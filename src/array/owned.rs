//! Owned contiguous arrays used for kernel outputs.

use crate::array::view::{ArrayView, ArrayViewMut, Layout};
use crate::array::Element;
use crate::util::{NdFilterError, NdFilterResult};

/// Owned row-major contiguous N-dimensional array.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedArray<T> {
    data: Vec<T>,
    layout: Layout,
}

impl<T: Element> OwnedArray<T> {
    /// Wraps a row-major buffer whose length must equal the shape's product.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> NdFilterResult<Self> {
        let layout = Layout::dense(shape)?;
        let needed = layout.len();
        if data.len() < needed {
            return Err(NdFilterError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(NdFilterError::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }
        Ok(Self { data, layout })
    }

    /// Allocates a zero-filled array of `shape`.
    ///
    /// Allocation failure is reported as [`NdFilterError::AllocationFailure`].
    pub fn zeros(shape: &[usize]) -> NdFilterResult<Self> {
        let elements = shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or(NdFilterError::AllocationFailure {
                elements: usize::MAX,
            })?;
        let layout = Layout::dense(shape)?;
        let mut data = Vec::new();
        data.try_reserve_exact(elements)
            .map_err(|_| NdFilterError::AllocationFailure { elements })?;
        data.resize(elements, T::zero());
        Ok(Self { data, layout })
    }

    /// Returns the size of each axis.
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Returns the number of axes.
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true when the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the row-major element buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns the row-major element buffer mutably.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the array and returns its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Borrows the array as a view.
    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView::from_parts(&self.data, self.layout.clone())
    }

    /// Borrows the array as a mutable view.
    pub fn view_mut(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut::from_parts(&mut self.data, self.layout.clone())
    }
}
