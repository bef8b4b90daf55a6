//! Borrowed N-dimensional strided views.
//!
//! A view is a slice plus a layout: shape, per-axis strides counted in
//! elements, and the offset of element `[0, 0, ..]` inside the slice. Strides
//! are non-negative and may skip elements, so a view can describe a sub-grid
//! or a transposition of its backing buffer without copying it.

use crate::array::cursor::Cursor;
use crate::array::owned::OwnedArray;
use crate::array::{Element, MAX_DIMS};
use crate::util::{NdFilterError, NdFilterResult};

/// Shape, strides and base offset of a strided array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    shape: Vec<usize>,
    strides: Vec<usize>,
    offset: usize,
}

impl Layout {
    /// Builds and validates a layout against a buffer of `buf_len` elements.
    pub(crate) fn new(
        shape: &[usize],
        strides: &[usize],
        offset: usize,
        buf_len: usize,
    ) -> NdFilterResult<Self> {
        check_ndim(shape.len())?;
        if strides.len() != shape.len() {
            return Err(NdFilterError::InvalidShape {
                shape: shape.to_vec(),
                strides: strides.to_vec(),
            });
        }
        let layout = Self {
            shape: shape.to_vec(),
            strides: strides.to_vec(),
            offset,
        };
        let needed = layout.required_len()?;
        if buf_len < needed {
            return Err(NdFilterError::BufferTooSmall {
                needed,
                got: buf_len,
            });
        }
        Ok(layout)
    }

    /// Row-major contiguous layout for `shape`.
    pub(crate) fn dense(shape: &[usize]) -> NdFilterResult<Self> {
        check_ndim(shape.len())?;
        let strides = dense_strides(shape).ok_or_else(|| NdFilterError::InvalidShape {
            shape: shape.to_vec(),
            strides: Vec::new(),
        })?;
        Ok(Self {
            shape: shape.to_vec(),
            strides,
            offset: 0,
        })
    }

    pub(crate) fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub(crate) fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub(crate) fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// True when elements are packed row-major with no gaps.
    ///
    /// Strides of unit-length axes are ignored, as they never step.
    pub(crate) fn is_dense(&self) -> bool {
        let mut expected = 1usize;
        for (&dim, &stride) in self.shape.iter().zip(self.strides.iter()).rev() {
            if dim == 0 {
                return true;
            }
            if dim != 1 && stride != expected {
                return false;
            }
            expected *= dim;
        }
        true
    }

    /// Buffer offset of a multi-index, or `None` if it lies outside the shape.
    pub(crate) fn offset_of(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut off = self.offset;
        for ((&i, &dim), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if i >= dim {
                return None;
            }
            off += i * stride;
        }
        Some(off)
    }

    /// Buffer offset of a multi-index known to be in bounds.
    #[inline]
    pub(crate) fn offset_unchecked(&self, index: &[usize]) -> usize {
        index
            .iter()
            .zip(&self.strides)
            .fold(self.offset, |acc, (&i, &stride)| acc + i * stride)
    }

    pub(crate) fn base_offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn transposed(&self) -> Self {
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        shape.reverse();
        strides.reverse();
        Self {
            shape,
            strides,
            offset: self.offset,
        }
    }

    pub(crate) fn index_axis(&self, axis: usize, index: usize) -> NdFilterResult<Self> {
        if axis >= self.ndim() {
            return Err(NdFilterError::InvalidInput("axis out of range"));
        }
        if self.ndim() == 1 {
            return Err(NdFilterError::InvalidInput(
                "cannot index the only axis of a 1-D view",
            ));
        }
        if index >= self.shape[axis] {
            return Err(NdFilterError::InvalidInput("index out of range"));
        }
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        let offset = self.offset + index * strides[axis];
        shape.remove(axis);
        strides.remove(axis);
        Ok(Self {
            shape,
            strides,
            offset,
        })
    }

    fn required_len(&self) -> NdFilterResult<usize> {
        let invalid = || NdFilterError::InvalidShape {
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        };
        if self.shape.iter().any(|&dim| dim == 0) {
            return Ok(self.offset);
        }
        let mut last = self.offset;
        for (&dim, &stride) in self.shape.iter().zip(&self.strides) {
            let span = (dim - 1).checked_mul(stride).ok_or_else(invalid)?;
            last = last.checked_add(span).ok_or_else(invalid)?;
        }
        last.checked_add(1).ok_or_else(invalid)
    }
}

fn check_ndim(ndim: usize) -> NdFilterResult<()> {
    if ndim == 0 {
        return Err(NdFilterError::InvalidInput(
            "arrays need at least one axis",
        ));
    }
    if ndim > MAX_DIMS {
        return Err(NdFilterError::TooManyDims {
            ndim,
            max: MAX_DIMS,
        });
    }
    Ok(())
}

fn dense_strides(shape: &[usize]) -> Option<Vec<usize>> {
    let mut strides = vec![0usize; shape.len()];
    let mut acc = 1usize;
    for axis in (0..shape.len()).rev() {
        strides[axis] = acc;
        acc = acc.checked_mul(shape[axis].max(1))?;
    }
    Some(strides)
}

/// Borrowed N-dimensional view with explicit strides.
#[derive(Clone, Debug)]
pub struct ArrayView<'a, T> {
    data: &'a [T],
    layout: Layout,
}

impl<'a, T: Element> ArrayView<'a, T> {
    /// Creates a row-major contiguous view of `shape`.
    pub fn from_slice(data: &'a [T], shape: &[usize]) -> NdFilterResult<Self> {
        let dense = Layout::dense(shape)?;
        Self::with_offset(data, shape, dense.strides(), 0)
    }

    /// Creates a view with explicit element strides.
    pub fn new(data: &'a [T], shape: &[usize], strides: &[usize]) -> NdFilterResult<Self> {
        Self::with_offset(data, shape, strides, 0)
    }

    /// Creates a view whose first element sits at `offset` in `data`.
    pub fn with_offset(
        data: &'a [T],
        shape: &[usize],
        strides: &[usize],
        offset: usize,
    ) -> NdFilterResult<Self> {
        let layout = Layout::new(shape, strides, offset, data.len())?;
        Ok(Self { data, layout })
    }

    pub(crate) fn from_parts(data: &'a [T], layout: Layout) -> Self {
        Self { data, layout }
    }

    /// Returns the size of each axis.
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Returns the element stride of each axis.
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Returns the number of axes.
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    /// Returns true when any axis has length zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true when the view is packed row-major without gaps.
    pub fn is_dense(&self) -> bool {
        self.layout.is_dense()
    }

    /// Returns the element at a multi-index if it is within bounds.
    pub fn get(&self, index: &[usize]) -> Option<&'a T> {
        let off = self.layout.offset_of(index)?;
        self.data.get(off)
    }

    /// Returns the elements as one slice when the view is dense.
    pub fn as_dense_slice(&self) -> Option<&'a [T]> {
        if !self.is_dense() {
            return None;
        }
        let start = self.layout.base_offset();
        self.data.get(start..start + self.len())
    }

    /// Iterates over the elements in row-major order.
    pub fn iter(&self) -> Iter<'a, T> {
        Iter {
            data: self.data,
            layout: self.layout.clone(),
            cursor: Cursor::new(self.shape()),
        }
    }

    /// Copies the view into a new contiguous array.
    pub fn to_owned(&self) -> NdFilterResult<OwnedArray<T>> {
        let mut out = OwnedArray::zeros(self.shape())?;
        for (dst, src) in out.data_mut().iter_mut().zip(self.iter()) {
            *dst = src;
        }
        Ok(out)
    }

    /// Returns a zero-copy view with the axis order reversed.
    pub fn transposed(&self) -> ArrayView<'a, T> {
        ArrayView {
            data: self.data,
            layout: self.layout.transposed(),
        }
    }

    /// Returns the (N-1)-dimensional slice at `index` along `axis`.
    pub fn index_axis(&self, axis: usize, index: usize) -> NdFilterResult<ArrayView<'a, T>> {
        Ok(ArrayView {
            data: self.data,
            layout: self.layout.index_axis(axis, index)?,
        })
    }

    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub(crate) fn at(&self, offset: usize) -> T {
        self.data[offset]
    }
}

/// Row-major element iterator over an [`ArrayView`].
pub struct Iter<'a, T> {
    data: &'a [T],
    layout: Layout,
    cursor: Cursor,
}

impl<'a, T: Copy> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.cursor.is_done() {
            return None;
        }
        let value = self.data[self.layout.offset_unchecked(self.cursor.position())];
        self.cursor.advance();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.cursor.len() - self.cursor.linear();
        (rest, Some(rest))
    }
}

/// Mutable N-dimensional view with explicit strides.
#[derive(Debug)]
pub struct ArrayViewMut<'a, T> {
    data: &'a mut [T],
    layout: Layout,
}

impl<'a, T: Element> ArrayViewMut<'a, T> {
    /// Creates a row-major contiguous mutable view of `shape`.
    pub fn from_slice(data: &'a mut [T], shape: &[usize]) -> NdFilterResult<Self> {
        let dense = Layout::dense(shape)?;
        let layout = Layout::new(shape, dense.strides(), 0, data.len())?;
        Ok(Self { data, layout })
    }

    /// Creates a mutable view with explicit element strides.
    pub fn new(data: &'a mut [T], shape: &[usize], strides: &[usize]) -> NdFilterResult<Self> {
        Self::with_offset(data, shape, strides, 0)
    }

    /// Creates a mutable view whose first element sits at `offset` in `data`.
    pub fn with_offset(
        data: &'a mut [T],
        shape: &[usize],
        strides: &[usize],
        offset: usize,
    ) -> NdFilterResult<Self> {
        let layout = Layout::new(shape, strides, offset, data.len())?;
        Ok(Self { data, layout })
    }

    pub(crate) fn from_parts(data: &'a mut [T], layout: Layout) -> Self {
        Self { data, layout }
    }

    /// Returns the size of each axis.
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Returns the element stride of each axis.
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Returns the number of axes.
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    /// Returns true when any axis has length zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true when the view is packed row-major without gaps.
    pub fn is_dense(&self) -> bool {
        self.layout.is_dense()
    }

    /// Returns the element at a multi-index if it is within bounds.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let off = self.layout.offset_of(index)?;
        self.data.get(off)
    }

    /// Returns a mutable reference to the element at a multi-index.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let off = self.layout.offset_of(index)?;
        self.data.get_mut(off)
    }

    /// Borrows the view immutably.
    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView::from_parts(&*self.data, self.layout.clone())
    }

    /// Reborrows the view mutably for a shorter lifetime.
    pub fn reborrow(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut {
            data: &mut *self.data,
            layout: self.layout.clone(),
        }
    }

    /// Returns the elements as one mutable slice when the view is dense.
    pub fn as_dense_slice_mut(&mut self) -> Option<&mut [T]> {
        if !self.is_dense() {
            return None;
        }
        let start = self.layout.base_offset();
        let len = self.len();
        self.data.get_mut(start..start + len)
    }

    /// Returns a zero-copy mutable view with the axis order reversed.
    pub fn transposed(self) -> ArrayViewMut<'a, T> {
        ArrayViewMut {
            data: self.data,
            layout: self.layout.transposed(),
        }
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        let mut cursor = Cursor::new(self.shape());
        while !cursor.is_done() {
            let off = self.layout.offset_unchecked(cursor.position());
            self.data[off] = value;
            cursor.advance();
        }
    }

    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub(crate) fn at(&self, offset: usize) -> T {
        self.data[offset]
    }

    #[inline]
    pub(crate) fn set(&mut self, offset: usize, value: T) {
        self.data[offset] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::{ArrayView, ArrayViewMut, Layout};
    use crate::util::NdFilterError;

    #[test]
    fn dense_layout_has_row_major_strides() {
        let layout = Layout::dense(&[2, 3, 4]).unwrap();
        assert_eq!(layout.strides(), &[12, 4, 1]);
        assert!(layout.is_dense());
        assert_eq!(layout.transposed().strides(), &[1, 4, 12]);
        assert!(!layout.transposed().is_dense());
    }

    #[test]
    fn unit_axes_do_not_break_density() {
        let data = [0u8; 6];
        let view = ArrayView::new(&data, &[1, 6], &[99, 1]).unwrap();
        assert!(view.is_dense());
        let view = ArrayView::new(&data, &[6, 1], &[1, 7]).unwrap();
        assert!(view.is_dense());
    }

    #[test]
    fn strided_view_reads_sub_grid() {
        let data: Vec<i32> = (0..12).collect();
        let view = ArrayView::new(&data, &[2, 3], &[6, 2]).unwrap();
        let values: Vec<i32> = view.iter().collect();
        assert_eq!(values, vec![0, 2, 4, 6, 8, 10]);
        assert!(view.as_dense_slice().is_none());
    }

    #[test]
    fn offset_view_respects_bounds() {
        let data: Vec<u16> = (0..10).collect();
        let view = ArrayView::with_offset(&data, &[3], &[2], 4).unwrap();
        assert_eq!(view.iter().collect::<Vec<_>>(), vec![4, 6, 8]);
        let err = ArrayView::with_offset(&data, &[3], &[2], 6).unwrap_err();
        assert_eq!(err, NdFilterError::BufferTooSmall { needed: 11, got: 10 });
    }

    #[test]
    fn mutable_transpose_writes_columns() {
        let mut data = vec![0.0f32; 6];
        let mut view = ArrayViewMut::from_slice(&mut data, &[2, 3]).unwrap();
        view.fill(1.0);
        let mut t = view.transposed();
        assert_eq!(t.shape(), &[3, 2]);
        *t.get_mut(&[2, 1]).unwrap() = 5.0;
        assert_eq!(data[5], 5.0);
    }
}
