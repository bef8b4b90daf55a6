//! Boundary-aware neighborhood iteration.
//!
//! A [`NeighborhoodIterator`] walks every position of a primary array in
//! row-major order and, at each position, exposes the taps of a filter array
//! laid over it. Tap `j` is the `j`-th filter element in row-major order; its
//! offset is measured from the filter center (`fdims[d] / 2`) when the
//! iterator is centered and from the filter origin otherwise.
//!
//! Tap offsets are precomputed once, both per axis and as a linear buffer
//! delta. While every tap of the current position is in range (the interior
//! band) a lookup is a single indexed load; near the border each axis is
//! resolved independently through the [`ExtendMode`]. No padded copy of the
//! input is ever built.

use crate::array::{ArrayView, Cursor, Element};
use crate::boundary::{ExtendMode, Resolved};
use crate::util::{NdFilterError, NdFilterResult};

/// Walks a primary array and overlays a filter at each position.
#[derive(Clone, Debug)]
pub struct NeighborhoodIterator<'a, T> {
    array: ArrayView<'a, T>,
    mode: ExtendMode,
    centered: bool,
    ndim: usize,
    /// Tap-major per-axis offsets, `size * ndim` entries.
    offsets: Vec<isize>,
    /// Per-tap offset in the primary buffer for interior positions.
    deltas: Vec<isize>,
    weights: Vec<T>,
    /// Per-axis reach of the filter before and after the current position.
    reach_before: Vec<usize>,
    reach_after: Vec<usize>,
    cursor: Cursor,
    base: usize,
    interior: bool,
}

impl<'a, T: Element> NeighborhoodIterator<'a, T> {
    /// Builds an iterator positioned at the first element of `array`.
    ///
    /// Fails with `RankMismatch` when the filter's dimensionality differs
    /// from the array's.
    pub fn new(
        array: ArrayView<'a, T>,
        filter: ArrayView<'_, T>,
        mode: ExtendMode,
        centered: bool,
    ) -> NdFilterResult<Self> {
        let ndim = array.ndim();
        if filter.ndim() != ndim {
            return Err(NdFilterError::RankMismatch {
                expected: ndim,
                got: filter.ndim(),
            });
        }

        let fshape = filter.shape().to_vec();
        let strides = array.strides();
        let size = filter.len();
        let mut offsets = Vec::with_capacity(size * ndim);
        let mut deltas = Vec::with_capacity(size);
        let mut weights = Vec::with_capacity(size);
        let mut reach_before = vec![0usize; ndim];
        let mut reach_after = vec![0usize; ndim];

        let mut taps = Cursor::new(&fshape);
        for weight in filter.iter() {
            let mut delta = 0isize;
            for (d, &fpos) in taps.position().iter().enumerate() {
                let center = if centered { fshape[d] / 2 } else { 0 };
                let off = fpos as isize - center as isize;
                offsets.push(off);
                delta += off * strides[d] as isize;
                if off < 0 {
                    reach_before[d] = reach_before[d].max(off.unsigned_abs());
                } else {
                    reach_after[d] = reach_after[d].max(off as usize);
                }
            }
            deltas.push(delta);
            weights.push(weight);
            taps.advance();
        }

        let cursor = Cursor::new(array.shape());
        let mut iter = Self {
            array,
            mode,
            centered,
            ndim,
            offsets,
            deltas,
            weights,
            reach_before,
            reach_after,
            cursor,
            base: 0,
            interior: false,
        };
        iter.sync();
        Ok(iter)
    }

    /// Number of taps (filter elements) per position.
    pub fn size(&self) -> usize {
        self.weights.len()
    }

    /// Number of primary positions visited by a full walk.
    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    /// Returns true when the primary array has no elements.
    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    /// Shape of the primary array.
    pub fn array_shape(&self) -> &[usize] {
        self.array.shape()
    }

    /// Filter value of tap `j`.
    #[inline]
    pub fn tap_weight(&self, j: usize) -> T {
        self.weights[j]
    }

    /// Per-axis offset of tap `j` relative to the current position.
    pub fn tap_offset(&self, j: usize) -> &[isize] {
        &self.offsets[j * self.ndim..(j + 1) * self.ndim]
    }

    /// Boundary policy applied to out-of-range taps.
    pub fn mode(&self) -> ExtendMode {
        self.mode
    }

    /// Whether taps are measured from the filter center.
    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// Current position in the primary array.
    pub fn position(&self) -> &[usize] {
        self.cursor.position()
    }

    /// Row-major linear index of the current position.
    pub fn linear_index(&self) -> usize {
        self.cursor.linear()
    }

    /// Returns true once every position has been visited.
    pub fn is_done(&self) -> bool {
        self.cursor.is_done()
    }

    /// Moves to the next position in row-major order. Returns false once the
    /// walk is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.cursor.advance().is_none() {
            return false;
        }
        self.sync();
        true
    }

    /// Jumps to a row-major linear index.
    pub fn seek(&mut self, linear: usize) {
        self.cursor.seek(linear);
        self.sync();
    }

    /// Value of tap `j` at the current position, or `None` when the tap is
    /// out of range and the mode drops it.
    #[inline]
    pub fn retrieve(&self, j: usize) -> Option<T> {
        if self.interior {
            let off = self.base as isize + self.deltas[j];
            return Some(self.array.at(off as usize));
        }
        self.resolve(self.cursor.position(), j)
    }

    /// Value of tap `j` with the filter laid over an arbitrary position.
    ///
    /// Returns `None` when `position` is outside the array or the tap is
    /// dropped by the mode.
    pub fn retrieve_at(&self, position: &[usize], j: usize) -> Option<T> {
        if position.len() != self.ndim
            || position
                .iter()
                .zip(self.array.shape())
                .any(|(&p, &dim)| p >= dim)
        {
            return None;
        }
        self.resolve(position, j)
    }

    /// Number of taps that yield a value at the current position.
    pub fn valid_count(&self) -> usize {
        if self.interior {
            return self.size();
        }
        (0..self.size()).filter(|&j| self.retrieve(j).is_some()).count()
    }

    fn resolve(&self, position: &[usize], j: usize) -> Option<T> {
        let layout = self.array.layout();
        let shape = layout.shape();
        let strides = layout.strides();
        let offsets = self.tap_offset(j);
        let mut off = layout.base_offset();
        for d in 0..self.ndim {
            let coord = position[d] as isize + offsets[d];
            match self.mode.resolve(coord, shape[d]) {
                Resolved::Index(i) => off += i * strides[d],
                Resolved::Zero => return Some(T::zero()),
                Resolved::Skip => return None,
            }
        }
        Some(self.array.at(off))
    }

    fn sync(&mut self) {
        if self.cursor.is_done() {
            self.interior = false;
            return;
        }
        let position = self.cursor.position();
        let shape = self.array.shape();
        self.base = self.array.layout().offset_unchecked(position);
        self.interior = position.iter().enumerate().all(|(d, &p)| {
            p >= self.reach_before[d] && p + self.reach_after[d] < shape[d]
        });
    }
}
