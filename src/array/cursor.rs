//! Row-major position cursor over an N-dimensional shape.

/// Index-based walker over every position of a shape, last axis fastest.
///
/// The cursor tracks the multi-index and the linear row-major index; it never
/// touches array memory.
#[derive(Clone, Debug)]
pub struct Cursor {
    shape: Vec<usize>,
    position: Vec<usize>,
    linear: usize,
    len: usize,
}

impl Cursor {
    /// Creates a cursor positioned at the origin of `shape`.
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            position: vec![0; shape.len()],
            linear: 0,
            len: shape.iter().product(),
        }
    }

    /// Returns the current multi-index.
    pub fn position(&self) -> &[usize] {
        &self.position
    }

    /// Returns the current row-major linear index.
    pub fn linear(&self) -> usize {
        self.linear
    }

    /// Returns the total number of positions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the shape has no positions.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true once every position has been visited.
    pub fn is_done(&self) -> bool {
        self.linear >= self.len
    }

    /// Moves to the next position. Returns the number of trailing axes that
    /// wrapped back to zero, or `None` once the walk is exhausted.
    pub fn advance(&mut self) -> Option<usize> {
        if self.is_done() {
            return None;
        }
        self.linear += 1;
        if self.is_done() {
            return None;
        }
        let mut wrapped = 0;
        for axis in (0..self.shape.len()).rev() {
            self.position[axis] += 1;
            if self.position[axis] < self.shape[axis] {
                break;
            }
            self.position[axis] = 0;
            wrapped += 1;
        }
        Some(wrapped)
    }

    /// Jumps to a linear row-major index. Indices past the end leave the
    /// cursor exhausted.
    pub fn seek(&mut self, linear: usize) {
        self.linear = linear.min(self.len);
        if self.is_done() {
            return;
        }
        let mut rest = linear;
        for axis in (0..self.shape.len()).rev() {
            let dim = self.shape[axis];
            self.position[axis] = rest % dim;
            rest /= dim;
        }
    }
}
