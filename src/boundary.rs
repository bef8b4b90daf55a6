//! Boundary extension policies for out-of-range neighbor lookups.
//!
//! Illustrated on a row `a b c d`:
//!
//! | mode       | left pad | right pad |
//! |------------|----------|-----------|
//! | `Nearest`  | dropped  | dropped   |
//! | `Wrap`     | `c d`    | `a b`     |
//! | `Mirror`   | `c b`    | `c b`     |
//! | `Reflect`  | `b a`    | `d c`     |
//! | `Constant` | `0 0`    | `0 0`     |
//! | `Clamp`    | `a a`    | `d d`     |

use crate::util::{NdFilterError, NdFilterResult};

/// How a coordinate that falls outside an axis is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExtendMode {
    /// Out-of-range taps contribute nothing and are not counted.
    #[default]
    Nearest,
    /// Periodic extension.
    Wrap,
    /// Whole-sample symmetric extension; the edge element is not repeated.
    Mirror,
    /// Half-sample symmetric extension; the edge element is repeated.
    Reflect,
    /// Out-of-range taps read the zero value.
    Constant,
    /// The edge element is replicated.
    Clamp,
}

/// Outcome of resolving one coordinate against one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// Read the element at this in-range index.
    Index(usize),
    /// Use the zero value.
    Zero,
    /// Skip the tap.
    Skip,
}

impl ExtendMode {
    /// Maps a signed coordinate onto an axis of length `len`.
    pub fn resolve(self, coord: isize, len: usize) -> Resolved {
        if len == 0 {
            return Resolved::Skip;
        }
        if coord >= 0 && (coord as usize) < len {
            return Resolved::Index(coord as usize);
        }
        let n = len as isize;
        match self {
            ExtendMode::Nearest => Resolved::Skip,
            ExtendMode::Constant => Resolved::Zero,
            ExtendMode::Wrap => Resolved::Index(coord.rem_euclid(n) as usize),
            ExtendMode::Clamp => Resolved::Index(coord.clamp(0, n - 1) as usize),
            ExtendMode::Mirror => {
                if n == 1 {
                    return Resolved::Index(0);
                }
                let period = 2 * n - 2;
                let m = coord.rem_euclid(period);
                Resolved::Index(if m >= n { period - m } else { m } as usize)
            }
            ExtendMode::Reflect => {
                let period = 2 * n;
                let m = coord.rem_euclid(period);
                Resolved::Index(if m >= n { period - 1 - m } else { m } as usize)
            }
        }
    }

    /// Returns the host-side integer code of this mode.
    pub fn code(self) -> i32 {
        match self {
            ExtendMode::Nearest => 0,
            ExtendMode::Wrap => 1,
            ExtendMode::Reflect => 2,
            ExtendMode::Mirror => 3,
            ExtendMode::Constant => 4,
            ExtendMode::Clamp => 5,
        }
    }
}

impl TryFrom<i32> for ExtendMode {
    type Error = NdFilterError;

    fn try_from(code: i32) -> NdFilterResult<Self> {
        match code {
            0 => Ok(ExtendMode::Nearest),
            1 => Ok(ExtendMode::Wrap),
            2 => Ok(ExtendMode::Reflect),
            3 => Ok(ExtendMode::Mirror),
            4 => Ok(ExtendMode::Constant),
            5 => Ok(ExtendMode::Clamp),
            _ => Err(NdFilterError::InvalidMode { code }),
        }
    }
}
