use ndfilter::boundary::Resolved;
use ndfilter::{convolve, ArrayView, ExtendMode, NdFilterError};

const ALL_MODES: [ExtendMode; 6] = [
    ExtendMode::Nearest,
    ExtendMode::Wrap,
    ExtendMode::Mirror,
    ExtendMode::Reflect,
    ExtendMode::Constant,
    ExtendMode::Clamp,
];

/// Folds a coordinate back into `[0, n)` one bounce at a time.
fn fold(mode: ExtendMode, mut c: isize, n: usize) -> Option<usize> {
    let n = n as isize;
    match mode {
        ExtendMode::Nearest | ExtendMode::Constant => (0..n).contains(&c).then_some(c as usize),
        ExtendMode::Wrap => Some(c.rem_euclid(n) as usize),
        ExtendMode::Clamp => Some(c.clamp(0, n - 1) as usize),
        ExtendMode::Mirror => {
            if n == 1 {
                return Some(0);
            }
            while !(0..n).contains(&c) {
                c = if c < 0 { -c } else { 2 * n - 2 - c };
            }
            Some(c as usize)
        }
        ExtendMode::Reflect => {
            while !(0..n).contains(&c) {
                c = if c < 0 { -c - 1 } else { 2 * n - 1 - c };
            }
            Some(c as usize)
        }
    }
}

#[test]
fn resolution_matches_bounce_folding() {
    for mode in ALL_MODES {
        for n in 1..6usize {
            for c in -17isize..23 {
                let expected = match fold(mode, c, n) {
                    Some(i) => Resolved::Index(i),
                    None if mode == ExtendMode::Constant => Resolved::Zero,
                    None => Resolved::Skip,
                };
                assert_eq!(mode.resolve(c, n), expected, "{mode:?} c={c} n={n}");
            }
        }
    }
}

fn shifted(data: &[i32], filter: &[i32], mode: ExtendMode) -> Vec<i32> {
    let a = ArrayView::from_slice(data, &[data.len()]).unwrap();
    let f = ArrayView::from_slice(filter, &[filter.len()]).unwrap();
    convolve(a, f, mode).unwrap().into_vec()
}

#[test]
fn left_neighbor_shows_the_left_pad() {
    let data = [1, 2, 3, 4];
    let pick_left = [1, 0, 0];
    let cases = [
        (ExtendMode::Nearest, [0, 1, 2, 3]),
        (ExtendMode::Wrap, [4, 1, 2, 3]),
        (ExtendMode::Mirror, [2, 1, 2, 3]),
        (ExtendMode::Reflect, [1, 1, 2, 3]),
        (ExtendMode::Constant, [0, 1, 2, 3]),
        (ExtendMode::Clamp, [1, 1, 2, 3]),
    ];
    for (mode, expected) in cases {
        assert_eq!(shifted(&data, &pick_left, mode), expected, "{mode:?}");
    }
}

#[test]
fn right_neighbor_shows_the_right_pad() {
    let data = [1, 2, 3, 4];
    let pick_right = [0, 0, 1];
    let cases = [
        (ExtendMode::Nearest, [2, 3, 4, 0]),
        (ExtendMode::Wrap, [2, 3, 4, 1]),
        (ExtendMode::Mirror, [2, 3, 4, 3]),
        (ExtendMode::Reflect, [2, 3, 4, 4]),
        (ExtendMode::Constant, [2, 3, 4, 0]),
        (ExtendMode::Clamp, [2, 3, 4, 4]),
    ];
    for (mode, expected) in cases {
        assert_eq!(shifted(&data, &pick_right, mode), expected, "{mode:?}");
    }
}

#[test]
fn filters_wider_than_the_array_fold_repeatedly() {
    let data = [10, 20, 30];
    // Single unit tap at offset -4.
    let mut far_left = [0; 9];
    far_left[0] = 1;
    for mode in ALL_MODES {
        let out = shifted(&data, &far_left, mode);
        for (i, &value) in out.iter().enumerate() {
            let expected = fold(mode, i as isize - 4, 3).map_or(0, |j| data[j]);
            assert_eq!(value, expected, "{mode:?} at {i}");
        }
    }
}

#[test]
fn mode_codes_round_trip() {
    for mode in ALL_MODES {
        assert_eq!(ExtendMode::try_from(mode.code()), Ok(mode));
    }
    assert_eq!(ExtendMode::default(), ExtendMode::Nearest);
    assert_eq!(
        ExtendMode::try_from(-1),
        Err(NdFilterError::InvalidMode { code: -1 })
    );
    assert_eq!(
        ExtendMode::try_from(6),
        Err(NdFilterError::InvalidMode { code: 6 })
    );
}
