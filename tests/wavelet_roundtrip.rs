use ndfilter::{
    daubechies, daubechies_2d, haar, haar_2d, idaubechies, idaubechies_2d, ihaar, ihaar_2d,
    ArrayViewMut, Daubechies, NdFilterError, Transform,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_rows(seed: u64, len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1.0..1.0)).collect()
}

#[test]
fn haar_inverts_in_both_directions() {
    let original = random_rows(1, 6 * 10);
    let mut data = original.clone();
    let mut view = ArrayViewMut::from_slice(&mut data, &[6, 10]).unwrap();
    haar(&mut view).unwrap();
    ihaar(&mut view).unwrap();
    for (got, want) in data.iter().zip(&original) {
        assert!((got - want).abs() < 1e-12);
    }

    let mut view = ArrayViewMut::from_slice(&mut data, &[6, 10]).unwrap();
    ihaar(&mut view).unwrap();
    haar(&mut view).unwrap();
    for (got, want) in data.iter().zip(&original) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn two_tap_daubechies_is_exact() {
    let mut rng = StdRng::seed_from_u64(2);
    let original: Vec<f32> = (0..36).map(|_| f32::from(rng.random_range(-50i16..50))).collect();
    let mut data = original.clone();
    let mut view = ArrayViewMut::from_slice(&mut data, &[4, 9]).unwrap();
    daubechies(&mut view, Daubechies::D2.code()).unwrap();
    assert_ne!(data, original);
    let mut view = ArrayViewMut::from_slice(&mut data, &[4, 9]).unwrap();
    idaubechies(&mut view, Daubechies::D2.code()).unwrap();
    assert_eq!(data, original);
}

#[test]
fn longer_filters_reconstruct_away_from_row_starts() {
    let (rows, cols) = (3, 41);
    let original = random_rows(3, rows * cols);
    for order in Daubechies::ALL {
        let mut data = original.clone();
        let mut view = ArrayViewMut::from_slice(&mut data, &[rows, cols]).unwrap();
        daubechies(&mut view, order.code()).unwrap();
        idaubechies(&mut view, order.code()).unwrap();

        let skip = order.taps() - 2;
        for y in 0..rows {
            for x in skip..cols {
                let (got, want) = (data[y * cols + x], original[y * cols + x]);
                assert!((got - want).abs() < 1e-4, "{order:?} at ({y}, {x})");
            }
            // Odd trailing sample is carried through untouched.
            assert_eq!(data[y * cols + cols - 1], original[y * cols + cols - 1]);
        }
    }
}

#[test]
fn inverse_then_forward_recovers_all_but_each_half_tail() {
    let (rows, cols) = (3, 41);
    let half = cols / 2;
    let original = random_rows(5, rows * cols);
    for order in Daubechies::ALL {
        let mut data = original.clone();
        let mut view = ArrayViewMut::from_slice(&mut data, &[rows, cols]).unwrap();
        idaubechies(&mut view, order.code()).unwrap();
        daubechies(&mut view, order.code()).unwrap();

        let tail = order.taps() / 2 - 1;
        for y in 0..rows {
            for x in 0..cols {
                if (half - tail..half).contains(&x) || (2 * half - tail..2 * half).contains(&x) {
                    continue;
                }
                let (got, want) = (data[y * cols + x], original[y * cols + x]);
                assert!((got - want).abs() < 1e-4, "{order:?} at ({y}, {x})");
            }
        }
    }

    let mut data = original.clone();
    let mut view = ArrayViewMut::from_slice(&mut data, &[rows, cols]).unwrap();
    idaubechies(&mut view, Daubechies::D2.code()).unwrap();
    daubechies(&mut view, Daubechies::D2.code()).unwrap();
    for (got, want) in data.iter().zip(&original) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn separable_transforms_reconstruct_the_interior() {
    let (rows, cols) = (24, 20);
    let original = random_rows(4, rows * cols);

    let mut data = original.clone();
    let mut view = ArrayViewMut::from_slice(&mut data, &[rows, cols]).unwrap();
    haar_2d(&mut view).unwrap();
    ihaar_2d(&mut view).unwrap();
    for (got, want) in data.iter().zip(&original) {
        assert!((got - want).abs() < 1e-12);
    }

    let order = Daubechies::D6;
    let mut data = original.clone();
    let mut view = ArrayViewMut::from_slice(&mut data, &[rows, cols]).unwrap();
    daubechies_2d(&mut view, order.code()).unwrap();
    idaubechies_2d(&mut view, order.code()).unwrap();
    let skip = order.taps() - 2;
    for y in skip..rows {
        for x in skip..cols {
            let (got, want) = (data[y * cols + x], original[y * cols + x]);
            assert!((got - want).abs() < 1e-4, "({y}, {x})");
        }
    }
}

#[test]
fn transform_enum_pairs_with_its_inverse() {
    let original: Vec<i32> = (0..32).map(|v| (v * 37) % 11 - 5).collect();
    let mut data = original.clone();
    let mut view = ArrayViewMut::from_slice(&mut data, &[4, 8]).unwrap();
    let forward = Transform::Haar;
    forward.apply(&mut view, true).unwrap();
    forward.inverse().apply(&mut view, true).unwrap();
    assert_eq!(data, original);
    assert_eq!(
        Transform::Daubechies(Daubechies::D8).inverse(),
        Transform::InverseDaubechies(Daubechies::D8)
    );
}

#[test]
fn unknown_order_codes_are_rejected() {
    let mut data = [1.0f64; 8];
    let mut view = ArrayViewMut::from_slice(&mut data, &[2, 4]).unwrap();
    assert_eq!(
        daubechies(&mut view, 10),
        Err(NdFilterError::InvalidOrder { code: 10 })
    );
    assert_eq!(
        Daubechies::try_from(12usize),
        Err(NdFilterError::InvalidOrder { code: 12 })
    );
    assert_eq!(data, [1.0; 8]);
}
