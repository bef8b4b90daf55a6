#![cfg(feature = "rayon")]

use ndfilter::filter::rayon::{
    convolve_par, median_filter_par, rank_filter_par, template_match_par,
};
use ndfilter::{
    convolve, convolve_with, median_filter, rank_filter, template_match, ArrayView, ExtendMode,
    KernelConfig, OwnedArray,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_volume(seed: u64, len: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-10.0..10.0)).collect()
}

const MODES: [ExtendMode; 3] = [ExtendMode::Nearest, ExtendMode::Reflect, ExtendMode::Wrap];

#[test]
fn parallel_convolution_is_bit_exact() {
    let shape = [7, 19, 23];
    let data = make_volume(1, shape.iter().product());
    let filter = make_volume(2, 3 * 3 * 5);
    let a = ArrayView::from_slice(&data, &shape).unwrap();
    let f = ArrayView::from_slice(&filter, &[3, 3, 5]).unwrap();

    for mode in MODES {
        let seq = convolve(a.clone(), f.clone(), mode).unwrap();
        let par = convolve_par(a.clone(), f.clone(), mode).unwrap();
        assert_eq!(seq, par, "{mode:?}");

        let config = KernelConfig {
            mode,
            parallel: true,
        };
        assert_eq!(convolve_with(a.clone(), f.clone(), &config).unwrap(), seq);
    }
}

#[test]
fn parallel_rank_filters_are_bit_exact() {
    let shape = [41, 37];
    let data = make_volume(3, shape.iter().product());
    let footprint = [1.0f32; 15];
    let a = ArrayView::from_slice(&data, &shape).unwrap();
    let f = ArrayView::from_slice(&footprint, &[3, 5]).unwrap();

    for mode in MODES {
        let seq = median_filter(a.clone(), f.clone(), mode).unwrap();
        let par = median_filter_par(a.clone(), f.clone(), mode).unwrap();
        assert_eq!(seq, par, "{mode:?}");

        let mut seq = OwnedArray::zeros(&shape).unwrap();
        let mut par = OwnedArray::zeros(&shape).unwrap();
        rank_filter(a.clone(), f.clone(), 2, mode, &mut seq.view_mut()).unwrap();
        rank_filter_par(a.clone(), f.clone(), 2, mode, &mut par.view_mut()).unwrap();
        assert_eq!(seq, par, "{mode:?}");
    }
}

#[test]
fn parallel_template_match_is_bit_exact() {
    let shape = [64, 48];
    let data = make_volume(4, shape.iter().product());
    let template = make_volume(5, 6 * 4);
    let a = ArrayView::from_slice(&data, &shape).unwrap();
    let t = ArrayView::from_slice(&template, &[6, 4]).unwrap();

    let mut seq = OwnedArray::zeros(&shape).unwrap();
    let mut par = OwnedArray::zeros(&shape).unwrap();
    template_match(a.clone(), t.clone(), ExtendMode::Constant, &mut seq.view_mut()).unwrap();
    template_match_par(a, t, ExtendMode::Constant, &mut par.view_mut()).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn tiny_arrays_split_into_a_single_chunk() {
    let data = [4u8, 1, 9];
    let footprint = [1u8; 3];
    let a = ArrayView::from_slice(&data, &[3]).unwrap();
    let f = ArrayView::from_slice(&footprint, &[3]).unwrap();
    let par = median_filter_par(a.clone(), f.clone(), ExtendMode::Mirror).unwrap();
    assert_eq!(par, median_filter(a, f, ExtendMode::Mirror).unwrap());
}

#[test]
fn long_one_dimensional_arrays_match_sequential() {
    let len = 100_003;
    let data = make_volume(6, len);
    let filter = make_volume(7, 9);
    let a = ArrayView::from_slice(&data, &[len]).unwrap();
    let f = ArrayView::from_slice(&filter, &[9]).unwrap();

    for mode in MODES {
        let seq = convolve(a.clone(), f.clone(), mode).unwrap();
        let par = convolve_par(a.clone(), f.clone(), mode).unwrap();
        assert_eq!(seq, par, "{mode:?}");
    }

    let footprint = [1.0f32; 5];
    let f = ArrayView::from_slice(&footprint, &[5]).unwrap();
    let seq = median_filter(a.clone(), f.clone(), ExtendMode::Mirror).unwrap();
    let par = median_filter_par(a, f, ExtendMode::Mirror).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn few_long_rows_match_sequential() {
    let shape = [2, 40_000];
    let data = make_volume(8, shape.iter().product());
    let filter = make_volume(9, 3 * 7);
    let a = ArrayView::from_slice(&data, &shape).unwrap();
    let f = ArrayView::from_slice(&filter, &[3, 7]).unwrap();
    let seq = convolve(a.clone(), f.clone(), ExtendMode::Reflect).unwrap();
    let par = convolve_par(a, f, ExtendMode::Reflect).unwrap();
    assert_eq!(seq, par);
}
