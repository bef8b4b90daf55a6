//! Convenience helpers for moving images in and out of arrays via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Images map to 2-D arrays
//! of shape `[height, width]`.

use crate::array::{dispatch_one, AnyArray, AnyArrayView, ArrayView, DType, Element, OwnedArray};
use crate::util::{NdFilterError, NdFilterResult};
use std::path::Path;

/// Creates a borrowed `u8` view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> NdFilterResult<ArrayView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ArrayView::from_slice(img.as_raw(), &[height, width])
}

/// Converts a grayscale image into an owned array of any element type.
pub fn array_from_gray_image<T: Element>(img: &image::GrayImage) -> NdFilterResult<OwnedArray<T>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img
        .as_raw()
        .iter()
        .map(|&v| T::from_f64(v as f64))
        .collect();
    OwnedArray::from_vec(data, &[height, width])
}

fn open_gray<P: AsRef<Path>>(path: P) -> NdFilterResult<image::GrayImage> {
    let img = image::open(path).map_err(|err| NdFilterError::ImageIo {
        reason: err.to_string(),
    })?;
    Ok(img.to_luma8())
}

/// Loads an image from disk as a grayscale array.
pub fn load_gray_array<T: Element, P: AsRef<Path>>(path: P) -> NdFilterResult<OwnedArray<T>> {
    array_from_gray_image(&open_gray(path)?)
}

/// Loads an image from disk as a grayscale array of a runtime element type.
pub fn load_gray_any<P: AsRef<Path>>(path: P, dtype: DType) -> NdFilterResult<AnyArray> {
    let img = open_gray(path)?;
    let shape = [img.height() as usize, img.width() as usize];
    let values: Vec<f64> = img.as_raw().iter().map(|&v| f64::from(v)).collect();
    AnyArray::from_f64_slice(dtype, &values, &shape)
}

/// Converts a 2-D array into an 8-bit grayscale image, rounding and clamping
/// each value to `[0, 255]`.
pub fn gray_image_from_array<T: Element>(
    array: ArrayView<'_, T>,
) -> NdFilterResult<image::GrayImage> {
    if array.ndim() != 2 {
        return Err(NdFilterError::RankMismatch {
            expected: 2,
            got: array.ndim(),
        });
    }
    let height = array.shape()[0];
    let width = array.shape()[1];
    let pixels: Vec<u8> = array
        .iter()
        .map(|v| v.to_f64().round().clamp(0.0, 255.0) as u8)
        .collect();
    image::GrayImage::from_raw(width as u32, height as u32, pixels).ok_or(
        NdFilterError::BufferTooSmall {
            needed: width * height,
            got: array.len(),
        },
    )
}

/// Saves a 2-D array as an 8-bit grayscale image; the format follows the
/// file extension.
pub fn save_gray_array<T: Element, P: AsRef<Path>>(
    array: ArrayView<'_, T>,
    path: P,
) -> NdFilterResult<()> {
    let img = gray_image_from_array(array)?;
    img.save(path).map_err(|err| NdFilterError::ImageIo {
        reason: err.to_string(),
    })
}

/// Saves a type-erased 2-D array as an 8-bit grayscale image.
pub fn save_gray_any<P: AsRef<Path>>(array: &AnyArrayView<'_>, path: P) -> NdFilterResult<()> {
    dispatch_one!(AnyArrayView, array, |a| save_gray_array(a.clone(), path))
}

#[cfg(test)]
mod tests {
    use super::{array_from_gray_image, gray_image_from_array};

    #[test]
    fn gray_images_round_trip_through_arrays() {
        let img = image::GrayImage::from_raw(3, 2, vec![0, 10, 20, 30, 40, 250]).unwrap();
        let arr = array_from_gray_image::<f32>(&img).unwrap();
        assert_eq!(arr.shape(), &[2, 3]);
        assert_eq!(arr.data()[4], 40.0);

        let back = gray_image_from_array(arr.view()).unwrap();
        assert_eq!(back.as_raw(), img.as_raw());
    }
}
