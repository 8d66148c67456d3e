use graylab_image::{Image, ImageError};
use rayon::prelude::*;

use crate::filter::{kernels::validate_kernel_size, window::apply_window};
use crate::intensity::{apply_lut, build_lut};
use crate::padding::PaddingMode;

/// Compute the pixel intensity histogram of an image.
///
/// NOTE: this is limited to 8-bit 1-channel images.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
/// * `hist` - The output histogram, counts are added to the existing values.
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if the number of bins is invalid.
///
/// # Example
///
/// ```
/// use graylab_image::{Image, ImageSize};
/// use graylab_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::new(
///   ImageSize {
///     width: 3,
///     height: 3,
///   },
///   vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let mut histogram = vec![0; 3];
///
/// compute_histogram(&image, &mut histogram, 3).unwrap();
/// assert_eq!(histogram, vec![3, 3, 3]);
/// ```
pub fn compute_histogram(
    src: &Image<u8, 1>,
    hist: &mut [usize],
    num_bins: usize,
) -> Result<(), ImageError> {
    if num_bins == 0 || num_bins > 256 {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    if hist.len() != num_bins {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    let mut bin_lut = [0usize; 256];
    for (i, bin) in bin_lut.iter_mut().enumerate() {
        *bin = (i * num_bins) >> 8;
    }

    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || vec![0usize; num_bins],
            |mut local, chunk| {
                for &px in chunk {
                    local[bin_lut[px as usize]] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                for (i, val) in b.iter().enumerate() {
                    a[i] += val;
                }
                a
            },
        );

    for (h, c) in hist.iter_mut().zip(counts.iter()) {
        *h += c;
    }

    Ok(())
}

/// Map a cumulative count onto `[0, 255]` using the equalization formula
/// `(cdf - cdf_min) * 255 / (total - cdf_min)`.
#[inline]
fn equalize_value(cdf: usize, cdf_min: usize, total: usize) -> f32 {
    cdf.saturating_sub(cdf_min) as f32 * 255.0 / (total - cdf_min) as f32
}

/// Equalize the histogram of a grayscale image.
///
/// Builds the cumulative distribution of the intensities and remaps every
/// sample with `round((cdf(r) - cdf_min) * 255 / (N - cdf_min))`, where `cdf_min`
/// is the smallest non-zero cumulative count and `N` the number of pixels.
/// A constant image has no spread to redistribute and is copied unchanged.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The equalized output image.
///
/// # Example
///
/// ```
/// use graylab_image::{Image, ImageSize};
/// use graylab_imgproc::histogram::equalize_histogram;
///
/// let size = ImageSize { width: 4, height: 1 };
/// let src = Image::<u8, 1>::new(size, vec![100, 101, 102, 103]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// equalize_histogram(&src, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[0, 85, 170, 255]);
/// ```
pub fn equalize_histogram(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let mut hist = vec![0usize; 256];
    compute_histogram(src, &mut hist, 256)?;

    let mut cdf = [0usize; 256];
    let mut acc = 0;
    for (c, h) in cdf.iter_mut().zip(hist.iter()) {
        acc += h;
        *c = acc;
    }

    let total = acc;
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);

    if total == cdf_min {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let lut = build_lut(|r| equalize_value(cdf[r as usize], cdf_min, total));
    apply_lut(src, dst, &lut)
}

/// Equalize the histogram locally in a sliding window.
///
/// For every pixel the equalization mapping of [`equalize_histogram`] is
/// computed from the `kernel_size x kernel_size` neighbourhood (reflect
/// padded) and applied to the centre pixel only. Windows whose samples are all
/// equal leave the pixel unchanged.
///
/// NOTE: `cdf_min` is the count of the smallest value present in the window,
/// not the minimum over all 256 bins (which is always zero for a window). With
/// the latter a flat window would map to 255 instead of keeping its value.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output image.
/// * `kernel_size` - The side length of the window, odd and greater than zero.
///
/// # Errors
///
/// Returns an error if `kernel_size` is invalid or the sizes do not match.
pub fn local_equalize_histogram(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    validate_kernel_size(kernel_size)?;

    log::debug!(
        "local histogram equalization {}x{} on {}",
        kernel_size,
        kernel_size,
        src.size()
    );

    apply_window(src, dst, kernel_size, PaddingMode::Reflect, |window, center| {
        let total = window.len();
        let min = window.iter().copied().fold(f32::INFINITY, f32::min);

        let mut cdf_center = 0;
        let mut cdf_min = 0;
        for &v in window.iter() {
            if v <= center {
                cdf_center += 1;
            }
            if v == min {
                cdf_min += 1;
            }
        }

        if total == cdf_min {
            return center;
        }

        equalize_value(cdf_center, cdf_min, total)
    })
}

/// Linearly stretch the intensities to the full `[0, 255]` range.
///
/// Every sample is mapped with `(r - min) * 255 / (max - min)`. A constant image
/// is copied unchanged.
pub fn stretch_histogram(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (min, max) = src
        .as_slice()
        .par_iter()
        .fold(
            || (u8::MAX, u8::MIN),
            |(lo, hi), &v| (lo.min(v), hi.max(v)),
        )
        .reduce(
            || (u8::MAX, u8::MIN),
            |(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)),
        );

    if min >= max {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let (min, max) = (min as f32, max as f32);
    let lut = build_lut(|r| (r - min) * 255.0 / (max - min));
    apply_lut(src, dst, &lut)
}
