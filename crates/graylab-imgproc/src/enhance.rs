use graylab_image::{Image, ImageDtype, ImageError};
use num_traits::Float;

use crate::filter::{gaussian_filter, kernels::validate_kernel_size, mean_filter};
use crate::parallel;

/// Performs weighted addition of two images `src1` and `src2` with weights `alpha`
/// and `beta`, and an optional scalar `gamma`. The formula used is:
///
/// dst(x,y,c) = (src1(x,y,c) * alpha + src2(x,y,c) * beta + gamma)
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `alpha` - Weight of the first image elements to be multiplied.
/// * `src2` - The second input image.
/// * `beta` - Weight of the second image elements to be multiplied.
/// * `gamma` - Scalar added to each sum.
/// * `dst` - The output image.
///
/// # Errors
///
/// Returns an error if the sizes of `src1`, `src2` and `dst` do not match.
pub fn add_weighted<T, const C: usize>(
    src1: &Image<T, C>,
    alpha: T,
    src2: &Image<T, C>,
    beta: T,
    gamma: T,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: Float + Send + Sync,
{
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows_val_two(src1, src2, dst, |&src1_pixel, &src2_pixel, dst_pixel| {
        *dst_pixel = (src1_pixel * alpha) + (src2_pixel * beta) + gamma;
    });

    Ok(())
}

fn check_amount(amount: f32) -> Result<(), ImageError> {
    if !(amount.is_finite() && amount >= 0.0) {
        return Err(ImageError::InvalidParameter("amount", amount));
    }
    Ok(())
}

/// Sharpen an image by adding back the detail removed by a gaussian blur.
///
/// Computes `src + amount * (src - gauss(src))`. The blurred image is kept in
/// `f32` and only the final result is quantized, so negative or overflowing
/// values are clamped to the range of `T`. An `amount` above one gives
/// high-boost filtering, zero returns the source.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The sharpened image.
/// * `kernel_size` - The side length of the gaussian kernel.
/// * `sigma` - The standard deviation of the gaussian.
/// * `amount` - The weight of the detail layer, finite and non-negative.
///
/// # Errors
///
/// Returns an error if the kernel configuration or `amount` are invalid, or if
/// `src` and `dst` differ in size.
pub fn unsharp_mask<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
    sigma: f32,
    amount: f32,
) -> Result<(), ImageError> {
    check_amount(amount)?;

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let src_f32 = src.cast::<f32>()?;
    let mut blurred = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
    gaussian_filter(&src_f32, &mut blurred, kernel_size, sigma)?;

    let mut sharpened = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
    add_weighted(&src_f32, 1.0 + amount, &blurred, -amount, 0.0, &mut sharpened)?;

    parallel::par_iter_rows_val(&sharpened, dst, |&v, dst_pixel| {
        *dst_pixel = T::from_f32(v);
    });

    Ok(())
}

/// Enhance local contrast from the neighbourhood mean.
///
/// Every sample becomes `src + amount * (src - mean)`, where `mean` is the
/// full precision average of the `kernel_size x kernel_size` window, clamped to
/// `[0, 255]`. When `gamma != 1` the power law `255 * (v / 255)^gamma` is then
/// applied before the final rounding.
///
/// # Errors
///
/// Returns an error if `kernel_size` is invalid, `amount` is negative, `gamma`
/// is not strictly positive, or `src` and `dst` differ in size.
pub fn local_statistics_enhancement<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: usize,
    amount: f32,
    gamma: f32,
) -> Result<(), ImageError> {
    validate_kernel_size(kernel_size)?;
    check_amount(amount)?;
    if !(gamma.is_finite() && gamma > 0.0) {
        return Err(ImageError::InvalidParameter("gamma", gamma));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let src_f32 = src.cast::<f32>()?;
    let mut mean = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
    mean_filter(&src_f32, &mut mean, kernel_size)?;

    parallel::par_iter_rows_val_two(src, &mean, dst, |&s, &m, dst_pixel| {
        let s = s as f32;
        let mut v = (s + amount * (s - m)).clamp(0.0, 255.0);
        if gamma != 1.0 {
            v = 255.0 * (v / 255.0).powf(gamma);
        }
        *dst_pixel = u8::from_f32(v);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graylab_image::ImageSize;

    #[test]
    fn test_add_weighted() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src1 = Image::<f32, 1>::new(size, vec![1.0f32, 2.0, 3.0, 4.0])?;
        let src2 = Image::<f32, 1>::new(size, vec![4.0f32, 5.0, 6.0, 7.0])?;
        let expected = [11.0, 15.0, 19.0, 23.0];

        let mut weighted = Image::<f32, 1>::from_size_val(src1.size(), 0.0)?;
        add_weighted(&src1, 2.0, &src2, 2.0, 1.0, &mut weighted)?;

        weighted
            .as_slice()
            .iter()
            .zip(expected.iter())
            .for_each(|(a, b)| {
                assert!((a - b).abs() < 1e-6);
            });

        let mut wrong = Image::<f32, 1>::from_size_val([1, 2].into(), 0.0)?;
        assert!(add_weighted(&src1, 1.0, &src2, 1.0, 0.0, &mut wrong).is_err());

        Ok(())
    }

    fn step_image() -> Result<Image<u8, 1>, ImageError> {
        #[rustfmt::skip]
        let image = Image::new(
            ImageSize {
                width: 6,
                height: 3,
            },
            vec![
                50, 50, 50, 150, 150, 150,
                50, 50, 50, 150, 150, 150,
                50, 50, 50, 150, 150, 150,
            ],
        );
        image
    }

    #[test]
    fn test_unsharp_mask_emphasizes_edges() -> Result<(), ImageError> {
        let src = step_image()?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
        unsharp_mask(&src, &mut dst, 3, 1.0, 1.0)?;

        // far from the step the image is flat
        assert_eq!(dst.as_slice()[0], 50);
        assert_eq!(dst.as_slice()[5], 150);
        // undershoot and overshoot on both sides of the step
        assert!(dst.as_slice()[2] < 50);
        assert!(dst.as_slice()[3] > 150);

        // a huge amount saturates instead of wrapping
        unsharp_mask(&src, &mut dst, 3, 1.0, 100.0)?;
        assert_eq!(dst.as_slice()[2], 0);
        assert_eq!(dst.as_slice()[3], 255);
        Ok(())
    }

    #[test]
    fn test_unsharp_mask_zero_amount_is_identity() -> Result<(), ImageError> {
        let src = step_image()?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
        unsharp_mask(&src, &mut dst, 5, 2.0, 0.0)?;
        assert_eq!(dst, src);

        assert_eq!(
            unsharp_mask(&src, &mut dst, 5, 2.0, -1.0),
            Err(ImageError::InvalidParameter("amount", -1.0))
        );
        assert!(unsharp_mask(&src, &mut dst, 4, 2.0, 1.0).is_err());
        Ok(())
    }

    #[test]
    fn test_local_statistics_enhancement() -> Result<(), ImageError> {
        let src = step_image()?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        local_statistics_enhancement(&src, &mut dst, 3, 0.0, 1.0)?;
        assert_eq!(dst, src);

        local_statistics_enhancement(&src, &mut dst, 3, 2.0, 1.0)?;
        assert_eq!(dst.as_slice()[0], 50);
        // mean at the step is (2 * 50 + 150) / 3
        assert_eq!(dst.as_slice()[2], 0);
        assert_eq!(dst.as_slice()[3], 217);
        Ok(())
    }

    #[test]
    fn test_local_statistics_enhancement_gamma() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let src = Image::<u8, 1>::from_size_val(size, 64)?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;
        local_statistics_enhancement(&src, &mut dst, 3, 1.0, 0.5)?;
        assert!(dst.as_slice().iter().all(|&v| v == 128));

        assert!(local_statistics_enhancement(&src, &mut dst, 3, 1.0, 0.0).is_err());
        assert!(local_statistics_enhancement(&src, &mut dst, 2, 1.0, 1.0).is_err());
        Ok(())
    }
}
