use graylab_image::{Image, ImageDtype, ImageError};

use super::kernels;
use super::window::apply_window;
use crate::padding::PaddingMode;

/// The fixed 3x3 masks used for edge detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOperator {
    /// Sobel mask for horizontal edges.
    SobelHorizontal,
    /// Sobel mask for vertical edges.
    SobelVertical,
    /// Sobel mask for edges along the main diagonal.
    SobelDiagonal,
    /// Sobel mask for edges along the anti-diagonal.
    SobelAntiDiagonal,
    /// 4-connected Laplacian.
    Laplacian,
}

impl EdgeOperator {
    /// The signed mask of the operator.
    pub fn mask(&self) -> [[f32; 3]; 3] {
        match self {
            EdgeOperator::SobelHorizontal => kernels::sobel_horizontal(),
            EdgeOperator::SobelVertical => kernels::sobel_vertical(),
            EdgeOperator::SobelDiagonal => kernels::sobel_diagonal(),
            EdgeOperator::SobelAntiDiagonal => kernels::sobel_anti_diagonal(),
            EdgeOperator::Laplacian => kernels::laplacian(),
        }
    }
}

#[inline]
fn correlate3(window: &[f32], mask: &[[f32; 3]; 3]) -> f32 {
    window
        .iter()
        .zip(mask.iter().flatten())
        .map(|(v, m)| v * m)
        .sum()
}

/// Compute the absolute response of an edge operator.
///
/// Each output sample is `|sum(window * mask)|` over the reflect-padded 3x3
/// neighbourhood, quantized and clamped to the range of `T`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `operator` - The mask to apply.
///
/// # Example
///
/// ```
/// use graylab_image::{Image, ImageSize};
/// use graylab_imgproc::filter::{edge_response, EdgeOperator};
///
/// let size = ImageSize { width: 4, height: 1 };
/// let src = Image::<u8, 1>::new(size, vec![0, 0, 100, 100]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// edge_response(&src, &mut dst, EdgeOperator::SobelVertical).unwrap();
/// assert_eq!(dst.as_slice(), &[0, 255, 255, 0]);
/// ```
pub fn edge_response<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    operator: EdgeOperator,
) -> Result<(), ImageError> {
    let mask = operator.mask();
    apply_window(src, dst, 3, PaddingMode::Reflect, |window, _| {
        correlate3(window, &mask).abs()
    })
}

/// Sharpen an image by subtracting its Laplacian response.
///
/// Each output sample is `src - response` clamped to the range of `T`, where
/// `response` is the correlation with the positive-centre mask of
/// [`kernels::laplacian`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
pub fn laplacian_sharpen<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError> {
    let mask = kernels::laplacian();
    apply_window(src, dst, 3, PaddingMode::Reflect, |window, center| {
        center - correlate3(window, &mask)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use graylab_image::ImageSize;

    #[test]
    fn test_flat_image_has_no_edges() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let src = Image::<u8, 1>::from_size_val(size, 100)?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 1)?;

        for operator in [
            EdgeOperator::SobelHorizontal,
            EdgeOperator::SobelVertical,
            EdgeOperator::SobelDiagonal,
            EdgeOperator::SobelAntiDiagonal,
            EdgeOperator::Laplacian,
        ] {
            edge_response(&src, &mut dst, operator)?;
            assert!(dst.as_slice().iter().all(|&v| v == 0), "{operator:?}");
        }

        laplacian_sharpen(&src, &mut dst)?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn test_sobel_direction() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        // step along the rows: top half dark, bottom half bright
        #[rustfmt::skip]
        let src = Image::<f32, 1>::new(
            size,
            vec![
                0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0,
                10.0, 10.0, 10.0, 10.0,
                10.0, 10.0, 10.0, 10.0,
            ],
        )?;

        let mut horizontal = Image::<f32, 1>::from_size_val(size, 0.0)?;
        edge_response(&src, &mut horizontal, EdgeOperator::SobelHorizontal)?;

        #[rustfmt::skip]
        assert_eq!(
            horizontal.as_slice(),
            &[
                0.0, 0.0, 0.0, 0.0,
                40.0, 40.0, 40.0, 40.0,
                40.0, 40.0, 40.0, 40.0,
                0.0, 0.0, 0.0, 0.0,
            ]
        );

        let mut vertical = Image::<f32, 1>::from_size_val(size, 0.0)?;
        edge_response(&src, &mut vertical, EdgeOperator::SobelVertical)?;
        assert!(vertical.as_slice().iter().all(|&v| v == 0.0));

        let mut diagonal = Image::<f32, 1>::from_size_val(size, 0.0)?;
        edge_response(&src, &mut diagonal, EdgeOperator::SobelDiagonal)?;
        assert_eq!(diagonal.as_slice()[4 + 1], 30.0);
        Ok(())
    }

    #[test]
    fn test_edge_response_is_clamped() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let src = Image::<u8, 1>::new(size, vec![0, 0, 0, 0, 255, 0, 0, 0, 0])?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;
        edge_response(&src, &mut dst, EdgeOperator::Laplacian)?;
        // 4 * 255 saturates instead of wrapping
        assert_eq!(dst.as_slice()[4], 255);
        assert_eq!(dst.as_slice()[1], 255);
        assert_eq!(dst.as_slice()[0], 0);
        Ok(())
    }

    #[test]
    fn test_laplacian_sharpen() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 1,
        };
        let src = Image::<u8, 1>::new(size, vec![10, 10, 50, 10, 10])?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;
        laplacian_sharpen(&src, &mut dst)?;

        // response along the row is [0, -40, 80, -40, 0]; the peak clamps at zero
        assert_eq!(dst.as_slice(), &[10, 50, 0, 50, 10]);
        Ok(())
    }
}
