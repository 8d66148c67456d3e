use graylab_image::{Image, ImageDtype, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use super::kernels::{self, validate_kernel_size, Kernel2d};
use crate::padding::{pad_image, padded_size, PaddingMode};

/// The reduction applied to every `size x size` window.
#[derive(Clone, Debug, PartialEq)]
pub enum WindowAggregate {
    /// Arithmetic mean of the window.
    Mean,
    /// Middle value of the sorted window.
    Median,
    /// Smallest value of the window.
    Min,
    /// Largest value of the window.
    Max,
    /// Sum of the window multiplied elementwise with the kernel weights.
    Weighted(Kernel2d),
}

impl WindowAggregate {
    /// Reduce the window samples to a single value.
    ///
    /// The window may be reordered in place.
    fn reduce(&self, window: &mut [f32]) -> f32 {
        match self {
            WindowAggregate::Mean => window.iter().sum::<f32>() / window.len() as f32,
            WindowAggregate::Median => {
                let mid = window.len() / 2;
                let (_, median, _) = window.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
                *median
            }
            WindowAggregate::Min => window.iter().copied().fold(f32::INFINITY, f32::min),
            WindowAggregate::Max => window.iter().copied().fold(f32::NEG_INFINITY, f32::max),
            WindowAggregate::Weighted(kernel) => window
                .iter()
                .zip(kernel.weights())
                .map(|(v, w)| v * w)
                .sum(),
        }
    }
}

/// Run `reduce` over every `kernel_size x kernel_size` window of the padded source.
///
/// `reduce` receives the window samples of one channel in row-major order
/// together with the centre sample and returns the unquantized output value.
/// Output rows are processed in parallel; every output sample is written once.
pub(crate) fn apply_window<T, const C: usize, F>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
    border: PaddingMode,
    reduce: F,
) -> Result<(), ImageError>
where
    T: ImageDtype,
    F: Fn(&mut [f32], f32) -> f32 + Send + Sync,
{
    validate_kernel_size(kernel_size)?;

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let cols = src.cols();
    if cols == 0 || src.rows() == 0 {
        return Ok(());
    }

    let window_len = kernel_size
        .checked_mul(kernel_size)
        .ok_or(ImageError::InvalidKernelSize(kernel_size))?;
    if padded_size::<C>(src.size(), kernel_size / 2).is_none() {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }

    let padded = pad_image(src, kernel_size / 2, border)?;
    let padded_data = padded.as_slice();
    let padded_stride = padded.cols() * C;
    // last sample of a window row for one channel
    let row_span = (kernel_size - 1) * C + 1;
    let center = window_len / 2;

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .enumerate()
        .for_each_init(
            || Vec::with_capacity(window_len),
            |window, (r, dst_row)| {
                for c in 0..cols {
                    for ch in 0..C {
                        window.clear();
                        for ky in 0..kernel_size {
                            let offset = (r + ky) * padded_stride + c * C + ch;
                            window.extend(
                                padded_data[offset..offset + row_span]
                                    .iter()
                                    .step_by(C)
                                    .map(|&v| Into::<f32>::into(v)),
                            );
                        }
                        let center_val = window[center];
                        let out = reduce(window.as_mut_slice(), center_val);
                        dst_row[c * C + ch] = T::from_f32(out);
                    }
                }
            },
        );

    Ok(())
}

/// Apply a sliding-window filter with reflective border handling.
///
/// Every output sample is the aggregate of the `kernel_size x kernel_size`
/// neighbourhood centred on the same position in the source, which is padded
/// by `kernel_size / 2` pixels using [`PaddingMode::Reflect`]. The aggregate is
/// computed in `f32` and quantized with [`ImageDtype::from_f32`], so integer
/// outputs are rounded and clamped to the range of the type.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The side length of the window, odd and greater than zero.
/// * `aggregate` - The reduction applied to each window.
///
/// # Errors
///
/// Returns an error if `kernel_size` is zero or even, if a weighted kernel does
/// not have side length `kernel_size`, or if `src` and `dst` differ in size.
///
/// # Example
///
/// ```
/// use graylab_image::{Image, ImageSize};
/// use graylab_imgproc::filter::{window_filter, WindowAggregate};
///
/// let size = ImageSize { width: 3, height: 3 };
/// let src = Image::<u8, 1>::new(size, vec![0, 0, 0, 0, 90, 0, 0, 0, 0]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// window_filter(&src, &mut dst, 3, &WindowAggregate::Mean).unwrap();
/// assert_eq!(dst.as_slice()[4], 10);
/// ```
pub fn window_filter<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
    aggregate: &WindowAggregate,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    window_filter_with_border(src, dst, kernel_size, aggregate, PaddingMode::Reflect)
}

/// Apply a sliding-window filter with the given border handling.
///
/// See [`window_filter`]. [`PaddingMode::Constant`] pads with zeros.
pub fn window_filter_with_border<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
    aggregate: &WindowAggregate,
    border: PaddingMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    if let WindowAggregate::Weighted(kernel) = aggregate {
        if kernel.size() != kernel_size {
            return Err(ImageError::InvalidKernelSize(kernel.size()));
        }
    }

    log::debug!(
        "window filter {} {}x{} on {} with {:?} border",
        aggregate_name(aggregate),
        kernel_size,
        kernel_size,
        src.size(),
        border
    );

    apply_window(src, dst, kernel_size, border, |window, _| {
        aggregate.reduce(window)
    })
}

fn aggregate_name(aggregate: &WindowAggregate) -> &'static str {
    match aggregate {
        WindowAggregate::Mean => "mean",
        WindowAggregate::Median => "median",
        WindowAggregate::Min => "min",
        WindowAggregate::Max => "max",
        WindowAggregate::Weighted(_) => "weighted",
    }
}

/// Replace every sample with the mean of its window.
pub fn mean_filter<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    window_filter(src, dst, kernel_size, &WindowAggregate::Mean)
}

/// Replace every sample with the median of its window.
pub fn median_filter<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    window_filter(src, dst, kernel_size, &WindowAggregate::Median)
}

/// Replace every sample with the minimum of its window.
pub fn min_filter<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    window_filter(src, dst, kernel_size, &WindowAggregate::Min)
}

/// Replace every sample with the maximum of its window.
pub fn max_filter<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    window_filter(src, dst, kernel_size, &WindowAggregate::Max)
}

/// Blur an image with a 2D gaussian kernel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The side length of the kernel.
/// * `sigma` - The standard deviation of the gaussian.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_filter<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
    sigma: f32,
) -> Result<(), ImageError> {
    let kernel = kernels::gaussian_kernel_2d(kernel_size, sigma)?;
    window_filter(src, dst, kernel_size, &WindowAggregate::Weighted(kernel))
}
