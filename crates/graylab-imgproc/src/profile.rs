use graylab_image::{Image, ImageError};

/// The direction of a line profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// A row of the image, indexed by its row number.
    Horizontal,
    /// A column of the image, indexed by its column number.
    Vertical,
}

/// Extract the intensities along one row or column of a single channel image.
///
/// # Errors
///
/// Returns [`ImageError::PixelIndexOutOfBounds`] if `index` is not a valid row
/// (or column) of `src`.
///
/// # Example
///
/// ```
/// use graylab_image::{Image, ImageSize};
/// use graylab_imgproc::profile::{line_profile, Orientation};
///
/// let image = Image::<u8, 1>::new(
///     ImageSize { width: 3, height: 2 },
///     vec![1, 2, 3, 4, 5, 6],
/// ).unwrap();
///
/// assert_eq!(line_profile(&image, Orientation::Horizontal, 1).unwrap(), vec![4, 5, 6]);
/// assert_eq!(line_profile(&image, Orientation::Vertical, 2).unwrap(), vec![3, 6]);
/// ```
pub fn line_profile<T: Copy>(
    src: &Image<T, 1>,
    orientation: Orientation,
    index: usize,
) -> Result<Vec<T>, ImageError> {
    let (cols, rows) = (src.cols(), src.rows());

    match orientation {
        Orientation::Horizontal => {
            if index >= rows {
                return Err(ImageError::PixelIndexOutOfBounds(0, index, cols, rows));
            }
            Ok(src.as_slice()[index * cols..(index + 1) * cols].to_vec())
        }
        Orientation::Vertical => {
            if index >= cols {
                return Err(ImageError::PixelIndexOutOfBounds(index, 0, cols, rows));
            }
            Ok(src
                .as_slice()
                .iter()
                .skip(index)
                .step_by(cols)
                .copied()
                .collect())
        }
    }
}
