use std::path::Path;

use graylab_image::{Image, ImageError, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit grayscale.
///
/// The method reads from any image format supported by the image crate and
/// converts color or high bit depth images to 8-bit luma.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A single channel image with the decoded intensities.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] if the path does not exist, or an
/// error if the file cannot be read or decoded.
pub fn read_image_any_gray8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;

    let img = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!(
        "decoded {} as {:?} with size {}",
        file_path.display(),
        img.color(),
        size
    );

    let image = Image::<u8, 1>::new(size, img.into_luma8().into_raw())?;

    Ok(image)
}

/// Writes a grayscale image to the given file path.
///
/// The encoding is chosen from the file extension.
///
/// # Arguments
///
/// * `file_path` - The path to the output image.
/// * `image` - The image to encode.
pub fn write_image_gray8(file_path: impl AsRef<Path>, image: &Image<u8, 1>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let buffer = image::GrayImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.as_slice().to_vec(),
    )
    .ok_or(ImageError::InvalidChannelShape(
        image.as_slice().len(),
        image.width() * image.height(),
    ))?;

    buffer.save(file_path).map_err(IoError::ImageEncodeError)?;

    log::debug!("encoded {} with size {}", file_path.display(), image.size());

    Ok(())
}
