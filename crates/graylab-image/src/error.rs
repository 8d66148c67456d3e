/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image size does not match the expected size.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a pixel value cannot be cast to the requested type.
    #[error("Failed to cast pixel data to {0}")]
    CastError(String),

    /// Error when the number of histogram bins is invalid.
    #[error("Invalid number of histogram bins: {0}")]
    InvalidHistogramBins(usize),

    /// Error when the window size is zero or even.
    #[error("Invalid kernel size {0}: must be odd and greater than zero")]
    InvalidKernelSize(usize),

    /// Error when the gaussian sigma is not strictly positive.
    #[error("Invalid sigma {0}: must be greater than zero")]
    InvalidSigma(f32),

    /// Error when the kernel weights sum to zero and cannot be normalized.
    #[error("Kernel weights sum to zero and cannot be normalized")]
    DegenerateKernel,

    /// Error when a transform parameter is outside its valid domain.
    #[error("Invalid parameter `{0}`: {1}")]
    InvalidParameter(&'static str, f32),
}
