use graylab_image::ImageError;

/// A square, row-major matrix of filter weights with an odd side length.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel2d {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel2d {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or even, or if `weights` does not
    /// hold exactly `size * size` values.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, ImageError> {
        validate_kernel_size(size)?;
        if weights.len() != size * size {
            return Err(ImageError::InvalidChannelShape(weights.len(), size * size));
        }
        Ok(Self { size, weights })
    }

    /// Create a kernel from a fixed 3x3 mask.
    pub fn from_mask3(mask: [[f32; 3]; 3]) -> Self {
        Self {
            size: 3,
            weights: mask.iter().flatten().copied().collect(),
        }
    }

    /// Side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The weights in row-major order.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Divide every weight by the sum of all weights.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::DegenerateKernel`] if the weights sum to zero.
    pub fn normalized(mut self) -> Result<Self, ImageError> {
        let norm = self.sum();
        if !norm.is_finite() || norm.abs() <= f32::EPSILON {
            return Err(ImageError::DegenerateKernel);
        }
        self.weights.iter_mut().for_each(|w| *w /= norm);
        Ok(self)
    }
}

/// Check that a window size is odd and greater than zero.
pub fn validate_kernel_size(kernel_size: usize) -> Result<(), ImageError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }
    Ok(())
}

fn validate_sigma(sigma: f32) -> Result<(), ImageError> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(ImageError::InvalidSigma(sigma));
    }
    Ok(())
}

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A `kernel_size x kernel_size` kernel with all weights equal to `1 / kernel_size^2`.
pub fn box_kernel_2d(kernel_size: usize) -> Result<Kernel2d, ImageError> {
    validate_kernel_size(kernel_size)?;
    let n = kernel_size * kernel_size;
    Kernel2d::new(kernel_size, vec![1.0 / n as f32; n])
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Create a 2D gaussian kernel.
///
/// The weight at offset `(x, y)` from the centre is `exp(-(x^2 + y^2) / (2 sigma^2))`,
/// normalized so that all weights sum to one. The gaussian is separable, so the
/// weights are the outer product of two [`gaussian_kernel_1d`].
///
/// # Arguments
///
/// * `kernel_size` - The side length of the kernel, odd and greater than zero.
/// * `sigma` - The standard deviation, greater than zero.
///
/// # Errors
///
/// Returns an error if `kernel_size` or `sigma` are invalid.
///
/// # Example
///
/// ```
/// use graylab_imgproc::filter::kernels::gaussian_kernel_2d;
///
/// let kernel = gaussian_kernel_2d(5, 1.0).unwrap();
/// assert_eq!(kernel.size(), 5);
/// assert!((kernel.sum() - 1.0).abs() < 1e-6);
/// ```
pub fn gaussian_kernel_2d(kernel_size: usize, sigma: f32) -> Result<Kernel2d, ImageError> {
    validate_kernel_size(kernel_size)?;
    validate_sigma(sigma)?;

    let kernel_1d = gaussian_kernel_1d(kernel_size, sigma);

    let weights = kernel_1d
        .iter()
        .flat_map(|&ky| kernel_1d.iter().map(move |&kx| ky * kx))
        .collect();

    Kernel2d::new(kernel_size, weights)?.normalized()
}

/// Horizontal-edge Sobel mask, responds to changes along the rows.
pub fn sobel_horizontal() -> [[f32; 3]; 3] {
    [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]]
}

/// Vertical-edge Sobel mask, responds to changes along the columns.
pub fn sobel_vertical() -> [[f32; 3]; 3] {
    [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]
}

/// Sobel mask for edges running from top-right to bottom-left.
pub fn sobel_diagonal() -> [[f32; 3]; 3] {
    [[-2.0, -1.0, 0.0], [-1.0, 0.0, 1.0], [0.0, 1.0, 2.0]]
}

/// Sobel mask for edges running from top-left to bottom-right.
pub fn sobel_anti_diagonal() -> [[f32; 3]; 3] {
    [[0.0, 1.0, 2.0], [-1.0, 0.0, 1.0], [-2.0, -1.0, 0.0]]
}

/// 4-connected Laplacian mask.
pub fn laplacian() -> [[f32; 3]; 3] {
    [[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_kernel_1d() {
        let kernel = gaussian_kernel_1d(5, 0.5);

        let expected = [
            0.00026386508,
            0.10645077,
            0.78657067,
            0.10645077,
            0.00026386508,
        ];

        for (i, &k) in kernel.iter().enumerate() {
            assert_relative_eq!(k, expected[i], epsilon = 1e-7);
        }
    }

    #[test]
    fn test_gaussian_kernel_2d_is_normalized() -> Result<(), ImageError> {
        for kernel_size in [1, 3, 5, 7, 11] {
            for sigma in [0.3, 0.5, 1.0, 2.0, 10.0] {
                let kernel = gaussian_kernel_2d(kernel_size, sigma)?;
                assert_eq!(kernel.weights().len(), kernel_size * kernel_size);
                assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-6);
            }
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_2d_values() -> Result<(), ImageError> {
        let kernel = gaussian_kernel_2d(3, 1.0)?;
        let w = kernel.weights();

        // exp(-d / 2) for squared distances d = 0, 1, 2
        let (c, e, d) = (1.0f32, (-0.5f32).exp(), (-1.0f32).exp());
        let norm = c + 4.0 * e + 4.0 * d;

        assert_relative_eq!(w[4], c / norm, epsilon = 1e-6);
        assert_relative_eq!(w[1], e / norm, epsilon = 1e-6);
        assert_relative_eq!(w[0], d / norm, epsilon = 1e-6);

        // symmetric around the centre
        assert_relative_eq!(w[0], w[8]);
        assert_relative_eq!(w[2], w[6]);
        assert_relative_eq!(w[3], w[5]);
        Ok(())
    }

    #[test]
    fn test_invalid_kernel_configuration() {
        assert_eq!(
            gaussian_kernel_2d(4, 1.0),
            Err(ImageError::InvalidKernelSize(4))
        );
        assert_eq!(
            gaussian_kernel_2d(0, 1.0),
            Err(ImageError::InvalidKernelSize(0))
        );
        assert_eq!(gaussian_kernel_2d(3, 0.0), Err(ImageError::InvalidSigma(0.0)));
        assert_eq!(
            gaussian_kernel_2d(3, -1.0),
            Err(ImageError::InvalidSigma(-1.0))
        );
        assert!(gaussian_kernel_2d(3, f32::NAN).is_err());
        assert!(box_kernel_2d(2).is_err());
    }

    #[test]
    fn test_degenerate_kernel_normalization() -> Result<(), ImageError> {
        let laplacian = Kernel2d::from_mask3(laplacian());
        assert_eq!(laplacian.normalized(), Err(ImageError::DegenerateKernel));

        let kernel = Kernel2d::new(3, vec![2.0; 9])?.normalized()?;
        assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_box_kernel_2d() -> Result<(), ImageError> {
        let kernel = box_kernel_2d(3)?;
        assert!(kernel.weights().iter().all(|&w| w == 1.0 / 9.0));
        Ok(())
    }

    #[test]
    fn test_edge_masks_sum_to_zero() {
        for mask in [
            sobel_horizontal(),
            sobel_vertical(),
            sobel_diagonal(),
            sobel_anti_diagonal(),
            laplacian(),
        ] {
            let sum: f32 = mask.iter().flatten().sum();
            assert_eq!(sum, 0.0);
        }
    }
}
