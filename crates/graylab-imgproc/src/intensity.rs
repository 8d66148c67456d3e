//! Point transforms on 8-bit images.
//!
//! Every transform maps each sample independently through a 256-entry lookup
//! table, so the output only depends on the input intensity `r`:
//!
//! * [`negative`]: `255 - r`
//! * [`multiply`]: `c * r`
//! * [`log_transform`]: `c * ln(1 + r)`
//! * [`contrast_stretch`]: `255 / (1 + (m / (r / 255))^e)`
//! * [`gamma_correction`]: `255 * (r / 255)^gamma`
//!
//! Results are rounded and clamped to `[0, 255]`.

use graylab_image::{Image, ImageDtype, ImageError};

use crate::parallel;

/// A lookup table for 8-bit samples.
pub type Lut = [u8; 256];

/// Build a lookup table from an intensity mapping evaluated in `f32`.
pub fn build_lut(f: impl Fn(f32) -> f32) -> Lut {
    let mut lut = [0u8; 256];
    for (r, entry) in lut.iter_mut().enumerate() {
        *entry = u8::from_f32(f(r as f32));
    }
    lut
}

/// Map every sample of `src` through `lut`.
///
/// # Errors
///
/// Returns an error if `src` and `dst` differ in size.
pub fn apply_lut<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    lut: &Lut,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows_val(src, dst, |&src_pixel, dst_pixel| {
        *dst_pixel = lut[src_pixel as usize];
    });

    Ok(())
}

fn check_finite_non_negative(name: &'static str, value: f32) -> Result<(), ImageError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ImageError::InvalidParameter(name, value));
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ImageError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ImageError::InvalidParameter(name, value));
    }
    Ok(())
}

/// Invert the intensities, `T(r) = 255 - r`.
///
/// # Example
///
/// ```
/// use graylab_image::{Image, ImageSize};
/// use graylab_imgproc::intensity::negative;
///
/// let size = ImageSize { width: 3, height: 1 };
/// let src = Image::<u8, 1>::new(size, vec![0, 100, 255]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// negative(&src, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[255, 155, 0]);
/// ```
pub fn negative<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    apply_lut(src, dst, &build_lut(|r| 255.0 - r))
}

/// Scale the intensities by a constant factor, `T(r) = c * r`.
///
/// # Errors
///
/// Returns an error if `factor` is negative or not finite.
pub fn multiply<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    factor: f32,
) -> Result<(), ImageError> {
    check_finite_non_negative("factor", factor)?;
    apply_lut(src, dst, &build_lut(|r| factor * r))
}

/// The factor that maps the full 8-bit range onto itself in [`log_transform`],
/// `255 / ln(256)`.
pub fn log_scale_factor() -> f32 {
    255.0 / 256f32.ln()
}

/// Compress the dynamic range, `T(r) = c * ln(1 + r)`.
///
/// With `c = log_scale_factor()` the output spans the full `[0, 255]` range.
///
/// # Errors
///
/// Returns an error if `c` is negative or not finite.
pub fn log_transform<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    c: f32,
) -> Result<(), ImageError> {
    check_finite_non_negative("c", c)?;
    apply_lut(src, dst, &build_lut(|r| c * r.ln_1p()))
}

/// Sigmoid contrast stretching around the threshold `m`.
///
/// `T(r) = 255 / (1 + (m / (r / 255))^e)` where `m` is given on the normalized
/// `[0, 1]` scale. Intensities below `m` are pushed towards black and above
/// towards white; larger `e` gives a steeper transition. `r = 0` maps to 0.
///
/// # Errors
///
/// Returns an error if `m` or `e` are not strictly positive.
pub fn contrast_stretch<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    m: f32,
    e: f32,
) -> Result<(), ImageError> {
    check_positive("m", m)?;
    check_positive("e", e)?;
    apply_lut(
        src,
        dst,
        &build_lut(|r| {
            if r == 0.0 {
                return 0.0;
            }
            255.0 / (1.0 + (m / (r / 255.0)).powf(e))
        }),
    )
}

/// Power-law correction, `T(r) = 255 * (r / 255)^gamma`.
///
/// `gamma < 1` brightens dark regions, `gamma > 1` darkens bright regions.
///
/// # Errors
///
/// Returns an error if `gamma` is not strictly positive.
pub fn gamma_correction<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    gamma: f32,
) -> Result<(), ImageError> {
    check_positive("gamma", gamma)?;
    apply_lut(src, dst, &build_lut(|r| 255.0 * (r / 255.0).powf(gamma)))
}
