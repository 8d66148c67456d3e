use argh::FromArgs;
use std::path::PathBuf;

use graylab::{
    image::{Image, ImageSize},
    imgproc::{crop, enhance, histogram, intensity, profile},
    io::functional as F,
};

#[derive(FromArgs)]
/// Run point transforms, histogram operations and enhancement pipelines on a grayscale image
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// method: negative, multiply, log, contrast, gamma, equalize,
    /// local-equalize, stretch, unsharp, local-stats (default: equalize)
    #[argh(option, short = 'm', default = "String::from(\"equalize\")")]
    method: String,

    /// window size for local methods, odd (default: 7)
    #[argh(option, short = 's', default = "7")]
    kernel_size: usize,

    /// multiplication factor, log constant or enhancement amount (default: 1.0)
    #[argh(option, default = "1.0")]
    amount: f32,

    /// gamma exponent (default: 1.0)
    #[argh(option, default = "1.0")]
    gamma: f32,

    /// contrast stretching threshold on the [0, 1] scale (default: 0.5)
    #[argh(option, default = "0.5")]
    threshold: f32,

    /// contrast stretching slope (default: 4.0)
    #[argh(option, default = "4.0")]
    slope: f32,

    /// gaussian standard deviation for unsharp masking (default: 1.0)
    #[argh(option, default = "1.0")]
    sigma: f32,

    /// log the intensity profile of this row of the output
    #[argh(option)]
    profile_row: Option<usize>,

    /// crop the input to this region first, given as x,y,width,height
    #[argh(option, from_str_fn(parse_region))]
    crop: Option<[usize; 4]>,
}

fn parse_region(value: &str) -> Result<[usize; 4], String> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<usize>().map_err(|e| format!("{p}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        &[x, y, width, height] => Ok([x, y, width, height]),
        _ => Err(format!("expected x,y,width,height, got {value}")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let mut image = F::read_image_any_gray8(&args.image_path)?;
    log::info!(
        "read {} with size {}",
        args.image_path.display(),
        image.size()
    );

    if let Some([x, y, width, height]) = args.crop {
        let mut cropped = Image::<u8, 1>::from_size_val(ImageSize { width, height }, 0)?;
        crop::crop_image(&image, &mut cropped, x, y)?;
        log::info!("cropped to {} at ({}, {})", cropped.size(), x, y);
        image = cropped;
    }

    let mut output = Image::<u8, 1>::from_size_val(image.size(), 0)?;

    match args.method.as_str() {
        "negative" => intensity::negative(&image, &mut output)?,
        "multiply" => intensity::multiply(&image, &mut output, args.amount)?,
        "log" => intensity::log_transform(
            &image,
            &mut output,
            args.amount * intensity::log_scale_factor(),
        )?,
        "contrast" => {
            intensity::contrast_stretch(&image, &mut output, args.threshold, args.slope)?
        }
        "gamma" => intensity::gamma_correction(&image, &mut output, args.gamma)?,
        "equalize" => histogram::equalize_histogram(&image, &mut output)?,
        "local-equalize" => {
            histogram::local_equalize_histogram(&image, &mut output, args.kernel_size)?
        }
        "stretch" => histogram::stretch_histogram(&image, &mut output)?,
        "unsharp" => enhance::unsharp_mask(
            &image,
            &mut output,
            args.kernel_size,
            args.sigma,
            args.amount,
        )?,
        "local-stats" => enhance::local_statistics_enhancement(
            &image,
            &mut output,
            args.kernel_size,
            args.amount,
            args.gamma,
        )?,
        other => return Err(format!("unknown method: {other}").into()),
    }

    let mut hist = vec![0; 16];
    histogram::compute_histogram(&output, &mut hist, 16)?;
    log::info!("output histogram (16 bins): {:?}", hist);

    if let Some(row) = args.profile_row {
        let values = profile::line_profile(&output, profile::Orientation::Horizontal, row)?;
        log::info!("row {} profile: {:?}", row, values);
    }

    F::write_image_gray8(&args.output_path, &output)?;
    log::info!(
        "applied {} and wrote {}",
        args.method,
        args.output_path.display()
    );

    Ok(())
}
