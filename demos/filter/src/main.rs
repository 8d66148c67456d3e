use argh::FromArgs;
use std::path::PathBuf;

use graylab::{
    image::Image,
    imgproc::filter::{self, EdgeOperator},
    io::functional as F,
};

#[derive(FromArgs)]
/// Apply a sliding-window filter or an edge operator to a grayscale image
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// filter: mean, median, min, max, gaussian, sobel-h, sobel-v, sobel-d,
    /// sobel-ad, laplacian, sharpen (default: median)
    #[argh(option, short = 'f', default = "String::from(\"median\")")]
    filter: String,

    /// window size, odd (default: 3)
    #[argh(option, short = 's', default = "3")]
    kernel_size: usize,

    /// gaussian standard deviation (default: 1.0)
    #[argh(option, default = "1.0")]
    sigma: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let image = F::read_image_any_gray8(&args.image_path)?;
    log::info!(
        "read {} with size {}",
        args.image_path.display(),
        image.size()
    );

    let mut output = Image::<u8, 1>::from_size_val(image.size(), 0)?;
    let size = args.kernel_size;

    match args.filter.as_str() {
        "mean" => filter::mean_filter(&image, &mut output, size)?,
        "median" => filter::median_filter(&image, &mut output, size)?,
        "min" => filter::min_filter(&image, &mut output, size)?,
        "max" => filter::max_filter(&image, &mut output, size)?,
        "gaussian" => filter::gaussian_filter(&image, &mut output, size, args.sigma)?,
        "sobel-h" => filter::edge_response(&image, &mut output, EdgeOperator::SobelHorizontal)?,
        "sobel-v" => filter::edge_response(&image, &mut output, EdgeOperator::SobelVertical)?,
        "sobel-d" => filter::edge_response(&image, &mut output, EdgeOperator::SobelDiagonal)?,
        "sobel-ad" => {
            filter::edge_response(&image, &mut output, EdgeOperator::SobelAntiDiagonal)?
        }
        "laplacian" => filter::edge_response(&image, &mut output, EdgeOperator::Laplacian)?,
        "sharpen" => filter::laplacian_sharpen(&image, &mut output)?,
        other => return Err(format!("unknown filter: {other}").into()),
    }

    F::write_image_gray8(&args.output_path, &output)?;
    log::info!(
        "applied {} and wrote {}",
        args.filter,
        args.output_path.display()
    );

    Ok(())
}
