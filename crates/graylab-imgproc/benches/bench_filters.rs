use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use graylab_image::Image;
use graylab_imgproc::filter::{gaussian_filter, mean_filter, median_filter};

use image::GrayImage;
use imageproc::filter::{gaussian_blur_f32, median_filter as imageproc_median};
use rand::Rng;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Window Filters");
    let mut rng = rand::rng();

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 7, 11].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            // input image
            let image_data = (0..width * height).map(|_| rng.random::<u8>()).collect();
            let image_size = [*width, *height].into();
            let image = Image::<u8, 1>::new(image_size, image_data).unwrap();

            // output image
            let output = Image::<u8, 1>::from_size_val(image_size, 0).unwrap();

            group.bench_with_input(
                BenchmarkId::new("mean_filter", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(mean_filter(src, &mut dst, *kernel_size)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("median_filter", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(median_filter(src, &mut dst, *kernel_size)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("gaussian_filter", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(gaussian_filter(src, &mut dst, *kernel_size, 1.5)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("median_filter_imageproc", &parameter_string),
                &image,
                |b, i| {
                    let gray = GrayImage::from_raw(
                        i.cols() as u32,
                        i.rows() as u32,
                        i.as_slice().to_vec(),
                    )
                    .unwrap();
                    let radius = (*kernel_size / 2) as u32;
                    b.iter(|| black_box(imageproc_median(&gray, radius, radius)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_imageproc", &parameter_string),
                &image,
                |b, i| {
                    let gray = GrayImage::from_raw(
                        i.cols() as u32,
                        i.rows() as u32,
                        i.as_slice().to_vec(),
                    )
                    .unwrap();
                    b.iter(|| black_box(gaussian_blur_f32(&gray, 1.5)))
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
