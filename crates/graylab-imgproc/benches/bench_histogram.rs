use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use graylab_image::Image;
use graylab_imgproc::histogram::{equalize_histogram, local_equalize_histogram};

use image::GrayImage;
use rand::Rng;

fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("Histogram Equalization");
    let mut rng = rand::rng();

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_data = (0..width * height).map(|_| rng.random::<u8>()).collect();
        let image_size = [*width, *height].into();
        let image = Image::<u8, 1>::new(image_size, image_data).unwrap();
        let output = Image::<u8, 1>::from_size_val(image_size, 0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("equalize_histogram", &parameter_string),
            &(&image, &output),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(equalize_histogram(src, &mut dst)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("equalize_histogram_imageproc", &parameter_string),
            &image,
            |b, i| {
                let gray =
                    GrayImage::from_raw(i.cols() as u32, i.rows() as u32, i.as_slice().to_vec())
                        .unwrap();
                b.iter(|| black_box(imageproc::contrast::equalize_histogram(&gray)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("local_equalize_histogram_7x7", &parameter_string),
            &(&image, &output),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(local_equalize_histogram(src, &mut dst, 7)))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_histogram);
criterion_main!(benches);
