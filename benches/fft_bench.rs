use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use polezero::engines::fft::{evaluate_on_unit_circle, fft};
use polezero::engines::magnitude_response;
use polezero::math::{Complex, Polynomial};
use rustfft::FftPlanner;
use rustfft::num_complex::Complex as RefComplex;
use std::hint::black_box;

fn signal(n: usize) -> (Vec<f64>, Vec<f64>) {
    let real = (0..n).map(|i| ((i * 37) % 101) as f64 / 101.0).collect();
    let imag = (0..n).map(|i| ((i * 11) % 23) as f64 / 23.0).collect();
    (real, imag)
}

fn bench_fft_vs_rustfft(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft_vs_rustfft");
    let mut planner = FftPlanner::<f64>::new();

    for n in [256usize, 4096, 65536] {
        let (real, imag) = signal(n);

        group.bench_with_input(BenchmarkId::new("polezero", n), &n, |b, _| {
            b.iter(|| {
                let mut re = real.clone();
                let mut im = imag.clone();
                fft(black_box(&mut re), black_box(&mut im)).expect("power-of-two size");
                black_box((re, im))
            })
        });

        let plan = planner.plan_fft_inverse(n);
        let buffer: Vec<RefComplex<f64>> = real
            .iter()
            .zip(&imag)
            .map(|(&re, &im)| RefComplex::new(re, im))
            .collect();
        group.bench_with_input(BenchmarkId::new("rustfft", n), &n, |b, _| {
            b.iter(|| {
                let mut data = buffer.clone();
                plan.process(black_box(&mut data));
                black_box(data)
            })
        });
    }

    group.finish();
}

fn bench_frequency_response(c: &mut Criterion) {
    let zeros: Vec<Complex> = (0..8)
        .map(|k| {
            let w = std::f64::consts::PI * (k as f64 + 0.5) / 8.0;
            Complex::new(w.cos(), w.sin())
        })
        .collect();
    let poles: Vec<Complex> = zeros
        .iter()
        .map(|z| Complex::new(0.9 * z.real, 0.9 * z.imag))
        .collect();
    let numerator = Polynomial::from_roots(&zeros);

    let mut group = c.benchmark_group("frequency_response");
    for size in [256usize, 2048, 16384] {
        group.bench_with_input(BenchmarkId::new("unit_circle", size), &size, |b, &size| {
            b.iter(|| {
                evaluate_on_unit_circle(black_box(numerator.coefficients()), size)
                    .expect("valid size")
            })
        });
        group.bench_with_input(BenchmarkId::new("magnitude", size), &size, |b, &size| {
            b.iter(|| {
                magnitude_response(
                    black_box(&zeros),
                    black_box(&poles),
                    Complex::ONE,
                    size,
                    std::f64::consts::PI,
                )
                .expect("valid response")
            })
        });
    }
    group.finish();
}

criterion_group!(fft_benches, bench_fft_vs_rustfft, bench_frequency_response);
criterion_main!(fft_benches);
