//! Noise sampling and full-texture effect throughput.
//!
//! Run with: cargo bench --bench noise_benchmark

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use texfx::effects::{AnimatedEffect, FireParams, LavaParams, PlasmaParams, WaterParams};
use texfx::noise::{perlin_2d, ridge_2d, turbulence_2d, voronoi_2d};
use texfx::post;
use texfx::procedural;
use texfx::texture::TextureHandle;
use texfx::{Color, EffectManager};

const SIZE: u32 = 256;

fn benchmark_single_sample(c: &mut Criterion) {
    c.bench_function("perlin_4_octaves", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x += 0.1;
            black_box(perlin_2d(black_box(x), black_box(x * 0.7), 4.0, 4, 0.5))
        });
    });

    c.bench_function("turbulence_4_octaves", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x += 0.1;
            black_box(turbulence_2d(black_box(x), black_box(x * 0.7), 4.0, 4))
        });
    });

    c.bench_function("ridge_4_octaves", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x += 0.1;
            black_box(ridge_2d(black_box(x), black_box(x * 0.7), 4.0, 4))
        });
    });

    c.bench_function("voronoi", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x += 0.1;
            black_box(voronoi_2d(black_box(x), black_box(x * 0.7), 8.0))
        });
    });
}

fn benchmark_million_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("million_samples");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_perlin_samples", |b| {
        b.iter(|| {
            for i in 0..1_000_000 {
                let x = (i % 1000) as f32 * 0.001;
                let y = (i / 1000) as f32 * 0.001;
                black_box(perlin_2d(x, y, 4.0, 4, 0.5));
            }
        });
    });

    group.finish();
}

fn benchmark_effects(c: &mut Criterion) {
    let texture = TextureHandle::new(SIZE, SIZE).unwrap();
    let mut group = c.benchmark_group("effects_256x256");
    group.throughput(Throughput::Elements(u64::from(SIZE * SIZE)));
    group.sample_size(20);

    fn bench<E: AnimatedEffect>(
        group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
        texture: &TextureHandle,
        params: E,
    ) {
        group.bench_function(params.label(), |b| {
            let mut t = 0.0;
            b.iter(|| {
                t += 1.0 / 60.0;
                black_box(params.with_time(t).render(texture))
            });
        });
    }

    bench(&mut group, &texture, LavaParams::default());
    bench(&mut group, &texture, WaterParams::default());
    bench(&mut group, &texture, FireParams::default());
    bench(&mut group, &texture, PlasmaParams::default());
    group.finish();
}

fn benchmark_post(c: &mut Criterion) {
    let texture = procedural::create_marble(SIZE, SIZE, Color::WHITE, Color::rgb(60, 60, 70)).unwrap();
    let mut group = c.benchmark_group("post_256x256");
    group.sample_size(20);

    group.bench_function("blur_radius_2", |b| b.iter(|| post::apply_blur(&texture, 2.0)));
    group.bench_function("sobel", |b| b.iter(|| post::apply_sobel(&texture)));
    group.bench_function("saturation", |b| b.iter(|| post::adjust_saturation(&texture, 1.1)));
    group.finish();
}

fn benchmark_scheduler(c: &mut Criterion) {
    let mut manager = EffectManager::new();
    let textures: Vec<_> = (0..4).map(|_| TextureHandle::new(64, 64).unwrap()).collect();
    for texture in &textures {
        manager.register_plasma_effect(texture, &PlasmaParams::default());
    }

    c.bench_function("manager_update_4x64x64", |b| b.iter(|| manager.update(black_box(1.0 / 60.0))));
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_million_samples,
    benchmark_effects,
    benchmark_post,
    benchmark_scheduler
);
criterion_main!(benches);
