//! Benchmarks for the pointer-move hot path

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use padsense_core::{Euler, PointerSample, Vec3};
use padsense_engine::{correct, pick, EngineConfig, FeedbackPolicy, InteractionEngine, MeshScene};
use padsense_mesh::{DecalFootprint, DecalGeometry, RegionTable, TriangleMesh};

/// Pointer sweep across the body, left shoulder to right hip
fn sweep(n: usize) -> Vec<PointerSample> {
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            PointerSample::new(-0.5 + t * 0.8, 0.3 - t * 0.5)
        })
        .collect()
}

fn bench_pick_and_correct(c: &mut Criterion) {
    let scene = MeshScene::training();
    let table = RegionTable::standard();
    let nominal = Vec3::new(5.0, 7.0, 10.0);
    let samples = sweep(256);

    c.bench_function("pick_and_correct", |b| {
        b.iter(|| {
            for &sample in &samples {
                if let Some(contact) = pick(&scene, black_box(sample)) {
                    black_box(correct(&contact, nominal, &table));
                }
            }
        });
    });
}

fn bench_decal_clip(c: &mut Criterion) {
    let mut group = c.benchmark_group("decal_clip");

    for cells in [8u32, 24, 64].iter() {
        let mesh = TriangleMesh::grid([-60.0, -40.0], [60.0, 40.0], 1.0, *cells, *cells);
        let footprint = DecalFootprint::new(
            Vec3::new(-23.8, 9.7, 1.0),
            Euler::from_degrees(-10.0, 0.0, 40.0),
            Vec3::new(5.0, 7.0, 10.0),
        );

        group.bench_with_input(BenchmarkId::from_parameter(cells), cells, |b, _| {
            b.iter(|| black_box(DecalGeometry::project(&mesh, black_box(&footprint))));
        });
    }

    group.finish();
}

fn bench_feedback(c: &mut Criterion) {
    let samples = sweep(1024);
    let single = FeedbackPolicy::chin_anchor();
    let multi = FeedbackPolicy::zone_anchors();

    let mut group = c.benchmark_group("feedback");
    group.bench_function("single_anchor", |b| {
        b.iter(|| samples.iter().map(|s| single.compute(*s).value()).sum::<f32>());
    });
    group.bench_function("multi_anchor", |b| {
        b.iter(|| samples.iter().map(|s| multi.compute(*s).value()).sum::<f32>());
    });
    group.finish();
}

fn bench_engine_pointer_move(c: &mut Criterion) {
    let samples = sweep(128);

    c.bench_function("engine_pointer_move", |b| {
        let mut engine = match InteractionEngine::new(MeshScene::training(), EngineConfig::standard()) {
            Ok(engine) => engine,
            Err(e) => panic!("standard config rejected: {e}"),
        };
        engine.dismiss_overlay();
        b.iter(|| {
            for &sample in &samples {
                engine.on_pointer_move(black_box(sample));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_pick_and_correct,
    bench_decal_clip,
    bench_feedback,
    bench_engine_pointer_move,
);

criterion_main!(benches);
