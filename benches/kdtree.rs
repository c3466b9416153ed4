use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rapid_kdtree::kdtree::{build_in_place, IndexedPoint, KDTreeIndex, KDTreeRef, SearchBounds};

fn random_points<const D: usize>(n: usize) -> Vec<IndexedPoint<f64, D>> {
    let mut rng = StdRng::seed_from_u64(11122);
    IndexedPoint::from_coords((0..n).map(|_| {
        let mut coords = [0.0; D];
        for c in coords.iter_mut() {
            *c = rng.gen::<f64>() * 10.0;
        }
        coords
    }))
}

fn bench_dims<const D: usize>(c: &mut Criterion) {
    let points = random_points::<D>(10_000);

    c.bench_with_input(
        BenchmarkId::new("build", format!("{D}d")),
        &points,
        |b, points| {
            b.iter_batched(
                || points.clone(),
                |mut points| build_in_place(&mut points, D).unwrap(),
                criterion::BatchSize::LargeInput,
            )
        },
    );

    let mut tree_points = points.clone();
    let tree = KDTreeRef::build(&mut tree_points, D).unwrap();
    let mut results = Vec::new();

    // three nearest neighbors of every element, the way a clustering pass would use the tree
    c.bench_function(&format!("search_sorted_3nn/{D}d"), |b| {
        b.iter(|| {
            for p in &points {
                tree.search_sorted_into(&p.coords, SearchBounds::count(3), &mut results)
                    .unwrap();
                black_box(&results);
            }
        })
    });

    c.bench_function(&format!("within_r1/{D}d"), |b| {
        b.iter(|| {
            for p in points.iter().take(1000) {
                black_box(tree.within(&p.coords, 1.0).unwrap());
            }
        })
    });
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_dims::<2>(c);
    bench_dims::<3>(c);
    bench_dims::<5>(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
