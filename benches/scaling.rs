use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::prelude::*;
use rand::rngs::StdRng;
use vorosweep::{BoundingBox, Diagram};

fn random_sites(count: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sites = Vec::with_capacity(count * 2);
    for _ in 0..count {
        sites.push(rng.r#gen::<f64>() * 100.0);
        sites.push(rng.r#gen::<f64>() * 100.0);
    }
    sites
}

fn benchmark_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_scaling");

    for count in [100, 500, 1000, 5000, 10000] {
        let sites = random_sites(count, 7);
        let mut diagram = Diagram::new(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
        diagram.set_sites(&sites);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                diagram.calculate();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_scaling);
criterion_main!(benches);
