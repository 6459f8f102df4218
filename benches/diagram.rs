use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::prelude::*;
use rand::rngs::StdRng;
use vorosweep::{BoundingBox, Diagram};

const NUM_SITES: usize = 1000;

fn random_sites(count: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sites = Vec::with_capacity(count * 2);
    for _ in 0..count {
        sites.push(rng.r#gen::<f64>() * 100.0);
        sites.push(rng.r#gen::<f64>() * 100.0);
    }
    sites
}

fn benchmark_set_sites(c: &mut Criterion) {
    let sites = random_sites(NUM_SITES, 42);

    c.bench_function(&format!("set_sites_{}_points", NUM_SITES), |b| {
        let mut diagram = Diagram::new(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
        b.iter(|| {
            diagram.set_sites(black_box(&sites));
        })
    });
}

fn benchmark_calculate(c: &mut Criterion) {
    let sites = random_sites(NUM_SITES, 42);
    let mut diagram = Diagram::new(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    diagram.set_sites(&sites);

    c.bench_function(&format!("calculate_{}_points", NUM_SITES), |b| {
        b.iter(|| {
            diagram.calculate();
        })
    });
}

fn benchmark_cell_queries(c: &mut Criterion) {
    let sites = random_sites(NUM_SITES, 42);
    let mut diagram = Diagram::new(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    diagram.set_sites(&sites);
    diagram.calculate();

    c.bench_function("cell_area_and_centroid", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for i in 0..diagram.count_cells() {
                let cell = diagram.get(i).unwrap();
                total += black_box(cell.area());
                black_box(cell.centroid());
            }
            total
        })
    });
}

criterion_group!(
    benches,
    benchmark_set_sites,
    benchmark_calculate,
    benchmark_cell_queries
);
criterion_main!(benches);
