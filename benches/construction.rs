use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_voronoi_plane::generation::{generate_cells, generate_sites, lloyd_relaxation};
use rust_voronoi_plane::{BucketGrid, NeighborSource, Rect};

const SIZES: [usize; 4] = [50, 200, 800, 2000];

fn benchmark_construction(c: &mut Criterion) {
    let bounds = Rect::unit();

    let mut group = c.benchmark_group("construction");
    group.sample_size(10);

    for &size in &SIZES {
        let sites = generate_sites(size, &bounds, 42);

        // Roughly two sites per bucket
        let divisions = ((size as f64 / 2.0).sqrt().ceil() as usize).max(1);
        println!("N: {:5}, Grid: {:3}x{:3}", size, divisions, divisions);

        group.bench_with_input(BenchmarkId::new("all_pairs", size), &sites, |b, sites| {
            b.iter(|| generate_cells(sites, &bounds, &NeighborSource::AllPairs).expect("construction failed"))
        });

        group.bench_with_input(BenchmarkId::new("buckets", size), &sites, |b, sites| {
            b.iter(|| {
                let grid = BucketGrid::new(sites, &bounds, divisions).ok()?;
                generate_cells(sites, &bounds, &NeighborSource::Buckets(grid)).ok()
            })
        });
    }
    group.finish();
}

fn benchmark_relaxation(c: &mut Criterion) {
    let bounds = Rect::unit();

    let mut group = c.benchmark_group("relaxation");
    group.sample_size(10);

    for &size in &SIZES[..3] {
        let sites = generate_sites(size, &bounds, 7);
        group.bench_with_input(BenchmarkId::new("three_passes", size), &sites, |b, sites| {
            b.iter(|| lloyd_relaxation(sites.clone(), &bounds, 3).expect("relaxation failed"))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_construction, benchmark_relaxation);
criterion_main!(benches);
