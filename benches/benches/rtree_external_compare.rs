// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_stripe_hash::{Point3, StripeHash};

use rstar::RTree;

fn gen_lattice_cloud(n: usize, step: f64) -> Vec<Point3<f64>> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                // Shear the lattice so points do not sit exactly on cell boundaries.
                let (fx, fy, fz) = (x as f64, y as f64, z as f64);
                out.push(Point3::new(
                    fx * step + fy * 0.013,
                    fy * step + fz * 0.017,
                    fz * step + fx * 0.011,
                ));
            }
        }
    }
    out
}

fn to_rstar_points(v: &[Point3<f64>]) -> Vec<[f64; 3]> {
    v.iter().map(|&p| p.into()).collect()
}

fn bench_rtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    let radius = 2.0;
    for &n in &[16usize, 32] {
        let cloud = gen_lattice_cloud(n, 1.0);
        let queries: Vec<_> = cloud.iter().step_by(7).copied().collect();
        group.throughput(Throughput::Elements(cloud.len() as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter(|| {
                let idx = StripeHash::build(&cloud, radius).unwrap();
                let hits: usize = queries.iter().map(|&p| idx.count_neighbors(p)).sum();
                black_box(hits);
            })
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&cloud),
                |points| {
                    let tree = RTree::bulk_load(points);
                    let hits: usize = queries
                        .iter()
                        .map(|&p| {
                            tree.locate_within_distance(p.into(), radius * radius)
                                .count()
                        })
                        .sum();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_f64);
criterion_main!(benches);
