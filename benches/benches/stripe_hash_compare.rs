// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_stripe_hash::{LinearScan, NeighborQuery, Point3, StripeHash, StripeHash16};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Uniform cloud in a cube of side `size`.
fn gen_uniform_cloud(count: usize, size: f64) -> Vec<Point3<f64>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            Point3::new(
                rng.next_f64() * size,
                rng.next_f64() * size,
                rng.next_f64() * size,
            )
        })
        .collect()
}

/// Dense blobs of points, roughly like atoms in a folded chain.
fn gen_clustered_cloud(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point3<f64>> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let c = Point3::new(
            rng.next_f64() * 200.0,
            rng.next_f64() * 200.0,
            rng.next_f64() * 200.0,
        );
        for _ in 0..per_cluster {
            out.push(Point3::new(
                c.x + (rng.next_f64() - 0.5) * spread,
                c.y + (rng.next_f64() - 0.5) * spread,
                c.z + (rng.next_f64() - 0.5) * spread,
            ));
        }
    }
    out
}

fn gen_queries(count: usize, size: f64) -> Vec<Point3<f64>> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|_| {
            Point3::new(
                rng.next_f64() * size,
                rng.next_f64() * size,
                rng.next_f64() * size,
            )
        })
        .collect()
}

fn count_all<Q: NeighborQuery<f64>>(q: &Q, queries: &[Point3<f64>]) -> usize {
    queries.iter().map(|&p| q.count_neighbors(p)).sum()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1_000usize, 10_000, 60_000] {
        let cloud = gen_uniform_cloud(n, 40.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("stripe_hash_n{}", n), |b| {
            b.iter(|| black_box(StripeHash::build(&cloud, 4.0).unwrap()))
        });
        group.bench_function(format!("stripe_hash16_n{}", n), |b| {
            b.iter(|| black_box(StripeHash16::build(&cloud, 4.0).unwrap()))
        });
    }
    group.finish();
}

fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_neighbors");
    let queries = gen_queries(1_000, 40.0);
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &n in &[1_000usize, 10_000] {
        let cloud = gen_uniform_cloud(n, 40.0);
        let idx = StripeHash::build(&cloud, 4.0).unwrap();
        group.bench_function(format!("stripe_hash_n{}", n), |b| {
            b.iter(|| black_box(count_all(&idx, &queries)))
        });
        let scan = LinearScan::new(cloud.clone(), 4.0);
        group.bench_function(format!("linear_scan_n{}", n), |b| {
            b.iter(|| black_box(count_all(&scan, &queries)))
        });
    }
    group.finish();
}

fn bench_clash(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_clash");
    let cloud = gen_clustered_cloud(64, 256, 12.0);
    let queries = gen_queries(4_096, 200.0);
    let idx = StripeHash::build(&cloud, 3.0).unwrap();
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("stripe_hash_clustered", |b| {
        b.iter(|| black_box(queries.iter().filter(|&&p| idx.has_clash(p)).count()))
    });
    group.finish();
}

fn bench_visit(c: &mut Criterion) {
    let mut group = c.benchmark_group("visit");
    let cloud = gen_uniform_cloud(20_000, 40.0);
    let queries = gen_queries(1_000, 40.0);
    let idx = StripeHash::build(&cloud, 4.0).unwrap();
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("visit_sum_d2", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &p in &queries {
                idx.visit(p, |_, _, d2| acc += d2);
            }
            black_box(acc)
        })
    });
    group.bench_function("visit_lax_sum_d2", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &p in &queries {
                idx.visit_lax(p, |q, s| acc += q.distance_squared(s));
            }
            black_box(acc)
        })
    });
    group.bench_function("neighbors_iter_sum_d2", |b| {
        b.iter_batched(
            || queries.clone(),
            |queries| {
                let acc: f64 = queries
                    .iter()
                    .flat_map(|&p| idx.neighbors(p).map(|(_, d2)| d2))
                    .sum();
                black_box(acc)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_count, bench_clash, bench_visit);
criterion_main!(benches);
