// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Benchmarks for the graph algorithms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphyard::types::NodeId;
use graphyard::WeightedGraph;

/// Ring with chords: every node reaches every other, weights vary by id
fn ring_graph(n: i64) -> WeightedGraph {
    let mut graph = WeightedGraph::new();
    for id in 0..n {
        graph.add_node(id, None);
    }
    for id in 0..n {
        let w = f64::from(u32::try_from(id % 7).unwrap_or(0)) + 1.0;
        graph.add_edge(id, (id + 1) % n, w).unwrap();
        graph.add_edge(id, (id * 3 + 5) % n, w * 2.5).unwrap();
    }
    graph
}

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");
    for n in [100, 1_000, 10_000] {
        let graph = ring_graph(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, g| {
            b.iter(|| g.shortest_path(black_box(0), black_box(n / 2)).unwrap());
        });
    }
    group.finish();
}

fn bench_center(c: &mut Criterion) {
    let mut group = c.benchmark_group("center");
    group.sample_size(10);
    for n in [50, 200] {
        let graph = ring_graph(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, g| {
            b.iter(|| g.center());
        });
    }
    group.finish();
}

fn bench_tsp(c: &mut Criterion) {
    let graph = ring_graph(500);
    let members: Vec<NodeId> = (0..8).map(|i| i * 37).collect();

    let mut group = c.benchmark_group("tsp");
    group.bench_function("held_karp", |b| {
        b.iter(|| graph.tsp(black_box(&members)).unwrap());
    });
    group.sample_size(10);
    group.bench_function("exhaustive", |b| {
        b.iter(|| graph.tsp_exhaustive(black_box(&members)).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_shortest_path, bench_center, bench_tsp);
criterion_main!(benches);
