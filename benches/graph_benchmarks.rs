use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use opengraph::algo::{connected_components, find_paths};
use opengraph::graph::{Edge, GraphStore, Node};

/// Build a chain of `size` nodes with an edge between each pair
fn build_chain(size: usize) -> GraphStore {
    let mut store = GraphStore::new();
    for i in 0..size {
        store.add_node(Node::new(format!("n{}", i), ["Host"]).unwrap());
    }
    for i in 0..size - 1 {
        store.add_edge(Edge::new(format!("n{}", i), format!("n{}", i + 1), "ConnectedTo").unwrap());
    }
    store
}

/// Benchmark checked edge insertion (duplicate detection hot path)
fn bench_edge_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let store = build_chain(size);
                criterion::black_box(store.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark simple-path enumeration on a layered graph
fn bench_find_paths(c: &mut Criterion) {
    // 8 layers of 4 nodes, every node connected to the whole next layer
    let layers = 8;
    let width = 4;
    let mut store = GraphStore::new();
    store.add_node(Node::new("start", ["Host"]).unwrap());
    store.add_node(Node::new("end", ["Host"]).unwrap());
    for layer in 0..layers {
        for slot in 0..width {
            store.add_node(Node::new(format!("l{}s{}", layer, slot), ["Host"]).unwrap());
        }
    }
    for slot in 0..width {
        store.add_edge(Edge::new("start", format!("l0s{}", slot), "ConnectedTo").unwrap());
        store.add_edge(
            Edge::new(format!("l{}s{}", layers - 1, slot), "end", "ConnectedTo").unwrap(),
        );
    }
    for layer in 0..layers - 1 {
        for from in 0..width {
            for to in 0..width {
                store.add_edge(
                    Edge::new(
                        format!("l{}s{}", layer, from),
                        format!("l{}s{}", layer + 1, to),
                        "ConnectedTo",
                    )
                    .unwrap(),
                );
            }
        }
    }

    c.bench_function("find_paths_layered", |b| {
        b.iter(|| {
            let paths = find_paths(&store, "start", "end", layers + 1);
            criterion::black_box(paths.len());
        });
    });
}

/// Benchmark connected-component extraction
fn bench_connected_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("connected_components");

    for size in [100, 1000].iter() {
        let store = build_chain(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let components = connected_components(&store);
                criterion::black_box(components.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_edge_insertion,
    bench_find_paths,
    bench_connected_components
);
criterion_main!(benches);
