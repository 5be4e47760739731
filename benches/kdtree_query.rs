use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;

use stowline::kdtree::KdTree;
use stowline::ItemHandle;

fn build_tree(item_count: usize) -> KdTree {
    let mut tree = KdTree::new(8, [1000.0, 1000.0, 1000.0]);
    for i in 0..item_count {
        let f = i as f64;
        tree.insert(ItemHandle(i), [f % 1000.0, (f * 3.0) % 1000.0, (f * 7.0) % 1000.0]);
    }
    tree
}

fn query(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree-query");
    group.sample_size(30);

    for &item_count in &[100usize, 1_000, 10_000] {
        let tree = build_tree(item_count);
        group.bench_function(format!("query-{item_count}"), |b| {
            b.iter(|| {
                let mut out = Vec::new();
                tree.query([0.0, 0.0, 0.0], [100.0, 100.0, 100.0], &mut out);
                out
            })
        });
    }

    group.finish();
}

criterion_group!(benches, query);
criterion_main!(benches);
