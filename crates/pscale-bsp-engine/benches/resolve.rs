use criterion::{Criterion, criterion_group, criterion_main};
use pscale_bsp_engine::{Selector, Spindle, recursive_view, resolve_block};
mod common;

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.sample_size(10);

    let block = common::generate_block(9, 5);
    let spindle = Spindle::from(0.12345);

    group.bench_function("spindle_chain", |b| {
        b.iter(|| resolve_block(std::hint::black_box(&block), Some(&spindle), None));
    });

    group.bench_function("point_fallback", |b| {
        let selector = Selector::Pscale(-9);
        b.iter(|| resolve_block(std::hint::black_box(&block), Some(&spindle), Some(&selector)));
    });

    group.bench_function("subtree_selector", |b| {
        let spindle = Spindle::from("0.1");
        b.iter(|| {
            resolve_block(
                std::hint::black_box(&block),
                Some(&spindle),
                Some(&Selector::Subtree),
            )
        });
    });

    group.bench_function("recursive_view", |b| {
        b.iter(|| recursive_view(std::hint::black_box(&block), Some(5)));
    });

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
