//! Criterion benchmarks for the block deque and the allocator-aware list.

use std::collections::VecDeque;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tessera_collections::{Deque, List};
use tessera_memory::{StackAllocator, StackStorage};

fn bench_deque(c: &mut Criterion) {
    let sizes: Vec<usize> = vec![100, 10_000];

    let mut group = c.benchmark_group("push_both_ends");
    for &n in &sizes {
        group.bench_with_input(BenchmarkId::new("Deque", n), &n, |b, &n| {
            b.iter(|| {
                let mut deque = Deque::new();
                for i in 0..n {
                    if i % 2 == 0 {
                        deque.push_back(i);
                    } else {
                        deque.push_front(i);
                    }
                }
                deque
            });
        });
        group.bench_with_input(BenchmarkId::new("VecDeque", n), &n, |b, &n| {
            b.iter(|| {
                let mut deque = VecDeque::new();
                for i in 0..n {
                    if i % 2 == 0 {
                        deque.push_back(i);
                    } else {
                        deque.push_front(i);
                    }
                }
                deque
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("random_access");
    for &n in &sizes {
        let deque: Deque<usize> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| (0..n).step_by(7).map(|i| deque[black_box(i)]).sum::<usize>());
        });
    }
    group.finish();
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_push_pop");
    group.bench_function("heap_1000", |b| {
        b.iter(|| {
            let mut list: List<u64> = List::new();
            for i in 0..1_000 {
                list.push_back(i).unwrap();
            }
            while list.pop_back().is_some() {}
        });
    });
    group.bench_function("stack_arena_1000", |b| {
        let storage = StackStorage::<{ 64 * 1024 }>::new();
        b.iter(|| {
            let mut list = List::new_in(StackAllocator::<u64, { 64 * 1024 }>::new(&storage));
            for i in 0..1_000 {
                list.push_back(i).unwrap();
            }
            while list.pop_back().is_some() {}
        });
    });
    group.finish();
}

criterion_group!(benches, bench_deque, bench_list);
criterion_main!(benches);
