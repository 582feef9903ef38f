//! Toast Store Benchmarks
//!
//! Measures the pure reducer and the cost of publishing a snapshot to a
//! growing number of subscribers.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;

use toastd::notifications::{
    reduce, Toast, ToastConfig, ToastContent, ToastId, ToastState, ToastStore, ToastUpdate,
    Transition,
};

fn filled_state(count: usize) -> ToastState {
    let mut state = ToastState::new();
    for i in 0..count as u64 {
        let toast = Toast::new(ToastId::from(i), ToastContent::titled(format!("toast {}", i)));
        state = reduce(state, Transition::Add(toast), count);
    }
    state
}

/// Benchmark each transition kind against a full state
fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    for limit in [1usize, 10, 100] {
        let state = filled_state(limit);
        let middle = ToastId::from((limit / 2) as u64);

        group.bench_with_input(BenchmarkId::new("add", limit), &state, |b, state| {
            b.iter(|| {
                let toast = Toast::new(ToastId::from(u64::MAX), ToastContent::titled("new"));
                black_box(reduce(state.clone(), Transition::Add(toast), limit))
            })
        });

        group.bench_with_input(BenchmarkId::new("update", limit), &state, |b, state| {
            b.iter(|| {
                let transition = Transition::Update {
                    id: middle.clone(),
                    changes: ToastUpdate::new().with_title("changed"),
                };
                black_box(reduce(state.clone(), transition, limit))
            })
        });

        group.bench_with_input(BenchmarkId::new("dismiss_all", limit), &state, |b, state| {
            b.iter(|| black_box(reduce(state.clone(), Transition::Dismiss(None), limit)))
        });
    }

    group.finish();
}

/// Benchmark raising a toast while fanning out to N subscribers
fn bench_fan_out(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let mut group = c.benchmark_group("toast_fan_out");

    for subscribers in [1usize, 10, 100] {
        let store = ToastStore::with_runtime(
            ToastConfig::new(5, Duration::from_secs(3600)),
            runtime.handle().clone(),
        )
        .unwrap();
        let subscriptions: Vec<_> = (0..subscribers)
            .map(|_| store.subscribe(|state: &ToastState| {
                black_box(state.len());
            }))
            .collect();

        group.throughput(Throughput::Elements(subscribers as u64));
        group.bench_function(BenchmarkId::new("subscribers", subscribers), |b| {
            b.iter(|| black_box(store.toast(ToastContent::titled("bench"))))
        });

        for subscription in subscriptions {
            subscription.unsubscribe();
        }
        store.shutdown();
    }

    group.finish();
}

criterion_group!(store_benches, bench_reduce, bench_fan_out);
criterion_main!(store_benches);
