#![allow(dead_code)]
//! 注入注册表的性能基准测试

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nebula_registry::{InjectionRegistry, Key, Registry, SharedRegistry};
use std::sync::Arc;

/// 测试用的简单服务
struct SimpleService {
    value: i32,
}

/// 测试用的复杂服务（包含多个字段）
struct ComplexService {
    id: u64,
    name: String,
    dependencies: Vec<String>,
}

/// 基准测试：重复绑定同一类型
fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_put");

    for count in [1, 10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let mut registry = Registry::new(Key::default());
                for i in 0..count {
                    registry.put(Arc::new(SimpleService { value: i }));
                }
                black_box(registry.len())
            });
        });
    }

    group.finish();
}

/// 基准测试：命中与未命中的查找
fn bench_get(c: &mut Criterion) {
    let mut registry = Registry::new(Key::default());
    registry.bind(SimpleService { value: 1 });
    registry.bind(ComplexService {
        id: 1,
        name: "complex".to_string(),
        dependencies: vec!["simple".to_string()],
    });

    c.bench_function("registry_get_hit", |b| {
        b.iter(|| black_box(registry.get::<ComplexService>(None)))
    });

    c.bench_function("registry_get_miss", |b| {
        b.iter(|| black_box(registry.get::<String>(None)))
    });
}

/// 基准测试：共享注册表的加锁查找
fn bench_shared_get(c: &mut Criterion) {
    let shared = SharedRegistry::default();
    shared.bind(SimpleService { value: 1 });

    c.bench_function("shared_registry_get", |b| {
        b.iter(|| black_box(shared.get::<SimpleService>(None)))
    });
}

criterion_group!(benches, bench_put, bench_get, bench_shared_get);
criterion_main!(benches);
