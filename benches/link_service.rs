//! LinkService 性能基准测试

use clicktrail::services::{IdGenerator, LinkService, RandomIdGenerator};
use clicktrail::storage::MemoryStore;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

fn create_service() -> Arc<LinkService> {
    Arc::new(LinkService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(RandomIdGenerator::default()),
    ))
}

/// 不同长度的 id 生成
fn bench_generate_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_id");

    for length in [7, 12, 32] {
        let generator = RandomIdGenerator::new(length);
        group.bench_with_input(BenchmarkId::new("length", length), &generator, |b, g| {
            b.iter(|| black_box(g.generate()));
        });
    }
    group.finish();
}

/// 单次创建（内存存储）
fn bench_create_link(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = create_service();

    c.bench_function("create_short_link/memory", |b| {
        b.to_async(&rt).iter(|| async {
            black_box(
                service
                    .create_short_link("https://example.com/some/long/path")
                    .await
                    .unwrap(),
            )
        });
    });
}

/// 多任务并发解析同一个热点链接
fn bench_concurrent_resolve(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("resolve_and_track/concurrent");

    for num_tasks in [1, 8, 32] {
        group.throughput(Throughput::Elements(100 * num_tasks as u64));
        group.bench_with_input(
            BenchmarkId::new("tasks", num_tasks),
            &num_tasks,
            |b, &num_tasks| {
                b.to_async(&rt).iter(|| async {
                    // 每轮新建，避免访问历史无限增长
                    let service = create_service();
                    let id = service
                        .create_short_link("https://example.com")
                        .await
                        .unwrap();

                    let mut handles = vec![];
                    for _ in 0..num_tasks {
                        let svc = Arc::clone(&service);
                        let id = id.clone();
                        handles.push(tokio::spawn(async move {
                            for _ in 0..100 {
                                svc.resolve_and_track(&id).await.unwrap();
                            }
                        }));
                    }

                    for handle in handles {
                        handle.await.unwrap();
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generate_id,
    bench_create_link,
    bench_concurrent_resolve
);
criterion_main!(benches);
