//! Transformer 벤치마크
//!
//! 평탄화와 MBean 그룹화 성능 측정

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rjolokia_input::collector::parse_body;
use rjolokia_input::transformer::{flatten, group_mbeans, TagSet};
use serde_json::{json, Map, Value};

fn composite_value() -> Value {
    json!({
        "HeapMemoryUsage": {
            "init": 268435456,
            "committed": 268435456,
            "max": 4294967296_i64,
            "used": 52428800
        },
        "NonHeapMemoryUsage": {
            "init": 2555904,
            "committed": 60227584,
            "max": -1,
            "used": 57877992
        },
        "ObjectPendingFinalizationCount": 0,
        "Verbose": false
    })
}

fn wildcard_value(beans: usize) -> Map<String, Value> {
    (0..beans)
        .map(|i| {
            (
                format!("java.lang:type=MemoryPool{},name=Pool {}", i % 4, i),
                json!({
                    "Usage": {"init": 0, "committed": 1024 * i, "max": -1, "used": 512 * i},
                    "CollectionUsageThresholdCount": i,
                    "Valid": true
                }),
            )
        })
        .collect()
}

fn benchmark_flatten(c: &mut Criterion) {
    let value = composite_value();

    c.bench_function("flatten/memory", |b| b.iter(|| flatten(&value, "memory")));
}

fn benchmark_group(c: &mut Criterion) {
    let base_tags = TagSet::from([
        ("server".to_string(), "stable".to_string()),
        ("host".to_string(), "192.168.103.2".to_string()),
        ("port".to_string(), "8180".to_string()),
    ]);

    let mut group = c.benchmark_group("group_mbeans");

    for beans in [4, 32, 256] {
        let entities = wildcard_value(beans);
        group.bench_with_input(BenchmarkId::new("beans", beans), &entities, |b, e| {
            b.iter(|| group_mbeans(e, &base_tags))
        });
    }

    group.finish();
}

fn benchmark_parse_body(c: &mut Criterion) {
    let body = json!({
        "request": {"mbean": "java.lang:type=Memory", "type": "read"},
        "value": composite_value(),
        "timestamp": 1609459200,
        "status": 200
    })
    .to_string();

    c.bench_function("parse_body/memory", |b| b.iter(|| parse_body(&body)));
}

criterion_group!(benches, benchmark_flatten, benchmark_group, benchmark_parse_body);
criterion_main!(benches);
