use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lvis_processor::{LdsVersion, SchemaRegistry, parse_records};

fn synthetic_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "1280903110 {} 80337.502 310.84538 68.49744 120.31 310.84539 68.49745 119.87 310.84537 68.49743 121.12",
                468_000 + i
            )
        })
        .collect()
}

fn bench_parse_lds104(c: &mut Criterion) {
    let registry = SchemaRegistry::standard();
    let schema = registry.schema_for(LdsVersion::V104).unwrap();
    let lines = synthetic_lines(10_000);

    c.bench_function("parse_10k_lds104_records", |b| {
        b.iter(|| parse_records(black_box(&lines), schema).unwrap())
    });
}

criterion_group!(benches, bench_parse_lds104);
criterion_main!(benches);
