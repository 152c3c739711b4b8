//! Criterion benchmarks for the streaming transform loop.
//!
//! Measures the per-row overhead of the loop itself (fetch, transform,
//! append, progress sampling) on a synthetic in-memory table.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rk_core::{
    CellTypeRegistry, Error, KeyAllocator, NullReporter, Row, StreamingTransformer, Table,
};

fn build_input_100k(registry: &CellTypeRegistry) -> Table {
    let mut keys = KeyAllocator::new();
    (0..100_000i32)
        .map(|i| {
            registry
                .row()
                .int(i)?
                .string(format!("item-{i}"))?
                .build(keys.next()?)
        })
        .collect::<Result<Vec<Row>, Error>>()
        .map(Table::from_rows)
        .expect("synthetic rows should build")
}

fn bench_streaming(c: &mut Criterion) {
    let registry = CellTypeRegistry::default();
    let input = build_input_100k(&registry);
    let transformer = StreamingTransformer::new(&registry);

    let mut group = c.benchmark_group("streaming_transform");
    group.sample_size(20);

    group.bench_function("copy_rows_100k", |b| {
        b.iter(|| {
            let mut output = Table::new();
            transformer
                .run(
                    black_box(&input),
                    &mut output,
                    &mut KeyAllocator::new(),
                    &mut NullReporter,
                    |row, _| Ok::<_, Error>(row.clone()),
                )
                .expect("copy should succeed");
            black_box(output.len());
        })
    });

    group.bench_function("append_column_100k", |b| {
        b.iter(|| {
            let mut output = Table::new();
            transformer
                .run(
                    black_box(&input),
                    &mut output,
                    &mut KeyAllocator::new(),
                    &mut NullReporter,
                    |row, ctx| {
                        let doubled = row.at(0)?.as_double()? * 2.0;
                        Ok::<_, Error>(row.append(ctx.cells().double(doubled)?))
                    },
                )
                .expect("append should succeed");
            black_box(output.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_streaming);
criterion_main!(benches);
