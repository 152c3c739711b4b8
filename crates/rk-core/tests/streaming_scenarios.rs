//! End-to-end streaming scenarios: configuration → registry → transform → output.

use rk_config::PipelineConfig;
use rk_core::{
    CellTypeRegistry, Error, InputTable, KeyAllocator, NullReporter, ProgressReporter,
    RecordingReporter, Row, RowKey, StreamingTransformer, Table, TableSpec, TypeDescriptor,
};

fn int_table(registry: &CellTypeRegistry, values: impl IntoIterator<Item = i32>) -> Table {
    let mut keys = KeyAllocator::new();
    values
        .into_iter()
        .map(|v| {
            let key = keys.next().unwrap();
            registry.row().int(v).unwrap().build(key).unwrap()
        })
        .collect()
}

#[test]
fn doubles_each_integer_in_order() {
    let registry = CellTypeRegistry::default();
    let input = int_table(&registry, [3, -4, 11]);
    let mut output = Table::new();
    let mut keys = KeyAllocator::new();

    StreamingTransformer::new(&registry)
        .run(&input, &mut output, &mut keys, &mut NullReporter, |row, ctx| {
            let doubled = row.at(0)?.as_integer()? * 2;
            let builder = ctx.cells().int(doubled)?;
            ctx.new_row(builder)
        })
        .unwrap();

    assert_eq!(output.len(), 3);
    let values: Vec<i32> = output
        .iter()
        .map(|r| {
            assert_eq!(r.len(), 1);
            r.at(0).unwrap().as_integer().unwrap()
        })
        .collect();
    assert_eq!(values, vec![6, -8, 22]);
    assert!(output
        .iter()
        .all(|r| r.cells()[0].descriptor() == &TypeDescriptor::INT));
}

#[test]
fn empty_input_completes_without_progress() {
    let registry = CellTypeRegistry::default();
    let input = Table::new();
    let mut output = Table::new();
    let mut reporter = RecordingReporter::new();
    let mut calls = 0;

    let summary = StreamingTransformer::new(&registry)
        .run(
            &input,
            &mut output,
            &mut KeyAllocator::new(),
            &mut reporter,
            |row, _| {
                calls += 1;
                Ok::<_, Error>(row.clone())
            },
        )
        .unwrap();

    assert_eq!(calls, 0);
    assert!(output.is_empty());
    assert!(reporter.is_empty());
    assert_eq!(summary.rows_written, 0);
    assert_eq!(summary.notifications, 0);
}

#[test]
fn failure_on_fifth_row_keeps_first_four() {
    let registry = CellTypeRegistry::default();
    let input = int_table(&registry, 0..10);
    let mut output = Table::new();
    let mut seen = Vec::new();

    let err = StreamingTransformer::new(&registry)
        .run(
            &input,
            &mut output,
            &mut KeyAllocator::new(),
            &mut NullReporter,
            |row, ctx| {
                seen.push(ctx.index());
                if ctx.index() == 4 {
                    return Err("value out of range".into());
                }
                Ok::<_, Box<dyn std::error::Error + Send + Sync>>(row.clone())
            },
        )
        .unwrap_err();

    assert!(matches!(err, Error::TransformFailed { index: 4, .. }));
    assert!(err.to_string().contains("value out of range"));
    assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    assert_eq!(output.len(), 4);
    let keys: Vec<_> = output.iter().map(Row::key).collect();
    assert_eq!(keys, vec![RowKey(0), RowKey(1), RowKey(2), RowKey(3)]);
}

/// Records the index of the row that was last transformed each time it is notified.
struct IndexRecorder<'a> {
    current: &'a std::cell::Cell<usize>,
    fired: Vec<usize>,
    labels: RecordingReporter,
}

impl ProgressReporter for IndexRecorder<'_> {
    fn report(&mut self, label: &str) -> rk_core::Result<()> {
        self.fired.push(self.current.get());
        self.labels.report(label)
    }
}

#[test]
fn progress_samples_on_bitmask_indices() {
    let registry = CellTypeRegistry::default();
    let input = int_table(&registry, 0..2000);
    let mut output = Table::new();
    let current = std::cell::Cell::new(usize::MAX);
    let mut reporter = IndexRecorder {
        current: &current,
        fired: Vec::new(),
        labels: RecordingReporter::new(),
    };

    let transformer = StreamingTransformer::new(&registry);
    assert_eq!(transformer.sampler().step(), 767);

    let summary = transformer
        .run(
            &input,
            &mut output,
            &mut KeyAllocator::new(),
            &mut reporter,
            |row, ctx| {
                current.set(ctx.index());
                Ok::<_, Error>(row.clone())
            },
        )
        .unwrap();

    assert_eq!(reporter.fired, vec![0, 256, 1024, 1280]);
    assert_eq!(summary.notifications, 4);
    let got = reporter.labels.values();
    assert_eq!(got.len(), 4);
    for (g, &i) in got.iter().zip(&reporter.fired) {
        let e = i as f64 * (767.0 / 2000.0);
        assert!((g - e).abs() < 1e-9, "label value {} != {}", g, e);
    }
    assert_eq!(reporter.labels.labels()[0], "0.0%");
    assert_eq!(reporter.labels.labels()[1], "98.176%");
}

#[test]
fn configured_pipeline_appends_declared_columns() {
    let config = PipelineConfig::parse_json(
        r#"{
            "append_columns": true,
            "key_base": 500,
            "sampling_step": 1,
            "output_columns": [
                {"name": "greeting", "type": "String"},
                {"name": "where", "type": "acme.geo.GeoCell"}
            ]
        }"#,
    )
    .unwrap();
    let registry = CellTypeRegistry::from_config(&config);

    let input_spec = TableSpec::from_columns(vec![rk_core::ColumnSpec::new(
        "value",
        TypeDescriptor::INT,
    )])
    .unwrap();
    let output_spec = TableSpec::output_spec(Some(&input_spec), &config, &registry).unwrap();
    assert_eq!(output_spec.len(), 3);

    let input = int_table(&registry, [1, 2, 3]);
    let mut output = Table::new();
    let mut keys = KeyAllocator::with_base(config.key_base);
    let mut reporter = RecordingReporter::new();

    StreamingTransformer::from_config(&registry, &config)
        .run(&input, &mut output, &mut keys, &mut reporter, |row, ctx| {
            let extra = ctx
                .cells()
                .string("Hi!")?
                .with_cell("GeoCell", serde_json::json!({"row": ctx.index()}))?;
            Ok::<_, Error>(row.append(extra))
        })
        .unwrap();

    // sampling step 1 fires on even indices only
    assert_eq!(reporter.len(), 2);
    for row in &output {
        assert!(output_spec.conforms(row), "row {} does not match spec", row.key());
    }
    let last = output.row(2).unwrap();
    assert_eq!(last.key(), RowKey(2), "appended rows keep the input key");
    assert_eq!(last.at(-1).unwrap().as_object().unwrap()["row"], 2);
    assert_eq!(keys.peek(), Some(RowKey(500)), "no new keys were needed");
}

#[test]
fn rows_built_from_scratch_continue_after_reseed() {
    let registry = CellTypeRegistry::default();
    let mut output = Table::new();
    let mut keys = KeyAllocator::new();
    keys.reseed(40);

    StreamingTransformer::new(&registry)
        .generate(3, &mut output, &mut keys, &mut NullReporter, |ctx| {
            let builder = ctx.cells().string(format!("item {}", ctx.index()))?;
            ctx.new_row(builder)
        })
        .unwrap();

    let got: Vec<_> = output.iter().map(|r| r.key().to_string()).collect();
    assert_eq!(got, vec!["Row40", "Row41", "Row42"]);
    assert_eq!(InputTable::len(&output), 3);
}
