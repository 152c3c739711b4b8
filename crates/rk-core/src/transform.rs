//! Streaming transform: read row i, transform it, append the result, sample
//! progress. Strictly sequential; the first failure stops the run and rows
//! already appended stay in the output.

use rk_common::error::BoxError;
use rk_common::{Error, Result, RowKey, RunId};
use rk_config::PipelineConfig;
use tracing::{debug, info, info_span};

use crate::builder::RowBuilder;
use crate::keys::KeyAllocator;
use crate::progress::{format_label, ProgressReporter, ProgressSampler};
use crate::registry::CellTypeRegistry;
use crate::row::Row;
use crate::table::{InputTable, OutputAppender};

/// Per-row view of the session handed to the transform function.
#[derive(Debug)]
pub struct TransformContext<'a> {
    registry: &'a CellTypeRegistry,
    keys: &'a mut KeyAllocator,
    index: usize,
}

impl<'a> TransformContext<'a> {
    /// Index of the row being produced.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn registry(&self) -> &'a CellTypeRegistry {
        self.registry
    }

    /// Fresh builder for a new row.
    pub fn cells(&self) -> RowBuilder<'a> {
        RowBuilder::new(self.registry)
    }

    /// Allocate the next key of the session.
    pub fn next_key(&mut self) -> Result<RowKey> {
        self.keys.next()
    }

    /// Build `builder` under the next session key. No key is consumed when
    /// the builder is empty.
    pub fn new_row(&mut self, builder: RowBuilder<'_>) -> Result<Row> {
        if builder.is_empty() {
            return Err(Error::EmptyRow);
        }
        builder.build(self.keys.next()?)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: RunId,
    pub rows_written: usize,
    pub notifications: usize,
}

/// Drives the input → transform → output loop.
#[derive(Debug, Clone, Copy)]
pub struct StreamingTransformer<'r> {
    registry: &'r CellTypeRegistry,
    sampler: ProgressSampler,
}

impl<'r> StreamingTransformer<'r> {
    pub fn new(registry: &'r CellTypeRegistry) -> Self {
        Self {
            registry,
            sampler: ProgressSampler::default(),
        }
    }

    pub fn from_config(registry: &'r CellTypeRegistry, config: &PipelineConfig) -> Self {
        Self::new(registry).with_sampling_step(config.sampling_step)
    }

    pub fn with_sampling_step(mut self, step: u64) -> Self {
        self.sampler = ProgressSampler::new(step);
        self
    }

    pub fn sampler(&self) -> ProgressSampler {
        self.sampler
    }

    /// Transform every row of `input` in order into `output`.
    ///
    /// A transform error is returned as [`Error::TransformFailed`] carrying the
    /// row index. Appender and reporter errors are returned unchanged.
    pub fn run<I, O, P, F, E>(
        &self,
        input: &I,
        output: &mut O,
        keys: &mut KeyAllocator,
        reporter: &mut P,
        mut transform: F,
    ) -> Result<RunSummary>
    where
        I: InputTable + ?Sized,
        O: OutputAppender + ?Sized,
        P: ProgressReporter + ?Sized,
        F: FnMut(&Row, &mut TransformContext<'_>) -> std::result::Result<Row, E>,
        E: Into<BoxError>,
    {
        let total = input.len();
        self.drive(total, output, keys, reporter, |index, ctx| {
            let row = input
                .row(index)
                .ok_or(Error::MissingRow { index, len: total })?;
            transform(row, ctx).map_err(|e| Error::TransformFailed {
                index,
                source: e.into(),
            })
        })
    }

    /// Produce `count` rows without an input table.
    pub fn generate<O, P, F, E>(
        &self,
        count: usize,
        output: &mut O,
        keys: &mut KeyAllocator,
        reporter: &mut P,
        mut produce: F,
    ) -> Result<RunSummary>
    where
        O: OutputAppender + ?Sized,
        P: ProgressReporter + ?Sized,
        F: FnMut(&mut TransformContext<'_>) -> std::result::Result<Row, E>,
        E: Into<BoxError>,
    {
        self.drive(count, output, keys, reporter, |index, ctx| {
            produce(ctx).map_err(|e| Error::TransformFailed {
                index,
                source: e.into(),
            })
        })
    }

    fn drive<O, P, S>(
        &self,
        total: usize,
        output: &mut O,
        keys: &mut KeyAllocator,
        reporter: &mut P,
        mut step: S,
    ) -> Result<RunSummary>
    where
        O: OutputAppender + ?Sized,
        P: ProgressReporter + ?Sized,
        S: FnMut(usize, &mut TransformContext<'_>) -> Result<Row>,
    {
        let run_id = RunId::new();
        let span = info_span!("streaming_transform", run_id = %run_id, rows = total);
        let _guard = span.enter();
        info!(sampling_step = self.sampler.step(), "streaming transform started");

        let coefficient = self.sampler.coefficient(total);
        let mut notifications = 0;
        for index in 0..total {
            let mut ctx = TransformContext {
                registry: self.registry,
                keys: &mut *keys,
                index,
            };
            let row = step(index, &mut ctx)?;
            output.append(row)?;

            if self.sampler.fires(index) {
                let label = format_label(index as f64 * coefficient);
                debug!(index, label = %label, "progress sample");
                reporter.report(&label)?;
                notifications += 1;
            }
        }

        info!(rows_written = total, notifications, "streaming transform finished");
        Ok(RunSummary {
            run_id,
            rows_written: total,
            notifications,
        })
    }
}
