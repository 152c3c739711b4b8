//! rowkit core: typed row building and streaming table transforms.
//!
//! - [`CellTypeRegistry`] maps type descriptors (and short names) to cell
//!   constructors; pipelines extend it with declared column types.
//! - [`RowBuilder`] chains typed cells into a [`Row`].
//! - [`KeyAllocator`] hands out the session's [`RowKey`]s.
//! - [`StreamingTransformer`] runs a per-row transform from an
//!   [`InputTable`] into an [`OutputAppender`], sampling progress as it goes.
//!
//! ```
//! use rk_core::{CellTypeRegistry, KeyAllocator, RecordingReporter, StreamingTransformer, Table};
//!
//! let registry = CellTypeRegistry::default();
//! let mut keys = KeyAllocator::new();
//! let input: Table = (1..=3)
//!     .map(|v| registry.row().int(v)?.build(keys.next()?))
//!     .collect::<Result<_, _>>()?;
//!
//! let mut output = Table::new();
//! let mut progress = RecordingReporter::new();
//! StreamingTransformer::new(&registry).run(
//!     &input,
//!     &mut output,
//!     &mut keys,
//!     &mut progress,
//!     |row, ctx| {
//!         let doubled = row.at(0)?.as_integer()? * 2;
//!         Ok::<_, rk_common::Error>(row.append(ctx.cells().int(doubled)?))
//!     },
//! )?;
//! assert_eq!(output.len(), 3);
//! # Ok::<(), rk_common::Error>(())
//! ```

pub mod builder;
pub mod cell;
pub mod keys;
pub mod logging;
pub mod progress;
pub mod registry;
pub mod row;
pub mod spec;
pub mod table;
pub mod transform;

pub use builder::RowBuilder;
pub use cell::{Cell, TypeDescriptor, Value};
pub use keys::KeyAllocator;
pub use progress::{
    format_label, NullReporter, ProgressReporter, ProgressSampler, RecordingReporter,
    TracingReporter,
};
pub use registry::{CellTypeRegistry, Constructor};
pub use row::Row;
pub use spec::{ColumnSpec, TableSpec};
pub use table::{InputTable, OutputAppender, Table};
pub use transform::{RunSummary, StreamingTransformer, TransformContext};

pub use rk_common::{Error, Result, RowKey};
