//! Fluent row construction.
//!
//! ```
//! use rk_core::{CellTypeRegistry, RowKey};
//!
//! let registry = CellTypeRegistry::default();
//! let row = registry
//!     .row()
//!     .string("Hi!")?
//!     .int(3)?
//!     .build(RowKey(0))?;
//! assert_eq!(row.at(-1)?.as_integer()?, 3);
//! # Ok::<(), rk_common::Error>(())
//! ```

use rk_common::{Error, Result, RowKey};

use crate::cell::{Cell, Value};
use crate::registry::CellTypeRegistry;
use crate::row::Row;

/// Accumulates the cells of one row in call order.
///
/// Consumed by [`RowBuilder::build`]; create a fresh builder per row.
#[derive(Debug, Clone)]
pub struct RowBuilder<'r> {
    registry: &'r CellTypeRegistry,
    cells: Vec<Cell>,
}

impl<'r> RowBuilder<'r> {
    pub fn new(registry: &'r CellTypeRegistry) -> Self {
        Self {
            registry,
            cells: Vec::new(),
        }
    }

    /// Construct a cell of type `name` (descriptor or alias) and append it.
    pub fn with_cell(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        let cell = self.registry.construct(name, value)?;
        self.cells.push(cell);
        Ok(self)
    }

    pub fn int(self, value: i32) -> Result<Self> {
        self.with_cell("int", value)
    }

    pub fn long(self, value: i64) -> Result<Self> {
        self.with_cell("long", value)
    }

    pub fn double(self, value: f64) -> Result<Self> {
        self.with_cell("double", value)
    }

    pub fn string(self, value: impl Into<String>) -> Result<Self> {
        let value: String = value.into();
        self.with_cell("string", value)
    }

    /// Append an already constructed cell.
    pub fn push(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Append every cell of `other`, preserving its order.
    pub fn with_cells(mut self, other: RowBuilder<'_>) -> Self {
        self.cells.extend(other.cells);
        self
    }

    pub fn registry(&self) -> &'r CellTypeRegistry {
        self.registry
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Materialize the row under `key`. Fails with [`Error::EmptyRow`] when
    /// no cell was added.
    pub fn build(self, key: RowKey) -> Result<Row> {
        if self.cells.is_empty() {
            return Err(Error::EmptyRow);
        }
        Row::new(key, self.cells)
    }
}
