//! Rows: ordered cells under one key.

use rk_common::{Error, Result, RowKey};
use serde::Serialize;

use crate::builder::RowBuilder;
use crate::cell::Cell;

/// An immutable row. Extending a row produces a new row with the same key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    key: RowKey,
    cells: Vec<Cell>,
}

impl Row {
    /// Create a row. A row always carries at least one cell.
    pub fn new(key: RowKey, cells: Vec<Cell>) -> Result<Self> {
        if cells.is_empty() {
            return Err(Error::EmptyRow);
        }
        Ok(Self { key, cells })
    }

    pub fn key(&self) -> RowKey {
        self.key
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Cell at `index`; negative indices count from the end (`-1` is the last cell).
    pub fn at(&self, index: isize) -> Result<&Cell> {
        let len = self.cells.len();
        let resolved = if index < 0 {
            len as isize + index
        } else {
            index
        };
        usize::try_from(resolved)
            .ok()
            .and_then(|i| self.cells.get(i))
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// New row holding this row's cells followed by the builder's, under
    /// this row's key. `self` is left untouched.
    pub fn append(&self, builder: RowBuilder<'_>) -> Row {
        self.append_cells(builder.into_cells())
    }

    pub fn append_cells(&self, cells: impl IntoIterator<Item = Cell>) -> Row {
        let mut all = self.cells.clone();
        all.extend(cells);
        Row {
            key: self.key,
            cells: all,
        }
    }

    /// Copy of this row under a different key.
    pub fn with_key(&self, key: RowKey) -> Row {
        Row {
            key,
            cells: self.cells.clone(),
        }
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
