//! Table collaborators.
//!
//! The streaming transformer reads through [`InputTable`] and writes through
//! [`OutputAppender`]; storage engines implement these. [`Table`] is the
//! in-memory implementation of both.

use rk_common::Result;
use serde::Serialize;

use crate::row::Row;

/// Indexed, stably ordered read access to a table.
pub trait InputTable {
    fn len(&self) -> usize;

    /// Row at `index`, for `index < len()`.
    fn row(&self, index: usize) -> Option<&Row>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Append-only sink for output rows.
pub trait OutputAppender {
    fn append(&mut self, row: Row) -> Result<()>;
}

impl<T: InputTable + ?Sized> InputTable for &T {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn row(&self, index: usize) -> Option<&Row> {
        (**self).row(index)
    }
}

impl<T: OutputAppender + ?Sized> OutputAppender for &mut T {
    fn append(&mut self, row: Row) -> Result<()> {
        (**self).append(row)
    }
}

impl InputTable for [Row] {
    fn len(&self) -> usize {
        <[Row]>::len(self)
    }

    fn row(&self, index: usize) -> Option<&Row> {
        self.get(index)
    }
}

impl InputTable for Vec<Row> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn row(&self, index: usize) -> Option<&Row> {
        self.get(index)
    }
}

impl OutputAppender for Vec<Row> {
    fn append(&mut self, row: Row) -> Result<()> {
        self.push(row);
        Ok(())
    }
}

/// In-memory, append-only table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl InputTable for Table {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }
}

impl OutputAppender for Table {
    fn append(&mut self, row: Row) -> Result<()> {
        self.rows.push(row);
        Ok(())
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
