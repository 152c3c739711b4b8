//! Output table specs.
//!
//! Computed once during setup from the input spec and the configured column
//! declarations, before any row is streamed.

use std::collections::HashSet;

use rk_common::{Error, Result};
use rk_config::PipelineConfig;
use serde::{Deserialize, Serialize};

use crate::cell::TypeDescriptor;
use crate::registry::CellTypeRegistry;
use crate::row::Row;

/// Name and type of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub descriptor: TypeDescriptor,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, descriptor: impl Into<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// Ordered column layout of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spec, rejecting duplicate column names.
    pub fn from_columns(columns: Vec<ColumnSpec>) -> Result<Self> {
        let mut spec = Self::new();
        for column in columns {
            spec.push(column)?;
        }
        Ok(spec)
    }

    pub fn push(&mut self, column: ColumnSpec) -> Result<()> {
        if self.column_index(&column.name).is_some() {
            return Err(Error::InvalidConfig(format!(
                "duplicate column name: {}",
                column.name
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Whether `row` has one cell per column with matching types.
    pub fn conforms(&self, row: &Row) -> bool {
        row.len() == self.columns.len()
            && row
                .iter()
                .zip(&self.columns)
                .all(|(cell, column)| cell.descriptor() == &column.descriptor)
    }

    /// Layout of the output table for a pipeline.
    ///
    /// With `append_columns` set and an input present, the input columns come
    /// first; the declared columns follow in declaration order. Every declared
    /// type must resolve in `registry`.
    pub fn output_spec(
        input: Option<&TableSpec>,
        config: &PipelineConfig,
        registry: &CellTypeRegistry,
    ) -> Result<TableSpec> {
        let mut spec = match input {
            Some(input) if config.append_columns => input.clone(),
            _ => TableSpec::new(),
        };

        let mut declared = HashSet::new();
        for column in &config.output_columns {
            if !declared.insert(column.name.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate output column name: {}",
                    column.name
                )));
            }
            let descriptor = registry.resolve(&column.type_name).ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "column '{}' declares unknown type {}",
                    column.name, column.type_name
                ))
            })?;
            spec.push(ColumnSpec::new(column.name.clone(), descriptor.clone()))?;
        }
        Ok(spec)
    }
}
