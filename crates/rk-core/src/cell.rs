//! Cells: immutable (type descriptor, value) pairs.
//!
//! The typed accessors (`as_double`, `as_integer`, `as_long`, `as_text`) are
//! how transforms read input values back out of a row.

use std::borrow::{Borrow, Cow};
use std::fmt;

use rk_common::types::{self, DOUBLE_CELL, INT_CELL, LONG_CELL, STRING_CELL};
use rk_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Identifier naming a cell's logical type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeDescriptor(Cow<'static, str>);

impl TypeDescriptor {
    pub const INT: TypeDescriptor = TypeDescriptor(Cow::Borrowed(INT_CELL));
    pub const LONG: TypeDescriptor = TypeDescriptor(Cow::Borrowed(LONG_CELL));
    pub const DOUBLE: TypeDescriptor = TypeDescriptor(Cow::Borrowed(DOUBLE_CELL));
    pub const STRING: TypeDescriptor = TypeDescriptor(Cow::Borrowed(STRING_CELL));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        TypeDescriptor(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segment after the last `.` (`rowkit.data.IntCell` → `IntCell`).
    pub fn simple_name(&self) -> &str {
        types::simple_name(&self.0)
    }

    pub fn is_builtin(&self) -> bool {
        [INT_CELL, LONG_CELL, DOUBLE_CELL, STRING_CELL].contains(&self.as_str())
    }
}

impl Borrow<str> for TypeDescriptor {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TypeDescriptor {
    fn from(name: &'static str) -> Self {
        TypeDescriptor(Cow::Borrowed(name))
    }
}

impl From<String> for TypeDescriptor {
    fn from(name: String) -> Self {
        TypeDescriptor(Cow::Owned(name))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Externally supplied value object, stored as-is.
    Object(serde_json::Value),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Object(_) => "object",
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Object(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::Object(v) => write!(f, "{}", v),
        }
    }
}

/// A single typed value within a row. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    descriptor: TypeDescriptor,
    value: Value,
}

impl Cell {
    pub fn new(descriptor: impl Into<TypeDescriptor>, value: impl Into<Value>) -> Self {
        Self {
            descriptor: descriptor.into(),
            value: value.into(),
        }
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (TypeDescriptor, Value) {
        (self.descriptor, self.value)
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::ValueMismatch {
            expected,
            actual: self.value.kind(),
        }
    }

    /// Read as a double. Integer cells are widened.
    pub fn as_double(&self) -> Result<f64> {
        match self.value {
            Value::Float(v) => Ok(v),
            Value::Integer(v) => Ok(v as f64),
            _ => Err(self.mismatch("double")),
        }
    }

    /// Read as a 32-bit integer.
    pub fn as_integer(&self) -> Result<i32> {
        match self.value {
            Value::Integer(v) => i32::try_from(v).map_err(|_| self.mismatch("int")),
            _ => Err(self.mismatch("int")),
        }
    }

    /// Read as a 64-bit integer.
    pub fn as_long(&self) -> Result<i64> {
        match self.value {
            Value::Integer(v) => Ok(v),
            _ => Err(self.mismatch("long")),
        }
    }

    pub fn as_text(&self) -> Result<&str> {
        match &self.value {
            Value::Text(v) => Ok(v),
            _ => Err(self.mismatch("text")),
        }
    }

    pub fn as_object(&self) -> Result<&serde_json::Value> {
        match &self.value {
            Value::Object(v) => Ok(v),
            _ => Err(self.mismatch("object")),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}
