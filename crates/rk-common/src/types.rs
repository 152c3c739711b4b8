//! Fully qualified names of the built-in cell types.
//!
//! Shared by configuration (short-name normalization) and the cell registry.

pub const INT_CELL: &str = "rowkit.data.IntCell";
pub const LONG_CELL: &str = "rowkit.data.LongCell";
pub const DOUBLE_CELL: &str = "rowkit.data.DoubleCell";
pub const STRING_CELL: &str = "rowkit.data.StringCell";

/// Built-in types paired with the short names exposed for builder use.
pub const BUILTIN_SHORT_NAMES: [(&str, &str); 4] = [
    ("int", INT_CELL),
    ("long", LONG_CELL),
    ("double", DOUBLE_CELL),
    ("string", STRING_CELL),
];

/// Aliases accepted in column declarations.
pub const DECLARATION_ALIASES: [(&str, &str); 4] = [
    ("Integer", INT_CELL),
    ("Long", LONG_CELL),
    ("Double", DOUBLE_CELL),
    ("String", STRING_CELL),
];

/// Simple name of a fully qualified type: the segment after the last `.`.
pub fn simple_name(descriptor: &str) -> &str {
    descriptor.rsplit('.').next().unwrap_or(descriptor)
}
