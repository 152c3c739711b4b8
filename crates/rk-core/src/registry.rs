//! Cell type registry.
//!
//! Maps type descriptors to value→cell constructors. The built-in types are
//! reachable by their fully qualified descriptor, by a short name (`int`,
//! `long`, `double`, `string`), by the declaration aliases (`Integer`, ...)
//! and by their simple name (`IntCell`, ...). Extension types declared by a
//! pipeline configuration are added at setup time with [`CellTypeRegistry::declare`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rk_common::types::{BUILTIN_SHORT_NAMES, DECLARATION_ALIASES};
use rk_common::{Error, Result};
use rk_config::{normalize_type_name, PipelineConfig};
use tracing::debug;

use crate::builder::RowBuilder;
use crate::cell::{Cell, TypeDescriptor, Value};

/// Value→cell constructor stored in the registry.
pub type Constructor = Arc<dyn Fn(Value) -> Result<Cell> + Send + Sync>;

/// Registry of cell constructors keyed by type descriptor.
#[derive(Clone)]
pub struct CellTypeRegistry {
    constructors: HashMap<TypeDescriptor, Constructor>,
    aliases: HashMap<String, TypeDescriptor>,
}

impl CellTypeRegistry {
    /// A registry with no types at all.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// A registry holding the four built-in types and their aliases.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry
            .register(TypeDescriptor::INT, int_cell)
            .register(TypeDescriptor::LONG, long_cell)
            .register(TypeDescriptor::DOUBLE, double_cell)
            .register(TypeDescriptor::STRING, string_cell);

        for (alias, descriptor) in BUILTIN_SHORT_NAMES.iter().chain(DECLARATION_ALIASES.iter()) {
            registry.register_alias(*alias, TypeDescriptor::from(*descriptor));
        }
        for descriptor in [
            TypeDescriptor::INT,
            TypeDescriptor::LONG,
            TypeDescriptor::DOUBLE,
            TypeDescriptor::STRING,
        ] {
            registry.register_alias(descriptor.simple_name().to_string(), descriptor.clone());
        }
        registry
    }

    /// Built-ins plus every column type the configuration declares.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut registry = Self::with_builtins();
        registry.declare(config.declared_types());
        registry
    }

    /// Insert or replace the constructor for `descriptor`. Last write wins.
    pub fn register<F>(
        &mut self,
        descriptor: impl Into<TypeDescriptor>,
        constructor: F,
    ) -> &mut Self
    where
        F: Fn(Value) -> Result<Cell> + Send + Sync + 'static,
    {
        let descriptor = descriptor.into();
        let label = descriptor.to_string();
        if self
            .constructors
            .insert(descriptor, Arc::new(constructor))
            .is_some()
        {
            debug!(descriptor = %label, "cell constructor replaced");
        }
        self
    }

    /// Make `alias` resolve to `descriptor`.
    pub fn register_alias(
        &mut self,
        alias: impl Into<String>,
        descriptor: impl Into<TypeDescriptor>,
    ) -> &mut Self {
        self.aliases.insert(alias.into(), descriptor.into());
        self
    }

    /// Register configuration-declared types.
    ///
    /// Each descriptor not registered yet gets a pass-through constructor that
    /// stores the value unchanged, and its simple name becomes an alias unless
    /// that name already resolves to another type. Declaring an already
    /// registered type keeps its constructor.
    pub fn declare<I, S>(&mut self, descriptors: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in descriptors {
            let name = normalize_type_name(name.as_ref());
            if name.is_empty() {
                continue;
            }
            let descriptor = TypeDescriptor::from(name.to_string());
            if !self.constructors.contains_key(name) {
                let stored = descriptor.clone();
                self.register(descriptor.clone(), move |value| {
                    Ok(Cell::new(stored.clone(), value))
                });
                debug!(descriptor = %descriptor, "declared extension cell type");
            }
            let simple = descriptor.simple_name();
            if simple == name {
                continue;
            }
            let taken = self.resolve(simple).is_some_and(|existing| existing != &descriptor);
            if taken {
                debug!(
                    descriptor = %descriptor,
                    alias = simple,
                    "simple name already in use, alias skipped"
                );
            } else {
                let simple = simple.to_string();
                self.register_alias(simple, descriptor);
            }
        }
        self
    }

    /// Resolve a descriptor or alias to the registered descriptor.
    pub fn resolve(&self, name: &str) -> Option<&TypeDescriptor> {
        match self.constructors.get_key_value(name) {
            Some((descriptor, _)) => Some(descriptor),
            None => self
                .aliases
                .get(name)
                .filter(|d| self.constructors.contains_key(d.as_str())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Build a cell through the constructor registered for `name`.
    pub fn construct(&self, name: &str, value: impl Into<Value>) -> Result<Cell> {
        let descriptor = self.resolve(name).ok_or_else(|| Error::UnknownType {
            descriptor: name.to_string(),
        })?;
        let constructor = &self.constructors[descriptor.as_str()];
        constructor(value.into())
    }

    /// Start a row builder backed by this registry.
    pub fn row(&self) -> RowBuilder<'_> {
        RowBuilder::new(self)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.constructors.keys()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl Default for CellTypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for CellTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut descriptors: Vec<_> = self.constructors.keys().map(|d| d.as_str()).collect();
        descriptors.sort_unstable();
        f.debug_struct("CellTypeRegistry")
            .field("descriptors", &descriptors)
            .field("aliases", &self.aliases.len())
            .finish()
    }
}

// ── Built-in constructors ───────────────────────────────────────────────

fn rejected(descriptor: &TypeDescriptor, reason: String) -> Error {
    Error::InvalidValue {
        descriptor: descriptor.to_string(),
        reason,
    }
}

fn int_cell(value: Value) -> Result<Cell> {
    match value {
        Value::Integer(v) if i32::try_from(v).is_ok() => Ok(Cell::new(TypeDescriptor::INT, v)),
        Value::Integer(v) => Err(rejected(
            &TypeDescriptor::INT,
            format!("{} does not fit in 32 bits", v),
        )),
        other => Err(rejected(
            &TypeDescriptor::INT,
            format!("expected integer, got {}", other.kind()),
        )),
    }
}

fn long_cell(value: Value) -> Result<Cell> {
    match value {
        Value::Integer(v) => Ok(Cell::new(TypeDescriptor::LONG, v)),
        other => Err(rejected(
            &TypeDescriptor::LONG,
            format!("expected integer, got {}", other.kind()),
        )),
    }
}

fn double_cell(value: Value) -> Result<Cell> {
    match value {
        Value::Float(v) => Ok(Cell::new(TypeDescriptor::DOUBLE, v)),
        Value::Integer(v) => Ok(Cell::new(TypeDescriptor::DOUBLE, v as f64)),
        other => Err(rejected(
            &TypeDescriptor::DOUBLE,
            format!("expected number, got {}", other.kind()),
        )),
    }
}

fn string_cell(value: Value) -> Result<Cell> {
    match value {
        Value::Text(v) => Ok(Cell::new(TypeDescriptor::STRING, v)),
        other => Err(rejected(
            &TypeDescriptor::STRING,
            format!("expected text, got {}", other.kind()),
        )),
    }
}
