//! rowkit pipeline configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for `pipeline.json`
//! - Normalization of short column type names to fully qualified descriptors
//! - Config resolution (explicit path → env → XDG → defaults)
//! - Schema and semantic validation
//! - JSON Schema export for editor tooling

pub mod pipeline;
pub mod resolve;
pub mod validate;

pub use pipeline::{
    config_schema, normalize_type_name, LogFormat, LoggingConfig, OutputColumn, PipelineConfig,
    DEFAULT_SAMPLING_STEP,
};
pub use resolve::{resolve_config, resolve_from, ConfigPaths, ConfigSource, CONFIG_ENV_VAR};
pub use validate::ConfigError;

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = rk_common::SCHEMA_VERSION;
