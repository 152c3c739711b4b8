//! Pipeline configuration types.
//!
//! A pipeline declares the columns it appends to (or creates in) the output
//! table, the progress sampling mask, and the first row key of the session.

use std::path::Path;

use rk_common::types::DECLARATION_ALIASES;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validate::{validate_pipeline, ConfigError};

/// Default progress sampling mask (`0x2FF`).
pub const DEFAULT_SAMPLING_STEP: u64 = 0x2FF;

/// One declared output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OutputColumn {
    /// Column name in the output table spec.
    pub name: String,

    /// Cell type: a short alias (`String`, `Integer`, `Long`, `Double`) or a
    /// fully qualified type descriptor.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl OutputColumn {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line human-readable output.
    #[default]
    Pretty,
    /// Single-line human-readable output.
    Compact,
    /// Newline-delimited JSON events.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LoggingConfig {
    /// Filter directive used when `ROWKIT_LOG` is unset (e.g. `info`, `rk_core=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PipelineConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Keep the input columns and append the declared ones after them.
    /// Ignored when the pipeline has no input table.
    #[serde(default = "default_append_columns")]
    pub append_columns: bool,

    #[serde(default)]
    pub output_columns: Vec<OutputColumn>,

    /// Bitmask for progress sampling: row `i` reports when `i & mask == 0`.
    #[serde(default = "default_sampling_step")]
    pub sampling_step: u64,

    /// First key handed out by the session's key allocator.
    #[serde(default)]
    pub key_base: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_schema_version() -> String {
    rk_common::SCHEMA_VERSION.to_string()
}

fn default_append_columns() -> bool {
    true
}

fn default_sampling_step() -> u64 {
    DEFAULT_SAMPLING_STEP
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            append_columns: default_append_columns(),
            output_columns: Vec::new(),
            sampling_step: DEFAULT_SAMPLING_STEP,
            key_base: 0,
            logging: LoggingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_json(&content)
    }

    /// Parse, normalize and validate configuration from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: PipelineConfig = serde_json::from_str(json)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Rewrite short column type aliases to fully qualified descriptors.
    pub fn normalize(&mut self) {
        for column in &mut self.output_columns {
            let normalized = normalize_type_name(&column.type_name);
            if normalized != column.type_name {
                column.type_name = normalized.to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pipeline(self)
    }

    /// Declared column types in declaration order, normalized.
    pub fn declared_types(&self) -> Vec<&str> {
        self.output_columns
            .iter()
            .map(|c| normalize_type_name(&c.type_name))
            .collect()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.output_columns.iter().map(|c| c.name.as_str())
    }
}

/// Map a declaration alias (`String`, `Integer`, `Long`, `Double`) to its
/// fully qualified descriptor. Other names are returned trimmed.
pub fn normalize_type_name(name: &str) -> &str {
    let name = name.trim();
    DECLARATION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, descriptor)| *descriptor)
        .unwrap_or(name)
}

/// JSON Schema of `pipeline.json`.
pub fn config_schema() -> serde_json::Value {
    schemars::schema_for!(PipelineConfig).to_value()
}
