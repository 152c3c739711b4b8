//! Semantic validation for pipeline configuration.

use std::collections::HashSet;

use crate::pipeline::PipelineConfig;

/// Errors raised while loading or validating a pipeline configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("unsupported schema version: {0}")]
    IncompatibleSchema(String),

    #[error("output column {index} has an empty name")]
    EmptyColumnName { index: usize },

    #[error("output column '{name}' has no type")]
    EmptyColumnType { name: String },

    #[error("duplicate output column name: {0}")]
    DuplicateColumn(String),

    #[error("configuration file not found: {0}")]
    NotFound(String),
}

impl From<ConfigError> for rk_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Parse(e) => rk_common::Error::Json(e),
            ConfigError::Io { source, .. } => rk_common::Error::Io(source),
            ConfigError::IncompatibleSchema(v) => rk_common::Error::SchemaValidation(format!(
                "schema version {} is not compatible with {}",
                v,
                rk_common::SCHEMA_VERSION
            )),
            ConfigError::NotFound(path) => {
                rk_common::Error::Config(format!("configuration file not found: {}", path))
            }
            other => rk_common::Error::InvalidConfig(other.to_string()),
        }
    }
}

/// Check a parsed configuration for semantic errors.
///
/// Column names must be non-empty and unique; every column needs a type.
pub fn validate_pipeline(config: &PipelineConfig) -> Result<(), ConfigError> {
    if !rk_common::schema::is_compatible(&config.schema_version) {
        return Err(ConfigError::IncompatibleSchema(config.schema_version.clone()));
    }

    let mut seen = HashSet::new();
    for (index, column) in config.output_columns.iter().enumerate() {
        let name = column.name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyColumnName { index });
        }
        if column.type_name.trim().is_empty() {
            return Err(ConfigError::EmptyColumnType {
                name: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateColumn(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::OutputColumn;

    fn config_with(columns: Vec<(&str, &str)>) -> PipelineConfig {
        PipelineConfig {
            output_columns: columns
                .into_iter()
                .map(|(name, ty)| OutputColumn::new(name, ty))
                .collect(),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_pipeline(&PipelineConfig::default()).is_ok());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let cfg = config_with(vec![("len", "Integer"), ("len", "Double")]);
        assert!(matches!(
            validate_pipeline(&cfg),
            Err(ConfigError::DuplicateColumn(name)) if name == "len"
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let cfg = config_with(vec![("ok", "String"), ("  ", "String")]);
        assert!(matches!(
            validate_pipeline(&cfg),
            Err(ConfigError::EmptyColumnName { index: 1 })
        ));
    }

    #[test]
    fn test_empty_type_rejected() {
        let cfg = config_with(vec![("greeting", "")]);
        assert!(matches!(
            validate_pipeline(&cfg),
            Err(ConfigError::EmptyColumnType { .. })
        ));
    }

    #[test]
    fn test_incompatible_schema_rejected() {
        let cfg = PipelineConfig {
            schema_version: "2.0.0".to_string(),
            ..PipelineConfig::default()
        };
        let err = validate_pipeline(&cfg).unwrap_err();
        let common: rk_common::Error = err.into();
        assert_eq!(common.code(), 12);
    }
}
