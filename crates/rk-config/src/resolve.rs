//! Config resolution: explicit path → `ROWKIT_CONFIG` → XDG config dir → defaults.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::pipeline::PipelineConfig;
use crate::validate::ConfigError;

/// Environment variable naming a pipeline configuration file.
pub const CONFIG_ENV_VAR: &str = "ROWKIT_CONFIG";

/// File name looked up in the user config directory.
pub const CONFIG_FILE_NAME: &str = "pipeline.json";

/// Where the resolved configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit,
    Environment,
    UserDir,
    Defaults,
}

/// Candidate configuration locations, in precedence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPaths {
    pub explicit: Option<PathBuf>,
    pub env: Option<PathBuf>,
    pub user: Option<PathBuf>,
}

impl ConfigPaths {
    /// Collect candidates from the process environment.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            explicit: explicit.map(Path::to_path_buf),
            env: std::env::var_os(CONFIG_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            user: dirs::config_dir().map(|d| d.join("rowkit").join(CONFIG_FILE_NAME)),
        }
    }
}

/// Resolve the pipeline configuration using the process environment.
pub fn resolve_config(
    explicit: Option<&Path>,
) -> Result<(PipelineConfig, ConfigSource), ConfigError> {
    resolve_from(&ConfigPaths::discover(explicit))
}

/// Resolve the pipeline configuration from a fixed set of candidates.
///
/// Explicit and environment paths must exist; the user-dir file is optional.
pub fn resolve_from(paths: &ConfigPaths) -> Result<(PipelineConfig, ConfigSource), ConfigError> {
    let required = [
        (paths.explicit.as_deref(), ConfigSource::Explicit),
        (paths.env.as_deref(), ConfigSource::Environment),
    ];
    for (path, source) in required {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            debug!(path = %path.display(), ?source, "loading pipeline config");
            return Ok((PipelineConfig::from_file(path)?, source));
        }
    }

    if let Some(path) = paths.user.as_deref().filter(|p| p.exists()) {
        debug!(path = %path.display(), "loading pipeline config from user dir");
        return Ok((PipelineConfig::from_file(path)?, ConfigSource::UserDir));
    }

    info!("no pipeline config found, using defaults");
    Ok((PipelineConfig::default(), ConfigSource::Defaults))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_explicit_wins_over_env() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write_config(dir.path(), "a.json", r#"{"key_base": 1}"#);
        let env = write_config(dir.path(), "b.json", r#"{"key_base": 2}"#);
        let paths = ConfigPaths {
            explicit: Some(explicit),
            env: Some(env),
            user: None,
        };
        let (cfg, source) = resolve_from(&paths).unwrap();
        assert_eq!(source, ConfigSource::Explicit);
        assert_eq!(cfg.key_base, 1);
    }

    #[test]
    fn test_env_used_without_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let env = write_config(dir.path(), "b.json", r#"{"key_base": 2}"#);
        let paths = ConfigPaths {
            explicit: None,
            env: Some(env),
            user: None,
        };
        let (cfg, source) = resolve_from(&paths).unwrap();
        assert_eq!(source, ConfigSource::Environment);
        assert_eq!(cfg.key_base, 2);
    }

    #[test]
    fn test_missing_explicit_is_error() {
        let paths = ConfigPaths {
            explicit: Some(PathBuf::from("/nonexistent/pipeline.json")),
            ..ConfigPaths::default()
        };
        assert!(matches!(resolve_from(&paths), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_missing_user_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths {
            user: Some(dir.path().join("pipeline.json")),
            ..ConfigPaths::default()
        };
        let (cfg, source) = resolve_from(&paths).unwrap();
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(cfg, PipelineConfig::default());
    }

    #[test]
    fn test_user_file_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let user = write_config(dir.path(), "pipeline.json", r#"{"sampling_step": 0}"#);
        let paths = ConfigPaths {
            user: Some(user),
            ..ConfigPaths::default()
        };
        let (cfg, source) = resolve_from(&paths).unwrap();
        assert_eq!(source, ConfigSource::UserDir);
        assert_eq!(cfg.sampling_step, 0);
    }
}
