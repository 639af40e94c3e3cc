//! Loading `SimConfig` from a JSON file.
//!
//! Every field is optional in the file; missing ones take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use bastion_sim::SimConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub fn load_sim_config(path: &Path) -> Result<SimConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sim_config(&contents).map_err(|e| match e {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

pub fn parse_sim_config(json: &str) -> Result<SimConfig, ConfigError> {
    let config: SimConfig = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &SimConfig) -> Result<(), ConfigError> {
    if !(config.max_delta.is_finite() && config.max_delta > 0.0) {
        return Err(ConfigError::Invalid(format!(
            "max_delta must be positive, got {}",
            config.max_delta
        )));
    }
    if !(config.cutscene_secs.is_finite() && config.cutscene_secs >= 0.0) {
        return Err(ConfigError::Invalid(format!(
            "cutscene_secs must be non-negative, got {}",
            config.cutscene_secs
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(parse_sim_config("{}").unwrap(), SimConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_sim_config(r#"{ "seed": 7, "cutscene_secs": 1.5 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.cutscene_secs, 1.5);
        assert_eq!(config.max_delta, SimConfig::default().max_delta);
    }

    #[test]
    fn test_rejects_non_positive_delta() {
        let err = parse_sim_config(r#"{ "max_delta": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = parse_sim_config("{ seed: 1 }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_sim_config(Path::new("/nonexistent/bastion.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
