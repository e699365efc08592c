//! Reading configuration files.
//!
//! Loading stops at parsing. Semantic validation runs later, once CLI
//! overrides have been folded into the effective config, so a field the
//! flags replace never fails the run.

use std::fs;
use std::path::Path;

use crate::config::schema::LoadConfig;
use crate::config::validation::ValidationError;

/// Errors from assembling a run configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not valid TOML for the schema.
    Parse(toml::de::Error),
    /// The effective config failed semantic validation.
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "config file is not valid TOML: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "invalid configuration: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read and parse a configuration file.
pub fn load_config(path: &Path) -> Result<LoadConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = toml::from_str(&content).map_err(ConfigError::Parse)?;
    tracing::debug!(path = %path.display(), "Configuration file loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::validate_config;

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config(Path::new("/nonexistent/ledger-load.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let path = std::env::temp_dir().join("ledger-load-bad-toml.toml");
        fs::write(&path, "workload = [not toml").unwrap();
        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("not valid TOML"));
    }

    #[test]
    fn test_loading_leaves_validation_to_the_caller() {
        // users = 0 parses fine; only the post-override validation pass
        // may reject it.
        let path = std::env::temp_dir().join("ledger-load-loader-test.toml");
        fs::write(&path, "[workload]\nusers = 0\n").unwrap();
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.workload.users, 0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_errors_render_comma_separated() {
        let errors = vec![
            ValidationError {
                field: "workload.users".to_string(),
                message: "must be greater than zero".to_string(),
            },
            ValidationError {
                field: "node.url".to_string(),
                message: "invalid URL".to_string(),
            },
        ];
        let rendered = ConfigError::Validation(errors).to_string();
        assert!(rendered.contains("workload.users"));
        assert!(rendered.contains(", node.url"));
    }
}
