mod env_overrides;
pub mod execution;
pub mod log;

use config::{Config, File, FileFormat, FileSourceFile};
use envconfig::Envconfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{convert::Infallible, path::PathBuf};

use crate::{
    env_overrides::{EnvVarOverrides, EnvVarOverridesError},
    execution::ExecutionConfig,
    log::LoggingConfig,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExecutorConfig {
    /// The executor logger configuration.
    #[serde(default)]
    pub log: LoggingConfig,

    /// Configuration of the resolution loop: grouping strategy and resource limits.
    #[serde(default)]
    pub execution: ExecutionConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutorConfigError {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(#[from] config::ConfigError),
    #[error("Failed to apply configuration overrides: {0}")]
    EnvVarOverridesError(#[from] EnvVarOverridesError),
    #[error("Failed to load the environment variables: {0}")]
    EnvVarLoadError(#[from] envconfig::Error),
    #[error("Failed to parse the configuration file path: {0}")]
    ConfigPathParseError(Infallible),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

static DEFAULT_FILE_NAMES: &[&str] = &[
    "executor.config.yaml",
    "executor.config.yml",
    "executor.config.json",
];

/// Loads the configuration from the given file, or from one of the default file names in the
/// current directory, and applies the environment variable overrides on top.
pub fn load_config(override_config_path: Option<String>) -> Result<ExecutorConfig, ExecutorConfigError> {
    let env_overrides = EnvVarOverrides::init_from_env()?;
    let mut config = Config::builder();

    if let Some(path_str) = override_config_path {
        let path_buf = path_str
            .parse::<PathBuf>()
            .map_err(ExecutorConfigError::ConfigPathParseError)?;
        let as_file: File<FileSourceFile, _> = path_buf.into();

        config = config.add_source(as_file.required(true));
    } else {
        for name in DEFAULT_FILE_NAMES {
            config = config.add_source(File::with_name(name).required(false));
        }
    }

    config = env_overrides.apply_overrides(config)?;

    let loaded = config.build()?.try_deserialize::<ExecutorConfig>()?;
    loaded.validate()?;

    Ok(loaded)
}

pub fn parse_yaml_config(config_raw: String) -> Result<ExecutorConfig, ExecutorConfigError> {
    let parsed = Config::builder()
        .add_source(File::from_str(&config_raw, FileFormat::Yaml))
        .build()?
        .try_deserialize::<ExecutorConfig>()?;
    parsed.validate()?;

    Ok(parsed)
}

impl ExecutorConfig {
    fn validate(&self) -> Result<(), ExecutorConfigError> {
        if self.execution.max_concurrent_resolvers == 0 {
            return Err(ExecutorConfigError::Invalid(
                "execution.max_concurrent_resolvers must be greater than zero".to_string(),
            ));
        }
        if self.execution.max_resolution_rounds == 0 {
            return Err(ExecutorConfigError::Invalid(
                "execution.max_resolution_rounds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
