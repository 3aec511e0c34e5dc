use config::{builder::BuilderState, ConfigBuilder, ConfigError};
use envconfig::Envconfig;
use tracing::debug;

use crate::{
    execution::ExecutionStrategyKind,
    log::{LogFormat, LogLevel},
};

#[derive(Envconfig)]
pub struct EnvVarOverrides {
    // Logger overrides
    #[envconfig(from = "LOG_LEVEL")]
    pub log_level: Option<LogLevel>,
    #[envconfig(from = "LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
    #[envconfig(from = "LOG_FILTER")]
    pub log_filter: Option<String>,

    // Execution overrides
    #[envconfig(from = "EXECUTION_STRATEGY")]
    pub execution_strategy: Option<ExecutionStrategyKind>,
    #[envconfig(from = "MAX_CONCURRENT_RESOLVERS")]
    pub max_concurrent_resolvers: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum EnvVarOverridesError {
    #[error("Failed to override configuration: {0}")]
    FailedToOverrideConfig(#[from] ConfigError),
    #[error("MAX_CONCURRENT_RESOLVERS must be greater than zero")]
    ZeroConcurrency,
}

impl EnvVarOverrides {
    pub fn apply_overrides<T: BuilderState>(
        mut self,
        mut config: ConfigBuilder<T>,
    ) -> Result<ConfigBuilder<T>, EnvVarOverridesError> {
        if let Some(log_level) = self.log_level.take() {
            debug!("[config-override] 'log.level' = {:?}", log_level);
            config = config.set_override("log.level", log_level.as_str())?;
        }
        if let Some(log_format) = self.log_format.take() {
            debug!("[config-override] 'log.format' = {:?}", log_format);
            config = config.set_override("log.format", log_format.as_str())?;
        }
        if let Some(log_filter) = self.log_filter.take() {
            debug!("[config-override] 'log.filter' = {:?}", log_filter);
            config = config.set_override("log.filter", log_filter)?;
        }

        if let Some(strategy) = self.execution_strategy.take() {
            debug!("[config-override] 'execution.strategy' = {:?}", strategy);
            config = config.set_override("execution.strategy", strategy.as_str())?;
        }
        if let Some(max_concurrent) = self.max_concurrent_resolvers.take() {
            if max_concurrent == 0 {
                return Err(EnvVarOverridesError::ZeroConcurrency);
            }
            debug!(
                "[config-override] 'execution.max_concurrent_resolvers' = {}",
                max_concurrent
            );
            config = config.set_override("execution.max_concurrent_resolvers", max_concurrent)?;
        }

        Ok(config)
    }
}
