use hive_tree_executor_config::log::LoggingConfig;
use tracing_subscriber::{EnvFilter, Layer};

pub type DynLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Builds the filter from the configured directive.
/// An invalid directive falls back to the plain log level.
pub fn create_env_filter(config: &LoggingConfig) -> EnvFilter {
    match EnvFilter::try_new(config.env_filter_str()) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(config.level.as_str()),
    }
}
