pub mod stdout;
pub mod utils;

use hive_tree_executor_config::log::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::logging::{stdout::build_stdout_layer, utils::DynLayer};

#[derive(Debug, thiserror::Error)]
pub enum LoggingInitError {
    #[error("Failed to install the global tracing subscriber: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

pub fn logging_layer_from_config<S>(config: &LoggingConfig) -> DynLayer<S>
where
    S: tracing::Subscriber
        + for<'span> tracing_subscriber::registry::LookupSpan<'span>
        + Send
        + Sync,
{
    build_stdout_layer(config)
}

/// Installs the configured layer as the global subscriber.
/// Fails when another global subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingInitError> {
    tracing_subscriber::registry()
        .with(logging_layer_from_config(config))
        .try_init()?;

    Ok(())
}
