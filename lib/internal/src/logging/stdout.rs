use hive_tree_executor_config::log::{LogFormat, LoggingConfig};
use tracing_subscriber::{
    fmt::{format::FmtSpan, time::UtcTime},
    Layer,
};

use crate::logging::utils::{create_env_filter, DynLayer};

pub fn build_stdout_layer<S>(config: &LoggingConfig) -> DynLayer<S>
where
    S: tracing::Subscriber
        + for<'span> tracing_subscriber::registry::LookupSpan<'span>
        + Send
        + Sync,
{
    let filter = create_env_filter(config);
    let timer = UtcTime::rfc_3339();

    match config.format {
        LogFormat::PrettyTree => tracing_tree::HierarchicalLayer::new(2)
            .with_bracketed_fields(true)
            .with_deferred_spans(false)
            .with_wraparound(25)
            .with_indent_lines(true)
            .with_timer(tracing_tree::time::Uptime::default())
            .with_thread_names(false)
            .with_thread_ids(false)
            .with_targets(false)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_timer(timer)
            .with_thread_ids(false)
            .with_target(false)
            .flatten_event(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter)
            .boxed(),
        LogFormat::PrettyCompact => tracing_subscriber::fmt::layer()
            .compact()
            .with_timer(timer)
            .with_thread_ids(false)
            .with_target(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter)
            .boxed(),
    }
}
