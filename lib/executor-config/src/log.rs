use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Logger of the executor. Every field can be overridden from the environment,
/// see `env_overrides`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level of the emitted events (`LOG_LEVEL`).
    #[serde(default)]
    pub level: LogLevel,

    /// Output format (`LOG_FORMAT`).
    #[serde(default)]
    pub format: LogFormat,

    /// `EnvFilter` directives, for example `hive_tree_executor::execution=trace`.
    /// Replaces `level` when set (`LOG_FILTER`).
    #[serde(default)]
    pub filter: Option<String>,
}

impl LoggingConfig {
    /// Directive the log filter is built from.
    pub fn env_filter_str(&self) -> &str {
        match &self.filter {
            Some(filter) => filter,
            None => self.level.as_str(),
        }
    }
}

/// Debug builds log at `debug` by default, release builds at `info`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    JsonSchema,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Trace,
    #[cfg_attr(debug_assertions, default)]
    Debug,
    #[cfg_attr(not(debug_assertions), default)]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Human readable output in debug builds, JSON lines in release builds.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    JsonSchema,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Nested spans, rendered by `tracing-tree`.
    PrettyTree,
    #[cfg_attr(debug_assertions, default)]
    PrettyCompact,
    #[cfg_attr(not(debug_assertions), default)]
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
