use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExecutionConfig {
    /// How unresolved objects are grouped between resolution rounds.
    ///
    /// Can also be set via the `EXECUTION_STRATEGY` environment variable.
    #[serde(default)]
    pub strategy: ExecutionStrategyKind,

    /// Limits the amount of resolver invocations that are in flight at the same time
    /// within a single fetch step.
    ///
    /// Can also be set via the `MAX_CONCURRENT_RESOLVERS` environment variable.
    #[serde(default = "default_max_concurrent_resolvers")]
    pub max_concurrent_resolvers: usize,

    /// Upper bound for the number of resolution rounds (one round per object depth level).
    /// Exceeding it aborts the execution with an internal error.
    #[serde(default = "default_max_resolution_rounds")]
    pub max_resolution_rounds: usize,

    /// When enabled, a panicking resolver is reported as a field error instead of
    /// tearing down the whole execution.
    #[serde(default = "default_catch_resolver_panics")]
    pub catch_resolver_panics: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            strategy: ExecutionStrategyKind::default(),
            max_concurrent_resolvers: default_max_concurrent_resolvers(),
            max_resolution_rounds: default_max_resolution_rounds(),
            catch_resolver_panics: default_catch_resolver_panics(),
        }
    }
}

fn default_max_concurrent_resolvers() -> usize {
    64
}

fn default_max_resolution_rounds() -> usize {
    256
}

fn default_catch_resolver_panics() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategyKind {
    /// Objects sharing the same sub-selection are resolved together, one resolver call per field
    /// for the whole group when the resolver supports batching.
    #[default]
    Batched,
    /// Every object is resolved on its own.
    PerObject,
}

impl ExecutionStrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStrategyKind::Batched => "batched",
            ExecutionStrategyKind::PerObject => "per_object",
        }
    }
}

impl FromStr for ExecutionStrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "batched" => Ok(ExecutionStrategyKind::Batched),
            "per_object" | "per-object" => Ok(ExecutionStrategyKind::PerObject),
            _ => Err(format!("Invalid execution strategy: {}", s)),
        }
    }
}
