use serde::Serialize;
use std::fmt;

use crate::response::{graphql_error::GraphQLError, value::Value};

#[derive(Clone, Debug, Default, Serialize)]
pub struct ExecutionResponse {
    pub data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
}

impl fmt::Display for ExecutionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let serialized = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", serialized)
    }
}
