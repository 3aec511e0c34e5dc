use serde::{Deserialize, Serialize};
use std::fmt;

use crate::response::{path::PathSegment, path::ResponsePath, value::Value};

/// A client-facing error, with an absolute path and absolute source locations.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<GraphQLErrorLocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<ResponsePath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
    #[serde(skip)]
    pub kind: GraphQLErrorKind,
}

impl From<String> for GraphQLError {
    fn from(message: String) -> Self {
        GraphQLError {
            message,
            locations: None,
            path: None,
            extensions: None,
            kind: GraphQLErrorKind::default(),
        }
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} (at {})", self.message, path),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct GraphQLErrorLocation {
    pub line: usize,
    pub column: usize,
}

/// What produced a field error. Not part of the serialized error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum GraphQLErrorKind {
    /// Raised or reported by a field resolver.
    #[default]
    DataFetching,
    /// A scalar or enum value could not be serialized.
    Serialization,
    /// The fetched value does not match the shape of the field type.
    TypeMismatch,
    /// The concrete object type of an abstract position could not be determined.
    UnresolvedType,
    ArgumentCoercion,
}

impl GraphQLErrorKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// An error reported by a resolver, positioned relative to the field being resolved.
///
/// `path` is appended to the path of the field, and every entry of `locations`
/// is an offset from the location of the field in the document.
/// `kind` defaults to [`GraphQLErrorKind::DataFetching`] when not set.
/// See [`crate::response::error_normalization`] for the translation rules.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub message: String,
    pub path: Option<Vec<PathSegment>>,
    pub locations: Option<Vec<GraphQLErrorLocation>>,
    pub extensions: Option<Value>,
    pub kind: Option<GraphQLErrorKind>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            locations: None,
            extensions: None,
            kind: None,
        }
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_locations(mut self, locations: Vec<GraphQLErrorLocation>) -> Self {
        self.locations = Some(locations);
        self
    }

    pub fn with_extensions(mut self, extensions: Value) -> Self {
        self.extensions = Some(extensions);
        self
    }

    pub fn with_kind(mut self, kind: GraphQLErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::new(message)
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        FieldError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use crate::response::{
        graphql_error::{GraphQLError, GraphQLErrorKind, GraphQLErrorLocation},
        path::ResponsePath,
    };

    #[test]
    fn serializes_without_kind_and_empty_fields() {
        let error = GraphQLError {
            message: "boom".to_string(),
            locations: Some(vec![GraphQLErrorLocation { line: 2, column: 5 }]),
            path: Some(ResponsePath::root().with_key("a").with_index(1)),
            extensions: None,
            kind: GraphQLErrorKind::Serialization,
        };

        assert_eq!(
            serde_json::to_string(&error).expect("serializable"),
            r#"{"message":"boom","locations":[{"line":2,"column":5}],"path":["a",1]}"#
        );
        assert_eq!(error.to_string(), "boom (at a.1)");
        assert_eq!(error.kind.as_str(), "serialization");
    }

    #[test]
    fn deserializes_partial_errors() {
        let error: GraphQLError =
            serde_json::from_str(r#"{"message":"nope","path":["x"]}"#).expect("valid error");

        assert_eq!(error.path, Some(ResponsePath::root().with_key("x")));
        assert!(error.locations.is_none());
        assert_eq!(error.kind, GraphQLErrorKind::DataFetching);
    }
}
